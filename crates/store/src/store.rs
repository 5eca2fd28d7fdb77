//! Concurrency-safe keyed storage of job records.
//!
//! All writes go through [`JobStore::transition`], an atomic
//! compare-and-transition: the status change and its accompanying field
//! patch are applied together while the record's shard is locked, so
//! concurrent writers racing on the same id cannot both win.

use chrono::Utc;
use dashmap::DashMap;

use scenagen_core::status::JobStatus;
use scenagen_core::types::JobId;

use crate::error::StoreError;
use crate::models::job::{Job, StatusPatch};

/// In-memory job store.
///
/// Backed by a sharded concurrent map: transitions on the same id are
/// serialized by the shard lock, while unrelated ids progress
/// independently. Constructed once at process start and shared via `Arc`.
pub struct JobStore {
    jobs: DashMap<JobId, Job>,
    max_jobs: usize,
}

impl JobStore {
    /// Create a store that tracks at most `max_jobs` records.
    ///
    /// The ceiling is a resource-exhaustion backstop; eviction of old
    /// terminal jobs is the responsibility of an external reaper.
    pub fn new(max_jobs: usize) -> Self {
        Self {
            jobs: DashMap::new(),
            max_jobs,
        }
    }

    /// Insert a fresh `Pending` job for `input` and return its record.
    ///
    /// Ids are UUIDv7, so every call returns a new id and id order follows
    /// creation order.
    pub fn create(&self, input: String) -> Result<Job, StoreError> {
        // len() is approximate while inserts race; the ceiling is a
        // backstop, not an exact quota.
        if self.jobs.len() >= self.max_jobs {
            return Err(StoreError::CapacityExhausted {
                max_jobs: self.max_jobs,
            });
        }

        let job = Job {
            id: uuid::Uuid::now_v7(),
            input,
            status: JobStatus::Pending,
            result: None,
            error: None,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
        };
        self.jobs.insert(job.id, job.clone());
        Ok(job)
    }

    /// Read-only snapshot of a job's current state.
    pub fn get(&self, id: JobId) -> Option<Job> {
        self.jobs.get(&id).map(|entry| entry.value().clone())
    }

    /// Atomically transition `id` from `expected` to `next`, applying
    /// `patch` in the same step.
    ///
    /// Fails with [`StoreError::Conflict`] if the record's current status
    /// is not `expected` (the record is left untouched), and with
    /// [`StoreError::IllegalTransition`] if `expected -> next` is not an
    /// edge of the lifecycle state machine. Returns the updated snapshot.
    pub fn transition(
        &self,
        id: JobId,
        expected: JobStatus,
        next: JobStatus,
        patch: StatusPatch,
    ) -> Result<Job, StoreError> {
        if !expected.can_transition_to(next) {
            return Err(StoreError::IllegalTransition {
                from: expected,
                to: next,
            });
        }

        let mut entry = self
            .jobs
            .get_mut(&id)
            .ok_or(StoreError::NotFound { id })?;

        let job = entry.value_mut();
        if job.status != expected {
            return Err(StoreError::Conflict {
                id,
                expected,
                actual: job.status,
            });
        }

        debug_assert!(
            next != JobStatus::Succeeded || patch.result.is_some(),
            "a Succeeded transition must carry a result"
        );
        debug_assert!(
            next != JobStatus::Failed || patch.error.is_some(),
            "a Failed transition must carry an error"
        );

        job.status = next;
        if let Some(result) = patch.result {
            job.result = Some(result);
        }
        if let Some(error) = patch.error {
            job.error = Some(error);
        }
        if let Some(started_at) = patch.started_at {
            job.started_at = Some(started_at);
        }
        if let Some(finished_at) = patch.finished_at {
            job.finished_at = Some(finished_at);
        }

        tracing::debug!(job_id = %id, from = %expected, to = %next, "Job transitioned");
        Ok(job.clone())
    }

    /// Snapshot of all jobs, ordered by creation time ascending with ties
    /// broken by id.
    pub fn list(&self) -> Vec<Job> {
        let mut jobs: Vec<Job> = self.jobs.iter().map(|e| e.value().clone()).collect();
        jobs.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        jobs
    }

    /// Number of tracked jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the store holds no jobs.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
