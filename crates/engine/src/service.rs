//! The job service: the single entry point for callers.
//!
//! Composes the job store and the executor. All externally visible
//! semantics (validation, status views, result retrieval, cancellation)
//! live here; the HTTP layer is a thin mapping on top.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use scenagen_core::error::CoreError;
use scenagen_core::status::JobStatus;
use scenagen_core::types::{JobId, Timestamp};
use scenagen_core::validation::validate_submit_url;
use scenagen_store::models::job::{Job, StatusPatch};
use scenagen_store::{JobStore, StoreError};

use crate::executor::JobExecutor;

/// Status payload served while callers poll a job.
///
/// Deliberately excludes the result text; result retrieval is its own
/// operation.
#[derive(Debug, Clone, Serialize)]
pub struct JobStatusView {
    pub id: JobId,
    pub status: JobStatus,
    pub created_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<Timestamp>,
}

impl From<Job> for JobStatusView {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            status: job.status,
            created_at: job.created_at,
            started_at: job.started_at,
            finished_at: job.finished_at,
        }
    }
}

/// Public contract of the job subsystem: submit, status, result, cancel.
pub struct JobService {
    store: Arc<JobStore>,
    executor: Arc<JobExecutor>,
}

impl JobService {
    /// Both collaborators are constructed once at process start and
    /// injected; the service holds the only references handlers see.
    pub fn new(store: Arc<JobStore>, executor: Arc<JobExecutor>) -> Self {
        Self { store, executor }
    }

    /// Validate `input`, create a `Pending` job, and hand it to the
    /// executor. Every call creates a new, independent job — submitting
    /// the same URL twice yields two jobs.
    pub fn submit(&self, input: &str) -> Result<Job, CoreError> {
        validate_submit_url(input)?;

        let job = self
            .store
            .create(input.trim().to_string())
            .map_err(|err| match err {
                StoreError::CapacityExhausted { .. } => CoreError::Capacity(err.to_string()),
                other => CoreError::Internal(other.to_string()),
            })?;

        self.executor.schedule(job.id, job.input.clone());

        tracing::info!(job_id = %job.id, url = %job.input, "Job submitted");
        Ok(job)
    }

    /// Current status of a job. Never blocks.
    pub fn status(&self, id: JobId) -> Result<JobStatusView, CoreError> {
        self.store
            .get(id)
            .map(JobStatusView::from)
            .ok_or(CoreError::NotFound { entity: "Job", id })
    }

    /// The scenario text of a finished job.
    ///
    /// Fails with `NotReady` before the job reaches a terminal state,
    /// surfaces the stored error for failed jobs, and reports cancelled
    /// jobs as such.
    pub fn result(&self, id: JobId) -> Result<String, CoreError> {
        let job = self
            .store
            .get(id)
            .ok_or(CoreError::NotFound { entity: "Job", id })?;

        match job.status {
            JobStatus::Succeeded => job.result.ok_or_else(|| {
                CoreError::Internal(format!("succeeded job {id} is missing its result"))
            }),
            JobStatus::Failed => Err(CoreError::AnalysisFailed {
                id,
                message: job
                    .error
                    .unwrap_or_else(|| "unknown analysis failure".to_string()),
            }),
            JobStatus::Cancelled => Err(CoreError::Cancelled { id }),
            JobStatus::Pending | JobStatus::Running => Err(CoreError::NotReady { id }),
        }
    }

    /// Cancel a job that has not been dispatched yet.
    ///
    /// Best-effort only: once the executor has moved the job to `Running`
    /// (or it finished), cancellation fails with `TooLate`. A running
    /// pipeline call is bounded by the executor's timeout ceiling, not
    /// interrupted here.
    pub fn cancel(&self, id: JobId) -> Result<Job, CoreError> {
        match self.store.transition(
            id,
            JobStatus::Pending,
            JobStatus::Cancelled,
            StatusPatch::cancelled(Utc::now()),
        ) {
            Ok(job) => {
                tracing::info!(job_id = %id, "Job cancelled");
                Ok(job)
            }
            Err(StoreError::NotFound { .. }) => Err(CoreError::NotFound { entity: "Job", id }),
            Err(StoreError::Conflict { .. }) => Err(CoreError::TooLate { id }),
            Err(other) => Err(CoreError::Internal(other.to_string())),
        }
    }

    /// Snapshot of all tracked jobs, oldest first.
    pub fn list(&self) -> Vec<Job> {
        self.store.list()
    }

    /// Number of tracked jobs (operational visibility).
    pub fn job_count(&self) -> usize {
        self.store.len()
    }
}
