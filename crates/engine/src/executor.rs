//! Background job executor.
//!
//! Each scheduled job runs on its own Tokio task, gated by a fixed-size
//! semaphore so at most `worker_pool_size` analyses are in flight at once.
//! Jobs beyond the limit stay `Pending` until a permit frees; that is the
//! system's backpressure mechanism.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use scenagen_analyzer::Analyzer;
use scenagen_core::status::JobStatus;
use scenagen_core::types::JobId;
use scenagen_store::models::job::StatusPatch;
use scenagen_store::{JobStore, StoreError};

/// Tunables for the executor.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum number of concurrently running analyses.
    pub worker_pool_size: usize,
    /// Hard ceiling on a single pipeline call. A call that exceeds it is
    /// cancelled and the job marked failed with a timeout error.
    pub max_analysis_duration: Duration,
}

/// Runs the analysis pipeline for scheduled jobs and records outcomes.
///
/// The executor is the only component that moves jobs out of `Pending`;
/// every state change goes through the store's compare-and-transition, so
/// a job that was cancelled while waiting for a worker slot is abandoned
/// without ever invoking the pipeline.
pub struct JobExecutor {
    store: Arc<JobStore>,
    analyzer: Arc<dyn Analyzer>,
    permits: Arc<Semaphore>,
    max_analysis_duration: Duration,
    shutdown: CancellationToken,
}

impl JobExecutor {
    pub fn new(store: Arc<JobStore>, analyzer: Arc<dyn Analyzer>, config: ExecutorConfig) -> Self {
        Self {
            store,
            analyzer,
            permits: Arc::new(Semaphore::new(config.worker_pool_size)),
            max_analysis_duration: config.max_analysis_duration,
            shutdown: CancellationToken::new(),
        }
    }

    /// Enqueue execution of a job. Returns immediately; the analysis never
    /// runs on the caller's path.
    ///
    /// Must be called at most once per job id — the service is the only
    /// caller and schedules each job exactly once at submission.
    pub fn schedule(&self, id: JobId, input: String) {
        let store = Arc::clone(&self.store);
        let analyzer = Arc::clone(&self.analyzer);
        let permits = Arc::clone(&self.permits);
        let max_duration = self.max_analysis_duration;
        let shutdown = self.shutdown.clone();

        tokio::spawn(async move {
            run_one(store, analyzer, permits, max_duration, shutdown, id, input).await;
        });
    }

    /// Signal shutdown: tasks still waiting for a worker slot abandon
    /// without dispatching. Analyses already running race their timeout
    /// ceiling as usual.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

/// Execute one job end to end: admission, dispatch, pipeline call, outcome.
async fn run_one(
    store: Arc<JobStore>,
    analyzer: Arc<dyn Analyzer>,
    permits: Arc<Semaphore>,
    max_duration: Duration,
    shutdown: CancellationToken,
    id: JobId,
    input: String,
) {
    // Admission gate: the job stays Pending until a worker slot frees.
    let _permit = tokio::select! {
        _ = shutdown.cancelled() => {
            tracing::debug!(job_id = %id, "Shutdown before dispatch, job left pending");
            return;
        }
        permit = permits.acquire_owned() => match permit {
            Ok(permit) => permit,
            // The semaphore is never closed explicitly; treat as shutdown.
            Err(_) => return,
        },
    };

    // Dispatch: Pending -> Running. Losing this race to a concurrent
    // cancel is normal; anything else means the job was scheduled twice.
    match store.transition(id, JobStatus::Pending, JobStatus::Running, StatusPatch::started(Utc::now())) {
        Ok(_) => {}
        Err(StoreError::Conflict {
            actual: JobStatus::Cancelled,
            ..
        }) => {
            tracing::debug!(job_id = %id, "Job cancelled before dispatch, abandoning");
            return;
        }
        Err(err) => {
            tracing::error!(
                job_id = %id,
                error = %err,
                "Job was already dispatched or finished; refusing to run it again",
            );
            return;
        }
    }

    tracing::info!(job_id = %id, url = %input, "Analysis started");

    // The timeout ceiling drops the pipeline future on expiry, which
    // cancels the underlying HTTP call.
    let outcome = tokio::time::timeout(max_duration, analyzer.analyze(&input)).await;

    let recorded = match outcome {
        Ok(Ok(text)) => {
            tracing::info!(job_id = %id, chars = text.len(), "Analysis succeeded");
            store.transition(
                id,
                JobStatus::Running,
                JobStatus::Succeeded,
                StatusPatch::succeeded(text, Utc::now()),
            )
        }
        Ok(Err(err)) => {
            tracing::warn!(job_id = %id, error = %err, "Analysis failed");
            store.transition(
                id,
                JobStatus::Running,
                JobStatus::Failed,
                StatusPatch::failed(err.to_string(), Utc::now()),
            )
        }
        Err(_elapsed) => {
            tracing::warn!(
                job_id = %id,
                timeout_secs = max_duration.as_secs(),
                "Analysis timed out",
            );
            store.transition(
                id,
                JobStatus::Running,
                JobStatus::Failed,
                StatusPatch::failed(
                    format!("Analysis timed out after {}s", max_duration.as_secs()),
                    Utc::now(),
                ),
            )
        }
    };

    // A failed outcome write means the record changed under us; the store
    // already rejected the update atomically, so just log it.
    if let Err(err) = recorded {
        tracing::warn!(job_id = %id, error = %err, "Could not record analysis outcome");
    }
}
