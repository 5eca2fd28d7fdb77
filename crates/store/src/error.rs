use scenagen_core::status::JobStatus;
use scenagen_core::types::JobId;

/// Errors from the job store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Job {id} not found")]
    NotFound { id: JobId },

    /// A compare-and-transition found the record in a different status
    /// than the caller expected. The record is unchanged.
    #[error("Job {id} is {actual}, expected {expected}")]
    Conflict {
        id: JobId,
        expected: JobStatus,
        actual: JobStatus,
    },

    /// The requested transition is not an edge of the lifecycle state
    /// machine, regardless of the record's current status.
    #[error("Transition {from} -> {to} is not allowed")]
    IllegalTransition { from: JobStatus, to: JobStatus },

    /// The store refused a new record because the configured ceiling on
    /// tracked jobs was reached.
    #[error("Job store is at capacity ({max_jobs} jobs)")]
    CapacityExhausted { max_jobs: usize },
}
