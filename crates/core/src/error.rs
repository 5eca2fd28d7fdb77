use crate::types::JobId;

/// Domain-level errors surfaced by the job service.
///
/// The API layer maps each variant to an HTTP status code; see the
/// `scenagen-api` error module.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: JobId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Result requested before the job reached a terminal state.
    #[error("Job {id} has not finished yet")]
    NotReady { id: JobId },

    /// Cancellation requested after the job was dispatched or finished.
    #[error("Job {id} is already running or finished and can no longer be cancelled")]
    TooLate { id: JobId },

    /// Result requested for a job that was cancelled before it ran.
    #[error("Job {id} was cancelled before it ran")]
    Cancelled { id: JobId },

    /// The stored failure of a FAILED job, surfaced at result retrieval.
    #[error("Analysis for job {id} failed: {message}")]
    AnalysisFailed { id: JobId, message: String },

    /// The job store refused a new record (resource exhaustion).
    #[error("Job store at capacity: {0}")]
    Capacity(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
