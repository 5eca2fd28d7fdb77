//! Job entity model and DTOs.

use serde::{Deserialize, Serialize};

use scenagen_core::status::JobStatus;
use scenagen_core::types::{JobId, Timestamp};

/// One analysis request and its lifecycle record.
///
/// Owned exclusively by the [`crate::JobStore`]; everything outside the
/// store holds ids and snapshots, never live references.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    pub id: JobId,
    /// The submitted URL. Immutable after creation.
    pub input: String,
    pub status: JobStatus,
    /// Scenario text. Populated only when `status` is `Succeeded`.
    pub result: Option<String>,
    /// Failure description. Populated only when `status` is `Failed`.
    pub error: Option<String>,
    pub created_at: Timestamp,
    pub started_at: Option<Timestamp>,
    pub finished_at: Option<Timestamp>,
}

/// DTO for submitting a new job via `POST /api/v1/jobs`.
#[derive(Debug, Deserialize)]
pub struct SubmitJob {
    /// URL of the website to analyze.
    pub input: String,
}

/// Fields set alongside a status transition.
///
/// Only the fields relevant to the target status are `Some`; a transition
/// applies the whole patch atomically with the status change or not at all.
#[derive(Debug, Default)]
pub struct StatusPatch {
    pub result: Option<String>,
    pub error: Option<String>,
    pub started_at: Option<Timestamp>,
    pub finished_at: Option<Timestamp>,
}

impl StatusPatch {
    /// Patch for `Pending -> Running`.
    pub fn started(at: Timestamp) -> Self {
        Self {
            started_at: Some(at),
            ..Self::default()
        }
    }

    /// Patch for `Running -> Succeeded`.
    pub fn succeeded(result: String, at: Timestamp) -> Self {
        Self {
            result: Some(result),
            finished_at: Some(at),
            ..Self::default()
        }
    }

    /// Patch for `Running -> Failed`.
    pub fn failed(error: String, at: Timestamp) -> Self {
        Self {
            error: Some(error),
            finished_at: Some(at),
            ..Self::default()
        }
    }

    /// Patch for `Pending -> Cancelled`.
    pub fn cancelled(at: Timestamp) -> Self {
        Self {
            finished_at: Some(at),
            ..Self::default()
        }
    }
}
