//! Handlers for the `/jobs` resource.
//!
//! Jobs are asynchronous: submission returns immediately with 202 and the
//! caller polls the status endpoint until the job reaches a terminal
//! state, then fetches the result.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use scenagen_core::types::JobId;
use scenagen_store::models::job::SubmitJob;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// POST /api/v1/jobs
///
/// Submit a website URL for analysis. Returns 202 with the created job;
/// the analysis runs in the background. Each call creates a new,
/// independent job, even for a URL submitted before.
pub async fn submit_job(
    State(state): State<AppState>,
    Json(input): Json<SubmitJob>,
) -> AppResult<impl IntoResponse> {
    let job = state.service.submit(&input.input)?;

    Ok((StatusCode::ACCEPTED, Json(DataResponse { data: job })))
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs
///
/// List all tracked jobs, oldest first.
pub async fn list_jobs(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let jobs = state.service.list();
    Ok(Json(DataResponse { data: jobs }))
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs/{id}
///
/// Poll a job's status. Returns the lifecycle timestamps but never the
/// result text; fetch that from the result endpoint once terminal.
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<JobId>,
) -> AppResult<impl IntoResponse> {
    let view = state.service.status(job_id)?;
    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs/{id}/result
///
/// Fetch the scenario text of a succeeded job as plain text. Returns 409
/// while the job is still pending or running, 500 with the stored error
/// if the analysis failed, and 409 if the job was cancelled.
pub async fn get_job_result(
    State(state): State<AppState>,
    Path(job_id): Path<JobId>,
) -> AppResult<impl IntoResponse> {
    let text = state.service.result(job_id)?;
    Ok((StatusCode::OK, text))
}

// ---------------------------------------------------------------------------
// Cancel
// ---------------------------------------------------------------------------

/// POST /api/v1/jobs/{id}/cancel
///
/// Cancel a job that has not started running. Returns 204 on success and
/// 409 once the job is running or finished -- a dispatched analysis is
/// bounded by the executor's timeout ceiling, not interrupted here.
pub async fn cancel_job(
    State(state): State<AppState>,
    Path(job_id): Path<JobId>,
) -> AppResult<impl IntoResponse> {
    state.service.cancel(job_id)?;

    Ok(StatusCode::NO_CONTENT)
}
