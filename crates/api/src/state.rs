use std::sync::Arc;

use scenagen_engine::JobService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The job service: the single entry point to the orchestration core.
    pub service: Arc<JobService>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
