use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use scenagen_analyzer::{Analyzer, AnalyzerError};
use scenagen_api::config::ServerConfig;
use scenagen_api::router::build_app_router;
use scenagen_api::state::AppState;
use scenagen_engine::{ExecutorConfig, JobExecutor, JobService};
use scenagen_store::JobStore;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:8501` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8501".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        analyzer_url: "http://localhost:9000".to_string(),
        analysis_timeout_secs: 30,
        worker_pool_size: 2,
        max_jobs: 100,
    }
}

/// Build the full application router with all middleware layers, backed
/// by the given analyzer stub.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(analyzer: Arc<dyn Analyzer>) -> Router {
    let config = test_config();
    let store = Arc::new(JobStore::new(config.max_jobs));
    let executor = Arc::new(JobExecutor::new(
        Arc::clone(&store),
        analyzer,
        ExecutorConfig {
            worker_pool_size: config.worker_pool_size,
            max_analysis_duration: config.analysis_timeout(),
        },
    ));
    let service = Arc::new(JobService::new(store, executor));

    let state = AppState {
        service,
        config: Arc::new(config.clone()),
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Analyzer stubs
// ---------------------------------------------------------------------------

/// Resolves every analysis with a fixed outcome.
pub struct StubAnalyzer {
    outcome: Result<String, String>,
}

impl StubAnalyzer {
    pub fn ok(text: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(text.to_string()),
        })
    }

    pub fn err(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(reason.to_string()),
        })
    }
}

#[async_trait]
impl Analyzer for StubAnalyzer {
    async fn analyze(&self, _url: &str) -> Result<String, AnalyzerError> {
        self.outcome.clone().map_err(AnalyzerError::Pipeline)
    }
}

/// Never resolves, so jobs stay observable in non-terminal states.
pub struct HangingAnalyzer;

#[async_trait]
impl Analyzer for HangingAnalyzer {
    async fn analyze(&self, _url: &str) -> Result<String, AnalyzerError> {
        std::future::pending::<()>().await;
        unreachable!()
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request to the app.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body to the app.
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Send a bodyless POST request to the app.
pub async fn post(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ---------------------------------------------------------------------------
// Polling helpers
// ---------------------------------------------------------------------------

/// Submit a job and return its id.
pub async fn submit(app: &Router, url: &str) -> String {
    let response = post_json(app, "/api/v1/jobs", serde_json::json!({ "input": url })).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = body_json(response).await;
    json["data"]["id"].as_str().unwrap().to_string()
}

/// Poll a job's status every 10ms until it reaches a terminal state, or
/// panic after ~5s. Returns the final status string.
pub async fn poll_until_terminal(app: &Router, id: &str) -> String {
    for _ in 0..500 {
        let response = get(app, &format!("/api/v1/jobs/{id}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let status = json["data"]["status"].as_str().unwrap().to_string();
        if matches!(status.as_str(), "succeeded" | "failed" | "cancelled") {
            return status;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {id} did not reach a terminal state within 5s");
}

/// Poll a job's status every 10ms until it equals `expected`, or panic
/// after ~5s.
pub async fn poll_until_status(app: &Router, id: &str, expected: &str) {
    for _ in 0..500 {
        let response = get(app, &format!("/api/v1/jobs/{id}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        if json["data"]["status"] == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {id} did not reach status {expected} within 5s");
}
