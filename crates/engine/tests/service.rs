//! Integration tests for the job service's externally visible semantics:
//! submission validation, status views, and result retrieval.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use scenagen_analyzer::{Analyzer, AnalyzerError};
use scenagen_core::error::CoreError;
use scenagen_core::status::JobStatus;
use scenagen_engine::{ExecutorConfig, JobExecutor, JobService};
use scenagen_store::JobStore;

struct OkAnalyzer;

#[async_trait]
impl Analyzer for OkAnalyzer {
    async fn analyze(&self, _url: &str) -> Result<String, AnalyzerError> {
        Ok("Feature: example".to_string())
    }
}

/// Blocks until released, so jobs stay observable in non-terminal states.
struct GatedAnalyzer {
    gate: Mutex<mpsc::UnboundedReceiver<()>>,
}

#[async_trait]
impl Analyzer for GatedAnalyzer {
    async fn analyze(&self, _url: &str) -> Result<String, AnalyzerError> {
        self.gate.lock().await.recv().await;
        Ok("Feature: gated".to_string())
    }
}

fn service_with(analyzer: Arc<dyn Analyzer>) -> (Arc<JobStore>, JobService) {
    let store = Arc::new(JobStore::new(100));
    let executor = Arc::new(JobExecutor::new(
        Arc::clone(&store),
        analyzer,
        ExecutorConfig {
            worker_pool_size: 2,
            max_analysis_duration: Duration::from_secs(30),
        },
    ));
    (Arc::clone(&store), JobService::new(store, executor))
}

async fn wait_until(mut pred: impl FnMut() -> bool) {
    for _ in 0..500 {
        if pred() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within 5s");
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submit_rejects_empty_input_without_creating_a_job() {
    let (store, service) = service_with(Arc::new(OkAnalyzer));

    assert_matches!(service.submit(""), Err(CoreError::Validation(_)));
    assert_matches!(service.submit("   "), Err(CoreError::Validation(_)));
    assert_matches!(service.submit("not-a-url"), Err(CoreError::Validation(_)));
    assert!(store.is_empty());
}

#[tokio::test]
async fn submit_returns_a_pending_job_and_each_call_is_independent() {
    let (_store, service) = service_with(Arc::new(OkAnalyzer));

    let a = service.submit("https://example.com").unwrap();
    let b = service.submit("https://example.com").unwrap();

    assert_ne!(a.id, b.id);
    // Freshly submitted jobs are pending until the executor dispatches.
    assert!(matches!(a.status, JobStatus::Pending));
}

#[tokio::test]
async fn submit_trims_surrounding_whitespace() {
    let (_store, service) = service_with(Arc::new(OkAnalyzer));
    let job = service.submit("  https://example.com  ").unwrap();
    assert_eq!(job.input, "https://example.com");
}

#[tokio::test]
async fn submit_surfaces_store_capacity_exhaustion() {
    let store = Arc::new(JobStore::new(1));
    let executor = Arc::new(JobExecutor::new(
        Arc::clone(&store),
        Arc::new(OkAnalyzer),
        ExecutorConfig {
            worker_pool_size: 1,
            max_analysis_duration: Duration::from_secs(5),
        },
    ));
    let service = JobService::new(store, executor);

    service.submit("https://example.com/1").unwrap();
    let err = service.submit("https://example.com/2").unwrap_err();
    assert_matches!(err, CoreError::Capacity(_));
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_reports_lifecycle_fields_as_they_appear() {
    let (store, service) = service_with(Arc::new(OkAnalyzer));
    let job = service.submit("https://example.com").unwrap();

    // Before the pipeline resolves the job is pending or running.
    let early = service.status(job.id).unwrap();
    assert!(matches!(early.status, JobStatus::Pending | JobStatus::Running));
    assert!(early.finished_at.is_none());

    wait_until(|| store.get(job.id).unwrap().status.is_terminal()).await;

    let done = service.status(job.id).unwrap();
    assert_eq!(done.status, JobStatus::Succeeded);
    assert!(done.started_at.is_some());
    assert!(done.finished_at.is_some());
}

#[tokio::test]
async fn status_of_unknown_job_is_not_found() {
    let (_store, service) = service_with(Arc::new(OkAnalyzer));
    let err = service.status(uuid::Uuid::now_v7()).unwrap_err();
    assert_matches!(err, CoreError::NotFound { .. });
}

// ---------------------------------------------------------------------------
// Result retrieval
// ---------------------------------------------------------------------------

#[tokio::test]
async fn result_of_unknown_job_is_not_found() {
    let (_store, service) = service_with(Arc::new(OkAnalyzer));
    let err = service.result(uuid::Uuid::now_v7()).unwrap_err();
    assert_matches!(err, CoreError::NotFound { .. });
}

#[tokio::test]
async fn result_before_terminal_state_is_not_ready() {
    let (tx, rx) = mpsc::unbounded_channel();
    let analyzer = Arc::new(GatedAnalyzer {
        gate: Mutex::new(rx),
    });
    let (store, service) = service_with(analyzer);

    let job = service.submit("https://example.com").unwrap();
    wait_until(|| store.get(job.id).unwrap().status == JobStatus::Running).await;

    let err = service.result(job.id).unwrap_err();
    assert_matches!(err, CoreError::NotReady { .. });

    tx.send(()).unwrap();
    wait_until(|| store.get(job.id).unwrap().status.is_terminal()).await;
    assert_eq!(service.result(job.id).unwrap(), "Feature: gated");
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_returns_jobs_oldest_first() {
    let (_store, service) = service_with(Arc::new(OkAnalyzer));
    let a = service.submit("https://example.com/a").unwrap();
    let b = service.submit("https://example.com/b").unwrap();

    let listed: Vec<_> = service.list().into_iter().map(|j| j.id).collect();
    assert_eq!(listed, vec![a.id, b.id]);
    assert_eq!(service.job_count(), 2);
}
