use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scenagen_analyzer::HttpAnalyzer;
use scenagen_api::config::ServerConfig;
use scenagen_api::router::build_app_router;
use scenagen_api::state::AppState;
use scenagen_core::status::JobStatus;
use scenagen_engine::{ExecutorConfig, JobExecutor, JobService};
use scenagen_store::JobStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scenagen_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        analyzer_url = %config.analyzer_url,
        worker_pool_size = config.worker_pool_size,
        "Loaded server configuration",
    );

    // --- Job store ---
    // The single source of truth for job records, constructed once here
    // and injected everywhere else.
    let store = Arc::new(JobStore::new(config.max_jobs));

    // --- Analysis pipeline client ---
    let analyzer = Arc::new(HttpAnalyzer::new(config.analyzer_url.clone()));

    // --- Executor ---
    let executor = Arc::new(JobExecutor::new(
        Arc::clone(&store),
        analyzer,
        ExecutorConfig {
            worker_pool_size: config.worker_pool_size,
            max_analysis_duration: config.analysis_timeout(),
        },
    ));

    // --- Job service ---
    let service = Arc::new(JobService::new(Arc::clone(&store), Arc::clone(&executor)));
    tracing::info!("Job service started");

    // --- App state ---
    let state = AppState {
        service,
        config: Arc::new(config.clone()),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Stop dispatching queued jobs; anything still pending stays pending.
    executor.shutdown();

    // Give in-flight analyses a bounded window to finish.
    let drain_deadline = Duration::from_secs(config.shutdown_timeout_secs);
    let drained = tokio::time::timeout(drain_deadline, async {
        loop {
            let running = store
                .list()
                .iter()
                .filter(|j| j.status == JobStatus::Running)
                .count();
            if running == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    })
    .await;

    match drained {
        Ok(()) => tracing::info!("All running analyses drained"),
        Err(_) => tracing::warn!(
            timeout_secs = config.shutdown_timeout_secs,
            "Shutdown timeout reached with analyses still running",
        ),
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
