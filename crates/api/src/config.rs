use std::time::Duration;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for running analyses to drain (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Base URL of the analysis pipeline service (default: `http://localhost:9000`).
    pub analyzer_url: String,
    /// Hard ceiling on a single analysis, in seconds (default: `300`).
    pub analysis_timeout_secs: u64,
    /// Maximum number of concurrently running analyses (default: `4`).
    pub worker_pool_size: usize,
    /// Maximum number of tracked jobs before submissions are refused
    /// (default: `10000`).
    pub max_jobs: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                  |
    /// |--------------------------|--------------------------|
    /// | `HOST`                   | `0.0.0.0`                |
    /// | `PORT`                   | `8000`                   |
    /// | `CORS_ORIGINS`           | `http://localhost:8501`  |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                     |
    /// | `SHUTDOWN_TIMEOUT_SECS`  | `30`                     |
    /// | `ANALYZER_URL`           | `http://localhost:9000`  |
    /// | `ANALYSIS_TIMEOUT_SECS`  | `300`                    |
    /// | `WORKER_POOL_SIZE`       | `4`                      |
    /// | `MAX_JOBS`               | `10000`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8501".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let analyzer_url =
            std::env::var("ANALYZER_URL").unwrap_or_else(|_| "http://localhost:9000".into());

        let analysis_timeout_secs: u64 = std::env::var("ANALYSIS_TIMEOUT_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("ANALYSIS_TIMEOUT_SECS must be a valid u64");

        let worker_pool_size: usize = std::env::var("WORKER_POOL_SIZE")
            .unwrap_or_else(|_| "4".into())
            .parse()
            .expect("WORKER_POOL_SIZE must be a valid usize");
        assert!(worker_pool_size > 0, "WORKER_POOL_SIZE must be at least 1");

        let max_jobs: usize = std::env::var("MAX_JOBS")
            .unwrap_or_else(|_| "10000".into())
            .parse()
            .expect("MAX_JOBS must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            analyzer_url,
            analysis_timeout_secs,
            worker_pool_size,
            max_jobs,
        }
    }

    /// The per-analysis timeout ceiling as a [`Duration`].
    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_secs)
    }
}
