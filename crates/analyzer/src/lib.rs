//! The analysis pipeline boundary.
//!
//! The pipeline (crawling, agent-driven reasoning, scenario text
//! generation) is a black box behind the [`Analyzer`] trait: one call per
//! job, no retries. [`http::HttpAnalyzer`] is the production realization,
//! talking to the pipeline service over HTTP.

pub mod http;

pub use http::HttpAnalyzer;

use async_trait::async_trait;

/// Errors from the analysis pipeline boundary.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("Analyzer request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The pipeline service returned a non-2xx status code.
    #[error("Analyzer API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The pipeline ran but reported an analysis-level failure.
    #[error("{0}")]
    Pipeline(String),
}

/// A single long-running analysis call: URL in, scenario text out.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Analyze `url` and produce the behavioral scenario text.
    async fn analyze(&self, url: &str) -> Result<String, AnalyzerError>;
}
