//! HTTP client for the analysis pipeline service.
//!
//! Wraps the pipeline's single endpoint (`POST /analyze`) using
//! [`reqwest`]. The service crawls the target site, reasons over the
//! discovered interactions, and responds with the generated scenario text.

use async_trait::async_trait;
use serde::Deserialize;

use crate::{Analyzer, AnalyzerError};

/// HTTP client for a single pipeline service instance.
pub struct HttpAnalyzer {
    client: reqwest::Client,
    base_url: String,
}

/// Response returned by the pipeline's `/analyze` endpoint.
///
/// Exactly one of `scenario_text` / `error` is populated: the pipeline
/// reports analysis-level failures in-band with a 200 status.
#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    scenario_text: Option<String>,
    error: Option<String>,
}

impl HttpAnalyzer {
    /// Create a new client for a pipeline service.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://host:9000`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across instances).
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl Analyzer for HttpAnalyzer {
    async fn analyze(&self, url: &str) -> Result<String, AnalyzerError> {
        let body = serde_json::json!({ "url": url });

        let response = self
            .client
            .post(format!("{}/analyze", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AnalyzerError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: AnalyzeResponse = response.json().await?;
        match (parsed.scenario_text, parsed.error) {
            (Some(text), _) => Ok(text),
            (None, Some(reason)) => Err(AnalyzerError::Pipeline(reason)),
            (None, None) => Err(AnalyzerError::Pipeline(
                "pipeline returned neither scenario text nor an error".to_string(),
            )),
        }
    }
}
