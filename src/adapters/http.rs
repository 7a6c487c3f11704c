//! HTTP summarizer client.
//!
//! Posts the URL to a configured summarization endpoint and decodes the
//! `{summary, keywords}` response. The endpoint is treated as a black box.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Enrichment, Summarizer};

/// Summarizer backed by an HTTP endpoint
pub struct HttpSummarizer {
    /// Endpoint accepting POST {"url": ...}
    endpoint: String,
    /// HTTP client
    client: reqwest::Client,
}

/// Request body sent to the endpoint
#[derive(Debug, Serialize)]
struct SummarizeRequest<'a> {
    url: &'a str,
}

/// Response body expected from the endpoint
#[derive(Debug, Deserialize)]
struct SummarizeResponse {
    summary: String,
    #[serde(default)]
    keywords: Vec<String>,
}

impl HttpSummarizer {
    /// Create a new client for the given endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    /// The configured endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    fn name(&self) -> &str {
        "http"
    }

    async fn summarize(&self, url: &str, timeout: Duration) -> Result<Enrichment> {
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(timeout)
            .json(&SummarizeRequest { url })
            .send()
            .await
            .with_context(|| format!("Failed to reach summarizer at {}", self.endpoint))?
            .error_for_status()
            .context("Summarizer returned an error status")?;

        let body: SummarizeResponse = response
            .json()
            .await
            .context("Failed to decode summarizer response")?;

        Ok(Enrichment {
            summary: body.summary.trim().to_string(),
            keywords: body.keywords,
        })
    }

    async fn health_check(&self) -> Result<()> {
        self.client
            .head(&self.endpoint)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .with_context(|| format!("Summarizer endpoint {} is unreachable", self.endpoint))?;

        Ok(())
    }
}
