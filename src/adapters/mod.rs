//! Summarizer adapters for external enrichment services.
//!
//! Adapters provide a unified interface for asking an external AI service
//! to summarize a URL. Enrichment is always best-effort: callers absorb
//! adapter failures and proceed with an empty result.

pub mod fabric;
pub mod http;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{SummarizerMode, SummarizerSettings};

pub use fabric::FabricSummarizer;
pub use http::HttpSummarizer;

/// Enrichment produced by a summarizer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Enrichment {
    /// Free-text summary of the content
    pub summary: String,

    /// Keywords extracted from the content
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Enrichment {
    /// True when the summarizer produced nothing usable
    pub fn is_empty(&self) -> bool {
        self.summary.trim().is_empty() && self.keywords.is_empty()
    }
}

/// Trait for external summarization services
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Human-readable adapter name
    fn name(&self) -> &str;

    /// Summarize the content behind a URL
    async fn summarize(&self, url: &str, timeout: Duration) -> Result<Enrichment>;

    /// Health check (is the backing service reachable?)
    async fn health_check(&self) -> Result<()>;
}

/// Build the configured summarizer, or `None` when enrichment is disabled
/// or the configuration is incomplete.
pub fn from_config(settings: &SummarizerSettings) -> Option<Box<dyn Summarizer>> {
    match settings.mode {
        SummarizerMode::Fabric => Some(Box::new(FabricSummarizer::new())),
        SummarizerMode::Http => {
            let endpoint = settings.endpoint.as_ref()?;
            Some(Box::new(HttpSummarizer::new(endpoint.clone())))
        }
        SummarizerMode::Off => None,
    }
}
