//! Fabric summarizer using subprocess mode.
//!
//! Calls the `fabric` CLI directly, piping the URL to a pattern's stdin and
//! collecting stdout. Two patterns are involved: one for the summary, one
//! for the keyword list.

use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::warn;

use super::{Enrichment, Summarizer};

/// Pattern producing the free-text summary
const PATTERN_SUMMARIZE: &str = "summarize";

/// Pattern producing one keyword per output line
const PATTERN_KEYWORDS: &str = "create_tags";

/// Summarizer backed by the `fabric` CLI
pub struct FabricSummarizer {
    /// Path to the fabric binary (default: "fabric")
    binary_path: String,
}

impl Default for FabricSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FabricSummarizer {
    /// Create a new Fabric summarizer with default binary path
    ///
    /// Looks for fabric-ai first (Homebrew install), falls back to fabric
    pub fn new() -> Self {
        let binary_path = if std::process::Command::new("fabric-ai")
            .arg("--help")
            .output()
            .is_ok()
        {
            "fabric-ai".to_string()
        } else {
            "fabric".to_string()
        };

        Self { binary_path }
    }

    /// Create a Fabric summarizer with a custom binary path
    pub fn with_binary_path(binary_path: impl Into<String>) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    /// Run a pattern via subprocess, piping `input` to stdin.
    async fn run_pattern(
        &self,
        pattern: &str,
        input: &str,
        step_timeout: Duration,
    ) -> Result<String> {
        let mut child = Command::new(&self.binary_path)
            .args(["-p", pattern])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn fabric process for pattern '{}'", pattern))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input.as_bytes())
                .await
                .context("Failed to write to fabric stdin")?;
            // Drop stdin to signal EOF
        }

        let output = timeout(step_timeout, child.wait_with_output())
            .await
            .with_context(|| {
                format!(
                    "Fabric pattern '{}' timed out after {:?}",
                    pattern, step_timeout
                )
            })?
            .with_context(|| {
                format!("Failed to wait for fabric process for pattern '{}'", pattern)
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_code = output.status.code().unwrap_or(-1);
            anyhow::bail!(
                "Fabric pattern '{}' failed with exit code {}: {}",
                pattern,
                exit_code,
                stderr.trim()
            );
        }

        String::from_utf8(output.stdout).context("Fabric output is not valid UTF-8")
    }
}

/// Parse keyword lines from pattern output (one keyword per line, list
/// markers stripped).
fn parse_keywords(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| line.trim().trim_start_matches(['-', '*', '#']).trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}

#[async_trait]
impl Summarizer for FabricSummarizer {
    fn name(&self) -> &str {
        "fabric"
    }

    async fn summarize(&self, url: &str, step_timeout: Duration) -> Result<Enrichment> {
        let summary = self
            .run_pattern(PATTERN_SUMMARIZE, url, step_timeout)
            .await?;

        // The summary is the payload; keywords are nice-to-have.
        let keywords = match self.run_pattern(PATTERN_KEYWORDS, url, step_timeout).await {
            Ok(output) => parse_keywords(&output),
            Err(e) => {
                warn!("Keyword extraction failed, continuing without: {e:#}");
                Vec::new()
            }
        };

        Ok(Enrichment {
            summary: summary.trim().to_string(),
            keywords,
        })
    }

    async fn health_check(&self) -> Result<()> {
        let output = Command::new(&self.binary_path)
            .arg("-l")
            .output()
            .await
            .context("Failed to run fabric health check")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Fabric health check failed: {}", stderr);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarizer_creation() {
        let summarizer = FabricSummarizer::new();
        assert_eq!(summarizer.name(), "fabric");
    }

    #[test]
    fn test_custom_binary_path() {
        let summarizer = FabricSummarizer::with_binary_path("/custom/path/fabric");
        assert_eq!(summarizer.binary_path, "/custom/path/fabric");
    }

    #[test]
    fn test_parse_keywords() {
        let output = "- rust\n* async\n\n  tokio  \n# networking";
        assert_eq!(
            parse_keywords(output),
            vec!["rust", "async", "tokio", "networking"]
        );
    }

    // Note: integration tests with an actual Fabric install would go in tests/
}
