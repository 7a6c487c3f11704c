//! Configuration for curator paths and the summarizer.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (CURATOR_HOME, CURATOR_STORE)
//! 2. Config file (.curator/config.yaml)
//! 3. Defaults (~/.curator)
//!
//! Config file discovery:
//! - Searches current directory and parents for .curator/config.yaml
//! - Paths in config file are relative to the config file's parent directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub summarizer: Option<SummarizerConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Curator home directory (relative to config file)
    pub home: Option<String>,
    /// Record slot path (relative to config file)
    pub store: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummarizerConfig {
    pub mode: Option<SummarizerMode>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Which summarizer backend to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarizerMode {
    /// Subprocess mode via the `fabric` CLI
    #[default]
    Fabric,
    /// HTTP endpoint
    Http,
    /// Enrichment disabled
    Off,
}

impl std::fmt::Display for SummarizerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummarizerMode::Fabric => write!(f, "fabric"),
            SummarizerMode::Http => write!(f, "http"),
            SummarizerMode::Off => write!(f, "off"),
        }
    }
}

/// Resolved summarizer settings
#[derive(Debug, Clone)]
pub struct SummarizerSettings {
    pub mode: SummarizerMode,
    pub endpoint: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            mode: SummarizerMode::Fabric,
            endpoint: None,
            timeout_seconds: 120,
        }
    }
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to curator home
    pub home: PathBuf,
    /// Absolute path to the record slot
    pub store: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Summarizer settings
    pub summarizer: SummarizerSettings,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".curator").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

fn summarizer_settings(config: Option<&SummarizerConfig>) -> SummarizerSettings {
    let defaults = SummarizerSettings::default();
    match config {
        Some(cfg) => SummarizerSettings {
            mode: cfg.mode.unwrap_or(defaults.mode),
            endpoint: cfg.endpoint.clone(),
            timeout_seconds: cfg.timeout_seconds.unwrap_or(defaults.timeout_seconds),
        },
        None => defaults,
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    // Default home directory
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".curator");

    // Check for config file
    let config_file = find_config_file();

    let (home, store, summarizer) = if let Some(ref config_path) = config_file {
        // Config file found - use it as base
        let config = load_config_file(config_path)?;

        // The .curator/ directory holding the config file
        let curator_dir = config_path.parent().unwrap_or(Path::new("."));

        // Resolve home path
        let home = if let Ok(env_home) = std::env::var("CURATOR_HOME") {
            PathBuf::from(env_home)
        } else if let Some(ref home_path) = config.paths.home {
            resolve_path(curator_dir, home_path)
        } else {
            default_home.clone()
        };

        // Resolve store path
        let store = if let Ok(env_store) = std::env::var("CURATOR_STORE") {
            PathBuf::from(env_store)
        } else if let Some(ref store_path) = config.paths.store {
            resolve_path(curator_dir, store_path)
        } else {
            home.join("records.json")
        };

        let summarizer = summarizer_settings(config.summarizer.as_ref());

        (home, store, summarizer)
    } else {
        // No config file - use env vars or defaults
        let home = std::env::var("CURATOR_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_home.clone());

        let store = std::env::var("CURATOR_STORE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join("records.json"));

        (home, store, SummarizerSettings::default())
    };

    Ok(ResolvedConfig {
        home,
        store,
        config_file,
        summarizer,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Get the curator home directory.
pub fn curator_home() -> Result<PathBuf> {
    Ok(config()?.home.clone())
}

/// Get the record slot path ($CURATOR_HOME/records.json)
pub fn store_path() -> Result<PathBuf> {
    Ok(config()?.store.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let curator_dir = temp.path().join(".curator");
        std::fs::create_dir_all(&curator_dir).unwrap();

        let config_path = curator_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
paths:
  home: ./
  store: ./records.json
summarizer:
  mode: http
  endpoint: http://localhost:9090/summarize
  timeout_seconds: 30
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.paths.home, Some("./".to_string()));
        assert_eq!(config.paths.store, Some("./records.json".to_string()));

        let summarizer = summarizer_settings(config.summarizer.as_ref());
        assert_eq!(summarizer.mode, SummarizerMode::Http);
        assert_eq!(
            summarizer.endpoint,
            Some("http://localhost:9090/summarize".to_string())
        );
        assert_eq!(summarizer.timeout_seconds, 30);
    }

    #[test]
    fn test_summarizer_defaults() {
        let settings = summarizer_settings(None);
        assert_eq!(settings.mode, SummarizerMode::Fabric);
        assert!(settings.endpoint.is_none());
        assert_eq!(settings.timeout_seconds, 120);

        // Partial config keeps defaults for unset fields
        let partial = SummarizerConfig {
            mode: Some(SummarizerMode::Off),
            endpoint: None,
            timeout_seconds: None,
        };
        let settings = summarizer_settings(Some(&partial));
        assert_eq!(settings.mode, SummarizerMode::Off);
        assert_eq!(settings.timeout_seconds, 120);
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
