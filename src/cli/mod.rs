//! Command-line interface for curator.
//!
//! Provides commands for adding, listing, inspecting, removing, searching,
//! and exporting curated content records.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;

use crate::adapters::{self, Summarizer};
use crate::config;
use crate::domain::{ContentRecord, ContentType};
use crate::export;
use crate::store::{AddOptions, Store, StoreError, TypeFilter};

/// curator - local-first content curation
#[derive(Parser, Debug)]
#[command(name = "curator")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a URL to the collection
    Add {
        /// URL to add (must be an absolute URL with a scheme)
        url: String,

        /// Custom title (derived from the URL if not specified)
        #[arg(long)]
        title: Option<String>,

        /// Tags to apply (comma-separated)
        #[arg(short, long)]
        tags: Option<String>,

        /// Skip AI summarization for this record
        #[arg(long)]
        no_summarize: bool,
    },

    /// List records in the collection
    List {
        /// Filter by content type
        #[arg(short, long, value_enum)]
        content_type: Option<TypeArg>,

        /// Maximum number of records to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show details of a record
    Show {
        /// Record id (or unique prefix)
        record_id: String,
    },

    /// Remove a record from the collection
    Remove {
        /// Record id (or unique prefix)
        record_id: String,
    },

    /// Search records by title, URL, or tag
    Search {
        /// Search query
        query: String,
    },

    /// Export the collection to a file
    Export {
        /// Output format
        #[arg(value_enum)]
        format: ExportFormat,

        /// Output path (defaults to content_export.html / content_database.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Content type for CLI (maps to ContentType)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TypeArg {
    /// YouTube video
    Youtube,

    /// Web page/article
    Website,

    /// PDF document
    Pdf,

    /// Unrecognized content
    Unknown,
}

impl From<TypeArg> for ContentType {
    fn from(t: TypeArg) -> Self {
        match t {
            TypeArg::Youtube => ContentType::YouTube,
            TypeArg::Website => ContentType::Website,
            TypeArg::Pdf => ContentType::Pdf,
            TypeArg::Unknown => ContentType::Unknown,
        }
    }
}

/// Export format for the export command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// Self-contained HTML listing
    Html,

    /// Pretty-printed JSON dump
    Json,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Add {
                url,
                title,
                tags,
                no_summarize,
            } => add_record(&url, title, tags, no_summarize).await,
            Commands::List {
                content_type,
                limit,
            } => list_records(content_type, limit).await,
            Commands::Show { record_id } => show_record(&record_id).await,
            Commands::Remove { record_id } => remove_record(&record_id).await,
            Commands::Search { query } => search_records(&query).await,
            Commands::Export { format, output } => export_records(format, output).await,
            Commands::Config => show_config(),
        }
    }
}

/// Open the store at the configured slot
async fn open_store() -> Result<Store> {
    let path = config::store_path()?;
    Store::open(path.clone())
        .await
        .with_context(|| format!("Failed to open record store at {}", path.display()))
}

/// Split a comma-separated tag list
fn parse_tags(tags: Option<String>) -> Vec<String> {
    tags.map(|tags_str| {
        tags_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Add a record for the URL, then enrich it best-effort
async fn add_record(
    url: &str,
    title: Option<String>,
    tags: Option<String>,
    no_summarize: bool,
) -> Result<()> {
    let cfg = config::config()?;
    let mut store = open_store().await?;

    let options = AddOptions {
        title,
        tags: parse_tags(tags),
    };

    let record = match store.add(url, options).await {
        Ok(record) => record,
        Err(StoreError::Validation(e)) => {
            eprintln!("Invalid URL: {}", e);
            std::process::exit(2);
        }
        Err(e) => return Err(e).context("Failed to add record"),
    };

    eprintln!("Added {} ({})", record.id, record.content_type);

    if !no_summarize {
        if let Some(summarizer) = adapters::from_config(&cfg.summarizer) {
            enrich_record(&mut store, &record, summarizer.as_ref(), cfg.summarizer.timeout_seconds)
                .await?;
        }
    }

    // Show the record as stored, enrichment included
    if let Some(stored) = store.get(&record.id) {
        println!();
        print_record(stored);
    }

    Ok(())
}

/// Run the summarizer and apply the result if the record still exists.
/// Failures degrade to an un-enriched record, never an error.
async fn enrich_record(
    store: &mut Store,
    record: &ContentRecord,
    summarizer: &dyn Summarizer,
    timeout_seconds: u64,
) -> Result<()> {
    eprintln!("Summarizing via {}...", summarizer.name());

    let timeout = Duration::from_secs(timeout_seconds);
    match summarizer.summarize(&record.url, timeout).await {
        Ok(enrichment) if !enrichment.is_empty() => {
            if store.apply_enrichment(&record.id, enrichment).await? {
                eprintln!("Enrichment applied");
            }
        }
        Ok(_) => {
            eprintln!("Summarizer returned nothing; record kept without enrichment");
        }
        Err(e) => {
            warn!("Summarization failed: {e:#}");
            eprintln!("Summarization skipped; record kept without enrichment");
        }
    }

    Ok(())
}

/// List records, optionally filtered by type
async fn list_records(content_type: Option<TypeArg>, limit: usize) -> Result<()> {
    let store = open_store().await?;

    if store.is_empty() {
        println!("No content added yet. Use 'curator add <url>' to add your first record.");
        return Ok(());
    }

    let filter = content_type
        .map(|t| TypeFilter::Only(t.into()))
        .unwrap_or(TypeFilter::All);

    let records = store.list(filter);

    if records.is_empty() {
        println!("No records match that filter.");
        return Ok(());
    }

    println!("{:<38} {:<10} {:<50}", "ID", "TYPE", "TITLE");
    println!("{}", "-".repeat(98));

    for record in records.iter().take(limit) {
        println!(
            "{:<38} {:<10} {:<50}",
            record.id.as_str(),
            record.content_type.to_string(),
            truncate(&record.title, 47)
        );
    }

    println!("\nTotal: {} record(s)", store.len());

    Ok(())
}

/// Show details of a record
async fn show_record(record_id: &str) -> Result<()> {
    let store = open_store().await?;

    let record = store
        .find_by_prefix(record_id)
        .ok_or_else(|| anyhow::anyhow!("Record not found: {}", record_id))?;

    print_record(record);

    Ok(())
}

/// Remove a record
async fn remove_record(record_id: &str) -> Result<()> {
    let mut store = open_store().await?;

    let Some(id) = store.find_by_prefix(record_id).map(|r| r.id.clone()) else {
        eprintln!("Nothing removed: no record matches '{}'", record_id);
        return Ok(());
    };

    match store.remove(&id).await? {
        Some(removed) => {
            eprintln!("Removed '{}' ({})", removed.title, removed.id);
        }
        None => {
            eprintln!("Nothing removed: no record matches '{}'", record_id);
        }
    }

    Ok(())
}

/// Search the collection
async fn search_records(query: &str) -> Result<()> {
    let store = open_store().await?;

    let results = store.search(query);

    if results.is_empty() {
        println!("No results found for: {}", query);
        return Ok(());
    }

    println!("Found {} result(s) for \"{}\":\n", results.len(), query);
    println!("{:<38} {:<10} {:<50}", "ID", "TYPE", "TITLE");
    println!("{}", "-".repeat(98));

    for record in &results {
        println!(
            "{:<38} {:<10} {:<50}",
            record.id.as_str(),
            record.content_type.to_string(),
            truncate(&record.title, 47)
        );
    }

    Ok(())
}

/// Export the collection to a file
async fn export_records(format: ExportFormat, output: Option<PathBuf>) -> Result<()> {
    let store = open_store().await?;

    if store.is_empty() {
        println!("Nothing to export. Add some content before exporting.");
        return Ok(());
    }

    let (content, default_name) = match format {
        ExportFormat::Html => (
            export::to_html(store.records()),
            export::HTML_EXPORT_FILENAME,
        ),
        ExportFormat::Json => (
            export::to_json(store.records())?,
            export::JSON_EXPORT_FILENAME,
        ),
    };

    let path = output.unwrap_or_else(|| PathBuf::from(default_name));
    tokio::fs::write(&path, content)
        .await
        .with_context(|| format!("Failed to write export to {}", path.display()))?;

    eprintln!("Exported {} record(s) to {}", store.len(), path.display());

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("Curator configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:  {}", cfg.home.display());
    println!("  Store: {}", cfg.store.display());
    println!();
    println!("Summarizer:");
    println!("  Mode:    {}", cfg.summarizer.mode);
    println!(
        "  Endpoint: {}",
        cfg.summarizer.endpoint.as_deref().unwrap_or("(none)")
    );
    println!("  Timeout: {}s", cfg.summarizer.timeout_seconds);

    Ok(())
}

/// Print the full detail view of a record
fn print_record(record: &ContentRecord) {
    println!("ID:      {}", record.id);
    println!("Title:   {}", record.title);
    println!("URL:     {}", record.url);
    println!("Type:    {}", record.content_type);
    println!("Preview: {}", record.preview_type);
    println!("Created: {}", record.created_at);
    if !record.summary.is_empty() {
        println!("Summary: {}", record.summary);
    }
    if !record.keywords.is_empty() {
        println!("Keywords: {}", record.keywords.join(", "));
    }
    if !record.tags.is_empty() {
        println!("Tags:    {}", record.tags.join(", "));
    }
}

/// Truncate a title for table display without splitting a character
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!(
            parse_tags(Some("rust, async , ,tokio".to_string())),
            vec!["rust", "async", "tokio"]
        );
        assert!(parse_tags(None).is_empty());
        assert!(parse_tags(Some("  ".to_string())).is_empty());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 47), "short");
        let long = "a".repeat(60);
        let truncated = truncate(&long, 47);
        assert_eq!(truncated.chars().count(), 50); // 47 + "..."
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_type_arg_mapping() {
        assert_eq!(ContentType::from(TypeArg::Youtube), ContentType::YouTube);
        assert_eq!(ContentType::from(TypeArg::Website), ContentType::Website);
        assert_eq!(ContentType::from(TypeArg::Pdf), ContentType::Pdf);
    }
}
