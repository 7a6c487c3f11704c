//! Record store backed by a single JSON slot.
//!
//! The store owns the in-memory collection and the path of its persistent
//! slot. It is hydrated once at open and the whole collection is
//! re-serialized after every mutation. Records are kept in insertion order,
//! newest first.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};
use url::Url;

use crate::adapters::Enrichment;
use crate::domain::{classify, ContentRecord, ContentType, RecordId};

/// Errors from URL validation, surfaced before any side effect occurs
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("'{input}' is not a valid absolute URL: {reason}")]
    Malformed { input: String, reason: String },
}

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Validate that the input parses as an absolute URL with a scheme.
pub fn validate_url(input: &str) -> Result<Url, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Empty);
    }

    Url::parse(input).map_err(|e| ValidationError::Malformed {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Listing restriction: everything, or one content type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Only(ContentType),
}

impl TypeFilter {
    fn matches(&self, record: &ContentRecord) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(content_type) => record.content_type == *content_type,
        }
    }
}

/// User-supplied options for the add operation
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    /// Override for the classifier's default title
    pub title: Option<String>,
    /// Initial tags (enrichment keywords are appended later)
    pub tags: Vec<String>,
}

/// The record collection and its persistent slot
pub struct Store {
    path: PathBuf,
    records: Vec<ContentRecord>,
}

impl Store {
    /// Open the store, hydrating from the slot. A missing slot yields an
    /// empty store; an unparseable one is discarded with a warning, never
    /// a startup failure.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let records = match fs::read_to_string(&path).await {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(records) => records,
                Err(e) => {
                    warn!(
                        "Discarding unparseable record slot {}: {}",
                        path.display(),
                        e
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        debug!("Hydrated {} record(s) from {}", records.len(), path.display());

        Ok(Self { path, records })
    }

    /// The slot path this store persists to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate, classify, and store a new record for the URL. The record
    /// starts un-enriched; enrichment is applied afterwards (if at all)
    /// via [`Store::apply_enrichment`].
    pub async fn add(
        &mut self,
        url: &str,
        options: AddOptions,
    ) -> Result<ContentRecord, StoreError> {
        let parsed = validate_url(url)?;
        let classification = classify(&parsed);

        let title = options
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(classification.default_title);

        // The record keeps the URL as entered, not the normalized form
        let record = ContentRecord::new(url.trim(), title, classification.content_type)
            .with_tags(options.tags);

        self.insert(record.clone());
        self.persist().await?;

        Ok(record)
    }

    /// Prepend a record. Idempotent: a record whose id is already present
    /// is a no-op and the original record is retained. Does not persist.
    pub fn insert(&mut self, record: ContentRecord) -> bool {
        if self.records.iter().any(|r| r.id == record.id) {
            return false;
        }
        self.records.insert(0, record);
        true
    }

    /// Apply enrichment to a record, but only if it still exists; a result
    /// arriving after deletion is silently discarded. Keywords are copied
    /// into the tag list (skipping duplicates), and the title is refined
    /// from the summary's first sentence while it still carries the
    /// classifier default. Persists on apply.
    pub async fn apply_enrichment(
        &mut self,
        id: &RecordId,
        enrichment: Enrichment,
    ) -> Result<bool, StoreError> {
        let Some(record) = self.records.iter_mut().find(|r| &r.id == id) else {
            debug!("Discarding enrichment for removed record {}", id);
            return Ok(false);
        };

        if still_default_title(record) {
            if let Some(title) = title_from_summary(&enrichment.summary) {
                record.title = title;
            }
        }

        record.summary = enrichment.summary;
        for keyword in &enrichment.keywords {
            if !record.tags.contains(keyword) {
                record.tags.push(keyword.clone());
            }
        }
        record.keywords = enrichment.keywords;

        self.persist().await?;
        Ok(true)
    }

    /// Remove a record by id. Absent ids are a no-op, not an error.
    pub async fn remove(&mut self, id: &RecordId) -> Result<Option<ContentRecord>, StoreError> {
        let Some(pos) = self.records.iter().position(|r| &r.id == id) else {
            return Ok(None);
        };

        let removed = self.records.remove(pos);
        self.persist().await?;
        Ok(Some(removed))
    }

    /// Records in collection order (newest first), optionally restricted
    /// to one content type.
    pub fn list(&self, filter: TypeFilter) -> Vec<&ContentRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Get a record by exact id
    pub fn get(&self, id: &RecordId) -> Option<&ContentRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Get the first record whose id starts with the given prefix
    pub fn find_by_prefix(&self, prefix: &str) -> Option<&ContentRecord> {
        self.records
            .iter()
            .find(|r| r.id.as_str().starts_with(prefix))
    }

    /// Search records by query (case-insensitive substring match over
    /// title, URL, and tags)
    pub fn search(&self, query: &str) -> Vec<&ContentRecord> {
        let query_lower = query.to_lowercase();

        self.records
            .iter()
            .filter(|record| {
                record.title.to_lowercase().contains(&query_lower)
                    || record.url.to_lowercase().contains(&query_lower)
                    || record
                        .tags
                        .iter()
                        .any(|t| t.to_lowercase().contains(&query_lower))
            })
            .collect()
    }

    /// Snapshot of the full collection, for export
    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rewrite the whole collection to the slot
    async fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.path, content).await?;

        Ok(())
    }
}

/// Whether the record's title is still what the classifier would assign.
fn still_default_title(record: &ContentRecord) -> bool {
    match Url::parse(&record.url) {
        Ok(url) => classify(&url).default_title == record.title,
        Err(_) => false,
    }
}

/// The original tool promotes the summary's first sentence to the title
/// when it is short and meaningful.
fn title_from_summary(summary: &str) -> Option<String> {
    if summary.len() <= 5 {
        return None;
    }

    let first = summary.split('.').next()?.trim();
    if first.is_empty() || first.len() >= 100 {
        return None;
    }

    Some(first.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn empty_store(temp: &TempDir) -> Store {
        Store::open(temp.path().join("records.json")).await.unwrap()
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let temp = TempDir::new().unwrap();
        let mut store = empty_store(&temp).await;

        let record = store
            .add("https://youtu.be/abc123", AddOptions::default())
            .await
            .unwrap();

        assert_eq!(record.content_type, ContentType::YouTube);
        assert_eq!(store.len(), 1);
        assert_eq!(store.list(TypeFilter::All)[0].id, record.id);
    }

    #[tokio::test]
    async fn test_newest_first_order() {
        let temp = TempDir::new().unwrap();
        let mut store = empty_store(&temp).await;

        let first = store
            .add("https://example.com/1", AddOptions::default())
            .await
            .unwrap();
        let second = store
            .add("https://example.com/2", AddOptions::default())
            .await
            .unwrap();

        let listed = store.list(TypeFilter::All);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_noop() {
        let temp = TempDir::new().unwrap();
        let mut store = empty_store(&temp).await;

        let record = store
            .add("https://example.com", AddOptions::default())
            .await
            .unwrap();

        let mut duplicate = record.clone();
        duplicate.title = "Impostor".to_string();

        assert!(!store.insert(duplicate));
        assert_eq!(store.len(), 1);
        // The original record is retained
        assert_ne!(store.get(&record.id).unwrap().title, "Impostor");
    }

    #[tokio::test]
    async fn test_remove_present_and_absent() {
        let temp = TempDir::new().unwrap();
        let mut store = empty_store(&temp).await;

        let record = store
            .add("https://example.com", AddOptions::default())
            .await
            .unwrap();
        assert_eq!(store.len(), 1);

        let removed = store.remove(&record.id).await.unwrap();
        assert!(removed.is_some());
        assert_eq!(store.len(), 0);

        // Removing again is a no-op, not an error
        let removed = store.remove(&record.id).await.unwrap();
        assert!(removed.is_none());
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_type_filter() {
        let temp = TempDir::new().unwrap();
        let mut store = empty_store(&temp).await;

        store
            .add("https://youtube.com/watch?v=1", AddOptions::default())
            .await
            .unwrap();
        store
            .add("https://example.com/doc.pdf", AddOptions::default())
            .await
            .unwrap();
        store
            .add("https://example.com/article", AddOptions::default())
            .await
            .unwrap();

        assert_eq!(store.list(TypeFilter::All).len(), 3);
        assert_eq!(
            store.list(TypeFilter::Only(ContentType::YouTube)).len(),
            1
        );
        assert_eq!(store.list(TypeFilter::Only(ContentType::Pdf)).len(), 1);
        assert_eq!(
            store.list(TypeFilter::Only(ContentType::Website)).len(),
            1
        );
    }

    #[tokio::test]
    async fn test_validation_rejects_before_side_effects() {
        let temp = TempDir::new().unwrap();
        let mut store = empty_store(&temp).await;

        for bad in ["", "   ", "not a url", "example.com/no-scheme"] {
            let err = store.add(bad, AddOptions::default()).await.unwrap_err();
            assert!(matches!(err, StoreError::Validation(_)), "{bad:?}");
        }

        assert!(store.is_empty());
        // Nothing was persisted either
        assert!(!temp.path().join("records.json").exists());
    }

    #[tokio::test]
    async fn test_search() {
        let temp = TempDir::new().unwrap();
        let mut store = empty_store(&temp).await;

        store
            .add(
                "https://youtube.com/watch?v=rust-talk",
                AddOptions {
                    title: Some("Introduction to Rust".to_string()),
                    tags: vec!["programming".to_string()],
                },
            )
            .await
            .unwrap();
        store
            .add(
                "https://example.com/gardening",
                AddOptions {
                    title: Some("Tomatoes".to_string()),
                    tags: vec![],
                },
            )
            .await
            .unwrap();

        assert_eq!(store.search("rust").len(), 1);
        assert_eq!(store.search("RUST").len(), 1);
        assert_eq!(store.search("programming").len(), 1);
        assert_eq!(store.search("gardening").len(), 1); // matches the URL
        assert_eq!(store.search("python").len(), 0);
    }

    #[tokio::test]
    async fn test_title_override() {
        let temp = TempDir::new().unwrap();
        let mut store = empty_store(&temp).await;

        let record = store
            .add(
                "https://www.example.com/page",
                AddOptions {
                    title: Some("My Notes".to_string()),
                    tags: vec![],
                },
            )
            .await
            .unwrap();
        assert_eq!(record.title, "My Notes");

        let record = store
            .add("https://www.example.com/other", AddOptions::default())
            .await
            .unwrap();
        assert_eq!(record.title, "Content from example.com");
    }

    #[test]
    fn test_title_from_summary() {
        assert_eq!(
            title_from_summary("A concise look at borrow checking. More detail follows."),
            Some("A concise look at borrow checking".to_string())
        );
        assert_eq!(title_from_summary(""), None);
        assert_eq!(title_from_summary("Tiny"), None);
        let long = "x".repeat(150);
        assert_eq!(title_from_summary(&long), None);
    }
}
