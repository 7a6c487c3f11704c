//! The content record model.
//!
//! A `ContentRecord` is the single domain entity: one curated URL with its
//! classification, optional enrichment, and display metadata. Records are
//! immutable once created, except that enrichment may fill the optional
//! fields after the fact (see `Store::apply_enrichment`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque record identifier, assigned at creation and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Mint a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type of content, decided once from the URL's lexical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// YouTube video
    #[serde(rename = "youtube")]
    YouTube,

    /// Generic web page/article
    Website,

    /// PDF document
    Pdf,

    /// Unrecognized content (only ever hydrated from existing slots)
    Unknown,
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::YouTube => write!(f, "youtube"),
            ContentType::Website => write!(f, "website"),
            ContentType::Pdf => write!(f, "pdf"),
            ContentType::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "youtube" | "yt" => Ok(ContentType::YouTube),
            "website" | "web" | "article" => Ok(ContentType::Website),
            "pdf" => Ok(ContentType::Pdf),
            "unknown" => Ok(ContentType::Unknown),
            _ => anyhow::bail!("Unknown content type: {}", s),
        }
    }
}

/// Rendering strategy hint, fixed at creation from the content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewType {
    /// Embeddable in a frame (videos, web pages)
    Iframe,

    /// Plain text preview
    Text,

    /// Image preview
    Image,
}

impl From<ContentType> for PreviewType {
    fn from(content_type: ContentType) -> Self {
        match content_type {
            ContentType::YouTube | ContentType::Website => PreviewType::Iframe,
            ContentType::Pdf | ContentType::Unknown => PreviewType::Text,
        }
    }
}

impl std::fmt::Display for PreviewType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreviewType::Iframe => write!(f, "iframe"),
            PreviewType::Text => write!(f, "text"),
            PreviewType::Image => write!(f, "image"),
        }
    }
}

/// One curated URL entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Unique record identifier
    pub id: RecordId,

    /// Source URL as entered (not re-validated after creation)
    pub url: String,

    /// Human-readable title
    pub title: String,

    /// Type of content
    pub content_type: ContentType,

    /// AI-generated summary; empty when enrichment was skipped or failed
    #[serde(default)]
    pub summary: String,

    /// AI-extracted keywords; empty when enrichment was skipped or failed
    #[serde(default)]
    pub keywords: Vec<String>,

    /// User/system-assigned labels; seeded from keywords, independent after
    #[serde(default)]
    pub tags: Vec<String>,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// How a preview pane should render this record
    pub preview_type: PreviewType,
}

impl ContentRecord {
    /// Create a new record with a fresh id and the preview type implied by
    /// the content type. Enrichment fields start empty.
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        content_type: ContentType,
    ) -> Self {
        Self {
            id: RecordId::new(),
            url: url.into(),
            title: title.into(),
            content_type,
            summary: String::new(),
            keywords: Vec::new(),
            tags: Vec::new(),
            created_at: Utc::now(),
            preview_type: PreviewType::from(content_type),
        }
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add multiple tags
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Whether an enrichment pass has produced anything for this record
    pub fn is_enriched(&self) -> bool {
        !self.summary.is_empty() || !self.keywords.is_empty()
    }
}
