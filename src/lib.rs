//! curator - local-first content curation
//!
//! A small CLI for curating URLs: each record is classified from the URL's
//! lexical form, optionally enriched with an AI summary and keywords, kept
//! in a local JSON slot, and exportable as HTML or JSON.
//!
//! # Architecture
//!
//! The system is three cooperating pieces, leaf-first:
//! - The classifier maps a URL to a content type and default title
//! - The record store owns the ordered collection and its persistent slot
//! - The CLI/export layer renders listings and produces export documents
//!
//! # Modules
//!
//! - `adapters`: External summarizer integrations (Fabric subprocess, HTTP)
//! - `domain`: Data structures (ContentRecord, classification)
//! - `store`: Collection plus JSON-slot persistence
//! - `export`: HTML/JSON export serializers
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Add a URL (classified, enriched, persisted)
//! curator add https://youtu.be/abc123
//!
//! # List records, newest first
//! curator list --content-type youtube
//!
//! # Export the collection
//! curator export html
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod export;
pub mod store;

// Re-export main types at crate root for convenience
pub use adapters::{Enrichment, FabricSummarizer, HttpSummarizer, Summarizer};
pub use domain::{classify, Classification, ContentRecord, ContentType, PreviewType, RecordId};
pub use store::{AddOptions, Store, StoreError, TypeFilter, ValidationError};
