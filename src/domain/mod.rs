//! Domain types: the content record and its classification.

pub mod classify;
pub mod record;

pub use classify::{classify, Classification, UNTITLED};
pub use record::{ContentRecord, ContentType, PreviewType, RecordId};
