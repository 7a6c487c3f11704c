//! URL classification.
//!
//! Pure mapping from a parsed URL to a content type and a default display
//! title. Classification happens exactly once, at record creation; the
//! result is never re-derived.

use url::Url;

use super::record::ContentType;

/// Fallback title when the URL carries no usable hostname.
pub const UNTITLED: &str = "Untitled Content";

/// Result of classifying a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Content type decided from the URL's lexical form
    pub content_type: ContentType,

    /// Placeholder display title derived from the hostname
    pub default_title: String,
}

/// Classify a parsed URL. First match wins:
///
/// 1. host contains `youtube.com` or `youtu.be` -> youtube
/// 2. path ends with `.pdf` (case-insensitive) -> pdf
/// 3. anything else -> website
///
/// Deterministic and total over any URL that parsed successfully.
pub fn classify(url: &Url) -> Classification {
    Classification {
        content_type: detect_content_type(url),
        default_title: default_title(url),
    }
}

fn detect_content_type(url: &Url) -> ContentType {
    if let Some(host) = url.host_str() {
        let host = host.to_lowercase();
        if host.contains("youtube.com") || host.contains("youtu.be") {
            return ContentType::YouTube;
        }
    }

    if url.path().to_lowercase().ends_with(".pdf") {
        return ContentType::Pdf;
    }

    ContentType::Website
}

fn default_title(url: &Url) -> String {
    match url.host_str().filter(|h| !h.is_empty()) {
        Some(host) => {
            let host = host.strip_prefix("www.").unwrap_or(host);
            format!("Content from {}", host)
        }
        None => UNTITLED.to_string(),
    }
}
