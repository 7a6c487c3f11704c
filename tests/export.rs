//! Export Integration Tests
//!
//! Round-trips a populated store through the JSON export and checks the
//! HTML document against markup injection.

use curator::{export, AddOptions, ContentRecord, Enrichment, Store};
use tempfile::TempDir;

#[tokio::test]
async fn test_json_export_rehydrates() {
    let temp = TempDir::new().unwrap();
    let mut store = Store::open(temp.path().join("records.json")).await.unwrap();

    store
        .add(
            "https://youtu.be/abc123",
            AddOptions {
                title: Some("A Talk".to_string()),
                tags: vec!["video".to_string()],
            },
        )
        .await
        .unwrap();
    let article = store
        .add("https://example.com/article", AddOptions::default())
        .await
        .unwrap();
    store
        .apply_enrichment(
            &article.id,
            Enrichment {
                summary: "An overview of async runtimes in practice today.".to_string(),
                keywords: vec!["async".to_string()],
            },
        )
        .await
        .unwrap();

    let json = export::to_json(store.records()).unwrap();
    let parsed: Vec<ContentRecord> = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.len(), 2);
    for (exported, original) in parsed.iter().zip(store.records()) {
        assert_eq!(exported.id, original.id);
        assert_eq!(exported.url, original.url);
        assert_eq!(exported.title, original.title);
        assert_eq!(exported.content_type, original.content_type);
        assert_eq!(exported.summary, original.summary);
        assert_eq!(exported.keywords, original.keywords);
        assert_eq!(exported.tags, original.tags);
        assert_eq!(exported.created_at, original.created_at);
        assert_eq!(exported.preview_type, original.preview_type);
    }
}

#[tokio::test]
async fn test_html_export_escapes_hostile_titles() {
    let temp = TempDir::new().unwrap();
    let mut store = Store::open(temp.path().join("records.json")).await.unwrap();

    let record = store
        .add(
            "https://example.com/?q=a&b=c",
            AddOptions {
                title: Some("<img src=x onerror=alert(1)> & friends".to_string()),
                tags: vec!["<b>bold</b>".to_string()],
            },
        )
        .await
        .unwrap();
    store
        .apply_enrichment(
            &record.id,
            Enrichment {
                summary: "Summary with <markup> & ampersands.".to_string(),
                keywords: vec![],
            },
        )
        .await
        .unwrap();

    let html = export::to_html(store.records());

    assert!(html.contains("<title>Content Export</title>"));
    assert!(!html.contains("<img src=x"));
    assert!(!html.contains("<b>bold</b>"));
    assert!(!html.contains("<markup>"));
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt; &amp; friends"));
    assert!(html.contains("Summary with &lt;markup&gt; &amp; ampersands."));
    assert!(html.contains("https://example.com/?q=a&amp;b=c"));
}

#[tokio::test]
async fn test_html_lists_every_record() {
    let temp = TempDir::new().unwrap();
    let mut store = Store::open(temp.path().join("records.json")).await.unwrap();

    for i in 0..3 {
        store
            .add(&format!("https://example.com/{i}"), AddOptions::default())
            .await
            .unwrap();
    }

    let html = export::to_html(store.records());
    assert_eq!(html.matches("<li>").count(), 3);
    for i in 0..3 {
        assert!(html.contains(&format!("https://example.com/{i}")));
    }
}
