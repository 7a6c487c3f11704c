//! Export serialization for the record collection.
//!
//! Two pure functions over a snapshot: a full-fidelity JSON dump suitable
//! for re-hydration, and a self-contained HTML listing. Both are total;
//! refusing to export an empty collection is the caller's job.

use anyhow::Result;

use crate::domain::ContentRecord;

/// Default filename for the JSON export
pub const JSON_EXPORT_FILENAME: &str = "content_database.json";

/// Default filename for the HTML export
pub const HTML_EXPORT_FILENAME: &str = "content_export.html";

/// Serialize every field of every record, pretty-printed.
pub fn to_json(records: &[ContentRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Render a self-contained HTML document listing the records. All
/// user-controlled text is escaped; titles, URLs, and summaries are never
/// interpreted as markup.
pub fn to_html(records: &[ContentRecord]) -> String {
    let mut html = String::from(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Content Export</title>
    <style>
      body { font-family: sans-serif; margin: 20px; line-height: 1.6; }
      h1 { color: #333; }
      ul { list-style-type: none; padding: 0; }
      li { margin-bottom: 15px; padding: 10px; border: 1px solid #ddd; border-radius: 5px; }
      a { color: #007bff; text-decoration: none; }
      a:hover { text-decoration: underline; }
      .item-type { font-size: 0.9em; color: #555; }
      .item-tags { font-size: 0.9em; color: #777; }
    </style>
  </head>
  <body>
    <h1>My Curated Content</h1>
    <ul>
"#,
    );

    for record in records {
        let url = escape_html(&record.url);
        let title = escape_html(&record.title);

        html.push_str("      <li>\n");
        html.push_str(&format!(
            "        <strong><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></strong><br>\n",
            url, title
        ));
        html.push_str(&format!(
            "        <span class=\"item-type\">Type: {}</span><br>\n",
            record.content_type
        ));
        html.push_str(&format!(
            "        <span class=\"item-url\">URL: <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></span><br>\n",
            url, url
        ));
        if !record.summary.is_empty() {
            html.push_str(&format!(
                "        <p>Summary: {}</p>\n",
                escape_html(&record.summary)
            ));
        }
        if !record.tags.is_empty() {
            let tags: Vec<String> = record.tags.iter().map(|t| escape_html(t)).collect();
            html.push_str(&format!(
                "        <span class=\"item-tags\">Tags: {}</span>\n",
                tags.join(", ")
            ));
        }
        html.push_str("      </li>\n");
    }

    html.push_str(
        r#"    </ul>
  </body>
</html>
"#,
    );

    html
}

/// Escape the HTML-significant characters in user-controlled text.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
