//! Title extraction for archived documents
//!
//! The indexes carry a description column; it is filled with the `<title>`
//! of the archived main document when one can be read.

use scraper::{Html, Selector};
use std::path::Path;

/// Longest title kept, in characters
const MAX_TITLE_CHARS: usize = 200;

/// Extracts the page title from an HTML document
///
/// Whitespace runs are collapsed and overly long titles are truncated.
///
/// # Example
///
/// ```
/// use site_archiver::retrieval::extract_title;
///
/// let html = "<html><head><title>\n  Rust   Wiki \n</title></head></html>";
/// assert_eq!(extract_title(html), Some("Rust Wiki".to_string()));
/// ```
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let title_selector = Selector::parse("title").ok()?;

    let raw: String = document.select(&title_selector).next()?.text().collect();
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.is_empty() {
        return None;
    }

    Some(collapsed.chars().take(MAX_TITLE_CHARS).collect())
}

/// Reads the title of an archived file, if it is an HTML document
pub async fn read_title(path: &Path) -> Option<String> {
    let is_html = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));

    if !is_html {
        return None;
    }

    match tokio::fs::read(path).await {
        Ok(bytes) => extract_title(&String::from_utf8_lossy(&bytes)),
        Err(e) => {
            tracing::debug!("No title for {}: {}", path.display(), e);
            None
        }
    }
}
