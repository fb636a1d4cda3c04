//! URL handling module for Site-Archiver
//!
//! This module decides which retrieval strategy applies to an input URL and
//! extracts the pieces of a URL the strategies need (subreddit name, host).

mod host;
mod subreddit;

pub use host::{extract_host, parse_target};
pub use subreddit::extract_subreddit;

/// Prefix that marks community wiki shorthand such as `r/rust`
pub const WIKI_PREFIX: &str = "r/";

/// Legacy-interface host that serves community wikis as static HTML
pub const WIKI_HOST: &str = "https://old.reddit.com";

/// How a URL gets retrieved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Fetch one rendered page with `curl` to a fixed file
    SinglePage,
    /// Recursively mirror the site with `wget`
    Mirror,
}

impl Strategy {
    /// Name of the external tool behind this strategy
    pub fn tool(&self) -> &'static str {
        match self {
            Self::SinglePage => "curl",
            Self::Mirror => "wget",
        }
    }
}

/// Result of classifying an input URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedUrl {
    /// URL used for every network operation
    pub url: String,
    /// Retrieval strategy to apply
    pub strategy: Strategy,
}

/// Classifies a raw input URL
///
/// Wiki shorthand (`r/<name>`) is rewritten to the wiki page on the legacy
/// host and fetched as a single page. Everything else is mirrored as-is.
///
/// # Examples
///
/// ```
/// use site_archiver::url::{classify_url, Strategy};
///
/// let classified = classify_url("r/rust");
/// assert_eq!(classified.url, "https://old.reddit.com/r/rust/wiki");
/// assert_eq!(classified.strategy, Strategy::SinglePage);
///
/// let classified = classify_url("https://example.com");
/// assert_eq!(classified.url, "https://example.com");
/// assert_eq!(classified.strategy, Strategy::Mirror);
/// ```
pub fn classify_url(raw: &str) -> ClassifiedUrl {
    if raw.starts_with(WIKI_PREFIX) {
        let url = format!("{}/{}/wiki", WIKI_HOST, raw);
        tracing::info!("Converted subreddit URL to wiki: {}", url);
        return ClassifiedUrl {
            url,
            strategy: Strategy::SinglePage,
        };
    }

    ClassifiedUrl {
        url: raw.to_string(),
        strategy: Strategy::Mirror,
    }
}
