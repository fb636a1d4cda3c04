use url::Url;

/// Extracts the community name from a wiki URL
///
/// Looks for the path segment that follows an `r` segment. The name must be
/// non-empty and made of ASCII letters, digits, `_` or `-`, since it becomes
/// a file name under the archive directory.
///
/// # Examples
///
/// ```
/// use site_archiver::url::extract_subreddit;
///
/// assert_eq!(
///     extract_subreddit("https://old.reddit.com/r/rust/wiki"),
///     Some("rust".to_string())
/// );
/// assert_eq!(extract_subreddit("https://old.reddit.com/wiki"), None);
/// ```
pub fn extract_subreddit(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let mut segments = parsed.path_segments()?;

    segments.find(|segment| *segment == "r")?;
    let name = segments.next()?;

    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    valid.then(|| name.to_string())
}
