use crate::{UrlError, UrlResult};
use url::Url;

/// Parses a mirror target and makes sure it carries a host
pub fn parse_target(raw: &str) -> UrlResult<Url> {
    let url = Url::parse(raw)?;
    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(raw.to_string()));
    }
    Ok(url)
}

/// Extracts the lowercase host from a URL, without the port
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_archiver::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM:8080/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        let url = parse_target("https://example.com/docs/").unwrap();
        assert_eq!(url.path(), "/docs/");
    }

    #[test]
    fn test_parse_target_rejects_garbage() {
        assert!(matches!(parse_target("example"), Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_parse_target_rejects_hostless() {
        assert!(matches!(
            parse_target("mailto:someone@example.com"),
            Err(UrlError::MissingHost(_))
        ));
    }

    #[test]
    fn test_extract_host() {
        let url = Url::parse("https://blog.example.com/post").unwrap();
        assert_eq!(extract_host(&url), Some("blog.example.com".to_string()));
    }

    #[test]
    fn test_extract_host_strips_port() {
        let url = Url::parse("http://127.0.0.1:8080/").unwrap();
        assert_eq!(extract_host(&url), Some("127.0.0.1".to_string()));
    }
}
