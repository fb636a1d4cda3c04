use crate::command::CommandRunner;
use crate::config::ArchiveConfig;
use crate::retrieval::cleanup::remove_backup_files;
use crate::retrieval::{describe_exit, RetrievalOutcome};
use crate::url::{extract_host, parse_target};
use std::path::{Path, PathBuf};
use url::Url;

/// Arguments for a polite recursive `wget` mirror
///
/// Links are rewritten for offline browsing, page assets are fetched, the
/// crawl never ascends above the start path, robots exclusions are ignored and
/// requests are spaced with random waits. `--limit-rate` is only passed when a
/// cap is configured.
pub fn mirror_args(url: &str, config: &ArchiveConfig) -> Vec<String> {
    let mut args: Vec<String> = [
        "--mirror",
        "--convert-links",
        "--adjust-extension",
        "--page-requisites",
        "--no-parent",
        "-e",
        "robots=off",
        "--random-wait",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    args.push(format!("--user-agent={}", config.user_agent));
    args.push("--no-check-certificate".to_string());

    if let Some(rate) = config.limit_rate.as_deref().filter(|r| !r.is_empty()) {
        args.push(format!("--limit-rate={}", rate));
    }

    args.push("-P".to_string());
    args.push(config.archive_dir.display().to_string());
    args.push(url.to_string());

    args
}

/// Returns true if the last path segment looks like a file name
fn ends_in_file(url: &Url) -> bool {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .is_some_and(|last| last.contains('.'))
}

/// Computes where the mirrored main document is expected to land
///
/// A path ending in a file name with an extension maps to
/// `<archive_dir>/<host><path>`; anything else maps to
/// `<archive_dir>/<host>/index.html`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use url::Url;
/// use site_archiver::retrieval::expected_mirror_path;
///
/// let url = Url::parse("https://example.com/docs/guide.html").unwrap();
/// assert_eq!(
///     expected_mirror_path(Path::new("archive"), &url),
///     Some(Path::new("archive/example.com/docs/guide.html").to_path_buf())
/// );
/// ```
pub fn expected_mirror_path(archive_dir: &Path, url: &Url) -> Option<PathBuf> {
    let host = extract_host(url)?;
    Some(host_path(archive_dir, &host, url))
}

fn host_path(archive_dir: &Path, host_dir: &str, url: &Url) -> PathBuf {
    if ends_in_file(url) {
        archive_dir.join(format!("{}{}", host_dir, url.path()))
    } else {
        archive_dir.join(host_dir).join("index.html")
    }
}

/// Every location the main document may have been written to, most likely
/// first
///
/// `wget` writes directory URLs below their own path, appends `.html` to
/// pages served with another extension, and keeps explicit ports in the host
/// directory name. The host-root formula path comes last so an index left by
/// an earlier mirror of the site root cannot shadow a deeper page.
pub fn mirror_path_candidates(archive_dir: &Path, url: &Url) -> Vec<PathBuf> {
    let Some(host) = extract_host(url) else {
        return Vec::new();
    };

    let mut host_dirs = vec![host.clone()];
    if let Some(port) = url.port() {
        host_dirs.push(format!("{}:{}", host, port));
    }

    let mut candidates = Vec::new();
    let mut fallbacks = Vec::new();
    for host_dir in &host_dirs {
        let primary = host_path(archive_dir, host_dir, url);

        if ends_in_file(url) {
            let mut adjusted = primary.clone().into_os_string();
            adjusted.push(".html");
            candidates.push(primary);
            candidates.push(PathBuf::from(adjusted));
            continue;
        }

        let dir_path = url.path().trim_matches('/');
        if !dir_path.is_empty() {
            if !url.path().ends_with('/') {
                candidates.push(archive_dir.join(host_dir).join(format!("{}.html", dir_path)));
            }
            candidates.push(archive_dir.join(host_dir).join(dir_path).join("index.html"));
        }
        fallbacks.push(primary);
    }

    candidates.extend(fallbacks);
    candidates
}

/// Picks the first candidate that exists, falling back to the expected path
fn resolve_mirror_path(archive_dir: &Path, url: &Url) -> Option<PathBuf> {
    let expected = expected_mirror_path(archive_dir, url)?;
    let candidates = mirror_path_candidates(archive_dir, url);

    match candidates.into_iter().find(|path| path.is_file()) {
        Some(found) => {
            if found != expected {
                tracing::debug!(
                    "Main document found at {} instead of {}",
                    found.display(),
                    expected.display()
                );
            }
            Some(found)
        }
        None => {
            tracing::warn!(
                "Mirror finished but {} does not exist; recording it anyway",
                expected.display()
            );
            Some(expected)
        }
    }
}

/// Mirrors a site into the archive directory
pub async fn mirror_site<R: CommandRunner + Sync>(
    runner: &R,
    url: &str,
    config: &ArchiveConfig,
) -> RetrievalOutcome {
    let args = mirror_args(url, config);

    match runner.run(&config.wget_path, &args).await {
        Ok(output) if output.success() => {}
        Ok(output) => {
            let reason = describe_exit("wget", &output);
            tracing::error!("Archive failure: {}, Error: {}", url, reason);
            return RetrievalOutcome::failed(reason);
        }
        Err(e) => {
            tracing::error!("Archive failure: {}, Error: {}", url, e);
            return RetrievalOutcome::failed(e.to_string());
        }
    }

    let removed = remove_backup_files(&config.archive_dir);
    if removed > 0 {
        tracing::debug!("Removed {} backup files", removed);
    }

    let target = match parse_target(url) {
        Ok(target) => target,
        Err(e) => {
            tracing::error!("Archive failure: {}, Error: {}", url, e);
            return RetrievalOutcome::failed(e.to_string());
        }
    };

    match resolve_mirror_path(&config.archive_dir, &target) {
        Some(path) => RetrievalOutcome::Archived { path },
        None => RetrievalOutcome::failed(format!("no host in {}", url)),
    }
}
