use crate::command::CommandRunner;
use crate::config::ArchiveConfig;
use crate::retrieval::{describe_exit, RetrievalOutcome};
use crate::url::extract_subreddit;
use std::path::{Path, PathBuf};

/// Subdirectory of the archive that holds single-page fetches
const PAGE_DIR: &str = "reddit";

/// Cookie that gets past the age-verification interstitial
const AGE_COOKIE: &str = "over18=1";

/// Where the page for community `name` is stored
pub fn page_output_path(archive_dir: &Path, name: &str) -> PathBuf {
    archive_dir.join(PAGE_DIR).join(format!("{}.html", name))
}

/// Arguments for a single-page `curl` fetch
///
/// Follows redirects, accepts compressed bodies, fails on HTTP errors and
/// retries transient failures `config.fetch_retries` times within a total
/// budget of `config.fetch_timeout_secs`.
pub fn page_fetch_args(url: &str, output: &Path, config: &ArchiveConfig) -> Vec<String> {
    vec![
        "-L".to_string(),
        "-A".to_string(),
        config.user_agent.clone(),
        "--compressed".to_string(),
        "--fail".to_string(),
        "--retry".to_string(),
        config.fetch_retries.to_string(),
        "--max-time".to_string(),
        config.fetch_timeout_secs.to_string(),
        "-b".to_string(),
        AGE_COOKIE.to_string(),
        "-o".to_string(),
        output.display().to_string(),
        url.to_string(),
    ]
}

/// Fetches one wiki page to `<archive_dir>/reddit/<name>.html`
pub async fn fetch_single_page<R: CommandRunner + Sync>(
    runner: &R,
    url: &str,
    config: &ArchiveConfig,
) -> RetrievalOutcome {
    let Some(name) = extract_subreddit(url) else {
        tracing::error!("Could not extract subreddit from URL: {}", url);
        return RetrievalOutcome::failed(format!("no subreddit in {}", url));
    };

    let output_dir = config.archive_dir.join(PAGE_DIR);
    if let Err(e) = tokio::fs::create_dir_all(&output_dir).await {
        tracing::error!(
            "Archive failure: {}, could not create {}: {}",
            url,
            output_dir.display(),
            e
        );
        return RetrievalOutcome::failed(e.to_string());
    }

    let output_path = page_output_path(&config.archive_dir, &name);
    let args = page_fetch_args(url, &output_path, config);

    match runner.run(&config.curl_path, &args).await {
        Ok(output) if output.success() => RetrievalOutcome::Archived { path: output_path },
        Ok(output) => {
            let reason = describe_exit("curl", &output);
            tracing::error!("Archive failure: {}, Error: {}", url, reason);
            RetrievalOutcome::failed(reason)
        }
        Err(e) => {
            tracing::error!("Archive failure: {}, Error: {}", url, e);
            RetrievalOutcome::failed(e.to_string())
        }
    }
}
