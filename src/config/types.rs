use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Browser identity presented by both retrieval strategies unless overridden
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/112.0.0.0 Safari/537.36";

/// Main configuration structure for Site-Archiver
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

impl Config {
    /// Path of the metadata file inside the storage root
    pub fn metadata_path(&self) -> PathBuf {
        self.archive.archive_dir.join("metadata.json")
    }
}

/// Which backend answers the reachability probe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProbeBackend {
    /// Shell out to `curl` and read the `%{http_code}` write-out
    #[default]
    Curl,
    /// Issue the request in-process
    Http,
}

/// Retrieval behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArchiveConfig {
    /// Storage root for the metadata file and retrieved content
    #[serde(rename = "archive-dir")]
    pub archive_dir: PathBuf,

    /// Client identity string for probes and retrievals
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Bandwidth cap handed to `wget --limit-rate` (e.g. "200k")
    #[serde(rename = "limit-rate")]
    pub limit_rate: Option<String>,

    pub probe: ProbeBackend,

    #[serde(rename = "curl-path")]
    pub curl_path: String,

    #[serde(rename = "wget-path")]
    pub wget_path: String,

    /// Upper bound for a single-page fetch (seconds)
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,

    /// Automatic retries on transient single-page fetch failures
    #[serde(rename = "fetch-retries")]
    pub fetch_retries: u32,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            archive_dir: PathBuf::from("archive"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            limit_rate: None,
            probe: ProbeBackend::Curl,
            curl_path: "curl".to_string(),
            wget_path: "wget".to_string(),
            fetch_timeout_secs: 30,
            fetch_retries: 3,
        }
    }
}

/// Published site configuration used by the index renderers
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Hosting coordinates in `owner/name` form
    pub repository: Option<String>,

    #[serde(rename = "contact-email")]
    pub contact_email: Option<String>,

    /// Free text shown at the top of the HTML index
    #[serde(rename = "schedule-description")]
    pub schedule_description: Option<String>,

    #[serde(rename = "readme-path")]
    pub readme_path: PathBuf,

    #[serde(rename = "index-path")]
    pub index_path: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            repository: None,
            contact_email: None,
            schedule_description: None,
            readme_path: PathBuf::from("README.md"),
            index_path: PathBuf::from("index.html"),
        }
    }
}

impl SiteConfig {
    /// Splits the repository coordinates into `(owner, name)`
    pub fn repository_parts(&self) -> Option<(&str, &str)> {
        self.repository.as_deref()?.split_once('/')
    }
}

/// Values supplied on the command line (or through the matching environment
/// variables) that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub archive_dir: Option<PathBuf>,
    pub user_agent: Option<String>,
    pub limit_rate: Option<String>,
    pub probe: Option<ProbeBackend>,
    pub repository: Option<String>,
    pub contact_email: Option<String>,
    pub schedule_description: Option<String>,
}

impl Overrides {
    /// Applies every present, non-blank value on top of `config`
    pub fn apply(self, config: &mut Config) {
        if let Some(dir) = self.archive_dir.filter(|d| d.as_os_str() != "") {
            config.archive.archive_dir = dir;
        }
        if let Some(ua) = non_blank(self.user_agent) {
            config.archive.user_agent = ua;
        }
        if let Some(rate) = non_blank(self.limit_rate) {
            config.archive.limit_rate = Some(rate);
        }
        if let Some(probe) = self.probe {
            config.archive.probe = probe;
        }
        if let Some(repo) = non_blank(self.repository) {
            config.site.repository = Some(repo);
        }
        if let Some(email) = non_blank(self.contact_email) {
            config.site.contact_email = Some(email);
        }
        if let Some(text) = non_blank(self.schedule_description) {
            config.site.schedule_description = Some(text);
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Convenience for tests and callers that build a config around a directory
pub fn config_for_dir(archive_dir: &Path) -> Config {
    let mut config = Config::default();
    config.archive.archive_dir = archive_dir.to_path_buf();
    config
}
