//! Index renderer traits and types
//!
//! This module defines the renderer interface shared by the document and
//! page indexes, and the run-level context their boilerplate is built from.

use crate::config::SiteConfig;
use crate::storage::Metadata;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Links derived from the hosting repository coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLinks {
    /// Published archive, browsable online
    pub pages_url: String,
    /// Snapshot of the default branch
    pub zip_url: String,
    /// Issue tracker
    pub issues_url: String,
}

impl SiteLinks {
    pub fn for_repository(owner: &str, name: &str) -> Self {
        Self {
            pages_url: format!("https://{}.github.io/{}/", owner, name),
            zip_url: format!(
                "https://github.com/{}/{}/archive/refs/heads/main.zip",
                owner, name
            ),
            issues_url: format!("https://github.com/{}/{}/issues", owner, name),
        }
    }
}

/// Everything the index boilerplate needs besides the metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexContext {
    pub links: Option<SiteLinks>,
    pub contact_email: Option<String>,
    pub schedule_description: Option<String>,
}

impl IndexContext {
    pub fn from_config(site: &SiteConfig) -> Self {
        Self {
            links: site
                .repository_parts()
                .map(|(owner, name)| SiteLinks::for_repository(owner, name)),
            contact_email: site.contact_email.clone(),
            schedule_description: site.schedule_description.clone(),
        }
    }
}

/// Trait for index renderers
///
/// A renderer turns the complete metadata into one self-contained document.
/// Every call produces the whole document; nothing is appended.
pub trait IndexRenderer {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Renders the full index
    fn render(&self, metadata: &Metadata, context: &IndexContext) -> String;

    /// Renders the index and overwrites `path` with it
    fn write(&self, metadata: &Metadata, context: &IndexContext, path: &Path) -> OutputResult<()> {
        let content = self.render(metadata, context);
        std::fs::write(path, content).map_err(|source| OutputError::Write {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!("Wrote {} index to {}", self.name(), path.display());
        Ok(())
    }
}
