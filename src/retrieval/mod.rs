//! Retrieval strategies
//!
//! This module turns a classified URL into files on disk:
//! - single-page fetch with `curl` for community wikis
//! - recursive mirror with `wget` for everything else
//! - cleanup of backup files the mirror leaves behind
//! - title extraction from the archived document
//!
//! Retrieval never fails the run. Any problem is logged and reported as
//! [`RetrievalOutcome::Failed`] so it can be recorded in the metadata.

mod cleanup;
mod mirror;
mod page;
mod title;

pub use cleanup::remove_backup_files;
pub use mirror::{expected_mirror_path, mirror_args, mirror_path_candidates, mirror_site};
pub use page::{fetch_single_page, page_fetch_args, page_output_path};
pub use title::{extract_title, read_title};

use crate::command::CommandRunner;
use crate::config::ArchiveConfig;
use crate::url::{ClassifiedUrl, Strategy};
use std::path::PathBuf;

/// Outcome of a retrieval attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalOutcome {
    /// Content was written; `path` points at the main document
    Archived { path: PathBuf },
    /// Nothing usable was retrieved
    Failed { reason: String },
}

impl RetrievalOutcome {
    pub(crate) fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    /// Returns the archived path on success
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Archived { path } => Some(path),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_archived(&self) -> bool {
        matches!(self, Self::Archived { .. })
    }
}

/// Retrieves a classified URL with the strategy chosen for it
pub async fn retrieve<R: CommandRunner + Sync>(
    runner: &R,
    target: &ClassifiedUrl,
    config: &ArchiveConfig,
) -> RetrievalOutcome {
    tracing::info!("Using {} to archive: {}", target.strategy.tool(), target.url);

    match target.strategy {
        Strategy::SinglePage => fetch_single_page(runner, &target.url, config).await,
        Strategy::Mirror => mirror_site(runner, &target.url, config).await,
    }
}

/// Tail of the tool's stderr, for failure messages
pub(crate) fn describe_exit(tool: &str, output: &crate::command::CommandOutput) -> String {
    match output.stderr_tail() {
        Some(tail) => format!("{} exited with {:?}: {}", tool, output.code, tail),
        None => format!("{} exited with {:?}", tool, output.code),
    }
}
