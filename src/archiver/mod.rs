//! Archive run orchestration
//!
//! This module drives a single archive run from start to finish:
//! - Preparing the storage root and loading metadata
//! - Probing the target and acting on the verdict
//! - Retrieving content with the strategy chosen for the URL
//! - Recording the outcome and regenerating both indexes

mod orchestrator;

pub use orchestrator::{render_only, Archiver};

use crate::state::RunState;
use crate::storage::ArchiveRecord;

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Input URL exactly as given
    pub url: String,

    /// Terminal state the run ended in
    pub state: RunState,

    /// Status code returned by the probe
    pub status_code: Option<u16>,

    /// Record written for the URL; `None` when the run was skipped
    pub record: Option<ArchiveRecord>,
}

impl RunReport {
    pub fn is_skipped(&self) -> bool {
        self.state == RunState::Skipped
    }

    /// Returns true if content was retrieved and recorded with a date
    pub fn is_archived(&self) -> bool {
        self.record
            .as_ref()
            .is_some_and(|record| !record.last_archived.is_failed())
    }
}
