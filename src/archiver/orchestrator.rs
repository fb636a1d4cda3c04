//! Archiver - main run orchestration logic
//!
//! One `Archiver` handles exactly one run. It walks the run states in order
//! and refuses any transition the state machine does not allow.

use crate::archiver::RunReport;
use crate::command::CommandRunner;
use crate::config::{Config, SiteConfig};
use crate::output::render_indexes;
use crate::probe::{check_reachability, ProbeVerdict, Prober};
use crate::retrieval::{read_title, retrieve, RetrievalOutcome};
use crate::state::RunState;
use crate::storage::{ArchiveRecord, Metadata, MetadataStore};
use crate::url::classify_url;
use crate::{ArchiverError, Result};
use chrono::{NaiveDate, Utc};

/// Main archive run coordinator
pub struct Archiver<'a, R, P, S> {
    config: &'a Config,
    runner: &'a R,
    prober: P,
    store: S,
    state: RunState,
}

impl<'a, R, P, S> Archiver<'a, R, P, S>
where
    R: CommandRunner + Sync,
    P: Prober,
    S: MetadataStore,
{
    /// Creates a new archiver in the `Init` state
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration
    /// * `runner` - Executes the retrieval tools
    /// * `prober` - Answers the reachability probe
    /// * `store` - Metadata backend
    pub fn new(config: &'a Config, runner: &'a R, prober: P, store: S) -> Self {
        Self {
            config,
            runner,
            prober,
            store,
            state: RunState::Init,
        }
    }

    /// Current run state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Archives `url` and stamps a success with today's UTC date
    pub async fn run(&mut self, url: &str) -> Result<RunReport> {
        self.run_on(url, Utc::now().date_naive()).await
    }

    /// Archives `url` and stamps a success with `today`
    ///
    /// # Returns
    ///
    /// * `Ok(RunReport)` - The run ended in `Done` or `Skipped`
    /// * `Err(ArchiverError)` - The run ended in `Fatal`
    pub async fn run_on(&mut self, url: &str, today: NaiveDate) -> Result<RunReport> {
        let result = self.execute(url, today).await;

        if result.is_err() && !self.state.is_terminal() {
            self.state = RunState::Fatal;
        }

        result
    }

    async fn execute(&mut self, url: &str, today: NaiveDate) -> Result<RunReport> {
        let config = self.config;

        // Init
        if self.state != RunState::Init {
            return Err(ArchiverError::InvalidTransition {
                from: self.state,
                to: RunState::Init,
            });
        }
        tokio::fs::create_dir_all(&config.archive.archive_dir).await?;
        let mut metadata = self.store.load();
        tracing::debug!("Loaded {} archived entries", metadata.len());

        // Probing
        self.advance(RunState::Probing)?;
        let status = match check_reachability(&self.prober, url).await {
            ProbeVerdict::Continue(code) => code,
            ProbeVerdict::Skip => {
                self.advance(RunState::Skipped)?;
                return Ok(RunReport {
                    url: url.to_string(),
                    state: self.state,
                    status_code: Some(404),
                    record: None,
                });
            }
            ProbeVerdict::Fatal(reason) => {
                self.advance(RunState::Fatal)?;
                return Err(reason.into_error(url));
            }
        };

        // Retrieving
        self.advance(RunState::Retrieving)?;
        let target = classify_url(url);
        let outcome = retrieve(self.runner, &target, &config.archive).await;

        // Recording
        self.advance(RunState::Recording)?;
        let record = record_for(&outcome, today).await;
        if outcome.is_archived() {
            tracing::info!("Successfully archived: {}", url);
        }
        upsert_logged(&mut metadata, url, record.clone());
        self.store.save(&metadata)?;

        // Rendering
        self.advance(RunState::Rendering)?;
        render_indexes(&metadata, &config.site)?;

        self.advance(RunState::Done)?;

        Ok(RunReport {
            url: url.to_string(),
            state: self.state,
            status_code: Some(status),
            record: Some(record),
        })
    }

    fn advance(&mut self, next: RunState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(ArchiverError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }

        tracing::debug!("Run state {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }
}

/// Regenerates both indexes from stored metadata without probing
///
/// Returns the number of entries rendered.
pub fn render_only<S: MetadataStore>(store: &S, site: &SiteConfig) -> Result<usize> {
    let metadata = store.load();
    render_indexes(&metadata, site)?;
    Ok(metadata.len())
}

/// Builds the metadata record for a retrieval outcome
async fn record_for(outcome: &RetrievalOutcome, today: NaiveDate) -> ArchiveRecord {
    match outcome {
        RetrievalOutcome::Archived { path } => {
            let title = read_title(path).await;
            ArchiveRecord::archived(today, path.display().to_string(), title)
        }
        RetrievalOutcome::Failed { .. } => ArchiveRecord::failed(),
    }
}

fn upsert_logged(metadata: &mut Metadata, url: &str, record: ArchiveRecord) {
    if let Some(previous) = metadata.upsert(url, record) {
        tracing::debug!(
            "Replaced previous record for {} (last archived {})",
            url,
            previous.last_archived.as_stored()
        );
    }
}
