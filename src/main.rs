//! Site-Archiver main entry point
//!
//! This is the command-line interface for the scheduled archiver. Every
//! option can also be supplied through the environment variable a workflow
//! runner would set for it.

use anyhow::{bail, Context};
use clap::Parser;
use site_archiver::archiver::render_only;
use site_archiver::command::{display_command, SystemRunner};
use site_archiver::config::{resolve_config, Config, Overrides, ProbeBackend};
use site_archiver::output::{print_statistics, ArchiveStatistics};
use site_archiver::probe::{build_http_client, CurlProber, HttpProber, Prober};
use site_archiver::retrieval::{mirror_args, page_fetch_args, page_output_path};
use site_archiver::storage::{JsonMetadataStore, MetadataStore};
use site_archiver::url::{classify_url, extract_subreddit};
use site_archiver::{Archiver, Strategy};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Archiver: a scheduled static snapshot keeper
///
/// Probes a URL, stores a static copy under the archive directory, records
/// the outcome in metadata.json and regenerates README.md and index.html.
#[derive(Parser, Debug)]
#[command(name = "site-archiver")]
#[command(version = "1.0.0")]
#[command(about = "A scheduled static snapshot keeper", long_about = None)]
struct Cli {
    /// URL to archive; `r/<name>` archives that community's wiki page
    #[arg(value_name = "URL", env = "INPUT_URL")]
    url: Option<String>,

    /// Bandwidth cap for site mirrors (e.g. 200k)
    #[arg(long, env = "INPUT_LIMIT_RATE")]
    limit_rate: Option<String>,

    /// Client identity presented to the archived site
    #[arg(long, env = "INPUT_USER_AGENT")]
    user_agent: Option<String>,

    /// Storage root for metadata and archived content
    #[arg(long, env = "INPUT_ARCHIVE_DIR")]
    archive_dir: Option<PathBuf>,

    /// Contact address shown in the indexes
    #[arg(long, env = "INPUT_CONTACT_EMAIL")]
    contact_email: Option<String>,

    /// Free text shown at the top of index.html
    #[arg(long, env = "INPUT_SCHEDULE_DESCRIPTION")]
    schedule_description: Option<String>,

    /// Hosting repository in owner/name form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Reachability probe backend
    #[arg(long, value_enum)]
    probe: Option<ProbeBackend>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be run without touching the network
    #[arg(long, conflicts_with_all = ["stats", "render_only"])]
    dry_run: bool,

    /// Show statistics from the stored metadata and exit
    #[arg(long, conflicts_with_all = ["dry_run", "render_only"])]
    stats: bool,

    /// Regenerate README.md and index.html from stored metadata and exit
    #[arg(long, conflicts_with_all = ["dry_run", "stats"])]
    render_only: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            archive_dir: self.archive_dir.clone(),
            user_agent: self.user_agent.clone(),
            limit_rate: self.limit_rate.clone(),
            probe: self.probe,
            repository: self.repository.clone(),
            contact_email: self.contact_email.clone(),
            schedule_description: self.schedule_description.clone(),
        }
    }

    /// Input URL, treating a blank value as absent
    fn target_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(cli.config.as_deref(), cli.overrides())
        .context("Failed to load configuration")?;

    // Handle different modes
    if cli.stats {
        return handle_stats(&config);
    }
    if cli.render_only {
        return handle_render_only(&config);
    }

    let Some(url) = cli.target_url() else {
        bail!("No URL given (pass it as an argument or set INPUT_URL)");
    };

    if cli.dry_run {
        handle_dry_run(&config, url)
    } else {
        handle_archive(&config, url).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_archiver=info,warn"),
            1 => EnvFilter::new("site_archiver=debug,info"),
            2 => EnvFilter::new("site_archiver=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the commands a run would execute
fn handle_dry_run(config: &Config, url: &str) -> anyhow::Result<()> {
    let archive = &config.archive;
    let target = classify_url(url);

    println!("=== Site-Archiver Dry Run ===\n");

    println!("Target:");
    println!("  Input: {}", url);
    println!("  Resolved: {}", target.url);
    println!("  Strategy: {:?} ({})", target.strategy, target.strategy.tool());

    println!("\nArchive:");
    println!("  Directory: {}", archive.archive_dir.display());
    println!("  Metadata: {}", config.metadata_path().display());
    println!("  User agent: {}", archive.user_agent);
    println!(
        "  Limit rate: {}",
        archive.limit_rate.as_deref().unwrap_or("none")
    );
    println!("  Probe: {:?}", archive.probe);

    println!("\nIndexes:");
    println!("  Markdown: {}", config.site.readme_path.display());
    println!("  HTML: {}", config.site.index_path.display());
    println!(
        "  Repository: {}",
        config.site.repository.as_deref().unwrap_or("none")
    );

    println!("\nRetrieval command:");
    match target.strategy {
        Strategy::SinglePage => {
            let name = extract_subreddit(&target.url)
                .with_context(|| format!("No community name in {}", target.url))?;
            let output = page_output_path(&archive.archive_dir, &name);
            let args = page_fetch_args(&target.url, &output, archive);
            println!("  {}", display_command(&archive.curl_path, &args));
        }
        Strategy::Mirror => {
            let args = mirror_args(&target.url, archive);
            println!("  {}", display_command(&archive.wget_path, &args));
        }
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the --stats mode: shows statistics from the stored metadata
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let metadata_path = config.metadata_path();
    println!("Metadata: {}\n", metadata_path.display());

    let metadata = JsonMetadataStore::new(metadata_path).load();
    let stats = ArchiveStatistics::from_metadata(&metadata);
    print_statistics(&stats);

    Ok(())
}

/// Handles the --render-only mode: regenerates both indexes
fn handle_render_only(config: &Config) -> anyhow::Result<()> {
    let store = JsonMetadataStore::new(config.metadata_path());

    let count = render_only(&store, &config.site).context("Failed to regenerate indexes")?;
    tracing::info!("Rendered {} entries", count);

    Ok(())
}

/// Handles the default mode: archives one URL
async fn handle_archive(config: &Config, url: &str) -> anyhow::Result<()> {
    let runner = SystemRunner;

    match config.archive.probe {
        ProbeBackend::Curl => {
            let prober = CurlProber::new(&runner, config.archive.curl_path.as_str());
            archive_with(config, &runner, prober, url).await
        }
        ProbeBackend::Http => {
            let client = build_http_client(&config.archive.user_agent)
                .context("Failed to build HTTP client")?;
            archive_with(config, &runner, HttpProber::new(client), url).await
        }
    }
}

async fn archive_with<P: Prober>(
    config: &Config,
    runner: &SystemRunner,
    prober: P,
    url: &str,
) -> anyhow::Result<()> {
    let store = JsonMetadataStore::new(config.metadata_path());
    let mut archiver = Archiver::new(config, runner, prober, store);

    let report = archiver
        .run(url)
        .await
        .with_context(|| format!("Archive run for {} failed", url))?;

    if report.is_skipped() {
        tracing::info!("Nothing archived for {}", url);
    } else if report.is_archived() {
        tracing::info!("Archive updated for {}", url);
    } else {
        tracing::warn!("Recorded a failed archive attempt for {}", url);
    }

    Ok(())
}
