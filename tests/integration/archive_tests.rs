//! Integration tests for the archiver
//!
//! These tests run whole archive runs against a scripted command runner and
//! a fixed or wiremock-backed prober, then inspect the files left on disk.

use chrono::NaiveDate;
use site_archiver::command::{CommandError, CommandOutput, CommandRunner};
use site_archiver::archiver::render_only;
use site_archiver::config::{config_for_dir, Config};
use site_archiver::probe::{build_http_client, HttpProber, Prober};
use site_archiver::storage::{JsonMetadataStore, MetadataStore};
use site_archiver::{ArchiveRecord, Archiver, ArchiverError, LastArchived, Metadata, RunState};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Runner that answers every program with one exit code and may write files
struct ScriptedRunner {
    code: i32,
    creates: Vec<(PathBuf, String)>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedRunner {
    fn exiting(code: i32) -> Self {
        Self {
            code,
            creates: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn creating(mut self, path: PathBuf, content: &str) -> Self {
        self.creates.push((path, content.to_string()));
        self
    }

    fn programs(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(program, _)| program.clone())
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, CommandError> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));

        if self.code == 0 {
            for (path, content) in &self.creates {
                std::fs::create_dir_all(path.parent().unwrap()).unwrap();
                std::fs::write(path, content).unwrap();
            }
        }

        Ok(CommandOutput::with_code(self.code))
    }
}

struct FixedProber(Option<u16>);

impl Prober for FixedProber {
    async fn status(&self, _url: &str) -> Option<u16> {
        self.0
    }
}

/// Creates a test configuration rooted in `dir`
fn create_test_config(dir: &Path) -> Config {
    let mut config = config_for_dir(&dir.join("archive"));
    config.site.readme_path = dir.join("README.md");
    config.site.index_path = dir.join("index.html");
    config.site.repository = Some("octo/web-archive".to_string());
    config
}

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
}

fn load(config: &Config) -> Metadata {
    JsonMetadataStore::new(config.metadata_path()).load()
}

#[tokio::test]
async fn test_mirror_run_records_date_and_path() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());
    let index = config.archive.archive_dir.join("example.com/index.html");
    let runner = ScriptedRunner::exiting(0).creating(
        index.clone(),
        "<html><head><title>Example Domain</title></head></html>",
    );
    let store = JsonMetadataStore::new(config.metadata_path());
    let mut archiver = Archiver::new(&config, &runner, FixedProber(Some(200)), store);

    let report = archiver
        .run_on("https://example.com", run_date())
        .await
        .unwrap();

    assert_eq!(report.state, RunState::Done);
    assert_eq!(runner.programs(), ["wget"]);

    let metadata = load(&config);
    let record = metadata.get("https://example.com").unwrap();
    assert_eq!(record.last_archived, LastArchived::Date(run_date()));
    assert!(record
        .archived_path()
        .unwrap()
        .ends_with("archive/example.com/index.html"));
    assert_eq!(record.title.as_deref(), Some("Example Domain"));

    let readme = std::fs::read_to_string(&config.site.readme_path).unwrap();
    assert!(readme.contains("| Example Domain | 2026-10-15 |"));
    let html = std::fs::read_to_string(&config.site.index_path).unwrap();
    assert!(html.contains("<td>2026-10-15</td>"));
}

#[tokio::test]
async fn test_wiki_run_success() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());
    let page = config.archive.archive_dir.join("reddit/testsub.html");
    let runner = ScriptedRunner::exiting(0).creating(page.clone(), "<title>testsub wiki</title>");
    let store = JsonMetadataStore::new(config.metadata_path());
    let mut archiver = Archiver::new(&config, &runner, FixedProber(Some(200)), store);

    archiver.run_on("r/testsub", run_date()).await.unwrap();

    assert_eq!(runner.programs(), ["curl"]);
    let metadata = load(&config);
    let record = metadata.get("r/testsub").unwrap();
    assert_eq!(record.last_archived, LastArchived::Date(run_date()));
    assert_eq!(record.archived_path(), Some(page.display().to_string().as_str()));
}

#[tokio::test]
async fn test_wiki_run_failure_is_recorded() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());
    let runner = ScriptedRunner::exiting(22);
    let store = JsonMetadataStore::new(config.metadata_path());
    let mut archiver = Archiver::new(&config, &runner, FixedProber(Some(200)), store);

    let report = archiver.run_on("r/testsub", run_date()).await.unwrap();

    assert_eq!(report.state, RunState::Done);
    assert!(!report.is_archived());

    let raw = std::fs::read_to_string(config.metadata_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["r/testsub"]["lastArchived"], "FAILED");
    assert!(json["r/testsub"]["archivedPath"].is_null());

    let readme = std::fs::read_to_string(&config.site.readme_path).unwrap();
    assert!(readme.contains("| [r/testsub](#) |  | ❌ FAILED |"));
}

#[tokio::test]
async fn test_not_found_leaves_files_untouched() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());
    std::fs::create_dir_all(&config.archive.archive_dir).unwrap();
    std::fs::write(config.metadata_path(), "{\n  \"https://a.org\": {}\n}").unwrap();
    std::fs::write(&config.site.readme_path, "readme before").unwrap();
    std::fs::write(&config.site.index_path, "index before").unwrap();

    let runner = ScriptedRunner::exiting(0);
    let store = JsonMetadataStore::new(config.metadata_path());
    let mut archiver = Archiver::new(&config, &runner, FixedProber(Some(404)), store);

    let report = archiver
        .run_on("https://example.com/gone", run_date())
        .await
        .unwrap();

    assert!(report.is_skipped());
    assert!(runner.programs().is_empty());
    assert_eq!(
        std::fs::read_to_string(config.metadata_path()).unwrap(),
        "{\n  \"https://a.org\": {}\n}"
    );
    assert_eq!(
        std::fs::read_to_string(&config.site.readme_path).unwrap(),
        "readme before"
    );
    assert_eq!(
        std::fs::read_to_string(&config.site.index_path).unwrap(),
        "index before"
    );
}

#[tokio::test]
async fn test_server_error_aborts_without_metadata() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());
    let runner = ScriptedRunner::exiting(0);
    let store = JsonMetadataStore::new(config.metadata_path());
    let mut archiver = Archiver::new(&config, &runner, FixedProber(Some(502)), store);

    let result = archiver.run_on("https://example.com", run_date()).await;

    assert!(matches!(
        result,
        Err(ArchiverError::ServerError { status: 502, .. })
    ));
    assert!(!config.metadata_path().exists());
    assert!(!config.site.readme_path.exists());
    assert!(runner.programs().is_empty());
}

#[tokio::test]
async fn test_unreachable_aborts_without_metadata() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());
    let runner = ScriptedRunner::exiting(0);
    let store = JsonMetadataStore::new(config.metadata_path());
    let mut archiver = Archiver::new(&config, &runner, FixedProber(None), store);

    let result = archiver.run_on("https://nowhere.invalid", run_date()).await;

    assert!(matches!(result, Err(ArchiverError::Unreachable { .. })));
    assert!(!config.metadata_path().exists());
}

#[tokio::test]
async fn test_other_entries_are_preserved() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());
    std::fs::create_dir_all(&config.archive.archive_dir).unwrap();

    let older = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let mut existing = Metadata::new();
    existing.upsert(
        "https://older.org",
        ArchiveRecord::archived(older, "archive/older.org/index.html", None),
    );
    existing.upsert("r/gone", ArchiveRecord::failed());
    JsonMetadataStore::new(config.metadata_path())
        .save(&existing)
        .unwrap();

    let runner = ScriptedRunner::exiting(0);
    let store = JsonMetadataStore::new(config.metadata_path());
    let mut archiver = Archiver::new(&config, &runner, FixedProber(Some(200)), store);
    archiver.run_on("https://example.com", run_date()).await.unwrap();

    let metadata = load(&config);
    assert_eq!(metadata.len(), 3);
    assert_eq!(metadata.get("https://older.org"), existing.get("https://older.org"));
    assert_eq!(metadata.get("r/gone"), Some(&ArchiveRecord::failed()));

    let readme = std::fs::read_to_string(&config.site.readme_path).unwrap();
    assert!(readme.contains("https://older.org"));
    assert!(readme.contains("2025-03-01"));
}

#[tokio::test]
async fn test_rerun_replaces_failure_with_success() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());

    let failing = ScriptedRunner::exiting(8);
    let store = JsonMetadataStore::new(config.metadata_path());
    let mut archiver = Archiver::new(&config, &failing, FixedProber(Some(200)), store);
    archiver.run_on("https://example.com", run_date()).await.unwrap();
    assert!(load(&config).get("https://example.com").unwrap().last_archived.is_failed());

    let working = ScriptedRunner::exiting(0);
    let store = JsonMetadataStore::new(config.metadata_path());
    let mut archiver = Archiver::new(&config, &working, FixedProber(Some(200)), store);
    archiver.run_on("https://example.com", run_date()).await.unwrap();

    let metadata = load(&config);
    assert_eq!(metadata.len(), 1);
    assert_eq!(
        metadata.get("https://example.com").unwrap().last_archived,
        LastArchived::Date(run_date())
    );
}

#[tokio::test]
async fn test_http_prober_reports_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/ok"))
        .mount(&mock_server)
        .await;

    let prober = HttpProber::new(build_http_client("site-archiver-test/1.0").unwrap());
    let base = mock_server.uri();

    assert_eq!(prober.status(&format!("{}/ok", base)).await, Some(200));
    assert_eq!(prober.status(&format!("{}/gone", base)).await, Some(404));
    assert_eq!(prober.status(&format!("{}/down", base)).await, Some(503));
    assert_eq!(prober.status(&format!("{}/moved", base)).await, Some(301));
}

#[tokio::test]
async fn test_http_prober_unreachable() {
    let prober = HttpProber::new(build_http_client("site-archiver-test/1.0").unwrap());
    assert_eq!(prober.status("http://127.0.0.1:1/").await, None);
}

#[tokio::test]
async fn test_run_with_http_prober() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());
    let runner = ScriptedRunner::exiting(0);
    let prober = HttpProber::new(build_http_client(&config.archive.user_agent).unwrap());
    let store = JsonMetadataStore::new(config.metadata_path());
    let mut archiver = Archiver::new(&config, &runner, prober, store);

    let result = archiver.run_on(&mock_server.uri(), run_date()).await;

    assert!(matches!(
        result,
        Err(ArchiverError::ServerError { status: 503, .. })
    ));
    assert!(runner.programs().is_empty());
}

#[tokio::test]
async fn test_render_only_rebuilds_indexes() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(dir.path());
    std::fs::create_dir_all(&config.archive.archive_dir).unwrap();
    let mut existing = Metadata::new();
    existing.upsert("r/rust", ArchiveRecord::failed());
    JsonMetadataStore::new(config.metadata_path())
        .save(&existing)
        .unwrap();

    let store = JsonMetadataStore::new(config.metadata_path());

    assert_eq!(render_only(&store, &config.site).unwrap(), 1);
    let html = std::fs::read_to_string(&config.site.index_path).unwrap();
    assert!(html.contains("r/rust"));
    assert!(html.contains("https://octo.github.io/web-archive/"));
}
