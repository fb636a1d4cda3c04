use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Value stored in place of a date when retrieval did not succeed
pub const FAILURE_MARKER: &str = "FAILED";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// When a URL was last archived
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastArchived {
    /// Calendar date of the last successful retrieval
    Date(NaiveDate),
    /// The last attempt failed
    Failed,
    /// A value this version does not understand, kept verbatim
    Other(String),
}

impl LastArchived {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Returns the on-disk string form
    pub fn as_stored(&self) -> String {
        match self {
            Self::Date(date) => date.format(DATE_FORMAT).to_string(),
            Self::Failed => FAILURE_MARKER.to_string(),
            Self::Other(raw) => raw.clone(),
        }
    }

    /// Parses the on-disk string form
    pub fn from_stored(raw: &str) -> Self {
        if raw == FAILURE_MARKER {
            return Self::Failed;
        }
        match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            // Only accept the canonical spelling so re-saving is lossless
            Ok(date) if date.format(DATE_FORMAT).to_string() == raw => Self::Date(date),
            _ => Self::Other(raw.to_string()),
        }
    }
}

impl fmt::Display for LastArchived {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed => write!(f, "❌ {}", FAILURE_MARKER),
            other => write!(f, "{}", other.as_stored()),
        }
    }
}

impl Serialize for LastArchived {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_stored())
    }
}

impl<'de> Deserialize<'de> for LastArchived {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_stored(&raw))
    }
}

/// Outcome of the most recent archive run for one URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveRecord {
    pub last_archived: LastArchived,

    /// Path of the archived main document
    ///
    /// The outer `None` means the key is absent from the stored entry, which
    /// older files use for failures; it is written back absent.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    archived_path: Option<Option<String>>,

    /// Title of the archived document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Marks a present key as `Some`, so `null` and absent stay distinct
fn deserialize_present<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Option<String>>, D::Error> {
    Option::<String>::deserialize(deserializer).map(Some)
}

impl ArchiveRecord {
    /// Record for a successful retrieval on `date`
    pub fn archived(date: NaiveDate, path: impl Into<String>, title: Option<String>) -> Self {
        Self {
            last_archived: LastArchived::Date(date),
            archived_path: Some(Some(path.into())),
            title,
        }
    }

    /// Record for a failed retrieval
    pub fn failed() -> Self {
        Self {
            last_archived: LastArchived::Failed,
            archived_path: Some(None),
            title: None,
        }
    }

    /// Path of the archived main document, `None` after a failure
    pub fn archived_path(&self) -> Option<&str> {
        self.archived_path.as_ref()?.as_deref()
    }
}

/// Every archived URL and its latest record, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    records: IndexMap<String, ArchiveRecord>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the record for `url`
    ///
    /// A replaced record keeps its position; a new URL is appended.
    pub fn upsert(
        &mut self,
        url: impl Into<String>,
        record: ArchiveRecord,
    ) -> Option<ArchiveRecord> {
        self.records.insert(url.into(), record)
    }

    pub fn get(&self, url: &str) -> Option<&ArchiveRecord> {
        self.records.get(url)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in stored order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ArchiveRecord)> {
        self.records.iter()
    }
}

impl FromIterator<(String, ArchiveRecord)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (String, ArchiveRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_last_archived_from_stored() {
        assert_eq!(
            LastArchived::from_stored("2024-03-09"),
            LastArchived::Date(date("2024-03-09"))
        );
        assert_eq!(LastArchived::from_stored("FAILED"), LastArchived::Failed);
        assert_eq!(
            LastArchived::from_stored("2024-3-9"),
            LastArchived::Other("2024-3-9".to_string())
        );
        assert_eq!(
            LastArchived::from_stored("yesterday"),
            LastArchived::Other("yesterday".to_string())
        );
    }

    #[test]
    fn test_last_archived_display() {
        assert_eq!(LastArchived::Failed.to_string(), "❌ FAILED");
        assert_eq!(LastArchived::Date(date("2026-01-31")).to_string(), "2026-01-31");
        assert_eq!(LastArchived::Other("soon".to_string()).to_string(), "soon");
    }

    #[test]
    fn test_record_json_shape() {
        let record =
            ArchiveRecord::archived(date("2024-01-01"), "archive/example.com/index.html", None);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"lastArchived":"2024-01-01","archivedPath":"archive/example.com/index.html"}"#
        );

        let json = serde_json::to_string(&ArchiveRecord::failed()).unwrap();
        assert_eq!(json, r#"{"lastArchived":"FAILED","archivedPath":null}"#);
    }

    #[test]
    fn test_record_with_title() {
        let record = ArchiveRecord::archived(
            date("2024-01-01"),
            "archive/reddit/rust.html",
            Some("Rust Wiki".to_string()),
        );
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.ends_with(r#""title":"Rust Wiki"}"#));
        assert_eq!(serde_json::from_str::<ArchiveRecord>(&json).unwrap(), record);
    }

    #[test]
    fn test_absent_path_key_stays_absent() {
        let raw = r#"{"lastArchived":"FAILED"}"#;
        let record: ArchiveRecord = serde_json::from_str(raw).unwrap();

        assert_eq!(record.archived_path(), None);
        assert_ne!(record, ArchiveRecord::failed());
        assert_eq!(serde_json::to_string(&record).unwrap(), raw);
    }

    #[test]
    fn test_null_path_key_stays_null() {
        let raw = r#"{"lastArchived":"FAILED","archivedPath":null}"#;
        let record: ArchiveRecord = serde_json::from_str(raw).unwrap();

        assert_eq!(record, ArchiveRecord::failed());
        assert_eq!(serde_json::to_string(&record).unwrap(), raw);
    }

    #[test]
    fn test_upsert_keeps_position() {
        let mut metadata = Metadata::new();
        metadata.upsert("https://a.org", ArchiveRecord::failed());
        metadata.upsert("https://b.org", ArchiveRecord::failed());

        let previous = metadata.upsert(
            "https://a.org",
            ArchiveRecord::archived(date("2024-05-05"), "archive/a.org/index.html", None),
        );

        assert_eq!(previous, Some(ArchiveRecord::failed()));
        assert_eq!(metadata.len(), 2);
        let urls: Vec<_> = metadata.iter().map(|(url, _)| url.as_str()).collect();
        assert_eq!(urls, ["https://a.org", "https://b.org"]);
        assert!(!metadata.get("https://a.org").unwrap().last_archived.is_failed());
    }
}
