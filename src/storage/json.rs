use crate::storage::{Metadata, MetadataStore, StorageResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Metadata kept as one pretty-printed JSON object
#[derive(Debug, Clone)]
pub struct JsonMetadataStore {
    path: PathBuf,
}

impl JsonMetadataStore {
    /// Creates a store backed by the file at `path`
    ///
    /// The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Serializes metadata the way it is written to disk
///
/// Two-space indentation, no trailing newline.
pub fn to_json(metadata: &Metadata) -> StorageResult<String> {
    Ok(serde_json::to_string_pretty(metadata)?)
}

impl MetadataStore for JsonMetadataStore {
    fn load(&self) -> Metadata {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No metadata at {}, starting empty", self.path.display());
                return Metadata::new();
            }
            Err(e) => {
                tracing::warn!(
                    "Error reading {}, initializing a new one: {}",
                    self.path.display(),
                    e
                );
                return Metadata::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(
                    "Error parsing {}, initializing a new one: {}",
                    self.path.display(),
                    e
                );
                Metadata::new()
            }
        }
    }

    fn save(&self, metadata: &Metadata) -> StorageResult<()> {
        std::fs::write(&self.path, to_json(metadata)?)?;
        Ok(())
    }
}
