//! Storage traits and error types

use crate::storage::Metadata;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for metadata backends
///
/// Loading never fails: a missing or unreadable store yields empty metadata
/// so the indexes stay renderable. Saving replaces the whole store.
pub trait MetadataStore {
    /// Loads the full metadata mapping
    fn load(&self) -> Metadata;

    /// Persists the full metadata mapping, replacing what was stored
    fn save(&self, metadata: &Metadata) -> StorageResult<()>;
}
