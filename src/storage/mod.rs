//! Storage module for persisting archive metadata
//!
//! This module handles the durable state of the archiver:
//! - the per-URL [`ArchiveRecord`] and its [`LastArchived`] status
//! - the ordered [`Metadata`] mapping
//! - the JSON file backend at `<archive_dir>/metadata.json`

mod json;
mod record;
mod traits;

pub use json::{to_json, JsonMetadataStore};
pub use record::{ArchiveRecord, LastArchived, Metadata, FAILURE_MARKER};
pub use traits::{MetadataStore, StorageError, StorageResult};
