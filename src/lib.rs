//! Site-Archiver: a scheduled static snapshot keeper
//!
//! This crate archives one URL per run. It probes the target, retrieves a
//! static copy with `curl` or `wget`, records the outcome in a JSON metadata
//! file and regenerates the `README.md` and `index.html` listings.

pub mod archiver;
pub mod command;
pub mod config;
pub mod output;
pub mod probe;
pub mod retrieval;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Archiver operations
#[derive(Debug, Error)]
pub enum ArchiverError {
    #[error("Critical error: could not access {url} (invalid URL or unreachable)")]
    Unreachable { url: String },

    #[error("Critical error: could not access {url} (HTTP {status})")]
    ServerError { url: String, status: u16 },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::RunState,
        to: state::RunState,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid repository coordinates: {0}")]
    InvalidRepository(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(#[from] ::url::ParseError),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for Site-Archiver operations
pub type Result<T> = std::result::Result<T, ArchiverError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use archiver::{Archiver, RunReport};
pub use config::Config;
pub use state::RunState;
pub use storage::{ArchiveRecord, LastArchived, Metadata};
pub use url::{classify_url, ClassifiedUrl, Strategy};
