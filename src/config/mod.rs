//! Configuration module for Site-Archiver
//!
//! Run configuration comes from an optional TOML file with command-line
//! values layered on top. The resolved [`Config`] is immutable and handed by
//! reference to every component.
//!
//! # Example
//!
//! ```no_run
//! use site_archiver::config::{resolve_config, Overrides};
//! use std::path::Path;
//!
//! let config = resolve_config(Some(Path::new("archiver.toml")), Overrides::default()).unwrap();
//! println!("Archiving into {}", config.archive.archive_dir.display());
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    config_for_dir, ArchiveConfig, Config, Overrides, ProbeBackend, SiteConfig,
    DEFAULT_USER_AGENT,
};

pub use parser::{compute_config_hash, load_config, load_config_with_hash, resolve_config};
