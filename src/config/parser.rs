use crate::config::types::{Config, Overrides};
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use site_archiver::config::load_config;
///
/// let config = load_config(Path::new("archiver.toml")).unwrap();
/// println!("Archive dir: {}", config.archive.archive_dir.display());
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let config = parse_config(path)?;
    validate(&config)?;
    Ok(config)
}

/// Reads and deserializes a configuration file without validating it
fn parse_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so scheduled runs can be correlated with the
/// configuration they used.
pub fn compute_config_hash(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Builds the effective run configuration
///
/// Starts from the file at `path` when one is given (defaults otherwise),
/// layers the command-line `overrides` on top and validates the result. The
/// file alone is not validated, so an override can replace a bad value.
pub fn resolve_config(path: Option<&Path>, overrides: Overrides) -> ConfigResult<Config> {
    let mut config = match path {
        Some(path) => {
            let config = parse_config(path)?;
            let hash = compute_config_hash(path)?;
            tracing::info!(
                "Configuration loaded from {} (hash: {})",
                path.display(),
                hash
            );
            config
        }
        None => Config::default(),
    };

    overrides.apply(&mut config);
    validate(&config)?;

    Ok(config)
}
