use crate::config::types::{ArchiveConfig, Config, SiteConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_archive_config(&config.archive)?;
    validate_site_config(&config.site)?;
    Ok(())
}

/// Validates retrieval configuration
fn validate_archive_config(config: &ArchiveConfig) -> Result<(), ConfigError> {
    if config.archive_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "archive_dir cannot be empty".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if let Some(rate) = &config.limit_rate {
        validate_limit_rate(rate)?;
    }

    if config.curl_path.is_empty() || config.wget_path.is_empty() {
        return Err(ConfigError::Validation(
            "curl_path and wget_path cannot be empty".to_string(),
        ));
    }

    if config.fetch_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_secs must be >= 1, got {}",
            config.fetch_timeout_secs
        )));
    }

    Ok(())
}

/// Validates published site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    if let Some(repository) = &config.repository {
        validate_repository(repository)?;
    }

    if let Some(email) = &config.contact_email {
        validate_email(email)?;
    }

    if config.readme_path.as_os_str().is_empty() || config.index_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "readme_path and index_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Accepts the forms `wget --limit-rate` understands: a number with an
/// optional `k` or `m` suffix
fn validate_limit_rate(rate: &str) -> Result<(), ConfigError> {
    let digits = rate
        .strip_suffix(['k', 'K', 'm', 'M'])
        .unwrap_or(rate);

    let mut parts = digits.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let fraction = parts.next();

    let is_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    if !is_digits(whole) || fraction.is_some_and(|f| !is_digits(f)) {
        return Err(ConfigError::Validation(format!(
            "limit_rate must look like '200k', '1.5m' or '50000', got '{}'",
            rate
        )));
    }

    Ok(())
}

/// Repository coordinates must be `owner/name`
fn validate_repository(repository: &str) -> Result<(), ConfigError> {
    let valid_part = |s: &str| {
        !s.is_empty()
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    };

    match repository.split_once('/') {
        Some((owner, name)) if valid_part(owner) && valid_part(name) => Ok(()),
        _ => Err(ConfigError::InvalidRepository(format!(
            "expected 'owner/name', got '{}'",
            repository
        ))),
    }
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    // Basic email format check: must contain @ and have text on both sides
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
