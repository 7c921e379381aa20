use crate::config::types::{Config, ScraperConfig, SessionConfig};
use crate::extract::PatternSet;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_session_config(&config.session)?;
    PatternSet::compile(&config.patterns)?;
    Ok(())
}

/// Validates pagination configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            config.base_url
        )));
    }

    // Relative paths are appended verbatim, so a trailing slash would double up
    if config.base_url.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base-url must not end with '/', got '{}'",
            config.base_url
        )));
    }

    if config.page_limit == Some(0) {
        return Err(ConfigError::Validation(
            "page-limit must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP session configuration
fn validate_session_config(config: &SessionConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}
