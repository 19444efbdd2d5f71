use crate::config::types::{Config, CrawlConfig, EndpointConfig, HttpConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_http_config(&config.http)?;
    validate_endpoint_config(&config.endpoints)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates traversal bounds
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.first_parliament < 1 {
        return Err(ConfigError::Validation(
            "first-parliament must be >= 1".to_string(),
        ));
    }

    if config.max_parliament < config.first_parliament {
        return Err(ConfigError::Validation(format!(
            "max-parliament ({}) must be >= first-parliament ({})",
            config.max_parliament, config.first_parliament
        )));
    }

    if config.max_sessions < 1 {
        return Err(ConfigError::Validation(
            "max-sessions must be >= 1".to_string(),
        ));
    }

    if config.max_versions < 1 {
        return Err(ConfigError::Validation(
            "max-versions must be >= 1".to_string(),
        ));
    }

    if config.stop_after_empty_parliaments < 1 {
        return Err(ConfigError::Validation(
            "stop-after-empty-parliaments must be >= 1".to_string(),
        ));
    }

    if config.document_types.is_empty() {
        return Err(ConfigError::Validation(
            "document-types must name at least one category".to_string(),
        ));
    }

    for doc_type in &config.document_types {
        if doc_type.is_empty() || !doc_type.chars().all(|c| c.is_alphanumeric()) {
            return Err(ConfigError::Validation(format!(
                "document type '{}' must be non-empty and alphanumeric",
                doc_type
            )));
        }
    }

    Ok(())
}

/// Validates HTTP client behavior
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 100 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-fetches must be between 1 and 100, got {}",
            config.max_concurrent_fetches
        )));
    }

    if config.retry_attempts < 1 {
        return Err(ConfigError::Validation(
            "retry-attempts must be >= 1".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates the upstream endpoint base URL
fn validate_endpoint_config(config: &EndpointConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must be http or https, got '{}'",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(
            "base-url must include a host".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
