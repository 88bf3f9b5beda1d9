use crate::config::types::Config;
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Validates an effective configuration
///
/// An invalid starting address is the only fatal error in the system; it is
/// rejected here, before any crawl task is spawned.
pub fn validate(config: &Config) -> ConfigResult<()> {
    let start = Url::parse(&config.start_url).map_err(|e| {
        ConfigError::Validation(format!("invalid start URL '{}': {}", config.start_url, e))
    })?;

    if start.scheme() != "http" && start.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "start URL must use http or https, got '{}'",
            start.scheme()
        )));
    }

    if start.host_str().is_none() {
        return Err(ConfigError::Validation(
            "start URL has no host".to_string(),
        ));
    }

    if config.concurrent_requests == 0 {
        return Err(ConfigError::Validation(
            "concurrent-requests must be at least 1".to_string(),
        ));
    }

    if config.output_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output-path must not be empty".to_string(),
        ));
    }

    Ok(())
}
