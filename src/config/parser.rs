use crate::config::types::{Config, FileConfig};
use crate::config::validation::validate;
use crate::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};

/// Loads and parses the optional TOML config file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sitescribe::config::load_config_file;
///
/// let file = load_config_file(Path::new("sitescribe.toml")).unwrap();
/// println!("start-url: {:?}", file.start_url);
/// ```
pub fn load_config_file(path: &Path) -> ConfigResult<FileConfig> {
    let content = std::fs::read_to_string(path)?;
    let file: FileConfig = toml::from_str(&content)?;
    Ok(file)
}

/// Values supplied on the command line; `None` means the flag was omitted
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub start_url: Option<String>,
    pub max_depth: Option<u32>,
    pub external_depth: Option<u32>,
    pub concurrent_requests: Option<usize>,
    pub scrape_external: Option<bool>,
    pub output_path: Option<PathBuf>,
}

/// Merges file values and CLI flags into an effective, validated config
///
/// Precedence: CLI flag, then config file, then built-in default.
pub fn merge(file: FileConfig, cli: CliOverrides) -> ConfigResult<Config> {
    use crate::config::types::{
        DEFAULT_CONCURRENT_REQUESTS, DEFAULT_EXTERNAL_DEPTH, DEFAULT_MAX_DEPTH,
    };

    let start_url = cli
        .start_url
        .or(file.start_url)
        .ok_or_else(|| ConfigError::Validation("a starting URL is required".to_string()))?;

    let config = Config {
        start_url,
        max_depth: cli.max_depth.or(file.max_depth).unwrap_or(DEFAULT_MAX_DEPTH),
        external_depth: cli
            .external_depth
            .or(file.external_depth)
            .unwrap_or(DEFAULT_EXTERNAL_DEPTH),
        concurrent_requests: cli
            .concurrent_requests
            .or(file.concurrent_requests)
            .unwrap_or(DEFAULT_CONCURRENT_REQUESTS),
        scrape_external: cli
            .scrape_external
            .or(file.scrape_external)
            .unwrap_or(false),
        output_path: cli
            .output_path
            .or(file.output_path)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    validate(&config)?;

    Ok(config)
}
