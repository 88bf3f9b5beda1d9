use serde::Deserialize;
use std::path::PathBuf;

/// Effective configuration for a crawl run
///
/// Built by merging an optional TOML config file with command-line flags;
/// flags win. See [`crate::config::merge`].
#[derive(Debug, Clone)]
pub struct Config {
    /// The address the crawl starts from
    pub start_url: String,

    /// Maximum depth for internal (same-site) link expansion
    pub max_depth: u32,

    /// Maximum depth for external link expansion (only used when
    /// `scrape_external` is set)
    pub external_depth: u32,

    /// Number of simultaneously in-flight fetches
    pub concurrent_requests: usize,

    /// Whether external links are fetched at all
    pub scrape_external: bool,

    /// Root directory for output artifacts
    pub output_path: PathBuf,
}

/// Shape of the optional TOML config file; every field may be omitted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(rename = "start-url")]
    pub start_url: Option<String>,

    #[serde(rename = "max-depth")]
    pub max_depth: Option<u32>,

    #[serde(rename = "external-depth")]
    pub external_depth: Option<u32>,

    #[serde(rename = "concurrent-requests")]
    pub concurrent_requests: Option<usize>,

    #[serde(rename = "scrape-external")]
    pub scrape_external: Option<bool>,

    #[serde(rename = "output-path")]
    pub output_path: Option<PathBuf>,
}

/// Default maximum internal depth
pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// Default maximum external depth
pub const DEFAULT_EXTERNAL_DEPTH: u32 = 1;

/// Default concurrency cap
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 5;
