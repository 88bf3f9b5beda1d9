//! Sitescribe: a recursive website-to-markdown archiver
//!
//! This crate crawls every page reachable from a starting address, converts
//! each page into a normalized markdown document, and writes one file per
//! page under a per-site directory. A single external-links report is
//! produced at the end of the run.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Sitescribe operations
///
/// Per-task failures (fetch, extraction, persistence) are logged and
/// contained within their task; only run-level failures surface here.
/// Configuration errors are resolved before a run starts and carry their
/// own type, [`ConfigError`].
#[derive(Debug, Error)]
pub enum ScribeError {
    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

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
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Sitescribe operations
pub type Result<T> = std::result::Result<T, ScribeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, CrawlSummary};
pub use url::{classify_scope, strip_fragment, LinkScope, SiteOrigin};
