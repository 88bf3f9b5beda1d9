//! Configuration loading and validation
//!
//! Settings come from command-line flags, optionally backed by a TOML
//! config file; flags take precedence, built-in defaults fill the rest.

mod parser;
mod types;
mod validation;

pub use parser::{load_config_file, merge, CliOverrides};
pub use types::{
    Config, FileConfig, DEFAULT_CONCURRENT_REQUESTS, DEFAULT_EXTERNAL_DEPTH, DEFAULT_MAX_DEPTH,
};
pub use validation::validate;
