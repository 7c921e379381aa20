//! Configuration module
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! All keys are optional; the CLI runs on [`Config::default`] when no file is given.
//!
//! # Example
//!
//! ```no_run
//! use fb_post_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Fetching from: {}", config.scraper.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, PatternConfig, ScraperConfig, SessionConfig, DEFAULT_ACCEPT_LANGUAGE,
    DEFAULT_BASE_URL, DEFAULT_PAGE_LIMIT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};

pub use parser::{load_config, parse_config};
pub use validation::validate;
