//! fb-post-scraper: a cursor-following scraper for public feed posts
//!
//! This crate walks the paginated mobile feed of an account or group, following
//! the continuation cursor embedded in each page, and extracts a fixed set of
//! fields from every post it finds.

pub mod codec;
pub mod config;
pub mod extract;
pub mod feed;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for scraper operations
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid pattern '{name}': {message}")]
    InvalidPattern { name: String, message: String },
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::{Post, PostFragment};
pub use feed::{get_posts, FeedOptions, PostStream, Target};
pub use state::DriverState;
