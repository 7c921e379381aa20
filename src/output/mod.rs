//! Output module for writing scraped posts
//!
//! Posts are flattened to CSV, one row per post, columns in `Post` field order.

mod csv_output;

pub use csv_output::{default_filename, write_posts, write_posts_to_csv};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Couldn't get any posts")]
    NoPosts,
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
