//! Feed module: pagination and page retrieval
//!
//! This module contains the cursor-following logic, including:
//! - HTTP fetching behind the [`Fetcher`] trait
//! - Page and update-payload parsing
//! - Cursor resolution
//! - The lazy [`PostStream`] pagination driver

mod cursor;
mod driver;
mod fetcher;
mod parser;

pub use cursor::resolve_cursor;
pub use driver::PostStream;
pub use fetcher::{build_http_client, fetch_url, FetchResult, Fetcher, HttpFetcher};
pub use parser::{parse_page, parse_update_payload, PageUpdate, ParsedPage};

use crate::config::{validate, Config, SessionConfig};
use crate::extract::PatternSet;
use crate::{ConfigError, ScraperError};
use std::time::Duration;

/// Whose feed to read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A page or profile name, e.g. `nintendo`
    Account(String),
    /// A group id
    Group(String),
}

impl Target {
    /// Builds a target from an optional account and an optional group
    ///
    /// Exactly one of the two must be given.
    ///
    /// # Example
    ///
    /// ```
    /// use fb_post_scraper::feed::Target;
    ///
    /// assert!(Target::from_selection(Some("nintendo".into()), None).is_ok());
    /// assert!(Target::from_selection(None, None).is_err());
    /// assert!(Target::from_selection(Some("a".into()), Some("1".into())).is_err());
    /// ```
    pub fn from_selection(
        account: Option<String>,
        group: Option<String>,
    ) -> Result<Self, ScraperError> {
        let target = match (account, group) {
            (Some(account), None) => Self::Account(account),
            (None, Some(group)) => Self::Group(group),
            _ => {
                return Err(ScraperError::InvalidTarget(
                    "specify either an account or a group".to_string(),
                ))
            }
        };

        if target.name().trim().is_empty() || target.name().contains('/') {
            return Err(ScraperError::InvalidTarget(format!(
                "'{}' is not a valid account or group name",
                target.name()
            )));
        }

        Ok(target)
    }

    /// Account name or group id
    pub fn name(&self) -> &str {
        match self {
            Self::Account(name) | Self::Group(name) => name,
        }
    }

    /// URL of the first feed page
    pub fn start_url(&self, base_url: &str) -> String {
        match self {
            Self::Account(account) => format!("{}/{}/posts/", base_url, account),
            Self::Group(group) => format!("{}/groups/{}/", base_url, group),
        }
    }
}

/// Everything the pagination driver needs for one run
#[derive(Debug, Clone)]
pub struct FeedOptions {
    pub base_url: String,
    /// Maximum number of pages; `None` is unbounded
    pub page_limit: Option<u32>,
    /// Pause before each follow-up page request
    pub sleep: Duration,
    pub session: SessionConfig,
    pub patterns: PatternSet,
}

impl FeedOptions {
    /// Validates `config` and converts it into driver options
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        validate(config)?;

        Ok(Self {
            base_url: config.scraper.base_url.clone(),
            page_limit: config.scraper.page_limit,
            sleep: Duration::from_millis(config.scraper.sleep_ms),
            session: config.session.clone(),
            patterns: PatternSet::compile(&config.patterns)?,
        })
    }
}

impl Default for FeedOptions {
    fn default() -> Self {
        let config = Config::default();
        Self {
            base_url: config.scraper.base_url,
            page_limit: config.scraper.page_limit,
            sleep: Duration::from_millis(config.scraper.sleep_ms),
            session: config.session,
            patterns: PatternSet::default(),
        }
    }
}

/// Starts scraping the feed of `target`
///
/// Builds the HTTP session and returns a lazy stream; no request is made until
/// the first post is pulled.
///
/// # Example
///
/// ```no_run
/// use fb_post_scraper::feed::{get_posts, FeedOptions, Target};
///
/// let target = Target::Account("nintendo".to_string());
/// for post in get_posts(&target, FeedOptions::default()).unwrap() {
///     println!("{:?}", post.post_url);
/// }
/// ```
pub fn get_posts(
    target: &Target,
    options: FeedOptions,
) -> Result<PostStream<HttpFetcher>, ScraperError> {
    let fetcher = HttpFetcher::from_config(&options.session)?;
    let start_url = target.start_url(&options.base_url);
    tracing::info!("Scraping {} starting at {}", target.name(), start_url);
    Ok(PostStream::new(fetcher, start_url, options))
}
