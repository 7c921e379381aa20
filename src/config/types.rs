use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://m.facebook.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/76.0.3809.87 Safari/537.36";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Main configuration structure
///
/// Every section is optional; a missing file or section falls back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub session: SessionConfig,
    pub patterns: PatternConfig,
}

/// Pagination behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Origin every relative path is resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum number of pages to fetch; `None` follows cursors until they run out
    #[serde(rename = "page-limit")]
    pub page_limit: Option<u32>,

    /// Delay before each follow-up page request (milliseconds)
    #[serde(rename = "sleep-ms")]
    pub sleep_ms: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_limit: Some(DEFAULT_PAGE_LIMIT),
            sleep_ms: 0,
        }
    }
}

/// HTTP session settings shared by every request of a run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    #[serde(rename = "accept-language")]
    pub accept_language: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Regex overrides for the extraction patterns
///
/// Unset entries keep the built-in pattern.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub likes: Option<String>,
    pub comments: Option<String>,
    pub shares: Option<String>,
    pub link: Option<String>,
    pub cursor: Option<String>,
    #[serde(rename = "cursor-escaped")]
    pub cursor_escaped: Option<String>,
    #[serde(rename = "photo-link")]
    pub photo_link: Option<String>,
    #[serde(rename = "full-size-image")]
    pub full_size_image: Option<String>,
    #[serde(rename = "background-image")]
    pub background_image: Option<String>,
    #[serde(rename = "post-url")]
    pub post_url: Option<String>,
}
