//! Markup patterns used by the field extractors and the cursor resolver
//!
//! The site's markup is unversioned, so every pattern lives here behind a name
//! and can be replaced from configuration without touching the extractors.

use crate::config::PatternConfig;
use crate::ConfigError;
use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_LIKES: &str = r"([0-9,.]+)\s+Like";
pub const DEFAULT_COMMENTS: &str = r"([0-9,.]+)\s+Comment";
pub const DEFAULT_SHARES: &str = r"([0-9,.]+)\s+Share";
pub const DEFAULT_LINK: &str = r#"href="https://lm\.facebook\.com/l\.php\?u=(.+?)&amp;h="#;
pub const DEFAULT_CURSOR: &str = r#"href:"(/page_content[^"]+)""#;
pub const DEFAULT_CURSOR_ESCAPED: &str = r#"href":"(\\/page_content[^"]+)""#;
/// Matched against each anchor's `href` value, not against markup
pub const DEFAULT_PHOTO_LINK: &str = r"^(/.+/photos/.+)$";
pub const DEFAULT_FULL_SIZE_IMAGE: &str =
    r#"<a href="([^"]+?)" target="_blank" class="sec">View Full Size</a>"#;
pub const DEFAULT_BACKGROUND_IMAGE: &str = r"background-image: url\('(.+)'\)";
pub const DEFAULT_POST_URL: &str = r"^/story\.php\?story_fbid=";

static DEFAULT_PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::compile(&PatternConfig::default()).expect("default patterns compile")
});

/// Compiled extraction patterns
///
/// Every pattern except `post_url` must expose the wanted value as capture
/// group 1.
#[derive(Debug, Clone)]
pub struct PatternSet {
    pub likes: Regex,
    pub comments: Regex,
    pub shares: Regex,
    pub link: Regex,
    pub cursor: Regex,
    pub cursor_escaped: Regex,
    pub photo_link: Regex,
    pub full_size_image: Regex,
    pub background_image: Regex,
    pub post_url: Regex,
}

impl PatternSet {
    /// Compiles the default patterns with any overrides from `config` applied
    pub fn compile(config: &PatternConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            likes: compile_capturing("likes", config.likes.as_deref(), DEFAULT_LIKES)?,
            comments: compile_capturing("comments", config.comments.as_deref(), DEFAULT_COMMENTS)?,
            shares: compile_capturing("shares", config.shares.as_deref(), DEFAULT_SHARES)?,
            link: compile_capturing("link", config.link.as_deref(), DEFAULT_LINK)?,
            cursor: compile_capturing("cursor", config.cursor.as_deref(), DEFAULT_CURSOR)?,
            cursor_escaped: compile_capturing(
                "cursor-escaped",
                config.cursor_escaped.as_deref(),
                DEFAULT_CURSOR_ESCAPED,
            )?,
            photo_link: compile_capturing(
                "photo-link",
                config.photo_link.as_deref(),
                DEFAULT_PHOTO_LINK,
            )?,
            full_size_image: compile_capturing(
                "full-size-image",
                config.full_size_image.as_deref(),
                DEFAULT_FULL_SIZE_IMAGE,
            )?,
            background_image: compile_capturing(
                "background-image",
                config.background_image.as_deref(),
                DEFAULT_BACKGROUND_IMAGE,
            )?,
            post_url: compile(
                "post-url",
                config.post_url.as_deref().unwrap_or(DEFAULT_POST_URL),
            )?,
        })
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        DEFAULT_PATTERNS.clone()
    }
}

fn compile(name: &str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        name: name.to_string(),
        message: e.to_string(),
    })
}

fn compile_capturing(
    name: &str,
    pattern: Option<&str>,
    default: &str,
) -> Result<Regex, ConfigError> {
    let regex = compile(name, pattern.unwrap_or(default))?;
    if regex.captures_len() < 2 {
        return Err(ConfigError::InvalidPattern {
            name: name.to_string(),
            message: "pattern must contain a capture group".to_string(),
        });
    }
    Ok(regex)
}
