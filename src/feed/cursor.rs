//! Next-page cursor resolution
//!
//! The cursor appears in one of two encodings:
//! - first page load: a literal path (`href:"/page_content/..."`)
//! - update payloads: a JSON-escaped path (`href":"\/page_content\/..."`)

use crate::codec::decode_escapes;
use crate::extract::PatternSet;

/// Finds the next-page cursor in `text`
///
/// The literal form is tried first. The escaped form has its backslash escapes
/// reversed, so both yield a plain path such as `/page_content/abc`.
///
/// # Example
///
/// ```
/// use fb_post_scraper::extract::PatternSet;
/// use fb_post_scraper::feed::resolve_cursor;
///
/// let patterns = PatternSet::default();
/// assert_eq!(
///     resolve_cursor(r#"href:"/page_content/abc""#, &patterns).as_deref(),
///     Some("/page_content/abc")
/// );
/// assert_eq!(
///     resolve_cursor(r#"href":"\/page_content\/abc""#, &patterns).as_deref(),
///     Some("/page_content/abc")
/// );
/// ```
pub fn resolve_cursor(text: &str, patterns: &PatternSet) -> Option<String> {
    if let Some(caps) = patterns.cursor.captures(text) {
        return caps.get(1).map(|m| m.as_str().to_string());
    }

    let caps = patterns.cursor_escaped.captures(text)?;
    let escaped = caps.get(1)?.as_str();
    Some(decode_escapes(escaped).replace("\\/", "/"))
}
