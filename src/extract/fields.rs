use crate::codec::{filter_query_params, parse_int, ParamFilter};
use crate::extract::{PatternSet, PostFragment};
use regex::Regex;
use scraper::{ElementRef, Selector};
use serde_json::Value;

/// Query parameters that identify a story; everything else is tracking noise
const POST_URL_PARAMS: &[&str] = &["story_fbid", "id"];

/// Returns `mf_story_key` from the fragment's `data-ft` metadata
pub fn extract_post_id(fragment: &PostFragment) -> Option<String> {
    let metadata = fragment.metadata()?;
    match metadata.get("mf_story_key")? {
        Value::String(key) => Some(key.clone()),
        Value::Number(key) => Some(key.to_string()),
        _ => None,
    }
}

/// Joins the text of every paragraph in the post with newlines
pub fn extract_text(fragment: &PostFragment) -> Option<String> {
    let selector = Selector::parse("p").ok()?;
    let paragraphs: Vec<String> = fragment
        .root()
        .select(&selector)
        .map(|p| p.text().collect::<String>())
        .collect();

    if paragraphs.is_empty() {
        return None;
    }
    Some(paragraphs.join("\n"))
}

pub fn extract_likes(fragment: &PostFragment, patterns: &PatternSet) -> u64 {
    extract_count(fragment, &patterns.likes)
}

pub fn extract_comments(fragment: &PostFragment, patterns: &PatternSet) -> u64 {
    extract_count(fragment, &patterns.comments)
}

pub fn extract_shares(fragment: &PostFragment, patterns: &PatternSet) -> u64 {
    extract_count(fragment, &patterns.shares)
}

/// Finds the canonical story permalink among the header links
///
/// Only the `story_fbid` and `id` parameters are kept, and the path is
/// prefixed with `base_url`.
pub fn extract_post_url(
    fragment: &PostFragment,
    base_url: &str,
    patterns: &PatternSet,
) -> Option<String> {
    let selector = Selector::parse("header a").ok()?;

    fragment
        .root()
        .select(&selector)
        .filter_map(|link| link.value().attr("href"))
        .find(|href| patterns.post_url.is_match(href))
        .map(|href| {
            let path = filter_query_params(href, ParamFilter::Allow(POST_URL_PARAMS));
            format!("{}{}", base_url, path)
        })
}

/// Unwraps the outbound target of a redirect-wrapper link
pub fn extract_link(fragment: &PostFragment, patterns: &PatternSet) -> Option<String> {
    let markup = fragment.markup();
    let wrapped = patterns.link.captures(&markup)?.get(1)?.as_str();
    urlencoding::decode(wrapped).ok().map(|url| url.into_owned())
}

/// Applies a count pattern to the footer text; 0 when anything is missing
fn extract_count(fragment: &PostFragment, pattern: &Regex) -> u64 {
    find_and_search(fragment, "footer", pattern)
        .and_then(|value| parse_int(&value))
        .unwrap_or(0)
}

/// Runs `pattern` over the rendered text of the first node matching `selector`
/// and returns capture group 1
fn find_and_search(fragment: &PostFragment, selector: &str, pattern: &Regex) -> Option<String> {
    let container = fragment.select_first(selector)?;
    let text = rendered_text(container);
    let captures = pattern.captures(&text)?;
    captures.get(1).map(|m| m.as_str().to_string())
}

/// Text nodes of an element, trimmed and separated by single spaces
fn rendered_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
