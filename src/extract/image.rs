use crate::codec::{decode_css_url, decode_html_entities};
use crate::extract::{ExtractContext, PatternSet, PostFragment};
use crate::feed::FetchResult;
use scraper::{ElementRef, Selector};

/// Resolves the post image, preferring the full-size photo page over the
/// inline thumbnail
pub fn extract_image(fragment: &PostFragment, ctx: &ExtractContext<'_>) -> Option<String> {
    extract_full_size_image(fragment, ctx).or_else(|| extract_inline_image(fragment, ctx.patterns))
}

/// Follows the post's photo link and reads the "View Full Size" target
///
/// The photo link is the first anchor whose `href` matches the photo-link
/// pattern. Issues one request through `ctx.fetcher`. A failed request is
/// treated the same as a page without the link.
pub fn extract_full_size_image(
    fragment: &PostFragment,
    ctx: &ExtractContext<'_>,
) -> Option<String> {
    let path = photo_link(fragment, ctx.patterns)?;
    let url = format!("{}{}", ctx.base_url, path);

    match ctx.fetcher.fetch(&url) {
        FetchResult::Success { body, .. } => {
            let target = ctx.patterns.full_size_image.captures(&body)?.get(1)?.as_str();
            Some(decode_html_entities(target))
        }
        FetchResult::HttpError { status_code } => {
            tracing::debug!("Photo page {} returned HTTP {}", url, status_code);
            None
        }
        FetchResult::NetworkError { error } => {
            tracing::debug!("Photo page {} failed: {}", url, error);
            None
        }
    }
}

fn photo_link(fragment: &PostFragment, patterns: &PatternSet) -> Option<String> {
    let selector = Selector::parse("a[href]").ok()?;

    fragment
        .root()
        .select(&selector)
        .filter_map(|link| link.value().attr("href"))
        .find_map(|href| Some(patterns.photo_link.captures(href)?.get(1)?.as_str().to_string()))
}

/// Decodes the `background-image` URL from the inline style of the first
/// `.img` element nested two `div`s below the story body
pub fn extract_inline_image(fragment: &PostFragment, patterns: &PatternSet) -> Option<String> {
    let image_selector = Selector::parse(".img").ok()?;
    let story = fragment.select_first("div.story_body_container")?;

    child_divs(story).flat_map(child_divs).find_map(|container| {
        let image = container.select(&image_selector).next()?;
        let style = image.value().attr("style")?;
        let url = patterns.background_image.captures(style)?.get(1)?.as_str();
        Some(decode_css_url(url))
    })
}

fn child_divs<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "div")
}
