//! Per-post field extraction
//!
//! This module turns one `<article>` fragment into a [`Post`]:
//! - Field extractors: one function per field, each returning absence on failure
//! - Image resolution with a supplementary photo-page fetch
//! - Timestamp extraction from embedded metadata or displayed text
//! - The replaceable [`PatternSet`] every regex comes from

mod fields;
mod image;
mod patterns;
mod time;

pub use fields::{
    extract_comments, extract_likes, extract_link, extract_post_id, extract_post_url,
    extract_shares, extract_text,
};
pub use image::{extract_full_size_image, extract_image, extract_inline_image};
pub use patterns::PatternSet;
pub use time::{extract_displayed_time, extract_publish_time, extract_time, parse_datetime};

use crate::feed::Fetcher;
use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

/// One scraped post
///
/// Field order is the column order of tabular output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Post {
    pub post_id: Option<String>,
    pub text: Option<String>,
    pub time: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub post_url: Option<String>,
    pub link: Option<String>,
}

/// The parsed markup of a single post
pub struct PostFragment {
    document: Html,
}

impl PostFragment {
    /// Parses the outer markup of one post element
    pub fn parse(markup: &str) -> Self {
        Self {
            document: Html::parse_fragment(markup),
        }
    }

    /// The post element itself (the first element of the fragment)
    pub fn root(&self) -> ElementRef<'_> {
        let wrapper = self.document.root_element();
        wrapper
            .children()
            .find_map(ElementRef::wrap)
            .unwrap_or(wrapper)
    }

    /// Serialized outer markup of the post element
    pub fn markup(&self) -> String {
        self.root().html()
    }

    /// The embedded `data-ft` metadata blob, if present and valid JSON
    pub fn metadata(&self) -> Option<serde_json::Value> {
        let raw = self.root().value().attr("data-ft")?;
        serde_json::from_str(raw).ok()
    }

    /// First descendant matching `selector`
    pub fn select_first(&self, selector: &str) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(selector).ok()?;
        self.root().select(&selector).next()
    }
}

/// Everything an extractor may need beyond the fragment itself
pub struct ExtractContext<'a> {
    /// Origin relative links are resolved against
    pub base_url: &'a str,
    pub patterns: &'a PatternSet,
    /// Used for the photo-page lookup of the full-size image
    pub fetcher: &'a dyn Fetcher,
    /// When the page holding the fragment was fetched; anchors relative times
    pub fetched_at: DateTime<Utc>,
}

/// Runs every field extractor on `fragment` and merges the results
///
/// A failing extractor only blanks its own field.
pub fn assemble_post(fragment: &PostFragment, ctx: &ExtractContext<'_>) -> Post {
    Post {
        post_id: extract_post_id(fragment),
        text: extract_text(fragment),
        time: extract_time(fragment, ctx.fetched_at),
        image: extract_image(fragment, ctx),
        likes: extract_likes(fragment, ctx.patterns),
        comments: extract_comments(fragment, ctx.patterns),
        shares: extract_shares(fragment, ctx.patterns),
        post_url: extract_post_url(fragment, ctx.base_url, ctx.patterns),
        link: extract_link(fragment, ctx.patterns),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::feed::{FetchResult, Fetcher};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory fetcher: canned responses keyed by URL, with a request log
    #[derive(Default)]
    pub struct StubFetcher {
        pub responses: HashMap<String, FetchResult>,
        pub requests: RefCell<Vec<String>>,
    }

    impl StubFetcher {
        pub fn with_page(mut self, url: &str, body: &str) -> Self {
            self.responses.insert(
                url.to_string(),
                FetchResult::Success {
                    final_url: url.to_string(),
                    status_code: 200,
                    body: body.to_string(),
                },
            );
            self
        }

        pub fn with_result(mut self, url: &str, result: FetchResult) -> Self {
            self.responses.insert(url.to_string(), result);
            self
        }
    }

    impl Fetcher for StubFetcher {
        fn fetch(&self, url: &str) -> FetchResult {
            self.requests.borrow_mut().push(url.to_string());
            self.responses
                .get(url)
                .cloned()
                .unwrap_or(FetchResult::HttpError { status_code: 404 })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::StubFetcher;
    use super::*;
    use chrono::TimeZone;

    const BASE: &str = "https://m.example.com";

    const ARTICLE: &str = r#"<article data-ft='{"mf_story_key":"9876","page_insights":{"111":{"post_context":{"publish_time":1546300800}}}}'>
        <header><a href="/story.php?story_fbid=9876&amp;id=111&amp;refid=17">Jan 1</a></header>
        <div class="story_body_container">
            <p>First line</p>
            <p>Second line</p>
            <a href="https://lm.facebook.com/l.php?u=https%3A%2F%2Fexample.org%2Fnews&amp;h=AT0x">link</a>
        </div>
        <footer><span>1,234 Likes</span> <span>56 Comments</span> <span>7 Shares</span></footer>
    </article>"#;

    fn context<'a>(patterns: &'a PatternSet, fetcher: &'a StubFetcher) -> ExtractContext<'a> {
        ExtractContext {
            base_url: BASE,
            patterns,
            fetcher,
            fetched_at: Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_assemble_full_post() {
        let patterns = PatternSet::default();
        let fetcher = StubFetcher::default();
        let post = assemble_post(&PostFragment::parse(ARTICLE), &context(&patterns, &fetcher));

        assert_eq!(post.post_id.as_deref(), Some("9876"));
        assert_eq!(post.text.as_deref(), Some("First line\nSecond line"));
        assert_eq!(post.time, Utc.timestamp_opt(1546300800, 0).single());
        assert_eq!(post.image, None);
        assert_eq!(post.likes, 1234);
        assert_eq!(post.comments, 56);
        assert_eq!(post.shares, 7);
        assert_eq!(
            post.post_url.as_deref(),
            Some("https://m.example.com/story.php?story_fbid=9876&id=111")
        );
        assert_eq!(post.link.as_deref(), Some("https://example.org/news"));
    }

    #[test]
    fn test_assemble_bare_fragment() {
        let patterns = PatternSet::default();
        let fetcher = StubFetcher::default();
        let post = assemble_post(
            &PostFragment::parse("<article><div>nothing here</div></article>"),
            &context(&patterns, &fetcher),
        );

        assert_eq!(post, Post::default());
    }

    #[test]
    fn test_assembly_is_repeatable() {
        let patterns = PatternSet::default();
        let fetcher = StubFetcher::default();
        let ctx = context(&patterns, &fetcher);
        let fragment = PostFragment::parse(ARTICLE);

        let first = assemble_post(&fragment, &ctx);
        let second = assemble_post(&fragment, &ctx);
        assert_eq!(first, second);
    }

    #[test]
    fn test_fragment_root_and_metadata() {
        let fragment = PostFragment::parse(r#"<article data-ft='{"a":1}'><p>x</p></article>"#);
        assert_eq!(fragment.root().value().name(), "article");
        assert_eq!(fragment.metadata(), Some(serde_json::json!({"a": 1})));
        assert!(fragment.select_first("p").is_some());
        assert!(fragment.markup().starts_with("<article"));
    }

    #[test]
    fn test_malformed_metadata_is_absent() {
        let fragment = PostFragment::parse(r#"<article data-ft="{not json"></article>"#);
        assert!(fragment.metadata().is_none());
    }
}
