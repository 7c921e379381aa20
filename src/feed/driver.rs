//! Pagination driver - the fetch/emit/advance loop
//!
//! [`PostStream`] is a lazy iterator over the posts of a feed. Pages are
//! fetched only when the posts of the previous page have been consumed, so a
//! caller that stops early never triggers further requests.

use crate::extract::{assemble_post, ExtractContext, Post, PostFragment};
use crate::feed::cursor::resolve_cursor;
use crate::feed::parser::{parse_page, parse_update_payload, ParsedPage};
use crate::feed::{FeedOptions, FetchResult, Fetcher};
use crate::state::DriverState;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::iter::FusedIterator;

/// Lazy sequence of posts produced by following feed cursors
///
/// Any transport failure, non-success status, malformed update payload or
/// missing cursor ends the sequence quietly. Once exhausted it cannot be
/// resumed; build a new stream to start over.
pub struct PostStream<F: Fetcher> {
    fetcher: F,
    options: FeedOptions,
    state: DriverState,
    next_url: Option<String>,
    fragments: VecDeque<String>,
    cursor_source: Option<String>,
    fetched_at: DateTime<Utc>,
    pages_fetched: u32,
}

impl<F: Fetcher> PostStream<F> {
    /// Creates a stream that will start at `start_url` on the first `next()`
    pub fn new(fetcher: F, start_url: String, options: FeedOptions) -> Self {
        Self {
            fetcher,
            options,
            state: DriverState::Fetching,
            next_url: Some(start_url),
            fragments: VecDeque::new(),
            cursor_source: None,
            fetched_at: Utc::now(),
            pages_fetched: 0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Number of pages loaded so far
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    #[cfg(test)]
    pub(crate) fn fetcher(&self) -> &F {
        &self.fetcher
    }

    fn transition(&mut self, next: DriverState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid driver transition {} -> {}",
            self.state,
            next
        );
        tracing::trace!("Driver {} -> {}", self.state, next);
        if next.is_terminal() {
            tracing::info!("Feed finished after {} pages", self.pages_fetched);
        }
        self.state = next;
    }

    /// `Fetching`: loads the pending URL as the new current page
    fn fetch_page(&mut self) {
        let Some(url) = self.next_url.take() else {
            self.transition(DriverState::Done);
            return;
        };
        let page_number = self.pages_fetched + 1;
        tracing::debug!("Fetching page {} from {}", page_number, url);

        let body = match self.fetcher.fetch(&url) {
            FetchResult::Success { body, .. } => body,
            FetchResult::HttpError { status_code } => {
                tracing::warn!("Stopping: {} returned HTTP {}", url, status_code);
                self.transition(DriverState::Done);
                return;
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Stopping: request to {} failed: {}", url, error);
                self.transition(DriverState::Done);
                return;
            }
        };

        // The first page is a whole document that also carries the cursor;
        // later pages are update payloads
        let (page, cursor_source) = if self.pages_fetched == 0 {
            (parse_page(&body), Some(body))
        } else {
            match parse_update_payload(&body) {
                Ok(update) => {
                    let page = update
                        .html
                        .as_deref()
                        .map(parse_page)
                        .unwrap_or_else(ParsedPage::default);
                    (page, update.script)
                }
                Err(e) => {
                    tracing::warn!("Stopping: malformed update payload from {}: {}", url, e);
                    self.transition(DriverState::Done);
                    return;
                }
            }
        };

        tracing::info!("Page {}: {} posts", page_number, page.fragments.len());
        self.fragments = page.fragments.into();
        self.cursor_source = cursor_source;
        self.fetched_at = Utc::now();
        self.pages_fetched = page_number;
        self.transition(DriverState::Emitting);
    }

    /// `Advancing`: checks the page budget and resolves the next cursor
    fn advance(&mut self) {
        if let Some(limit) = self.options.page_limit {
            if self.pages_fetched >= limit {
                tracing::debug!("Page limit of {} reached", limit);
                self.transition(DriverState::Done);
                return;
            }
        }

        let cursor = self
            .cursor_source
            .take()
            .and_then(|source| resolve_cursor(&source, &self.options.patterns));
        let Some(cursor) = cursor else {
            tracing::debug!("No cursor after page {}; end of feed", self.pages_fetched);
            self.transition(DriverState::Done);
            return;
        };

        self.next_url = Some(format!("{}{}", self.options.base_url, cursor));

        if !self.options.sleep.is_zero() {
            std::thread::sleep(self.options.sleep);
        }
        self.transition(DriverState::Fetching);
    }

    fn assemble(&self, markup: &str) -> Post {
        let ctx = ExtractContext {
            base_url: &self.options.base_url,
            patterns: &self.options.patterns,
            fetcher: &self.fetcher,
            fetched_at: self.fetched_at,
        };
        assemble_post(&PostFragment::parse(markup), &ctx)
    }
}

impl<F: Fetcher> Iterator for PostStream<F> {
    type Item = Post;

    fn next(&mut self) -> Option<Post> {
        loop {
            match self.state {
                DriverState::Fetching => self.fetch_page(),
                DriverState::Emitting => match self.fragments.pop_front() {
                    Some(markup) => return Some(self.assemble(&markup)),
                    None => self.transition(DriverState::Advancing),
                },
                DriverState::Advancing => self.advance(),
                DriverState::Done => return None,
            }
        }
    }
}

impl<F: Fetcher> FusedIterator for PostStream<F> {}
