//! Integration tests for the pagination driver
//!
//! These tests use wiremock to serve a small three-page feed and drive the
//! real reqwest-backed fetcher end-to-end. The blocking client runs on a
//! `spawn_blocking` thread so it stays off the async runtime.

use fb_post_scraper::feed::{get_posts, FeedOptions, Target};
use fb_post_scraper::Post;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FIRST_PAGE: &str = r#"<html><body>
<article data-ft='{"mf_story_key":"1","page_insights":{"7":{"post_context":{"publish_time":1577836800}}}}'>
    <header><a href="/acme/">Acme</a> <a href="/story.php?story_fbid=1&amp;id=7&amp;refid=17">Jan 1</a></header>
    <div class="story_body_container">
        <p>Hello from page one</p>
        <div><div><a href="/acme/photos/a.1/10/?type=3"><i class="img" style="background-image: url('https\3a //cdn.example.net/thumb.jpg');"></i></a></div></div>
    </div>
    <footer><span>1,234 Likes</span> <span>12 Comments</span> <span>3 Shares</span></footer>
</article>
<article data-ft='{"mf_story_key":"2"}'>
    <p>Second post</p>
    <a href="https://lm.facebook.com/l.php?u=https%3A%2F%2Fexample.org%2Fstory&amp;h=AT0">example.org</a>
</article>
<script>({href:"/page_content/acme?cursor=2"})</script>
</body></html>"#;

const PHOTO_PAGE: &str = r#"<html><body><div class="acw">
<a href="https://cdn.example.net/full.jpg?x=1&amp;y=2" target="_blank" class="sec">View Full Size</a>
</div></body></html>"#;

fn update_payload(ids: &[&str], next_cursor: Option<&str>) -> String {
    let articles: String = ids
        .iter()
        .map(|id| format!(r#"<article data-ft='{{"mf_story_key":"{id}"}}'><p>post {id}</p></article>"#))
        .collect();

    let mut actions = vec![serde_json::json!({"cmd": "replace", "html": articles})];
    if let Some(cursor) = next_cursor {
        let code = format!(r#"require("MPageletRequest").init({{"href":"{}"}})"#, cursor.replace('/', "\\/"));
        actions.push(serde_json::json!({"cmd": "script", "code": code}));
    }

    format!("for (;;);{}", serde_json::json!({"payload": {"actions": actions}}))
}

/// Mounts the three-page feed plus the photo page on `server`
async fn mount_feed(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/acme/posts/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FIRST_PAGE))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/acme/photos/a.1/10/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PHOTO_PAGE))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page_content/acme"))
        .and(query_param("cursor", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(update_payload(&["3", "4"], Some("/page_content/acme?cursor=3"))),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page_content/acme"))
        .and(query_param("cursor", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(update_payload(&["5"], None)))
        .mount(server)
        .await;
}

fn options(base_url: &str, page_limit: Option<u32>) -> FeedOptions {
    FeedOptions {
        base_url: base_url.to_string(),
        page_limit,
        ..FeedOptions::default()
    }
}

/// Runs a full scrape of the `acme` account on a blocking thread
async fn scrape(options: FeedOptions) -> Vec<Post> {
    tokio::task::spawn_blocking(move || {
        let target = Target::Account("acme".to_string());
        get_posts(&target, options)
            .expect("Failed to build HTTP client")
            .collect()
    })
    .await
    .expect("Scrape thread panicked")
}

fn ids(posts: &[Post]) -> Vec<&str> {
    posts.iter().filter_map(|p| p.post_id.as_deref()).collect()
}

async fn page_content_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path().starts_with("/page_content"))
        .count()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_full_scrape_follows_cursors() {
    let mock_server = MockServer::start().await;
    mount_feed(&mock_server).await;
    let base_url = mock_server.uri();

    let posts = scrape(options(&base_url, None)).await;

    assert_eq!(ids(&posts), vec!["1", "2", "3", "4", "5"]);
    assert_eq!(page_content_requests(&mock_server).await, 2);

    let first = &posts[0];
    assert_eq!(first.text.as_deref(), Some("Hello from page one"));
    assert_eq!(first.likes, 1234);
    assert_eq!(first.comments, 12);
    assert_eq!(first.shares, 3);
    assert_eq!(
        first.image.as_deref(),
        Some("https://cdn.example.net/full.jpg?x=1&y=2")
    );
    assert_eq!(
        first.post_url,
        Some(format!("{}/story.php?story_fbid=1&id=7", base_url))
    );
    assert_eq!(
        first.time.map(|t| t.timestamp()),
        Some(1577836800)
    );

    let second = &posts[1];
    assert_eq!(second.link.as_deref(), Some("https://example.org/story"));
    assert_eq!(second.image, None);
    assert_eq!(second.likes, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_page_limit_respected() {
    let mock_server = MockServer::start().await;
    mount_feed(&mock_server).await;

    let posts = scrape(options(&mock_server.uri(), Some(2))).await;

    assert_eq!(ids(&posts), vec!["1", "2", "3", "4"]);
    assert_eq!(page_content_requests(&mock_server).await, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_ends_feed_quietly() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page_content/acme"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_feed(&mock_server).await;

    let posts = scrape(options(&mock_server.uri(), None)).await;

    assert_eq!(ids(&posts), vec!["1", "2"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_photo_page_failure_falls_back_to_thumbnail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/acme/photos/a.1/10/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    mount_feed(&mock_server).await;

    let posts = scrape(options(&mock_server.uri(), Some(1))).await;

    assert_eq!(
        posts[0].image.as_deref(),
        Some("https://cdn.example.net/thumb.jpg")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_session_headers_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/acme/posts/"))
        .and(header("accept-language", "en-US,en;q=0.5"))
        .and(header("user-agent", fb_post_scraper::config::DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string(FIRST_PAGE))
        .mount(&mock_server)
        .await;

    let posts = scrape(options(&mock_server.uri(), Some(1))).await;

    assert_eq!(ids(&posts), vec!["1", "2"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_timeout_ends_feed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/acme/posts/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(FIRST_PAGE)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let mut opts = options(&mock_server.uri(), None);
    opts.session.timeout_secs = 1;

    let posts = scrape(opts).await;

    assert!(posts.is_empty());
}
