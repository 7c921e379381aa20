//! Page and update-payload parsing
//!
//! The first feed page is a plain HTML document. Every page after that arrives
//! as a JSON update payload behind a `for (;;);` guard, carrying a list of
//! actions:
//! - `replace`: markup that becomes the new current page
//! - `script`: code containing the next cursor
//!
//! Other actions are ignored.

use scraper::{Html, Selector};
use serde::Deserialize;

const JSON_GUARD: &str = "for (;;);";

/// Post fragments found on a page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Outer markup of every `<article>`, in document order
    pub fragments: Vec<String>,
}

/// What an update payload changes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageUpdate {
    /// Replacement page markup from the last `replace` action
    pub html: Option<String>,
    /// Cursor source from the last `script` action
    pub script: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateResponse {
    payload: UpdatePayload,
}

#[derive(Debug, Deserialize)]
struct UpdatePayload {
    actions: Vec<Action>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "cmd", rename_all = "lowercase")]
enum Action {
    Replace { html: String },
    Script { code: String },
    #[serde(other)]
    Other,
}

/// Splits an HTML document into post fragments
///
/// # Example
///
/// ```
/// use fb_post_scraper::feed::parse_page;
///
/// let page = parse_page("<html><body><article>a</article><article>b</article></body></html>");
/// assert_eq!(page.fragments.len(), 2);
/// ```
pub fn parse_page(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    let fragments = match Selector::parse("article") {
        Ok(selector) => document.select(&selector).map(|el| el.html()).collect(),
        Err(_) => Vec::new(),
    };

    ParsedPage { fragments }
}

/// Decodes an update payload
///
/// Actions are applied in order, so a later action of the same kind overrides
/// an earlier one.
///
/// # Returns
///
/// * `Ok(PageUpdate)` - The payload was well-formed
/// * `Err(serde_json::Error)` - The body is not JSON or lacks `payload.actions`
pub fn parse_update_payload(body: &str) -> Result<PageUpdate, serde_json::Error> {
    let json = body.replacen(JSON_GUARD, "", 1);
    let response: UpdateResponse = serde_json::from_str(&json)?;

    let mut update = PageUpdate::default();
    for action in response.payload.actions {
        match action {
            Action::Replace { html } => update.html = Some(html),
            Action::Script { code } => update.script = Some(code),
            Action::Other => {}
        }
    }

    Ok(update)
}
