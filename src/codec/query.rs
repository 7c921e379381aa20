use url::form_urlencoded;

/// Which query parameters survive [`filter_query_params`]
#[derive(Debug, Clone, Copy)]
pub enum ParamFilter<'a> {
    /// Keep only the listed parameters
    Allow(&'a [&'a str]),
    /// Drop the listed parameters
    Deny(&'a [&'a str]),
    /// Leave the query alone
    Keep,
}

impl ParamFilter<'_> {
    fn keeps(&self, param: &str) -> bool {
        match self {
            Self::Allow(names) => names.contains(&param),
            Self::Deny(names) => !names.contains(&param),
            Self::Keep => true,
        }
    }
}

/// Rewrites the query string of a (possibly relative) URL
///
/// Parameter order is preserved. An empty resulting query drops the `?`.
/// The fragment, if any, is carried over untouched.
///
/// # Example
///
/// ```
/// use fb_post_scraper::codec::{filter_query_params, ParamFilter};
///
/// let url = filter_query_params(
///     "/story.php?story_fbid=1&id=2&extra=3",
///     ParamFilter::Allow(&["story_fbid", "id"]),
/// );
/// assert_eq!(url, "/story.php?story_fbid=1&id=2");
/// ```
pub fn filter_query_params(url: &str, filter: ParamFilter<'_>) -> String {
    let (without_fragment, fragment) = match url.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (url, None),
    };

    let (path, query) = match without_fragment.split_once('?') {
        Some((path, query)) => (path, query),
        None => (without_fragment, ""),
    };

    let kept: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| filter.keeps(key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut result = path.to_string();
    if !kept.is_empty() {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(kept)
            .finish();
        result.push('?');
        result.push_str(&query);
    }
    if let Some(fragment) = fragment {
        result.push('#');
        result.push_str(fragment);
    }

    result
}
