use crate::extract::PostFragment;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use regex::{Captures, Regex};
use scraper::Selector;
use serde_json::Value;
use std::sync::LazyLock;

const MONTH: &str = "Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|\
                     Aug(?:ust)?|Sep(?:tember)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?";

/// Exact ("Yesterday at 3:15 PM", "Mar 4, 2019 at 10:02 AM") or relative
/// ("3 hrs", "12 mins") display timestamps
static RE_DISPLAYED_TIME: LazyLock<Regex> = LazyLock::new(|| {
    let exact = format!(
        r"(?P<date>(?:{MONTH}) (?P<day>\d{{1,2}})(?:, (?P<year>\d{{4}}))?|Today|Yesterday) at (?P<hour>\d{{1,2}}):(?P<minute>\d{{2}}) (?P<period>AM|PM)"
    );
    let hours = r"\b(?P<hours>\d{1,2}) ?h(?:rs?)?";
    let minutes = r"\b(?P<minutes>\d{1,2}) ?mins?";
    Regex::new(&format!("{exact}|{hours}|{minutes}")).expect("valid regex")
});

/// Publish time of a post: embedded metadata first, displayed text second
pub fn extract_time(fragment: &PostFragment, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    extract_publish_time(fragment).or_else(|| extract_displayed_time(fragment, now))
}

/// Reads `page_insights.*.post_context.publish_time` from the `data-ft` blob
///
/// The insight keys are page ids and cannot be predicted, so every entry is
/// tried in document order.
pub fn extract_publish_time(fragment: &PostFragment) -> Option<DateTime<Utc>> {
    let metadata = fragment.metadata()?;
    let insights = metadata.get("page_insights")?.as_object()?;

    insights.values().find_map(|page| {
        let timestamp = page.get("post_context")?.get("publish_time")?;
        timestamp_to_datetime(timestamp)
    })
}

/// Parses the first displayed timestamp found in the post's `<abbr>` nodes
pub fn extract_displayed_time(
    fragment: &PostFragment,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let selector = Selector::parse("abbr").ok()?;
    fragment
        .root()
        .select(&selector)
        .find_map(|abbr| parse_datetime(&abbr.text().collect::<String>(), now))
}

/// Parses a human-readable timestamp, resolving relative forms against `now`
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use fb_post_scraper::extract::parse_datetime;
///
/// let now = Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap();
/// let parsed = parse_datetime("Posted 3 hrs ago", now).unwrap();
/// assert_eq!(parsed, Utc.with_ymd_and_hms(2020, 6, 1, 9, 0, 0).unwrap());
/// ```
pub fn parse_datetime(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let caps = RE_DISPLAYED_TIME.captures(text)?;

    if let Some(hours) = caps.name("hours") {
        let hours: i64 = hours.as_str().parse().ok()?;
        return Some(now - Duration::hours(hours));
    }
    if let Some(minutes) = caps.name("minutes") {
        let minutes: i64 = minutes.as_str().parse().ok()?;
        return Some(now - Duration::minutes(minutes));
    }

    let date = parse_date(&caps, now)?;
    let time = parse_clock(&caps)?;
    Some(Utc.from_utc_datetime(&date.and_time(time)))
}

fn timestamp_to_datetime(value: &Value) -> Option<DateTime<Utc>> {
    let seconds = value
        .as_i64()
        .or_else(|| value.as_f64().map(|secs| secs as i64))?;
    Utc.timestamp_opt(seconds, 0).single()
}

fn parse_date(caps: &Captures<'_>, now: DateTime<Utc>) -> Option<NaiveDate> {
    let today = now.date_naive();
    match caps.name("date")?.as_str() {
        "Today" => Some(today),
        "Yesterday" => today.pred_opt(),
        date => {
            let month = month_number(date.get(..3)?)?;
            let day: u32 = caps.name("day")?.as_str().parse().ok()?;
            let year = match caps.name("year") {
                Some(year) => year.as_str().parse().ok()?,
                None => today.year(),
            };
            NaiveDate::from_ymd_opt(year, month, day)
        }
    }
}

fn parse_clock(caps: &Captures<'_>) -> Option<NaiveTime> {
    let hour: u32 = caps.name("hour")?.as_str().parse().ok()?;
    let minute: u32 = caps.name("minute")?.as_str().parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }

    let hour = match (caps.name("period")?.as_str(), hour) {
        ("AM", 12) => 0,
        ("AM", h) => h,
        ("PM", 12) => 12,
        (_, h) => h + 12,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn month_number(prefix: &str) -> Option<u32> {
    let month = match prefix {
        "Jan" => 1,
        "Feb" => 2,
        "Mar" => 3,
        "Apr" => 4,
        "May" => 5,
        "Jun" => 6,
        "Jul" => 7,
        "Aug" => 8,
        "Sep" => 9,
        "Oct" => 10,
        "Nov" => 11,
        "Dec" => 12,
        _ => return None,
    };
    Some(month)
}
