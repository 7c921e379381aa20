//! CSV export of scraped posts

use crate::extract::Post;
use crate::feed::Target;
use crate::output::{OutputError, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// `<account or group>_posts.csv`
pub fn default_filename(target: &Target) -> String {
    format!("{}_posts.csv", target.name())
}

/// Writes posts as CSV with a header row
///
/// # Returns
///
/// * `Ok(usize)` - Number of posts written
/// * `Err(OutputError)` - Failed to serialize or write
pub fn write_posts<W: Write>(posts: impl IntoIterator<Item = Post>, writer: W) -> OutputResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut count = 0;

    for post in posts {
        csv_writer.serialize(&post)?;
        count += 1;
    }

    csv_writer.flush()?;
    Ok(count)
}

/// Writes posts to a CSV file at `path`
///
/// The file is only created once the first post is available, so an empty
/// feed leaves nothing behind and returns [`OutputError::NoPosts`].
pub fn write_posts_to_csv(posts: impl IntoIterator<Item = Post>, path: &Path) -> OutputResult<usize> {
    let mut posts = posts.into_iter().peekable();
    if posts.peek().is_none() {
        return Err(OutputError::NoPosts);
    }

    let file = File::create(path)?;
    let count = write_posts(posts, file)?;
    tracing::info!("Wrote {} posts to {}", count, path.display());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_post() -> Post {
        Post {
            post_id: Some("42".to_string()),
            text: Some("line one\nline two, with comma".to_string()),
            time: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).single(),
            image: None,
            likes: 1234,
            comments: 5,
            shares: 0,
            post_url: Some("https://m.example.com/story.php?story_fbid=42&id=1".to_string()),
            link: None,
        }
    }

    #[test]
    fn test_header_in_field_order() {
        let mut buffer = Vec::new();
        write_posts(vec![sample_post()], &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert_eq!(
            output.lines().next(),
            Some("post_id,text,time,image,likes,comments,shares,post_url,link")
        );
    }

    #[test]
    fn test_row_values() {
        let mut buffer = Vec::new();
        let count = write_posts(vec![sample_post(), Post::default()], &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert_eq!(count, 2);
        assert!(output.contains("\"line one\nline two, with comma\""));
        assert!(output.contains("2020-01-01T00:00:00Z"));
        assert!(output.contains(",1234,5,0,"));
        assert!(output.ends_with(",,,,0,0,0,,\n"));
    }

    #[test]
    fn test_no_posts_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty_posts.csv");

        let result = write_posts_to_csv(Vec::new(), &path);
        assert!(matches!(result, Err(OutputError::NoPosts)));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acme_posts.csv");

        let count = write_posts_to_csv(vec![sample_post()], &path).unwrap();
        assert_eq!(count, 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_default_filename() {
        assert_eq!(
            default_filename(&Target::Account("acme".to_string())),
            "acme_posts.csv"
        );
        assert_eq!(default_filename(&Target::Group("99".to_string())), "99_posts.csv");
    }
}
