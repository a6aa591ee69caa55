//! Turns user-supplied YouTube links into video identifiers.
//!
//! Structured parsing runs first. When the input is not a URL, or the host
//! is not one we know, an ordered list of regular expressions runs over the
//! raw text instead.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use tracing::warn;
use url::Url;

use super::track::{RemoteTrack, VideoId};
use crate::error::ValidationError;

/// Extract the video identifier from `raw`, if there is one.
pub fn extract_video_id(raw: &str) -> Option<VideoId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match Url::parse(trimmed) {
        Ok(url) => from_url(&url).or_else(|| from_patterns(trimmed)),
        Err(_) => from_patterns(trimmed),
    }
}

/// Build a remote track from form input.
///
/// # Errors
/// `TitleRequired` for a blank title, `InvalidUrl` when no identifier can be
/// extracted.
pub fn create_remote_track(title: &str, url: &str) -> Result<RemoteTrack, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    let video_id = extract_video_id(url).ok_or(ValidationError::InvalidUrl)?;
    Ok(RemoteTrack::new(video_id, title, Utc::now().timestamp_millis()))
}

fn from_url(url: &Url) -> Option<VideoId> {
    let host = url.host_str()?.to_ascii_lowercase();

    if host.contains("youtube.com") {
        let from_query = url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .and_then(|(_, value)| VideoId::parse(&value));
        if from_query.is_some() {
            return from_query;
        }
        // /shorts/<id>, /embed/<id>, /v/<id>, /live/<id>
        let second_segment = url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).nth(1));
        if let Some(id) = second_segment.and_then(VideoId::parse) {
            return Some(id);
        }
    }

    if host.contains("youtu.be") {
        let path = url.path();
        let candidate = path.strip_prefix('/').unwrap_or(path);
        if let Some(id) = VideoId::parse(candidate) {
            return Some(id);
        }
    }

    None
}

/// Fallback matchers, tried in order over the raw text.
///
/// `[^\n\r\x{2028}\x{2029}]` is "any character but a line terminator".
static FALLBACK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"youtu\.be/([A-Za-z0-9_-]{11})",
        r"youtube\.com/(?:shorts|embed|v)/([A-Za-z0-9_-]{11})",
        r"youtube\.com/watch[^\n\r\x{2028}\x{2029}]*[?&]v=([A-Za-z0-9_-]{11})",
    ]
    .iter()
    .filter_map(|pattern| match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(pattern, "Invalid video id pattern: {e}");
            None
        }
    })
    .collect()
});

fn from_patterns(text: &str) -> Option<VideoId> {
    FALLBACK_PATTERNS.iter().find_map(|re| {
        let captures = re.captures(text)?;
        VideoId::parse(captures.get(1)?.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> Option<String> {
        extract_video_id(raw).map(|v| v.to_string())
    }

    #[test]
    fn short_links() {
        assert_eq!(id("https://youtu.be/dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(id("  https://youtu.be/dQw4w9WgXcQ?t=42 ").as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn watch_links() {
        assert_eq!(
            id("https://youtube.com/watch?v=dQw4w9WgXcQ&t=5").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            id("https://www.youtube.com/watch?list=PL1&v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            id("https://M.YouTube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn path_links() {
        assert_eq!(id("https://www.youtube.com/shorts/abcdefghijk").as_deref(), Some("abcdefghijk"));
        assert_eq!(id("https://www.youtube.com/embed/abc-def_ghi").as_deref(), Some("abc-def_ghi"));
    }

    #[test]
    fn scheme_less_input_uses_patterns() {
        assert_eq!(id("youtu.be/dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(id("www.youtube.com/embed/dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(
            id("youtube.com/watch?feature=share&v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn fallback_patterns_all_compile() {
        assert_eq!(FALLBACK_PATTERNS.len(), 3);
    }

    #[test]
    fn watch_pattern_stays_on_one_line() {
        assert_eq!(id("youtube.com/watch\r?v=dQw4w9WgXcQ"), None);
        assert_eq!(id("youtube.com/watch\u{2028}?v=dQw4w9WgXcQ"), None);
        assert_eq!(
            id("youtube.com/watch x\nyoutube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn watch_pattern_takes_last_id_on_the_line() {
        assert_eq!(
            id("youtube.com/watch?v=aaaaaaaaaaa&v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn unrecognized_input() {
        assert_eq!(id("not a url"), None);
        assert_eq!(id(""), None);
        assert_eq!(id("   "), None);
        assert_eq!(id("garbage"), None);
        assert_eq!(id("https://vimeo.com/123456789"), None);
        assert_eq!(id("https://youtu.be/short"), None);
        assert_eq!(id("https://youtube.com/watch?v=bad!id!here"), None);
    }

    #[test]
    fn create_requires_title() {
        assert_eq!(
            create_remote_track("", "https://youtu.be/dQw4w9WgXcQ"),
            Err(ValidationError::TitleRequired)
        );
        assert_eq!(
            create_remote_track("   ", "https://youtu.be/dQw4w9WgXcQ"),
            Err(ValidationError::TitleRequired)
        );
    }

    #[test]
    fn create_requires_url() {
        assert_eq!(
            create_remote_track("My Song", "garbage"),
            Err(ValidationError::InvalidUrl)
        );
    }

    #[test]
    fn create_uses_video_id_as_track_id() {
        let track = create_remote_track("  My Song ", "https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(track.id(), "dQw4w9WgXcQ");
        assert_eq!(track.title, "My Song");
        assert_eq!(track.subtitle, "YouTube video");
        assert!(track.added_at > 0);
    }
}
