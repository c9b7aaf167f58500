use chrono::{SecondsFormat, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    // Segment runs up to the first '&', newline, '?' or '#'.
    static ref YOUTUBE_URL_REGEX: Regex = Regex::new(
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)([^&\n?#]+)"
    )
    .expect("YouTube URL pattern is valid");
    static ref VIDEO_ID_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("video id pattern is valid");
}

/// Resolve a YouTube URL or bare video id to the canonical 11-character id.
///
/// URL shapes are tried first (`watch?v=`, `youtu.be/`, `embed/`, `v/`), then a
/// bare id. `None` means the input is not something we recognize.
pub fn extract_youtube_video_id(input: &str) -> Option<String> {
    if let Some(captures) = YOUTUBE_URL_REGEX.captures(input) {
        let segment = captures.get(1).map(|m| m.as_str())?;
        if VIDEO_ID_REGEX.is_match(segment) {
            return Some(segment.to_string());
        }
        return None;
    }

    if VIDEO_ID_REGEX.is_match(input) {
        return Some(input.to_string());
    }
    None
}

/// Lenient counter parse. YouTube sends counts as decimal strings; anything
/// missing, negative or non-numeric becomes 0.
pub fn parse_count(value: &Value) -> u64 {
    match value {
        Value::String(s) => s.trim().parse::<u64>().unwrap_or(0),
        Value::Number(n) => n.as_u64().unwrap_or(0),
        _ => 0,
    }
}

/// Current time as RFC 3339 UTC with millisecond precision.
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
