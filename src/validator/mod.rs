//! YouTube URL recognition and normalization
//!
//! Five URL shapes are accepted, each carrying an 11-character video
//! identifier. Matching is a substring search over the trimmed input, so
//! trailing query parameters or surrounding text do not prevent a match.

use lazy_static::lazy_static;
use regex::Regex;

/// Canonical watch URL prefix produced by [`normalize`].
pub const CANONICAL_WATCH_PREFIX: &str = "https://www.youtube.com/watch?v=";

lazy_static! {
    /// Accepted shapes, in the order identifiers are extracted.
    ///
    /// The trailing group requires the identifier to end at the 11th
    /// character, so shorter and longer runs are both rejected.
    static ref YOUTUBE_PATTERNS: Vec<Regex> = [
        r"(?:https?://)?(?:www\.)?youtube\.com/watch\?v=([a-zA-Z0-9_-]{11})(?:[^a-zA-Z0-9_-]|$)",
        r"(?:https?://)?(?:www\.)?youtu\.be/([a-zA-Z0-9_-]{11})(?:[^a-zA-Z0-9_-]|$)",
        r"(?:https?://)?(?:www\.)?youtube\.com/embed/([a-zA-Z0-9_-]{11})(?:[^a-zA-Z0-9_-]|$)",
        r"(?:https?://)?(?:www\.)?youtube\.com/v/([a-zA-Z0-9_-]{11})(?:[^a-zA-Z0-9_-]|$)",
        r"(?:https?://)?(?:www\.)?youtube\.com/shorts/([a-zA-Z0-9_-]{11})(?:[^a-zA-Z0-9_-]|$)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("invalid YouTube URL pattern"))
    .collect();
}

/// Outcome of validating a candidate URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatch {
    pub is_valid: bool,
    pub video_id: Option<String>,
}

impl UrlMatch {
    fn invalid() -> Self {
        Self {
            is_valid: false,
            video_id: None,
        }
    }
}

/// Returns true if the candidate contains a supported YouTube video URL
pub fn is_valid(candidate: &str) -> bool {
    extract_id(candidate).is_some()
}

/// Extracts the 11-character video identifier from the first matching shape
pub fn extract_id(candidate: &str) -> Option<String> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return None;
    }

    YOUTUBE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// Rewrites a recognized URL to `https://www.youtube.com/watch?v=<id>`.
///
/// Unrecognized input is returned unchanged.
pub fn normalize(candidate: &str) -> String {
    match extract_id(candidate) {
        Some(id) => format!("{}{}", CANONICAL_WATCH_PREFIX, id),
        None => candidate.to_string(),
    }
}

/// Validates and extracts in one pass
pub fn validate(candidate: &str) -> UrlMatch {
    match extract_id(candidate) {
        Some(id) => UrlMatch {
            is_valid: true,
            video_id: Some(id),
        },
        None => UrlMatch::invalid(),
    }
}
