//! Data structures for video information

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::quality::{select, QualityOption};
use crate::utils::error::TubeloaderError;

/// Video information as printed by `yt-dlp --dump-json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub webpage_url: String,
    #[serde(default)]
    pub duration: Option<f64>,
    pub uploader: Option<String>,
    pub thumbnail: Option<String>,
    pub extractor: Option<String>,
    /// Kept untyped so one malformed entry cannot fail the whole parse
    #[serde(default)]
    pub formats: Vec<Value>,
}

impl VideoInfo {
    /// Parse the tool's stdout; blank output means no metadata was found
    pub fn from_json(output: &str) -> Result<Self> {
        let trimmed = output.trim();
        if trimmed.is_empty() {
            return Err(TubeloaderError::NoMetadata.into());
        }

        let info: Self = serde_json::from_str(trimmed).map_err(TubeloaderError::from)?;
        Ok(info)
    }

    /// Ranked quality options for this video
    pub fn qualities(&self) -> Vec<QualityOption> {
        select(&self.formats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": "dQw4w9WgXcQ",
        "title": "Never Gonna Give You Up",
        "webpage_url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "url": "https://rr1---sn.googlevideo.com/videoplayback",
        "duration": 212,
        "uploader": "Rick Astley",
        "formats": [
            {"format_id": "140", "ext": "m4a", "vcodec": "none", "acodec": "mp4a.40.2"},
            {"format_id": "18", "ext": "mp4", "height": 360, "vcodec": "avc1.42001E", "acodec": "mp4a.40.2"},
            {"format_id": "137", "ext": "mp4", "height": 1080, "fps": 25, "vcodec": "avc1.640028", "acodec": "none"},
            {"format_id": "bad", "height": [1, 2], "vcodec": "avc1"}
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let info = VideoInfo::from_json(SAMPLE).unwrap();
        assert_eq!(info.id, "dQw4w9WgXcQ");
        assert_eq!(info.title, "Never Gonna Give You Up");
        assert_eq!(info.duration, Some(212.0));
        assert_eq!(info.formats.len(), 4);
    }

    #[test]
    fn test_qualities() {
        let info = VideoInfo::from_json(SAMPLE).unwrap();
        let names: Vec<String> = info.qualities().iter().map(|q| q.display_name()).collect();
        assert_eq!(names, vec!["Audio Only (MP3)", "1080p", "360p"]);
    }

    #[test]
    fn test_blank_output_is_no_metadata() {
        let err = VideoInfo::from_json("  \n").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TubeloaderError>(),
            Some(TubeloaderError::NoMetadata)
        ));
    }

    #[test]
    fn test_garbage_output_is_error() {
        let err = VideoInfo::from_json("WARNING: something").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TubeloaderError>(),
            Some(TubeloaderError::SerializationError(_))
        ));
    }

    #[test]
    fn test_missing_formats_defaults_to_empty() {
        let info = VideoInfo::from_json(r#"{"id": "x", "title": "t"}"#).unwrap();
        assert!(info.formats.is_empty());
        assert_eq!(info.qualities().len(), 1);
    }
}
