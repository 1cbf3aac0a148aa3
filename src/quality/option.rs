//! Selectable quality options and their display text

use serde::{Deserialize, Serialize};

/// Format id passed to yt-dlp for the synthetic audio option
pub const BEST_AUDIO_FORMAT_ID: &str = "bestaudio";

/// Separator used by [`QualityOption::description`]
pub const DESCRIPTION_SEPARATOR: &str = " • ";

/// One selectable encoding of a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityOption {
    pub format_id: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
    pub fps: Option<u32>,
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
    pub extension: String,
    pub file_size_bytes: Option<u64>,
    pub format_note: Option<String>,
    pub is_audio_only: bool,
}

impl QualityOption {
    /// The "best audio, converted to mp3" entry every list starts with
    pub fn best_audio() -> Self {
        Self {
            format_id: BEST_AUDIO_FORMAT_ID.to_string(),
            height: None,
            width: None,
            fps: None,
            video_codec: None,
            audio_codec: Some("mp3".to_string()),
            extension: "mp3".to_string(),
            file_size_bytes: None,
            format_note: None,
            is_audio_only: true,
        }
    }

    /// Short label, e.g. `1080p` or `Audio Only (MP3)`
    pub fn display_name(&self) -> String {
        if self.is_audio_only {
            format!("Audio Only ({})", self.extension.to_uppercase())
        } else if let Some(height) = self.height {
            format!("{}p", height)
        } else if let Some(width) = self.width {
            let height = self
                .height
                .map(|h| h.to_string())
                .unwrap_or_else(|| "?".to_string());
            format!("{}x{}", width, height)
        } else {
            self.format_note
                .clone()
                .unwrap_or_else(|| self.format_id.clone())
        }
    }

    /// Detail line listing only the fields that are present
    pub fn description(&self) -> String {
        let mut parts = Vec::new();

        if let Some(height) = self.height {
            parts.push(format!("{}p", height));
        }
        if let Some(fps) = self.fps {
            parts.push(format!("{}fps", fps));
        }
        if let Some(codec) = &self.video_codec {
            parts.push(format!("Video: {}", codec));
        }
        if let Some(codec) = &self.audio_codec {
            parts.push(format!("Audio: {}", codec));
        }
        if let Some(size) = self.file_size_bytes {
            parts.push(format!("Size: {}", format_file_size(size)));
        }

        parts.join(DESCRIPTION_SEPARATOR)
    }
}

/// Human-readable size in KB, MB or GB (1024-based, one decimal)
pub fn format_file_size(bytes: u64) -> String {
    let kb = bytes as f64 / 1024.0;
    let mb = kb / 1024.0;
    let gb = mb / 1024.0;

    if gb >= 1.0 {
        format!("{:.1} GB", gb)
    } else if mb >= 1.0 {
        format!("{:.1} MB", mb)
    } else {
        format!("{:.1} KB", kb)
    }
}
