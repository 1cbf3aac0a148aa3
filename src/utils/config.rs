//! Application configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::utils::storage::default_download_dir;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Directory downloads are written to
    pub download_location: PathBuf,

    /// Explicit yt-dlp binary; searched for when unset
    pub ytdlp_path: Option<PathBuf>,

    /// Target format for audio-only extraction
    pub audio_format: String,

    /// Upper bound for a single download (seconds)
    pub download_timeout_secs: u64,

    /// Pass `--no-playlist` so playlist URLs resolve to the single video
    pub no_playlist: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            download_location: default_download_dir(),
            ytdlp_path: None,
            audio_format: "mp3".to_string(),
            download_timeout_secs: 1800, // 30 minutes
            no_playlist: true,
        }
    }
}

impl AppSettings {
    /// Default settings file: `<config dir>/tubeloader/settings.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tubeloader")
            .join("settings.json")
    }

    /// Load settings from a JSON file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        let settings: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings in {:?}", path))?;

        Ok(settings.validate())
    }

    /// Persist settings as pretty-printed JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings to {:?}", path))?;
        Ok(())
    }

    /// Enforce sane minimums
    pub fn validate(mut self) -> Self {
        if self.download_timeout_secs == 0 {
            warn!("download_timeout_secs was 0, using 1");
            self.download_timeout_secs = 1;
        }
        if self.audio_format.trim().is_empty() {
            warn!("audio_format was empty, using mp3");
            self.audio_format = "mp3".to_string();
        }
        self
    }
}
