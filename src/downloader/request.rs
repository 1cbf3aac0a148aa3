//! Request descriptor handed to yt-dlp for one download

use std::path::PathBuf;

use crate::quality::{QualityOption, BEST_AUDIO_FORMAT_ID};
use crate::utils::storage::output_template;
use crate::validator;

/// Everything yt-dlp needs to fetch one chosen format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Canonical watch URL
    pub url: String,
    pub format_id: String,
    pub audio_only: bool,
    pub output_dir: PathBuf,
    /// Conversion target when `audio_only` is set
    pub audio_format: String,
    pub no_playlist: bool,
}

impl DownloadRequest {
    /// Build a request for a selected option; the URL is normalized
    pub fn for_option(
        url: &str,
        option: &QualityOption,
        output_dir: impl Into<PathBuf>,
        audio_format: &str,
    ) -> Self {
        Self {
            url: validator::normalize(url),
            format_id: option.format_id.clone(),
            audio_only: option.is_audio_only,
            output_dir: output_dir.into(),
            audio_format: audio_format.to_string(),
            no_playlist: true,
        }
    }

    /// Command-line arguments for `yt-dlp`, URL last
    pub fn ytdlp_args(&self) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            output_template(&self.output_dir),
        ];

        if self.audio_only {
            args.extend([
                "-f".to_string(),
                BEST_AUDIO_FORMAT_ID.to_string(),
                "--extract-audio".to_string(),
                "--audio-format".to_string(),
                self.audio_format.clone(),
            ]);
        } else {
            args.extend(["-f".to_string(), self.format_id.clone()]);
        }

        args.extend([
            "--newline".to_string(),  // one progress line per update (non-TTY)
            "--progress".to_string(), // keep progress even though --print implies --quiet
            "--no-warnings".to_string(),
            "--print".to_string(),
            "after_move:filepath".to_string(),
        ]);

        if self.no_playlist {
            args.push("--no-playlist".to_string());
        }

        args.push(self.url.clone());
        args
    }
}
