//! Front-end state for one fetch-then-download session
//!
//! A front-end owns a [`DownloadSession`], feeds it user input and the
//! results of extractor calls, and renders from its fields. Every method is
//! synchronous; the session never performs I/O itself.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::downloader::{DownloadEvent, DownloadRequest};
use crate::quality::{has_video_options, QualityOption};
use crate::validator;

pub const INVALID_URL_MESSAGE: &str = "Please enter a valid YouTube URL";
pub const NO_SELECTION_MESSAGE: &str = "Please select a quality";
pub const NO_FORMATS_MESSAGE: &str = "No formats available";

/// How a front-end asks for a quality without picking from the list itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityChoice<'a> {
    /// The synthetic audio entry, always available after a successful fetch
    BestAudio,
    /// A specific entry by format id
    FormatId(&'a str),
    /// The first video entry, i.e. the tallest one
    TallestVideo,
}

/// Lifecycle of a session
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DownloadState {
    #[default]
    Idle,
    FetchingInfo,
    InfoFetched(Vec<QualityOption>),
    Downloading {
        progress: u8,
        speed: Option<String>,
        eta: Option<String>,
    },
    Completed(PathBuf),
    Error(String),
}

/// Everything a download screen needs to render
#[derive(Debug, Clone, Default)]
pub struct DownloadSession {
    pub url: String,
    pub is_valid_url: bool,
    pub is_loading: bool,
    pub is_downloading: bool,
    pub available_qualities: Vec<QualityOption>,
    pub selected_quality: Option<QualityOption>,
    /// 0-100
    pub download_progress: u8,
    pub download_speed: Option<String>,
    pub estimated_time: Option<String>,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub state: DownloadState,
}

impl DownloadSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record new URL input and re-validate it
    pub fn update_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
        self.is_valid_url = validator::is_valid(&self.url);
    }

    /// Start a metadata fetch.
    ///
    /// Returns the normalized URL to fetch, or `None` (with an error message
    /// set) when the current URL is not valid.
    pub fn begin_fetch(&mut self) -> Option<String> {
        if !validator::is_valid(&self.url) {
            self.error_message = Some(INVALID_URL_MESSAGE.to_string());
            return None;
        }

        self.is_loading = true;
        self.error_message = None;
        self.state = DownloadState::FetchingInfo;
        Some(validator::normalize(&self.url))
    }

    /// Apply the outcome of a metadata fetch
    pub fn finish_fetch(&mut self, result: anyhow::Result<Vec<QualityOption>>) {
        self.is_loading = false;
        match result {
            Ok(qualities) => {
                debug!("Fetched {} quality options", qualities.len());
                self.available_qualities = qualities.clone();
                self.selected_quality = None;
                self.error_message = None;
                self.state = DownloadState::InfoFetched(qualities);
            }
            Err(e) => {
                let message = format!("Error fetching video info: {}", e);
                self.error_message = Some(message.clone());
                self.state = DownloadState::Error(message);
            }
        }
    }

    /// False when only the synthetic audio entry (or nothing) was fetched
    pub fn has_downloadable_formats(&self) -> bool {
        has_video_options(&self.available_qualities)
    }

    pub fn select_quality(&mut self, quality: QualityOption) {
        self.selected_quality = Some(quality);
    }

    /// Pick an option by its format id from the fetched list
    pub fn select_format_id(&mut self, format_id: &str) -> bool {
        match self
            .available_qualities
            .iter()
            .find(|q| q.format_id == format_id)
        {
            Some(quality) => {
                self.selected_quality = Some(quality.clone());
                true
            }
            None => false,
        }
    }

    /// Resolve `choice` against the fetched list and select it.
    ///
    /// Only [`QualityChoice::TallestVideo`] needs a video entry; audio stays
    /// selectable when the fetch produced nothing else. On failure the error
    /// message is set and the previous selection is kept.
    pub fn choose_quality(&mut self, choice: QualityChoice<'_>) -> bool {
        let found = match choice {
            QualityChoice::BestAudio => self
                .available_qualities
                .iter()
                .find(|q| q.is_audio_only)
                .cloned(),
            QualityChoice::FormatId(format_id) => self
                .available_qualities
                .iter()
                .find(|q| q.format_id == format_id)
                .cloned(),
            QualityChoice::TallestVideo => self
                .available_qualities
                .iter()
                .find(|q| !q.is_audio_only)
                .cloned(),
        };

        match found {
            Some(quality) => {
                debug!("Selected quality {}", quality.format_id);
                self.selected_quality = Some(quality);
                true
            }
            None => {
                self.error_message = Some(match choice {
                    QualityChoice::FormatId(format_id) => {
                        format!("Unknown format id: {} (use --list)", format_id)
                    }
                    QualityChoice::BestAudio | QualityChoice::TallestVideo => {
                        NO_FORMATS_MESSAGE.to_string()
                    }
                });
                false
            }
        }
    }

    /// Start downloading the selected quality.
    ///
    /// Returns the request to hand to an extractor, or `None` with an error
    /// message set when the URL is invalid or nothing is selected.
    pub fn begin_download(
        &mut self,
        output_dir: &Path,
        audio_format: &str,
    ) -> Option<DownloadRequest> {
        if !validator::is_valid(&self.url) {
            self.error_message = Some(INVALID_URL_MESSAGE.to_string());
            return None;
        }
        let Some(quality) = self.selected_quality.as_ref() else {
            self.error_message = Some(NO_SELECTION_MESSAGE.to_string());
            return None;
        };

        let request = DownloadRequest::for_option(&self.url, quality, output_dir, audio_format);

        self.is_downloading = true;
        self.download_progress = 0;
        self.download_speed = None;
        self.estimated_time = None;
        self.error_message = None;
        self.success_message = None;
        self.state = DownloadState::Downloading {
            progress: 0,
            speed: None,
            eta: None,
        };
        Some(request)
    }

    /// Mirror one event from the running download
    pub fn apply_event(&mut self, event: &DownloadEvent) {
        match event {
            DownloadEvent::Progress {
                percent,
                speed,
                eta,
            } => {
                // Floor, so 100 only shows once yt-dlp reports it
                let progress = (*percent).clamp(0.0, 100.0).floor() as u8;
                self.is_downloading = true;
                self.download_progress = progress;
                self.download_speed = speed.clone();
                self.estimated_time = eta.clone();
                self.state = DownloadState::Downloading {
                    progress,
                    speed: speed.clone(),
                    eta: eta.clone(),
                };
            }
            DownloadEvent::Completed { path } => {
                self.is_downloading = false;
                self.download_progress = 100;
                self.success_message = Some(format!("Download completed: {}", path.display()));
                self.state = DownloadState::Completed(path.clone());
            }
            DownloadEvent::Failed { message } => {
                self.is_downloading = false;
                self.error_message = Some(message.clone());
                self.state = DownloadState::Error(message.clone());
            }
        }
    }

    /// Reset to a fresh session
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
        self.success_message = None;
    }
}
