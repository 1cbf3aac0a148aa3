//! yt-dlp wrapper for metadata extraction and downloads
//!
//! All network work happens inside the yt-dlp child process. This module
//! only builds its command lines, reads its output and maps failures onto
//! [`TubeloaderError`].

use crate::downloader::progress::is_error_line;
use crate::downloader::{parse_progress_line, DownloadEvent, DownloadRequest};
use crate::extractor::models::VideoInfo;
use crate::extractor::traits::Extractor;
use crate::utils::config::AppSettings;
use crate::utils::error::TubeloaderError;
use crate::validator;
use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as AsyncCommand;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

/// Extractor backed by the yt-dlp binary
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    ytdlp_path: PathBuf,
    download_timeout: Duration,
    no_playlist: bool,
}

impl YtDlpExtractor {
    /// Initialize extractor and verify yt-dlp availability
    pub fn new() -> Result<Self> {
        Self::from_settings(&AppSettings::default())
    }

    /// Use the configured binary if set, otherwise search for one
    pub fn from_settings(settings: &AppSettings) -> Result<Self> {
        let ytdlp_path = match find_ytdlp(settings.ytdlp_path.as_deref()) {
            Some(path) => {
                info!("Found yt-dlp at: {}", path.display());
                path
            }
            None => {
                error!("yt-dlp not found anywhere!");
                return Err(TubeloaderError::YtDlpNotFound.into());
            }
        };

        Ok(Self {
            ytdlp_path,
            download_timeout: Duration::from_secs(settings.download_timeout_secs),
            no_playlist: settings.no_playlist,
        })
    }

    /// Use a specific binary without searching
    pub fn with_path(ytdlp_path: impl Into<PathBuf>) -> Self {
        let defaults = AppSettings::default();
        Self {
            ytdlp_path: ytdlp_path.into(),
            download_timeout: Duration::from_secs(defaults.download_timeout_secs),
            no_playlist: defaults.no_playlist,
        }
    }

    pub fn with_timeout(mut self, download_timeout: Duration) -> Self {
        self.download_timeout = download_timeout;
        self
    }

    /// Get the path to yt-dlp being used
    pub fn ytdlp_path(&self) -> &Path {
        &self.ytdlp_path
    }

    /// Arguments for a metadata-only run
    pub fn metadata_args(&self, url: &str) -> Vec<String> {
        let mut args = vec!["--dump-json".to_string(), "--no-warnings".to_string()];
        if self.no_playlist {
            args.push("--no-playlist".to_string());
        }
        args.push(url.to_string());
        args
    }
}

/// Reject anything that is not a recognized video URL before spawning
fn checked_url(url: &str) -> Result<String> {
    if !validator::is_valid(url) {
        warn!("Rejecting unsupported URL: {}", url);
        return Err(TubeloaderError::InvalidUrl(url.trim().to_string()).into());
    }
    Ok(validator::normalize(url))
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    fn id(&self) -> &'static str {
        "yt-dlp"
    }

    /// Uses: yt-dlp --dump-json --no-playlist
    async fn extract_info(&self, url: &str) -> Result<VideoInfo> {
        let url = checked_url(url)?;
        debug!("Extracting video info for URL: {}", url);

        let output = AsyncCommand::new(&self.ytdlp_path)
            .args(self.metadata_args(&url))
            .output()
            .await?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            error!("yt-dlp extraction failed: {}", error_msg);
            return Err(TubeloaderError::ExtractionError(error_msg.trim().to_string()).into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        VideoInfo::from_json(&stdout)
    }

    async fn download(
        &self,
        request: &DownloadRequest,
        events: mpsc::Sender<DownloadEvent>,
    ) -> Result<PathBuf> {
        let mut request = request.clone();
        request.url = checked_url(&request.url)?;
        request.no_playlist = self.no_playlist;

        let args = request.ytdlp_args();
        debug!("Spawning yt-dlp with args: {:?}", args);

        let mut child = AsyncCommand::new(&self.ytdlp_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        // stdout carries progress (unless quiet) and the printed final path
        let stdout_reader = child.stdout.take().map(|stdout| {
            let tx = events.clone();
            tokio::spawn(async move {
                let mut lines = BufReader::new(stdout).lines();
                let mut last_path = None;
                while let Ok(Some(line)) = lines.next_line().await {
                    if let Some(event) = parse_progress_line(&line) {
                        let _ = tx.send(event).await;
                    } else {
                        let trimmed = line.trim();
                        if !trimmed.is_empty() && !trimmed.starts_with('[') {
                            last_path = Some(PathBuf::from(trimmed));
                        }
                    }
                }
                last_path
            })
        });

        // stderr carries progress in quiet mode and the error diagnostics
        let stderr_reader = child.stderr.take().map(|stderr| {
            let tx = events.clone();
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                let mut last_error = None;
                while let Ok(Some(line)) = lines.next_line().await {
                    if let Some(event) = parse_progress_line(&line) {
                        let _ = tx.send(event).await;
                    } else if is_error_line(&line) {
                        warn!("yt-dlp: {}", line);
                        last_error = Some(line);
                    }
                }
                last_error
            })
        });

        let wait_result = timeout(self.download_timeout, child.wait()).await;
        let status = match wait_result {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                let message = format!("Failed to wait for yt-dlp process: {}", e);
                let _ = events.send(DownloadEvent::Failed { message: message.clone() }).await;
                return Err(TubeloaderError::DownloadError(message).into());
            }
            Err(_) => {
                let _ = child.kill().await;
                let secs = timeout_secs(self.download_timeout);
                error!("yt-dlp timed out after {}s", secs);
                let message = TubeloaderError::Timeout(secs).to_string();
                let _ = events.send(DownloadEvent::Failed { message }).await;
                return Err(TubeloaderError::Timeout(secs).into());
            }
        };

        // Drain readers so every progress event precedes the terminal one
        let last_path = match stdout_reader {
            Some(handle) => handle.await.unwrap_or_default(),
            None => None,
        };
        let last_error = match stderr_reader {
            Some(handle) => handle.await.unwrap_or_default(),
            None => None,
        };

        if !status.success() {
            let detail = last_error.unwrap_or_else(|| format!("yt-dlp exited with {}", status));
            error!("Download failed: {}", detail);
            let err = TubeloaderError::DownloadError(detail);
            let _ = events
                .send(DownloadEvent::Failed {
                    message: err.to_string(),
                })
                .await;
            return Err(err.into());
        }

        let path = last_path.unwrap_or_else(|| {
            warn!("yt-dlp did not print an output path, reporting the download directory");
            request.output_dir.clone()
        });
        info!("Download completed: {}", path.display());
        let _ = events.send(DownloadEvent::Completed { path: path.clone() }).await;

        Ok(path)
    }
}

// ============================================================
// yt-dlp Detection Functions
// ============================================================

/// Find yt-dlp binary with priority:
/// 1. Explicitly configured path
/// 2. System PATH
/// 3. Common installation paths
pub fn find_ytdlp(configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = configured {
        if path.exists() && is_executable(path) {
            info!("✓ Using configured yt-dlp: {:?}", path);
            return Some(path.to_path_buf());
        }
        warn!("Configured yt-dlp {:?} is missing or not executable", path);
    }

    if let Ok(system) = which::which("yt-dlp") {
        info!("✓ Using system yt-dlp: {:?}", system);
        return Some(system);
    }

    if let Some(common) = find_in_common_paths() {
        info!("✓ Using yt-dlp from common path: {:?}", common);
        return Some(common);
    }

    warn!("✗ yt-dlp not found anywhere!");
    None
}

/// Find yt-dlp in common installation paths
fn find_in_common_paths() -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = [
        // macOS Homebrew (Apple Silicon)
        "/opt/homebrew/bin/yt-dlp",
        // macOS Homebrew (Intel) / manual installs
        "/usr/local/bin/yt-dlp",
        // Distribution packages
        "/usr/bin/yt-dlp",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();

    // pip --user installs
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".local").join("bin").join("yt-dlp"));
    }

    candidates
        .into_iter()
        .find(|path| path.exists() && is_executable(path))
}

/// Check if a file is executable
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, just check if file exists
#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Whole seconds for reporting, rounded up so sub-second limits never read as 0
fn timeout_secs(limit: Duration) -> u64 {
    limit.as_secs() + u64::from(limit.subsec_nanos() > 0)
}

// ============================================================
// Tests
// ============================================================
