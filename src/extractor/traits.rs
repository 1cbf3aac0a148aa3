use crate::downloader::{DownloadEvent, DownloadRequest};
use crate::extractor::models::VideoInfo;
use crate::quality::QualityOption;
use crate::validator;
use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Boundary to the external tool that fetches metadata and downloads
///
/// This trait isolates the application from the specific extraction method
/// so front-ends and tests can swap the backend.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Returns a unique identifier for this extractor (e.g., "yt-dlp")
    fn id(&self) -> &'static str;

    /// Checks if this extractor can handle the given URL
    fn supports(&self, url: &str) -> bool {
        validator::is_valid(url)
    }

    /// Extracts video information
    async fn extract_info(&self, url: &str) -> Result<VideoInfo>;

    /// Ranked quality options (calls extract_info internally)
    async fn fetch_qualities(&self, url: &str) -> Result<Vec<QualityOption>> {
        let info = self.extract_info(url).await?;
        Ok(info.qualities())
    }

    /// Runs a download, sending progress and exactly one terminal event.
    ///
    /// Returns the path of the written file.
    async fn download(
        &self,
        request: &DownloadRequest,
        events: mpsc::Sender<DownloadEvent>,
    ) -> Result<PathBuf>;
}
