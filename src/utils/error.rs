//! Error handling for Tubeloader

use thiserror::Error;

/// Main error type for Tubeloader
#[derive(Debug, Error)]
pub enum TubeloaderError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    YtDlpNotFound,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to extract video info: {0}")]
    ExtractionError(String),

    #[error("No video information found")]
    NoMetadata,

    #[error("Download failed: {0}")]
    DownloadError(String),

    #[error("Download timed out after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
