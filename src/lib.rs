//! Tubeloader library
//!
//! URL validation and quality ranking for a yt-dlp front-end, plus the glue
//! that drives yt-dlp and mirrors its progress for a user interface.

pub mod downloader;
pub mod extractor;
pub mod quality;
pub mod session;
pub mod utils;
pub mod validator;

// Re-export main types for easier use
pub use downloader::{DownloadEvent, DownloadRequest};
pub use extractor::{Extractor, VideoInfo, YtDlpExtractor};
pub use quality::{select, QualityOption};
pub use session::{DownloadSession, DownloadState, QualityChoice};
pub use utils::{AppSettings, TubeloaderError};
pub use validator::UrlMatch;
