//! Download directory resolution and file naming
//!
//! Paths are always resolved from the platform's standard Downloads
//! directory, never from the current working directory, which is `/` when
//! the binary is launched from a desktop launcher.

use anyhow::{Context, Result};
use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Folder created inside the user's Downloads directory
pub const DOWNLOAD_FOLDER_NAME: &str = "YouTubeDownloads";

lazy_static! {
    static ref UNSAFE_CHARS: Regex = Regex::new(r"[^a-zA-Z0-9._-]").expect("invalid pattern");
    static ref UNDERSCORE_RUNS: Regex = Regex::new(r"_{2,}").expect("invalid pattern");
}

/// Get the default download directory.
///
/// Returns: `$HOME/Downloads/YouTubeDownloads` on most platforms.
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| {
            warn!("Could not determine Downloads directory, using ./downloads");
            PathBuf::from("downloads")
        })
        .join(DOWNLOAD_FOLDER_NAME)
}

/// Create the download directory if it does not exist yet
pub fn create_download_dir(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        debug!("Creating download directory {:?}", dir);
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create download directory {:?}", dir))?;
    }
    Ok(dir.to_path_buf())
}

/// yt-dlp output template placing `<title>.<ext>` inside `dir`
pub fn output_template(dir: &Path) -> String {
    dir.join("%(title)s.%(ext)s").to_string_lossy().to_string()
}

/// Filesystem-safe, timestamped file name for a downloaded title
///
/// ```
/// let name = tubeloader::utils::storage::generate_file_name("My Video!", "mp4");
/// assert!(name.starts_with("My_Video_"));
/// assert!(name.ends_with(".mp4"));
/// ```
pub fn generate_file_name(title: &str, extension: &str) -> String {
    let clean_title = sanitize_title(title);
    let timestamp = Utc::now().timestamp_millis();
    format!("{}_{}.{}", clean_title, timestamp, extension)
}

/// Replace unsafe characters with `_`, collapse runs, trim the edges
pub fn sanitize_title(title: &str) -> String {
    let replaced = UNSAFE_CHARS.replace_all(title, "_");
    let collapsed = UNDERSCORE_RUNS.replace_all(&replaced, "_");
    collapsed.trim_matches('_').to_string()
}
