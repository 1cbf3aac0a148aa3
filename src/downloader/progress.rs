//! Download events parsed from yt-dlp output

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One event of a running download, in the order yt-dlp reports them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DownloadEvent {
    /// Periodic progress; `speed` and `eta` are yt-dlp's own strings
    Progress {
        percent: f32,
        speed: Option<String>,
        eta: Option<String>,
    },
    /// Terminal: the file was written
    Completed { path: PathBuf },
    /// Terminal: yt-dlp gave up
    Failed { message: String },
}

impl DownloadEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DownloadEvent::Completed { .. } | DownloadEvent::Failed { .. }
        )
    }
}

/// Parse a yt-dlp progress line.
///
/// Expected format: `[download]  42.5% of ~ 150.00MiB at  5.20MiB/s ETA 00:15`.
/// The final line (`[download] 100% of 10.00MiB in 00:03`) yields a
/// progress event without speed or ETA. Anything else returns `None`.
pub fn parse_progress_line(line: &str) -> Option<DownloadEvent> {
    let rest = line.trim().strip_prefix("[download]")?;
    let pct_pos = rest.find('%')?;
    let percent = rest[..pct_pos].trim().parse::<f32>().ok()?;
    let tail = &rest[pct_pos + 1..];

    let speed = tail
        .find(" at ")
        .map(|idx| {
            let after = &tail[idx + 4..];
            let end = after.find(" ETA").unwrap_or(after.len());
            after[..end].trim()
        })
        .and_then(known);

    let eta = tail
        .find("ETA ")
        .and_then(|idx| tail[idx + 4..].split_whitespace().next())
        .and_then(known);

    Some(DownloadEvent::Progress {
        percent: percent.clamp(0.0, 100.0),
        speed,
        eta,
    })
}

/// yt-dlp prints `Unknown`/`Unknown speed` before it has an estimate
fn known(value: &str) -> Option<String> {
    if value.is_empty() || value.starts_with("Unknown") {
        None
    } else {
        Some(value.to_string())
    }
}

/// Lines yt-dlp prints on stderr when something went wrong
pub fn is_error_line(line: &str) -> bool {
    line.contains("ERROR:") || line.contains("error:")
}
