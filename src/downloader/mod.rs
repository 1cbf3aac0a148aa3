//! Download requests and progress events

pub mod progress;
pub mod request;

// Re-export for convenience
pub use progress::{parse_progress_line, DownloadEvent};
pub use request::DownloadRequest;
