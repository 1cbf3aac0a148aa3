//! Utility modules for error handling, configuration and storage

pub mod config;
pub mod error;
pub mod storage;

// Re-export for convenience
pub use config::AppSettings;
pub use error::TubeloaderError;
pub use storage::{create_download_dir, default_download_dir, generate_file_name};
