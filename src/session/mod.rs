pub mod state;

pub use state::{DownloadSession, DownloadState, QualityChoice, NO_FORMATS_MESSAGE};
