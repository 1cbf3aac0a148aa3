//! Quality option ranking

pub mod option;
pub mod raw;
pub mod selector;

pub use option::{format_file_size, QualityOption, BEST_AUDIO_FORMAT_ID};
pub use raw::RawFormat;
pub use selector::{has_video_options, select, select_records};
