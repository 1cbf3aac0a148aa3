//! Turns yt-dlp's raw format list into a ranked list of quality options

use std::cmp::Reverse;
use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::option::QualityOption;
use super::raw::{positive_u32, positive_u64, present_codec, RawFormat};

/// Build the option list for one metadata fetch.
///
/// The result always starts with [`QualityOption::best_audio`], followed by
/// video formats deduplicated on `(height, extension)` (first occurrence
/// wins) and ordered by height, tallest first. Entries that are not JSON
/// objects or carry no video stream are skipped; a field of an unexpected
/// type only loses that field.
pub fn select(raw_formats: &[Value]) -> Vec<QualityOption> {
    let records = raw_formats
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            if !raw.is_object() {
                debug!("Skipping format record #{}: not a JSON object", index);
                return None;
            }
            match RawFormat::deserialize(raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!("Skipping malformed format record #{}: {}", index, e);
                    None
                }
            }
        });

    select_records(records)
}

/// Same as [`select`] for records that are already typed
pub fn select_records<I>(records: I) -> Vec<QualityOption>
where
    I: IntoIterator<Item = RawFormat>,
{
    let mut seen: HashSet<(Option<u32>, String)> = HashSet::new();
    let mut videos: Vec<QualityOption> = records
        .into_iter()
        .filter_map(|record| video_option(&record))
        .filter(|option| seen.insert((option.height, option.extension.clone())))
        .collect();

    // Stable, so equal heights keep input order
    videos.sort_by_key(|option| Reverse(option.height.unwrap_or(0)));

    let mut options = Vec::with_capacity(videos.len() + 1);
    options.push(QualityOption::best_audio());
    options.extend(videos);
    options
}

/// Converts a record carrying a video stream; `None` for audio-only entries
pub fn video_option(record: &RawFormat) -> Option<QualityOption> {
    let video_codec = present_codec(record.vcodec.as_deref())?;

    Some(QualityOption {
        format_id: record.format_id.clone().unwrap_or_default(),
        height: positive_u32(record.height),
        width: positive_u32(record.width),
        fps: positive_u32(record.fps),
        video_codec: Some(video_codec),
        audio_codec: present_codec(record.acodec.as_deref()),
        extension: record.ext.clone().unwrap_or_else(|| "mp4".to_string()),
        file_size_bytes: positive_u64(record.filesize),
        format_note: record.format_note.clone().filter(|note| !note.is_empty()),
        is_audio_only: false,
    })
}

/// True when the list holds something besides the synthetic audio entry
pub fn has_video_options(options: &[QualityOption]) -> bool {
    options.iter().any(|option| !option.is_audio_only)
}
