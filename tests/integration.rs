//! Integration-style tests covering the validate → fetch → select → download
//! flow without hitting the network or requiring yt-dlp.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tubeloader::extractor::{Extractor, VideoInfo};
use tubeloader::quality::{select, QualityOption};
use tubeloader::session::{DownloadSession, DownloadState, QualityChoice};
use tubeloader::{validator, DownloadEvent, DownloadRequest};

/// Extractor that replays canned metadata and progress
struct ScriptedExtractor {
    info: VideoInfo,
    events: Vec<DownloadEvent>,
}

#[async_trait]
impl Extractor for ScriptedExtractor {
    fn id(&self) -> &'static str {
        "scripted"
    }

    async fn extract_info(&self, url: &str) -> Result<VideoInfo> {
        assert!(self.supports(url));
        Ok(self.info.clone())
    }

    async fn download(
        &self,
        request: &DownloadRequest,
        events: mpsc::Sender<DownloadEvent>,
    ) -> Result<PathBuf> {
        let mut path = request.output_dir.join("video.mp4");
        for event in &self.events {
            if let DownloadEvent::Completed { path: p } = event {
                path = p.clone();
            }
            events.send(event.clone()).await?;
        }
        Ok(path)
    }
}

fn sample_info() -> VideoInfo {
    VideoInfo {
        id: "dQw4w9WgXcQ".to_string(),
        title: "Sample Video".to_string(),
        webpage_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
        formats: vec![
            json!({"format_id": "140", "ext": "m4a", "vcodec": "none", "acodec": "mp4a.40.2"}),
            json!({"format_id": "18", "ext": "mp4", "height": 360, "vcodec": "avc1", "acodec": "mp4a.40.2", "filesize": 5242880}),
            json!({"format_id": "137", "ext": "mp4", "height": 1080, "fps": 30, "vcodec": "avc1", "acodec": "none", "filesize": 1048576}),
            json!({"format_id": "248", "ext": "webm", "height": 1080, "vcodec": "vp9"}),
            json!({"format_id": "399", "ext": "mp4", "height": 1080, "vcodec": "av01"}),
            json!("broken"),
        ],
        ..Default::default()
    }
}

#[test]
fn reference_format_example() {
    let raw = vec![
        json!({"height": 1080, "ext": "mp4", "vcodec": "avc1", "filesize": 1048576}),
        json!({"height": 1080, "ext": "mp4", "vcodec": "avc1"}),
        json!({"height": 480, "ext": "mp4", "vcodec": "avc1"}),
        json!({"vcodec": "none"}),
    ];

    let options = select(&raw);
    assert_eq!(options.len(), 3);
    assert_eq!(options[0], QualityOption::best_audio());
    assert_eq!(options[0].display_name(), "Audio Only (MP3)");
    assert_eq!(options[1].height, Some(1080));
    assert_eq!(options[1].file_size_bytes, Some(1_048_576));
    assert!(options[1].description().contains("Size: 1.0 MB"));
    assert_eq!(options[2].height, Some(480));
}

#[test]
fn reference_url_examples() {
    let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
    assert!(validator::is_valid(url));
    assert_eq!(validator::extract_id(url).as_deref(), Some("dQw4w9WgXcQ"));
    assert_eq!(
        validator::normalize("youtu.be/dQw4w9WgXcQ"),
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
    );

    for input in ["", "   ", "not a url"] {
        assert!(!validator::is_valid(input));
        assert_eq!(validator::extract_id(input), None);
    }
}

#[tokio::test]
async fn fetch_select_download_flow() {
    let extractor = ScriptedExtractor {
        info: sample_info(),
        events: vec![
            DownloadEvent::Progress {
                percent: 10.0,
                speed: Some("2.00MiB/s".to_string()),
                eta: Some("00:30".to_string()),
            },
            DownloadEvent::Progress {
                percent: 100.0,
                speed: None,
                eta: None,
            },
            DownloadEvent::Completed {
                path: PathBuf::from("/tmp/out/Sample Video.mp4"),
            },
        ],
    };

    let mut session = DownloadSession::new();
    session.update_url("https://youtu.be/dQw4w9WgXcQ?si=share");
    let url = session.begin_fetch().expect("valid url");

    session.finish_fetch(extractor.fetch_qualities(&url).await);
    let names: Vec<String> = session
        .available_qualities
        .iter()
        .map(|q| q.display_name())
        .collect();
    assert_eq!(names, vec!["Audio Only (MP3)", "1080p", "1080p", "360p"]);

    // (1080, mp4) collapsed to the first occurrence; webm kept separately
    let ids: Vec<&str> = session
        .available_qualities
        .iter()
        .map(|q| q.format_id.as_str())
        .collect();
    assert_eq!(ids, vec!["bestaudio", "137", "248", "18"]);

    assert!(session.select_format_id("137"));
    let request = session
        .begin_download(&PathBuf::from("/tmp/out"), "mp3")
        .expect("request");
    assert_eq!(request.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");

    let (tx, mut rx) = mpsc::channel(16);
    let path = extractor.download(&request, tx).await.expect("download");

    while let Some(event) = rx.recv().await {
        session.apply_event(&event);
    }

    assert_eq!(path, PathBuf::from("/tmp/out/Sample Video.mp4"));
    assert_eq!(session.download_progress, 100);
    assert!(!session.is_downloading);
    assert_eq!(session.state, DownloadState::Completed(path));
}

#[tokio::test]
async fn audio_only_metadata_still_allows_audio_download() {
    let extractor = ScriptedExtractor {
        info: VideoInfo {
            formats: vec![json!({"format_id": "140", "vcodec": "none", "acodec": "mp4a.40.2"})],
            ..Default::default()
        },
        events: Vec::new(),
    };

    let mut session = DownloadSession::new();
    session.update_url("https://www.youtube.com/shorts/dQw4w9WgXcQ");
    let url = session.begin_fetch().expect("valid url");
    session.finish_fetch(extractor.fetch_qualities(&url).await);

    assert_eq!(session.available_qualities, vec![QualityOption::best_audio()]);
    assert!(!session.has_downloadable_formats());

    // Audio stays downloadable even without video formats
    assert!(!session.choose_quality(QualityChoice::TallestVideo));
    assert!(session.choose_quality(QualityChoice::BestAudio));
    let request = session
        .begin_download(&PathBuf::from("/tmp/out"), "mp3")
        .expect("request");
    assert!(request.audio_only);
    assert_eq!(request.format_id, "bestaudio");
}
