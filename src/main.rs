//! Tubeloader - YouTube downloader front-end for yt-dlp
//!
//! Validates the URL, lists the available qualities and downloads the chosen
//! one, printing progress as yt-dlp reports it.

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;
use tubeloader::extractor::{Extractor, YtDlpExtractor};
use tubeloader::session::{DownloadSession, QualityChoice};
use tubeloader::utils::{create_download_dir, AppSettings};
use tubeloader::DownloadEvent;

#[derive(Parser)]
#[command(name = "tubeloader", version, about = "Download YouTube videos via yt-dlp")]
struct Args {
    /// Video URL (watch, youtu.be, embed, v or shorts link)
    url: String,

    /// Only list the available qualities
    #[arg(long)]
    list: bool,

    /// Format id to download (see --list)
    #[arg(short, long, conflicts_with = "audio")]
    format: Option<String>,

    /// Download audio only, converted to the configured audio format
    #[arg(long)]
    audio: bool,

    /// Output directory (defaults to the configured download location)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(args))
}

async fn run(args: Args) -> Result<()> {
    let config_path = args.config.clone().unwrap_or_else(AppSettings::default_path);
    let settings = AppSettings::load(&config_path)?;

    let mut session = DownloadSession::new();
    session.update_url(args.url.as_str());
    let Some(url) = session.begin_fetch() else {
        bail!("{}", session.error_message.unwrap_or_default());
    };

    let extractor = YtDlpExtractor::from_settings(&settings)?;

    println!("Fetching formats for {}", url);
    let fetched = extractor.fetch_qualities(&url).await;
    session.finish_fetch(fetched);
    if let Some(message) = session.error_message.take() {
        bail!(message);
    }

    if args.list {
        for quality in &session.available_qualities {
            println!(
                "{:>10}  {:<18} {}",
                quality.format_id,
                quality.display_name(),
                quality.description()
            );
        }
        if !session.has_downloadable_formats() {
            println!("No video formats available; audio only");
        }
        return Ok(());
    }

    let choice = if args.audio {
        QualityChoice::BestAudio
    } else if let Some(format_id) = args.format.as_deref() {
        QualityChoice::FormatId(format_id)
    } else {
        QualityChoice::TallestVideo
    };
    if !session.choose_quality(choice) {
        bail!("{}", session.error_message.unwrap_or_default());
    }
    if let Some(chosen) = session.selected_quality.as_ref() {
        println!("Selected {} ({})", chosen.display_name(), chosen.description());
    }

    let output_dir = create_download_dir(
        &args
            .output
            .clone()
            .unwrap_or_else(|| settings.download_location.clone()),
    )?;
    let Some(request) = session.begin_download(&output_dir, &settings.audio_format) else {
        bail!("{}", session.error_message.unwrap_or_default());
    };

    let (events_tx, mut events_rx) = mpsc::channel::<DownloadEvent>(100);
    let handle = tokio::spawn(async move { extractor.download(&request, events_tx).await });

    while let Some(event) = events_rx.recv().await {
        session.apply_event(&event);
        if let DownloadEvent::Progress { .. } = event {
            println!(
                "Progress: {:>3}%  Speed: {}  ETA: {}",
                session.download_progress,
                session.download_speed.as_deref().unwrap_or("-"),
                session.estimated_time.as_deref().unwrap_or("-"),
            );
        }
    }

    handle.await??;
    if let Some(message) = session.success_message.as_deref() {
        println!("{}", message);
    }
    Ok(())
}
