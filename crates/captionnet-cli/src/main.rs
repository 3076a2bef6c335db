//! Caption Net CLI
//!
//! Drives a full demo editor session headlessly: simulated sign-in, video
//! import, the fake transcription run, seeded captions, timed playback
//! with overlay output, and a scripted round of edits.

use std::time::Duration;

use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

use captionnet_core::{
    playback::{SimulatedPlayer, PLAYHEAD_TICK},
    processing::JobStatus,
    segments::StylePreset,
    session::EditorSession,
    Language,
};

#[derive(Parser)]
#[command(
    name = "captionnet-cli",
    about = "Headless Caption Net demo session",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demo editor session end to end
    Demo {
        /// Caption language for the simulated transcription (english, sinhala)
        #[arg(long, default_value = "english")]
        language: String,

        /// Simulated video duration in seconds
        #[arg(long, default_value_t = 60.0)]
        duration: f64,

        /// Seconds of playback to run once the editor opens
        #[arg(long, default_value_t = 8.0)]
        seconds: f64,

        /// Seed for a deterministic demo layout
        #[arg(long)]
        seed: Option<u64>,

        /// Print the final caption track as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    match cli.command {
        Commands::Demo {
            language,
            duration,
            seconds,
            seed,
            json,
        } => {
            let language: Language = language
                .parse()
                .map_err(|e: String| anyhow::anyhow!("Invalid --language: {e}"))?;
            run_demo(language, duration, seconds, seed, json).await
        }
    }
}

async fn run_demo(
    language: Language,
    duration: f64,
    seconds: f64,
    seed: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let player = SimulatedPlayer::new(duration);
    let mut session = EditorSession::new(player).with_language(language);

    // The demo account flow always succeeds.
    session.complete_sign_in("Demo User");
    let job_id = session.import_video("demo.mp4", "video/mp4")?;
    info!(%job_id, "Upload accepted, transcription started");

    // Surface the staged progress messages while the run animates.
    let mut last_message = String::new();
    loop {
        match session.processing_status() {
            Some(JobStatus::Running { progress, message }) => {
                if message != last_message {
                    info!(progress = %format!("{progress:.0}%"), "{message}");
                    last_message = message;
                }
            }
            Some(status) if status.is_done() => break,
            _ => {}
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    info!("Transcription complete");

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    session.finish_processing(&mut rng)?;
    info!(segments = session.track.len(), "Editor open, playing");

    // Playback: sample the playhead every tick and report caption flips.
    let ticks = (seconds / PLAYHEAD_TICK.as_secs_f64()).ceil() as u64;
    let mut shown = String::new();
    let mut preview = String::new();
    for tick in 0..ticks {
        session.player.advance(PLAYHEAD_TICK.as_secs_f64());
        let frame = session.playhead_frame();

        if frame.caption.visible && frame.caption.text != shown {
            shown = frame.caption.text.clone();
            info!(at = %frame.timecode, "Overlay: {shown}");
        } else if !frame.caption.visible && !shown.is_empty() {
            shown.clear();
            info!(at = %frame.timecode, "Overlay hidden");
        }

        if let Some(line) = session.preview_caption() {
            if !line.is_empty() && line != preview {
                preview = line;
                info!(at = %frame.timecode, "Preview caption: {preview}");
            }
        }

        if tick % 40 == 0 {
            info!(
                at = %frame.timecode,
                playhead_px = %format!("{:.0}", frame.position_px),
                "Playhead"
            );
        }
        tokio::time::sleep(PLAYHEAD_TICK).await;
    }

    // A scripted round of edits against the first segment.
    let first_id = session.track.segments[0].id.clone();
    session.begin_drag(&first_id, 0.0)?;
    if let Some(new_start) = session.drag_to(150.0) {
        info!(segment_id = %first_id, new_start_sec = %format!("{new_start:.2}"), "Segment dragged");
    }
    session.end_drag();

    let previous = session.enter_text_edit().unwrap_or_default();
    let selection = session.selection.clone();
    session.edit_segment_text(&selection, "Edited in the demo")?;
    info!(%previous, "Caption text replaced");

    session.apply_preset(&selection, StylePreset::Neon)?;
    let marker_id = session.split_at_playhead()?;
    info!(%marker_id, "Split marker dropped at playhead");

    info!("{}", session.export_video()?);

    if json {
        println!("{}", serde_json::to_string_pretty(&session.track)?);
    }

    Ok(())
}
