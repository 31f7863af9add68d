use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use pose_actions::config::PoseActionsConfig;
use pose_actions::replay::{read_recording, replay};

/// Replay a recorded pose session and print the recognized actions
#[derive(Parser, Debug)]
#[command(name = "pose-replay", version)]
struct Args {
    /// JSON-lines recording, one frame per line
    recording: PathBuf,

    /// Configuration file (defaults to the user config, then built-in defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log recognizer transitions
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    let config = match &args.config {
        Some(path) => PoseActionsConfig::load_from_file(path)?,
        None => PoseActionsConfig::load_or_default(),
    };

    let file = File::open(&args.recording)
        .with_context(|| format!("Failed to open recording {:?}", args.recording))?;
    let frames = read_recording(BufReader::new(file))?;
    let report = replay(&config, &frames)?;

    for event in &report.events {
        println!(
            "{:>8.3}s  {:?}  (confidence {:.2})",
            event.timestamp().as_secs_f32(),
            event.action_type(),
            event.confidence()
        );
    }
    println!(
        "{} frames, {} actions, calibrated: {}",
        report.frames,
        report.events.len(),
        report.calibrated
    );
    Ok(())
}
