//! Lumiere
//!
//! Headless driver for the gesture-controlled particle tree.
//!
//! Features:
//! - Landmark input from JSON replays or a built-in gesture demo
//! - Manual TREE / EXPLODE commands on a tick schedule
//! - Status overlay text on every mode or gesture change
//! - Final render state as JSON for an external renderer

mod app;
mod commands;
mod errors;
mod status;

use app::{InputSource, LoggingConfig, RunConfig};
use clap::Parser;
use commands::ScheduledCommand;
use errors::AppError;
use lumiere_data::ExperienceConfig;
use std::path::PathBuf;
use tracing::info;

/// Lumiere - gesture-driven particle tree
#[derive(Parser, Debug)]
#[command(name = "lumiere")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Experience config (JSON); missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Landmark replay file (JSON)
    #[arg(short, long, conflicts_with = "demo")]
    replay: Option<PathBuf>,

    /// Restart the replay when it ends
    #[arg(long, requires = "replay")]
    loop_replay: bool,

    /// Play the built-in gesture demo
    #[arg(long)]
    demo: bool,

    /// Simulate the user refusing camera access
    #[arg(long)]
    deny_camera: bool,

    /// Number of ticks to run (default: until the input ends)
    #[arg(short, long)]
    frames: Option<u64>,

    /// Render tick rate
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Detect on a background thread and tick in wall-clock time
    #[arg(long)]
    realtime: bool,

    /// Photo to show on the tree (repeatable, newest first)
    #[arg(short, long = "photo")]
    photos: Vec<String>,

    /// Manual button press as FRAME:tree or FRAME:explode (repeatable)
    #[arg(long = "command")]
    commands: Vec<ScheduledCommand>,

    /// Seed for the explosion layout
    #[arg(long)]
    seed: Option<u64>,

    /// Write the final render state to this file
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Send spans to Tracy (requires the `tracy` feature)
    #[arg(long)]
    tracy: bool,

    /// List webcams and exit
    #[cfg(feature = "webcam")]
    #[arg(long)]
    list_cameras: bool,
}

impl Args {
    fn run_config(self) -> Result<RunConfig, AppError> {
        let experience = match &self.config {
            Some(path) => ExperienceConfig::from_path(path)?,
            None => ExperienceConfig::default(),
        };
        let input = match (self.replay, self.demo) {
            (Some(path), _) => InputSource::Replay {
                path,
                looping: self.loop_replay,
            },
            (None, true) => InputSource::Demo,
            (None, false) => InputSource::None,
        };
        Ok(RunConfig {
            experience,
            input,
            deny_camera: self.deny_camera,
            frames: self.frames,
            fps: self.fps,
            realtime: self.realtime,
            photos: self.photos,
            commands: self.commands,
            seed: self.seed,
            dump: self.dump,
        })
    }
}

fn execute(args: Args) -> Result<(), AppError> {
    #[cfg(feature = "webcam")]
    if args.list_cameras {
        for device in lumiere_capture::WebcamCapture::list_devices()? {
            println!("{device}");
        }
        return Ok(());
    }

    let summary = app::run(args.run_config()?)?;
    info!(
        "Finished after {} ticks in {} ({} mode changes)",
        summary.ticks,
        summary.final_mode,
        summary.modes.len().saturating_sub(1)
    );
    Ok(())
}

fn main() {
    let args = Args::parse();

    LoggingConfig {
        level: args.log_level.clone(),
        enable_tracy: args.tracy,
    }
    .init();

    if let Err(e) = execute(args) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}
