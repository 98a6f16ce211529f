//! Run configuration and the main tick loop.

use crate::commands::{CommandSchedule, ScheduledCommand};
use crate::errors::AppError;
use crate::status::StatusLine;
use lumiere_capture::{
    GestureScript, LandmarkStream, Pacing, ReplaySource, ScriptedAccess, StreamHandle, spawn_stream,
};
use lumiere_core::{Experience, LandmarkFrame, TickInput};
use lumiere_data::{AppMode, ExperienceConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Ticks to run when there is no landmark input and no explicit frame count.
const IDLE_FRAMES: u64 = 120;

/// Logging configuration.
pub struct LoggingConfig {
    pub level: String,
    pub enable_tracy: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_tracy: false,
        }
    }
}

impl LoggingConfig {
    pub fn init(&self) {
        #[cfg(feature = "tracy")]
        {
            if self.enable_tracy {
                use tracing_subscriber::Layer;
                use tracing_subscriber::layer::SubscriberExt;
                use tracing_subscriber::util::SubscriberInitExt;
                tracing_subscriber::registry()
                    .with(tracing_tracy::TracyLayer::default())
                    .with(
                        tracing_subscriber::fmt::layer().with_filter(
                            tracing_subscriber::EnvFilter::try_from_default_env()
                                .unwrap_or_else(|_| self.level.clone().into()),
                        ),
                    )
                    .init();
                return;
            }
        }

        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&self.level)),
            )
            .with_target(false)
            .init();
    }
}

/// Where hand landmarks come from.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// No camera: manual controls only.
    None,
    Replay { path: PathBuf, looping: bool },
    /// Built-in gesture script that walks through every mode.
    Demo,
}

/// Everything one run needs.
pub struct RunConfig {
    pub experience: ExperienceConfig,
    pub input: InputSource,
    pub deny_camera: bool,
    /// Stop after this many ticks. Defaults to "until the input ends".
    pub frames: Option<u64>,
    /// Render tick rate.
    pub fps: f32,
    /// Run detection on a producer thread and pace ticks in wall-clock time.
    pub realtime: bool,
    pub photos: Vec<String>,
    pub commands: Vec<ScheduledCommand>,
    pub seed: Option<u64>,
    /// Write the final render state here as JSON.
    pub dump: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            experience: ExperienceConfig::default(),
            input: InputSource::None,
            deny_camera: false,
            frames: None,
            fps: 60.0,
            realtime: false,
            photos: Vec::new(),
            commands: Vec::new(),
            seed: None,
            dump: None,
        }
    }
}

/// What a run did.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub final_mode: AppMode,
    /// Every mode entered, in order, starting with the initial one.
    pub modes: Vec<AppMode>,
    pub gestures_enabled: bool,
}

enum Producer {
    Idle,
    Lockstep(Box<dyn LandmarkStream + Send>),
    Threaded(StreamHandle),
}

impl Producer {
    /// Frame for this tick and whether the input has run dry.
    fn poll(&mut self) -> Result<(Option<LandmarkFrame>, bool), AppError> {
        match self {
            Producer::Idle => Ok((None, true)),
            Producer::Lockstep(stream) => {
                let frame = stream.next_frame()?;
                let ended = frame.is_none();
                Ok((frame, ended))
            }
            Producer::Threaded(handle) => {
                let ended = handle.is_finished();
                Ok((handle.latest().cloned(), ended))
            }
        }
    }

    fn shutdown(&mut self) -> Result<(), AppError> {
        match self {
            Producer::Idle => {}
            Producer::Lockstep(stream) => stream.stop(),
            Producer::Threaded(handle) => {
                handle.stop()?;
            }
        }
        Ok(())
    }
}

fn open_input(
    input: &InputSource,
    experience: &Experience,
) -> Result<Option<Box<dyn LandmarkStream + Send>>, AppError> {
    match input {
        InputSource::None => Ok(None),
        InputSource::Replay { path, looping } => {
            let replay = ReplaySource::from_path(path)?.with_looping(*looping);
            Ok(Some(Box::new(replay)))
        }
        InputSource::Demo => {
            let photo = experience
                .animator()
                .particles()
                .iter()
                .find(|p| p.kind.is_photo())
                .ok_or_else(|| {
                    AppError::Argument("demo needs at least one photo particle".into())
                })?;
            let pointer = experience.config().pointer.to_pointer(photo.exploded_position());
            debug!("Demo will pinch particle {} at {:?}", photo.id(), pointer);
            Ok(Some(Box::new(GestureScript::demo(pointer))))
        }
    }
}

/// Build the experience, drive it to completion and return what happened.
pub fn run(config: RunConfig) -> Result<RunSummary, AppError> {
    if !(config.fps > 0.0) {
        return Err(AppError::Argument(format!("fps must be positive, got {}", config.fps)));
    }

    let mut experience = match config.seed {
        Some(seed) => Experience::with_rng(config.experience, &mut StdRng::seed_from_u64(seed))?,
        None => Experience::new(config.experience)?,
    };
    if !config.photos.is_empty() {
        experience.add_photos(config.photos);
    }

    let stream = match open_input(&config.input, &experience)? {
        Some(stream) => {
            let mut access = if config.deny_camera {
                ScriptedAccess::denying()
            } else {
                ScriptedAccess::granting()
            };
            match experience.request_camera(&mut access) {
                Ok(()) => Some(stream),
                Err(err) => {
                    warn!("Continuing with manual controls: {err}");
                    None
                }
            }
        }
        None => {
            info!("No landmark input, manual controls only");
            None
        }
    };

    let mut producer = match stream {
        Some(stream) if config.realtime => {
            Producer::Threaded(spawn_stream(stream, Pacing::Realtime))
        }
        Some(stream) => Producer::Lockstep(stream),
        None => Producer::Idle,
    };
    let limit = match (&producer, config.frames) {
        (_, Some(frames)) => Some(frames),
        (Producer::Idle, None) => Some(IDLE_FRAMES),
        _ => None,
    };

    let dt = 1.0 / config.fps;
    let interval = Duration::from_secs_f32(dt);
    let mut schedule = CommandSchedule::new(config.commands);
    let mut status = StatusLine::default();
    let mut modes = vec![experience.mode()];
    let mut tick = 0u64;

    let pacing = if config.realtime { "realtime" } else { "lockstep" };
    info!("Running at {} fps ({})", config.fps, pacing);

    while limit.is_none_or(|limit| tick < limit) {
        let started = Instant::now();
        let (frame, ended) = producer.poll()?;
        if ended && limit.is_none() && frame.is_none() {
            break;
        }

        let mut due = schedule.due(tick);
        let manual = due.pop();
        for command in due {
            experience.apply_manual(command);
        }

        let state = experience.tick(TickInput {
            frame: frame.as_ref(),
            manual,
            dt,
        });
        if let Some(line) = status.observe(state) {
            info!("[{tick:>5}] {line}");
        }
        if modes.last() != Some(&experience.mode()) {
            modes.push(experience.mode());
        }
        tick += 1;

        if ended && limit.is_none() {
            break;
        }
        if config.realtime {
            thread::sleep(interval.saturating_sub(started.elapsed()));
        }
    }

    producer.shutdown()?;
    if !schedule.is_empty() {
        warn!("Commands scheduled after tick {} were never applied", tick);
    }

    if let Some(path) = &config.dump {
        let json = serde_json::to_string_pretty(experience.render_state())?;
        std::fs::write(path, json)?;
        info!("Render state written to {}", path.display());
    }

    Ok(RunSummary {
        ticks: tick,
        final_mode: experience.mode(),
        modes,
        gestures_enabled: experience.session().gestures_enabled(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumiere_data::ManualCommand;

    fn seeded(input: InputSource) -> RunConfig {
        RunConfig {
            input,
            seed: Some(3),
            ..RunConfig::default()
        }
    }

    #[test]
    fn test_manual_only_run() {
        let config = RunConfig {
            commands: vec!["10:explode".parse().unwrap(), "50:tree".parse().unwrap()],
            ..seeded(InputSource::None)
        };
        let summary = run(config).unwrap();
        assert_eq!(summary.ticks, IDLE_FRAMES);
        assert_eq!(summary.modes, vec![AppMode::Tree, AppMode::Exploded, AppMode::Tree]);
        assert!(!summary.gestures_enabled);
    }

    #[test]
    fn test_demo_run_visits_focus() {
        let summary = run(seeded(InputSource::Demo)).unwrap();
        assert_eq!(summary.ticks, 280);
        assert!(summary.gestures_enabled);
        assert!(summary.modes.iter().any(|m| matches!(m, AppMode::Focus { .. })));
        assert_eq!(summary.final_mode, AppMode::Tree);
    }

    #[test]
    fn test_denied_camera_keeps_manual_controls() {
        let config = RunConfig {
            deny_camera: true,
            frames: Some(40),
            commands: vec!["5:explode".parse().unwrap()],
            ..seeded(InputSource::Demo)
        };
        let summary = run(config).unwrap();
        assert_eq!(summary.ticks, 40);
        assert!(!summary.gestures_enabled);
        assert_eq!(summary.modes, vec![AppMode::Tree, AppMode::Exploded]);
    }

    #[test]
    fn test_frame_limit_truncates_input() {
        let config = RunConfig {
            frames: Some(10),
            ..seeded(InputSource::Demo)
        };
        assert_eq!(run(config).unwrap().ticks, 10);
    }

    #[test]
    fn test_missing_replay_is_an_error() {
        let config = seeded(InputSource::Replay {
            path: PathBuf::from("/nonexistent/replay.json"),
            looping: false,
        });
        assert!(matches!(run(config), Err(AppError::Capture(_))));
    }

    #[test]
    fn test_rejects_zero_fps() {
        let config = RunConfig {
            fps: 0.0,
            ..RunConfig::default()
        };
        assert!(matches!(run(config), Err(AppError::Argument(_))));
    }

    #[test]
    fn test_dump_writes_render_state() {
        let path = std::env::temp_dir().join(format!("lumiere-dump-{}.json", std::process::id()));
        let config = RunConfig {
            frames: Some(3),
            photos: vec!["mine.jpg".into()],
            commands: vec![ScheduledCommand {
                tick: 0,
                command: ManualCommand::Explode,
            }],
            dump: Some(path.clone()),
            ..seeded(InputSource::None)
        };
        run(config).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["mode"]["mode"], "EXPLODED");
        assert_eq!(json["instances"].as_array().unwrap().len(), 400);
    }
}
