//! Recorded landmark replays.
//!
//! File format:
//!
//! ```json
//! { "fps": 30.0, "frames": [ { "landmarks": [[0.5, 0.6, 0.0], ...] }, { "landmarks": null } ] }
//! ```
//!
//! `fps` is optional; a frame without `landmarks` (or with `null`) means no
//! hand was detected.

use crate::source::CaptureError;
use lumiere_core::{LandmarkFrame, LandmarkStream, StreamError};
use lumiere_data::HandLandmark;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

const DEFAULT_FPS: f32 = 30.0;

#[derive(Debug, Deserialize)]
struct ReplayFile {
    #[serde(default)]
    fps: Option<f32>,
    frames: Vec<ReplayEntry>,
}

#[derive(Debug, Deserialize)]
struct ReplayEntry {
    #[serde(default)]
    landmarks: Option<Vec<[f32; 3]>>,
}

/// Plays back a fixed list of detector results.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    frames: Vec<Option<Vec<HandLandmark>>>,
    fps: Option<f32>,
    cursor: usize,
    sequence: u64,
    looping: bool,
    active: bool,
}

impl ReplaySource {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let source = Self::from_json_str(&text)?;
        info!("Loaded replay {} ({} frames)", path.display(), source.len());
        Ok(source)
    }

    pub fn from_json_str(text: &str) -> Result<Self, CaptureError> {
        let file: ReplayFile = serde_json::from_str(text)?;
        if let Some(fps) = file.fps {
            if !(fps > 0.0) {
                return Err(CaptureError::InvalidReplay(format!("fps must be positive, got {fps}")));
            }
        }
        let frames = file
            .frames
            .into_iter()
            .map(|entry| {
                entry
                    .landmarks
                    .map(|points| points.into_iter().map(HandLandmark::from).collect())
            })
            .collect();
        Ok(Self::from_frames(frames, file.fps))
    }

    pub fn from_frames(frames: Vec<Option<Vec<HandLandmark>>>, fps: Option<f32>) -> Self {
        Self {
            frames,
            fps,
            cursor: 0,
            sequence: 0,
            looping: false,
            active: true,
        }
    }

    /// Restart from the first frame instead of ending.
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl LandmarkStream for ReplaySource {
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>, StreamError> {
        if !self.active {
            return Ok(None);
        }
        if self.cursor >= self.frames.len() {
            if self.looping && !self.frames.is_empty() {
                debug!("Replay looping after {} frames", self.sequence);
                self.cursor = 0;
            } else {
                info!("Replay finished after {} frames", self.sequence);
                self.active = false;
                return Ok(None);
            }
        }

        self.sequence += 1;
        let timestamp = self.sequence as f64 / f64::from(self.fps.unwrap_or(DEFAULT_FPS));
        let frame = match &self.frames[self.cursor] {
            Some(hand) => LandmarkFrame::new(hand.clone(), timestamp, self.sequence),
            None => LandmarkFrame::none(timestamp, self.sequence),
        };
        self.cursor += 1;
        Ok(Some(frame))
    }

    fn frame_rate(&self) -> Option<f32> {
        self.fps
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn stop(&mut self) {
        self.active = false;
    }
}
