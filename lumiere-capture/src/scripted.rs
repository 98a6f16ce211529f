//! Scripted stand-ins for the camera prompt and the hand detector.

use glam::Vec2;
use lumiere_core::{CameraAccess, LandmarkFrame, LandmarkStream, SessionError, StreamError};
use lumiere_data::{GestureKind, hand_pose};
use tracing::info;

/// Permission prompt with a predetermined answer.
#[derive(Debug, Clone)]
pub struct ScriptedAccess {
    grant: bool,
    requests: usize,
}

impl ScriptedAccess {
    pub fn granting() -> Self {
        Self {
            grant: true,
            requests: 0,
        }
    }

    pub fn denying() -> Self {
        Self {
            grant: false,
            requests: 0,
        }
    }

    /// How many times the prompt was shown.
    pub fn requests(&self) -> usize {
        self.requests
    }
}

impl CameraAccess for ScriptedAccess {
    fn request_access(&mut self) -> Result<(), SessionError> {
        self.requests += 1;
        if self.grant {
            Ok(())
        } else {
            Err(SessionError::PermissionDenied("user dismissed the camera prompt".into()))
        }
    }
}

/// One held pose in a [`GestureScript`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    pub kind: GestureKind,
    /// Normalized palm center.
    pub center: Vec2,
    pub frames: u32,
}

impl ScriptStep {
    pub fn new(kind: GestureKind, center: Vec2, frames: u32) -> Self {
        Self { kind, center, frames }
    }
}

/// Synthesizes landmark frames for a sequence of held poses.
///
/// `Idle` steps produce frames without a hand.
#[derive(Debug, Clone)]
pub struct GestureScript {
    steps: Vec<ScriptStep>,
    fps: f32,
    step: usize,
    emitted_in_step: u32,
    sequence: u64,
    active: bool,
}

impl GestureScript {
    pub fn new(steps: Vec<ScriptStep>, fps: f32) -> Self {
        Self {
            steps,
            fps,
            step: 0,
            emitted_in_step: 0,
            sequence: 0,
            active: true,
        }
    }

    /// Walk through every mode: tree, explode, focus the photo under
    /// `photo_pointer`, back to tree.
    pub fn demo(photo_pointer: Vec2) -> Self {
        let center = Vec2::splat(0.5);
        Self::new(
            vec![
                ScriptStep::new(GestureKind::Idle, center, 15),
                ScriptStep::new(GestureKind::Fist, center, 20),
                ScriptStep::new(GestureKind::OpenHand, center, 75),
                ScriptStep::new(GestureKind::Point, photo_pointer, 15),
                ScriptStep::new(GestureKind::Pinch, photo_pointer, 60),
                ScriptStep::new(GestureKind::OpenHand, center, 20),
                ScriptStep::new(GestureKind::Fist, center, 60),
                ScriptStep::new(GestureKind::Idle, center, 15),
            ],
            30.0,
        )
    }

    /// Total frames the script produces.
    pub fn len(&self) -> usize {
        self.steps.iter().map(|s| s.frames as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LandmarkStream for GestureScript {
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>, StreamError> {
        if !self.active {
            return Ok(None);
        }
        while let Some(step) = self.steps.get(self.step) {
            if self.emitted_in_step < step.frames {
                break;
            }
            self.step += 1;
            self.emitted_in_step = 0;
        }
        let Some(step) = self.steps.get(self.step) else {
            info!("Gesture script finished after {} frames", self.sequence);
            self.active = false;
            return Ok(None);
        };

        self.emitted_in_step += 1;
        self.sequence += 1;
        let timestamp = self.sequence as f64 / f64::from(self.fps);
        let frame = match step.kind {
            GestureKind::Idle => LandmarkFrame::none(timestamp, self.sequence),
            kind => LandmarkFrame::new(hand_pose(kind, step.center), timestamp, self.sequence),
        };
        Ok(Some(frame))
    }

    fn frame_rate(&self) -> Option<f32> {
        Some(self.fps)
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn stop(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumiere_core::GestureClassifier;

    #[test]
    fn test_access_counts_requests() {
        let mut access = ScriptedAccess::denying();
        assert!(access.request_access().is_err());
        assert_eq!(access.requests(), 1);
        assert!(ScriptedAccess::granting().request_access().is_ok());
    }

    #[test]
    fn test_script_plays_steps_in_order() {
        let mut script = GestureScript::new(
            vec![
                ScriptStep::new(GestureKind::Idle, Vec2::splat(0.5), 1),
                ScriptStep::new(GestureKind::Fist, Vec2::splat(0.5), 0),
                ScriptStep::new(GestureKind::Pinch, Vec2::new(0.3, 0.7), 2),
            ],
            30.0,
        );
        assert_eq!(script.len(), 3);

        let mut classifier = GestureClassifier::default();
        let mut kinds = Vec::new();
        while let Some(frame) = script.next_frame().unwrap() {
            kinds.push(classifier.update(Some(&frame)).state.kind);
        }
        assert_eq!(kinds, vec![GestureKind::Idle, GestureKind::Pinch, GestureKind::Pinch]);
        assert!(!script.is_active());
    }

    #[test]
    fn test_demo_length() {
        let script = GestureScript::demo(Vec2::splat(0.5));
        assert_eq!(script.len(), 280);
        assert_eq!(script.frame_rate(), Some(30.0));
    }
}
