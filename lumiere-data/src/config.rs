//! Tunable configuration for the scene, gesture pipeline and animator.
//!
//! Every struct is `#[serde(default)]`, so a JSON file only needs the keys it
//! wants to override.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Particle counts and layout dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub particle_count: usize,
    /// Particles reserved for photo textures.
    pub photo_count: usize,
    pub tree_height: f32,
    pub tree_radius: f32,
    pub explosion_radius: f32,
    /// Maximum photos kept in the library.
    pub max_photos: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: 400,
            photo_count: 12,
            tree_height: 15.0,
            tree_radius: 6.0,
            explosion_radius: 15.0,
            max_photos: 15,
        }
    }
}

/// Gesture thresholds, in multiples of the wrist to middle-knuckle length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// All fingertips closer to the palm than this: fist.
    pub fist_threshold: f32,
    /// All fingertips farther from the palm than this: open hand.
    pub open_threshold: f32,
    /// Thumb tip to index tip closer than this: pinch.
    pub pinch_threshold: f32,
    /// Consecutive matching frames before a gesture is acted on.
    pub debounce_frames: u32,
    /// World-space radius around the pointer searched for a photo to focus.
    pub pick_radius: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            fist_threshold: 0.6,
            open_threshold: 0.9,
            pinch_threshold: 0.25,
            debounce_frames: 3,
            pick_radius: 2.0,
        }
    }
}

/// Easing and idle motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Fraction of the remaining distance covered each tick, in (0, 1).
    pub damping: f32,
    /// Scale the focused photo grows to.
    pub focus_scale: f32,
    /// Where the focused photo is brought to.
    pub focus_anchor: [f32; 3],
    pub twinkle_amplitude: f32,
    /// Radians per second.
    pub twinkle_speed: f32,
}

impl AnimationConfig {
    pub fn focus_anchor(&self) -> Vec3 {
        Vec3::from_array(self.focus_anchor)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            damping: 0.08,
            focus_scale: 4.0,
            focus_anchor: [0.0, 0.0, 8.0],
            twinkle_amplitude: 0.08,
            twinkle_speed: 1.5,
        }
    }
}

/// Maps the normalized hand pointer onto the scene's XY plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerProjection {
    /// World units covered by the full camera frame, per axis.
    pub span: [f32; 2],
    /// Selfie cameras are mirrored; flip x so moving right points right.
    pub mirror_x: bool,
}

impl PointerProjection {
    pub fn to_world(&self, pointer: Vec2) -> Vec2 {
        let x = if self.mirror_x {
            0.5 - pointer.x
        } else {
            pointer.x - 0.5
        };
        // Image y grows downward, world y grows upward.
        Vec2::new(x * self.span[0], (0.5 - pointer.y) * self.span[1])
    }

    pub fn to_pointer(&self, world: Vec3) -> Vec2 {
        let x = world.x / self.span[0];
        let x = if self.mirror_x { 0.5 - x } else { x + 0.5 };
        Vec2::new(x, 0.5 - world.y / self.span[1])
    }
}

impl Default for PointerProjection {
    fn default() -> Self {
        let explosion_radius = SceneConfig::default().explosion_radius;
        Self {
            span: [explosion_radius * 2.0, explosion_radius * 2.0],
            mirror_x: true,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceConfig {
    pub scene: SceneConfig,
    pub gesture: GestureConfig,
    pub animation: AnimationConfig,
    pub pointer: PointerProjection,
}

impl ExperienceConfig {
    /// Load and validate a JSON config file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("Loading config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        debug!("Config: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let scene = &self.scene;
        if scene.particle_count == 0 {
            return Err(ConfigError::Invalid("particle_count must be positive".into()));
        }
        if scene.photo_count > scene.particle_count {
            return Err(ConfigError::Invalid(format!(
                "photo_count ({}) exceeds particle_count ({})",
                scene.photo_count, scene.particle_count
            )));
        }
        if !(scene.tree_height > 0.0 && scene.tree_radius > 0.0 && scene.explosion_radius > 0.0) {
            return Err(ConfigError::Invalid("layout dimensions must be positive".into()));
        }

        let gesture = &self.gesture;
        if gesture.debounce_frames == 0 {
            return Err(ConfigError::Invalid("debounce_frames must be at least 1".into()));
        }
        if !(gesture.fist_threshold > 0.0 && gesture.fist_threshold < gesture.open_threshold) {
            return Err(ConfigError::Invalid(format!(
                "fist_threshold ({}) must be positive and below open_threshold ({})",
                gesture.fist_threshold, gesture.open_threshold
            )));
        }
        if !(gesture.pinch_threshold > 0.0 && gesture.pick_radius > 0.0) {
            return Err(ConfigError::Invalid(
                "pinch_threshold and pick_radius must be positive".into(),
            ));
        }

        let damping = self.animation.damping;
        if !(damping > 0.0 && damping < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "damping must be in (0, 1), got {damping}"
            )));
        }

        if !self.pointer.span.iter().all(|s| *s > 0.0) {
            return Err(ConfigError::Invalid("pointer span must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ExperienceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scene.particle_count, 400);
        assert_eq!(config.scene.photo_count, 12);
        assert_eq!(config.scene.max_photos, 15);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            ExperienceConfig::from_json_str(r#"{ "gesture": { "debounce_frames": 5 } }"#).unwrap();
        assert_eq!(config.gesture.debounce_frames, 5);
        assert_eq!(config.gesture.fist_threshold, 0.6);
        assert_eq!(config.scene, SceneConfig::default());
    }

    #[test]
    fn test_rejects_bad_damping() {
        let err = ExperienceConfig::from_json_str(r#"{ "animation": { "damping": 1.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let mut config = ExperienceConfig::default();
        config.gesture.fist_threshold = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_nan() {
        let mut config = ExperienceConfig::default();
        config.gesture.pick_radius = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = ExperienceConfig::default();
        config.scene.tree_height = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = ExperienceConfig::default();
        config.gesture.open_threshold = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = ExperienceConfig::default();
        config.pointer.span = [30.0, f32::NAN];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_thresholds() {
        let mut config = ExperienceConfig::default();
        config.gesture.fist_threshold = 0.0;
        assert!(config.validate().is_err());

        let mut config = ExperienceConfig::default();
        config.gesture.pinch_threshold = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_too_many_photo_slots() {
        let mut config = ExperienceConfig::default();
        config.scene.particle_count = 4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error() {
        let err = ExperienceConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_pointer_projection_round_trip() {
        let projection = PointerProjection::default();
        let world = Vec3::new(3.0, -4.5, 2.0);
        let pointer = projection.to_pointer(world);
        let back = projection.to_world(pointer);
        assert!((back - world.truncate()).length() < 1e-4);
    }

    #[test]
    fn test_pointer_projection_mirrors_x() {
        let projection = PointerProjection::default();
        let left_of_frame = projection.to_world(Vec2::new(0.0, 0.5));
        assert!(left_of_frame.x > 0.0);
        assert!(left_of_frame.y.abs() < 1e-6);
    }
}
