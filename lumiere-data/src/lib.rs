//! Lumiere Data Crate
//!
//! Plain data types for hand landmarks, gestures, application modes and
//! particles, together with the deterministic tree layout, the randomized
//! explosion layout, and the tunable configuration shared by the other crates.
//! Nothing in here touches a camera or a renderer.

pub mod config;
pub mod geometry;
pub mod poses;
pub mod types;

pub use config::{
    AnimationConfig, ConfigError, ExperienceConfig, GestureConfig, PointerProjection, SceneConfig,
};
pub use geometry::{exploded_position, exploded_position_with, particle_layout, tree_position};
pub use poses::hand_pose;
pub use types::{
    AppMode, GestureKind, GestureState, HAND_LANDMARK_COUNT, HandLandmark, HandPose,
    ManualCommand, ParticleColor, ParticleData, ParticleKind,
};
