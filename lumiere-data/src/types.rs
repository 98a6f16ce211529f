//! Core data types for hand poses, gestures, modes and particles.
//!
//! These are CPU-side representations shared by the gesture pipeline and the
//! particle animator. GPU-facing instance layouts live in lumiere-core.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of landmarks in a single hand pose.
pub const HAND_LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Fingertip indices for the four non-thumb fingers.
pub const FINGER_TIPS: [usize; 4] = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Knuckle (MCP) indices for the four non-thumb fingers.
pub const FINGER_MCPS: [usize; 4] = [INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];

/// A single landmark in normalized camera space.
///
/// `x` and `y` are in `[0, 1]` across the camera frame, `z` is relative depth.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HandLandmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl HandLandmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Position in the image plane, depth dropped.
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn distance(self, other: HandLandmark) -> f32 {
        self.to_vec3().distance(other.to_vec3())
    }
}

impl From<[f32; 3]> for HandLandmark {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

/// A complete, validated hand pose of exactly 21 landmarks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPose {
    landmarks: [HandLandmark; HAND_LANDMARK_COUNT],
}

impl HandPose {
    /// Build a pose from a detector frame.
    ///
    /// Frames with fewer than [`HAND_LANDMARK_COUNT`] points yield `None`;
    /// any extra points are ignored.
    pub fn from_landmarks(points: &[HandLandmark]) -> Option<Self> {
        let landmarks: [HandLandmark; HAND_LANDMARK_COUNT] =
            points.get(..HAND_LANDMARK_COUNT)?.try_into().ok()?;
        Some(Self { landmarks })
    }

    pub fn landmark(&self, index: usize) -> HandLandmark {
        self.landmarks[index]
    }

    pub fn landmarks(&self) -> &[HandLandmark; HAND_LANDMARK_COUNT] {
        &self.landmarks
    }

    /// Centroid of the wrist and the four finger knuckles.
    pub fn palm_center(&self) -> Vec3 {
        let sum = FINGER_MCPS
            .iter()
            .map(|&i| self.landmarks[i].to_vec3())
            .fold(self.landmarks[WRIST].to_vec3(), |acc, p| acc + p);
        sum / (FINGER_MCPS.len() + 1) as f32
    }

    /// Wrist to middle knuckle distance; the unit gesture thresholds are expressed in.
    pub fn hand_scale(&self) -> f32 {
        self.landmarks[WRIST].distance(self.landmarks[MIDDLE_MCP])
    }
}

/// Discrete gesture classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GestureKind {
    #[default]
    Idle,
    Fist,
    OpenHand,
    Pinch,
    Point,
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureKind::Idle => write!(f, "IDLE"),
            GestureKind::Fist => write!(f, "FIST"),
            GestureKind::OpenHand => write!(f, "OPEN_HAND"),
            GestureKind::Pinch => write!(f, "PINCH"),
            GestureKind::Point => write!(f, "POINT"),
        }
    }
}

/// One classified snapshot of the tracked hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    pub kind: GestureKind,
    /// Tracked reference point (palm center), normalized 0-1.
    pub position: Vec2,
    /// Thumb-to-index distance in hand-scale units, set for pinches.
    pub pinch_distance: Option<f32>,
}

impl GestureState {
    pub fn new(kind: GestureKind, position: Vec2) -> Self {
        Self {
            kind,
            position,
            pinch_distance: None,
        }
    }

    pub fn pinch(position: Vec2, distance: f32) -> Self {
        Self {
            kind: GestureKind::Pinch,
            position,
            pinch_distance: Some(distance),
        }
    }

    /// No hand in view, pointer parked at the frame center.
    pub fn idle() -> Self {
        Self::new(GestureKind::Idle, Vec2::splat(0.5))
    }
}

impl Default for GestureState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Application mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppMode {
    /// Closed cone shape.
    #[default]
    Tree,
    /// Floating chaos.
    Exploded,
    /// Zoomed into a single photo particle.
    Focus { particle: u32 },
}

impl AppMode {
    pub fn focused_particle(&self) -> Option<u32> {
        match self {
            AppMode::Focus { particle } => Some(*particle),
            _ => None,
        }
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppMode::Tree => write!(f, "TREE"),
            AppMode::Exploded => write!(f, "EXPLODED"),
            AppMode::Focus { .. } => write!(f, "FOCUS"),
        }
    }
}

/// Commands issued from the manual UI buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManualCommand {
    ShowTree,
    Explode,
}

impl ManualCommand {
    pub fn target_mode(self) -> AppMode {
        match self {
            ManualCommand::ShowTree => AppMode::Tree,
            ManualCommand::Explode => AppMode::Exploded,
        }
    }
}

/// Semantic color tokens for particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleColor {
    Emerald,
    Gold,
    Red,
    Silver,
    White,
}

impl ParticleColor {
    /// Ornament palette, in the order ornaments cycle through it.
    pub const ORNAMENTS: [ParticleColor; 4] = [
        ParticleColor::Emerald,
        ParticleColor::Gold,
        ParticleColor::Red,
        ParticleColor::Silver,
    ];

    pub fn hex(self) -> u32 {
        match self {
            ParticleColor::Emerald => 0x023020,
            ParticleColor::Gold => 0xC5A059,
            ParticleColor::Red => 0x8A0303,
            ParticleColor::Silver => 0xE5E5E5,
            ParticleColor::White => 0xFFFFFF,
        }
    }

    /// Linear RGB (0-1 range).
    pub fn rgb(self) -> Vec3 {
        let hex = self.hex();
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xFF) as f32 / 255.0);
        Vec3::new(channel(16), channel(8), channel(0))
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Closed set of particle shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    Sphere,
    Cube,
    Candy,
    /// Carries a photo texture; `slot` indexes into the photo library.
    Photo { slot: usize },
}

impl ParticleKind {
    pub const ORNAMENTS: [ParticleKind; 3] =
        [ParticleKind::Sphere, ParticleKind::Cube, ParticleKind::Candy];

    pub fn is_photo(&self) -> bool {
        matches!(self, ParticleKind::Photo { .. })
    }
}

/// A single scene particle.
///
/// Both layout targets are fixed at creation; only `position` moves.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleData {
    id: u32,
    tree_position: Vec3,
    exploded_position: Vec3,
    /// Current (eased) position.
    pub position: Vec3,
    pub scale: f32,
    pub color: ParticleColor,
    pub kind: ParticleKind,
}

impl ParticleData {
    /// Create a particle resting at its tree position.
    pub fn new(
        id: u32,
        tree_position: Vec3,
        exploded_position: Vec3,
        scale: f32,
        color: ParticleColor,
        kind: ParticleKind,
    ) -> Self {
        Self {
            id,
            tree_position,
            exploded_position,
            position: tree_position,
            scale,
            color,
            kind,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn tree_position(&self) -> Vec3 {
        self.tree_position
    }

    pub fn exploded_position(&self) -> Vec3 {
        self.exploded_position
    }

    pub fn photo_slot(&self) -> Option<usize> {
        match self.kind {
            ParticleKind::Photo { slot } => Some(slot),
            _ => None,
        }
    }
}
