//! Scene state for the particle field
//!
//! This module provides the particle animator, the photo library mapped onto
//! photo particles, and the per-tick render state handed to the renderer.

pub mod animator;
pub mod photos;
pub mod render_state;

pub use animator::ParticleAnimator;
pub use photos::{DEFAULT_PHOTOS, PhotoLibrary, PhotoRef};
pub use render_state::{RenderInstance, RenderState};
