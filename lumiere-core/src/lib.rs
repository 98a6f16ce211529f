//! Lumiere Core Crate
//!
//! The interactive core of the lumiere particle scene: landmark ingest,
//! gesture classification, the TREE / EXPLODED / FOCUS mode machine and the
//! particle animator that eases every particle toward its current target.
//!
//! ## Modules
//!
//! - [`ingest`]: Landmark frame and stream interfaces for external detectors
//! - [`gesture`]: Per-frame classification with an explicit debounce counter
//! - [`control`]: Mode transitions and the camera session capability
//! - [`scene`]: Particle animator, photo library and per-tick render state
//! - [`experience`]: The single owner that ties everything into one `tick`

pub mod control;
pub mod experience;
pub mod gesture;
pub mod ingest;
pub mod scene;

pub use control::{CameraAccess, CameraSession, ModeEvent, SessionError, SessionState, transition};
pub use experience::{Experience, TickInput};
pub use gesture::{GestureClassifier, GestureUpdate, classify_pose};
pub use ingest::{LandmarkFrame, LandmarkStream, StreamError};
pub use scene::{ParticleAnimator, PhotoLibrary, PhotoRef, RenderInstance, RenderState};
