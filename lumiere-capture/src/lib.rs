//! Lumiere Capture - hand landmark producers
//!
//! Implementations of the `LandmarkStream` trait from lumiere-core:
//!
//! - JSON landmark replays ([`ReplaySource`])
//! - Scripted gesture sequences ([`GestureScript`])
//! - Any pixel source paired with an external hand model ([`DetectorStream`])
//! - Webcams (via nokhwa, requires `webcam` feature)
//!
//! plus [`spawn_stream`], which moves a producer onto its own thread.
//!
//! ## Example
//!
//! ```ignore
//! use lumiere_capture::{Pacing, ReplaySource, spawn_stream};
//!
//! let mut handle = spawn_stream(ReplaySource::from_path("wave.json")?, Pacing::Realtime);
//! loop {
//!     let frame = handle.latest();
//!     // experience.tick(...)
//! }
//! ```

mod detect;
mod replay;
mod scripted;
mod source;
mod worker;

#[cfg(feature = "webcam")]
mod webcam;

pub use detect::DetectorStream;
pub use replay::ReplaySource;
pub use scripted::{GestureScript, ScriptStep, ScriptedAccess};
pub use source::{CaptureError, CaptureSource, FrameData, HandDetector};
pub use worker::{Pacing, StreamHandle, spawn_stream};

#[cfg(feature = "webcam")]
pub use webcam::{WebcamAccess, WebcamCapture};

// Re-export the stream trait for convenience
pub use lumiere_core::{LandmarkFrame, LandmarkStream, StreamError};
