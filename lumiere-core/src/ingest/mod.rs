//! Landmark ingestion
//!
//! Interfaces through which an external hand-landmark detector feeds the
//! gesture pipeline. Producers live in lumiere-capture.

pub mod landmarks;

pub use landmarks::{LandmarkFrame, LandmarkStream, StreamError};
