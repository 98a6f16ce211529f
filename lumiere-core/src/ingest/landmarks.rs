//! Landmark stream interfaces for real-time gesture input

use lumiere_data::{HandLandmark, HandPose};

/// A single detector result.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    /// Landmarks for the dominant hand, or `None` when no hand was detected.
    pub hand: Option<Vec<HandLandmark>>,
    /// Timestamp in seconds (relative to stream start)
    pub timestamp: f64,
    /// Monotonic detector sequence number; repeats mean "no new result".
    pub sequence: u64,
}

impl LandmarkFrame {
    /// Create a frame carrying a detected hand
    pub fn new(hand: Vec<HandLandmark>, timestamp: f64, sequence: u64) -> Self {
        Self {
            hand: Some(hand),
            timestamp,
            sequence,
        }
    }

    /// Create a frame in which the detector saw no hand
    pub fn none(timestamp: f64, sequence: u64) -> Self {
        Self {
            hand: None,
            timestamp,
            sequence,
        }
    }

    /// The validated pose, if the frame holds a complete hand.
    ///
    /// Short frames are reported as no hand.
    pub fn pose(&self) -> Option<HandPose> {
        self.hand.as_deref().and_then(HandPose::from_landmarks)
    }
}

/// Trait for landmark producers
pub trait LandmarkStream {
    /// Get the next detector result
    /// Returns None when the stream ends
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>, StreamError>;

    /// Detector rate (results per second), if known
    fn frame_rate(&self) -> Option<f32>;

    /// Check if the stream is still active
    fn is_active(&self) -> bool;

    /// Stop producing frames
    fn stop(&mut self);
}

impl<S: LandmarkStream + ?Sized> LandmarkStream for Box<S> {
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>, StreamError> {
        (**self).next_frame()
    }

    fn frame_rate(&self) -> Option<f32> {
        (**self).frame_rate()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}

/// Errors that can occur during stream processing
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Stream ended unexpectedly")]
    Ended,
    #[error("Invalid frame data: {0}")]
    InvalidData(String),
}
