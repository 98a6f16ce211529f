//! Common capture source types and traits.

use image::RgbImage;
use lumiere_core::StreamError;
use lumiere_data::HandLandmark;
use thiserror::Error;

/// Errors that can occur during capture.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Failed to open device: {0}")]
    OpenFailed(String),

    #[error("Failed to capture frame: {0}")]
    CaptureFailed(String),

    #[error("Hand detection failed: {0}")]
    DetectionFailed(String),

    #[error("Invalid replay: {0}")]
    InvalidReplay(String),

    #[error("Stream ended")]
    StreamEnded,

    #[error("Landmark stream failed: {0}")]
    Stream(#[from] StreamError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CaptureError> for StreamError {
    fn from(err: CaptureError) -> Self {
        match err {
            CaptureError::Io(e) => StreamError::Io(e),
            CaptureError::StreamEnded => StreamError::Ended,
            CaptureError::Stream(e) => e,
            other => StreamError::InvalidData(other.to_string()),
        }
    }
}

/// Raw frame data from a capture source.
#[derive(Debug, Clone)]
pub struct FrameData {
    /// RGB image data.
    pub image: RgbImage,
    /// Frame timestamp in seconds (relative to stream start).
    pub timestamp: f64,
    /// Frame number.
    pub frame_number: u64,
}

impl FrameData {
    pub fn new(image: RgbImage, timestamp: f64, frame_number: u64) -> Self {
        Self {
            image,
            timestamp,
            frame_number,
        }
    }

    /// Image dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Trait for capture sources that provide video frames.
///
/// Lower level than `LandmarkStream`: frames carry pixels, not hands. Pair a
/// source with a [`HandDetector`] through [`crate::DetectorStream`].
pub trait CaptureSource {
    fn next_frame(&mut self) -> Result<Option<FrameData>, CaptureError>;

    fn frame_rate(&self) -> Option<f32>;

    /// Resolution (width, height).
    fn resolution(&self) -> (u32, u32);

    fn is_active(&self) -> bool;

    fn stop(&mut self);
}

/// External hand landmark model.
///
/// Returns the 21 landmarks of the dominant hand in normalized image
/// coordinates, or `None` when no hand is visible.
pub trait HandDetector {
    fn detect(&mut self, image: &RgbImage) -> Result<Option<Vec<HandLandmark>>, CaptureError>;
}
