//! Adapter turning a pixel source plus a hand detector into a landmark stream.

use crate::source::{CaptureSource, HandDetector};
use lumiere_core::{LandmarkFrame, LandmarkStream, StreamError};
use tracing::{debug, info};

/// Runs `detector` on every frame of `source`.
///
/// The source's frame number becomes the landmark sequence number.
pub struct DetectorStream<S: CaptureSource, D: HandDetector> {
    source: S,
    detector: D,
    detections: u64,
}

impl<S: CaptureSource, D: HandDetector> DetectorStream<S, D> {
    pub fn new(source: S, detector: D) -> Self {
        Self {
            source,
            detector,
            detections: 0,
        }
    }

    /// Frames in which a hand was found so far.
    pub fn detections(&self) -> u64 {
        self.detections
    }

    pub fn inner(&self) -> &S {
        &self.source
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: CaptureSource, D: HandDetector> LandmarkStream for DetectorStream<S, D> {
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>, StreamError> {
        let Some(frame) = self.source.next_frame()? else {
            return Ok(None);
        };

        let frame = match self.detector.detect(&frame.image)? {
            Some(hand) => {
                self.detections += 1;
                LandmarkFrame::new(hand, frame.timestamp, frame.frame_number)
            }
            None => {
                debug!("No hand in frame {}", frame.frame_number);
                LandmarkFrame::none(frame.timestamp, frame.frame_number)
            }
        };
        Ok(Some(frame))
    }

    fn frame_rate(&self) -> Option<f32> {
        self.source.frame_rate()
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }

    fn stop(&mut self) {
        self.source.stop();
        info!("Detector stream stopped ({} hands detected)", self.detections);
    }
}
