//! Webcam capture using nokhwa.

use crate::source::{CaptureError, CaptureSource, FrameData};
use image::RgbImage;
use lumiere_core::{CameraAccess, SessionError};
use nokhwa::Camera;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};
use std::time::Instant;
use tracing::{debug, info};

const DEFAULT_FPS: u32 = 30;
const DEFAULT_WIDTH: u32 = 640;
const DEFAULT_HEIGHT: u32 = 480;

/// Webcam capture source.
pub struct WebcamCapture {
    camera: Camera,
    start_time: Instant,
    frame_count: u64,
    active: bool,
    resolution: (u32, u32),
}

impl WebcamCapture {
    /// Open webcam `index`.
    pub fn new(index: u32) -> Result<Self, CaptureError> {
        Self::with_resolution(index, DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    pub fn with_resolution(index: u32, width: u32, height: u32) -> Result<Self, CaptureError> {
        info!("Opening webcam {} (requested {}x{})", index, width, height);

        let format =
            CameraFormat::new(Resolution::new(width, height), FrameFormat::MJPEG, DEFAULT_FPS);
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(format));
        let mut camera = Camera::new(CameraIndex::Index(index), requested)
            .map_err(|e| CaptureError::OpenFailed(e.to_string()))?;
        camera
            .open_stream()
            .map_err(|e| CaptureError::OpenFailed(e.to_string()))?;

        let resolution = camera.resolution();
        info!(
            "Webcam opened: {}x{} @ {} fps",
            resolution.width(),
            resolution.height(),
            camera.frame_rate()
        );

        Ok(Self {
            camera,
            start_time: Instant::now(),
            frame_count: 0,
            active: true,
            resolution: (resolution.width(), resolution.height()),
        })
    }

    /// List available webcam devices.
    pub fn list_devices() -> Result<Vec<String>, CaptureError> {
        let devices = nokhwa::query(nokhwa::utils::ApiBackend::Auto)
            .map_err(|e| CaptureError::DeviceNotFound(e.to_string()))?;

        Ok(devices
            .into_iter()
            .map(|info| format!("{}: {}", info.index(), info.human_name()))
            .collect())
    }
}

impl CaptureSource for WebcamCapture {
    fn next_frame(&mut self) -> Result<Option<FrameData>, CaptureError> {
        if !self.active {
            return Ok(None);
        }

        let frame = self
            .camera
            .frame()
            .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;
        let decoded = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

        let timestamp = self.start_time.elapsed().as_secs_f64();
        self.frame_count += 1;
        debug!("Captured frame {} at {:.3}s", self.frame_count, timestamp);

        let (width, height) = (decoded.width(), decoded.height());
        let image = RgbImage::from_raw(width, height, decoded.into_raw())
            .ok_or_else(|| CaptureError::CaptureFailed("frame buffer size mismatch".to_string()))?;

        Ok(Some(FrameData::new(image, timestamp, self.frame_count)))
    }

    fn frame_rate(&self) -> Option<f32> {
        Some(self.camera.frame_rate() as f32)
    }

    fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn stop(&mut self) {
        if self.active {
            self.active = false;
            if let Err(e) = self.camera.stop_stream() {
                debug!("Closing webcam stream: {e}");
            }
            info!("Webcam capture stopped after {} frames", self.frame_count);
        }
    }
}

impl Drop for WebcamCapture {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Camera permission check backed by a real device.
///
/// Opening the device is the permission prompt: the OS asks the user on
/// first access and a refusal surfaces as an open failure.
pub struct WebcamAccess {
    index: u32,
    capture: Option<WebcamCapture>,
}

impl WebcamAccess {
    pub fn new(index: u32) -> Self {
        Self { index, capture: None }
    }

    /// The device opened during a granted request.
    pub fn take_capture(&mut self) -> Option<WebcamCapture> {
        self.capture.take()
    }
}

impl CameraAccess for WebcamAccess {
    fn request_access(&mut self) -> Result<(), SessionError> {
        let capture = WebcamCapture::new(self.index)
            .map_err(|e| SessionError::PermissionDenied(e.to_string()))?;
        self.capture = Some(capture);
        Ok(())
    }
}
