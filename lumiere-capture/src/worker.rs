//! Background producer thread for landmark streams.
//!
//! The detector runs on its own thread and hands results to the render loop
//! over a bounded channel. The render loop only ever asks for the most recent
//! result, so it never blocks on detection.

use crate::source::CaptureError;
use lumiere_core::{LandmarkFrame, LandmarkStream, StreamError};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

const CHANNEL_CAPACITY: usize = 64;
const FALLBACK_FPS: f32 = 30.0;

/// How fast the producer thread pulls from its stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    /// As fast as the stream yields.
    #[default]
    Immediate,
    /// Sleep one frame interval (from the stream's frame rate) between frames.
    Realtime,
}

/// Render-side handle of a running producer.
pub struct StreamHandle {
    receiver: Option<Receiver<LandmarkFrame>>,
    latest: Option<LandmarkFrame>,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<Result<u64, StreamError>>>,
}

/// Move `stream` onto a producer thread.
pub fn spawn_stream<S>(stream: S, pacing: Pacing) -> StreamHandle
where
    S: LandmarkStream + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel(CHANNEL_CAPACITY);
    let stop = Arc::new(AtomicBool::new(false));
    let interval = match pacing {
        Pacing::Immediate => None,
        Pacing::Realtime => {
            let fps = stream.frame_rate().filter(|fps| *fps > 0.0).unwrap_or(FALLBACK_FPS);
            Some(Duration::from_secs_f32(1.0 / fps))
        }
    };

    let flag = Arc::clone(&stop);
    let worker = thread::spawn(move || produce(stream, tx, flag, interval));
    info!("Landmark producer started ({:?})", pacing);

    StreamHandle {
        receiver: Some(rx),
        latest: None,
        stop,
        worker: Some(worker),
    }
}

fn produce<S: LandmarkStream>(
    mut stream: S,
    tx: SyncSender<LandmarkFrame>,
    stop: Arc<AtomicBool>,
    interval: Option<Duration>,
) -> Result<u64, StreamError> {
    let mut produced = 0u64;
    while !stop.load(Ordering::Acquire) {
        match stream.next_frame() {
            Ok(Some(frame)) => {
                produced += 1;
                if tx.send(frame).is_err() {
                    debug!("Landmark consumer gone");
                    break;
                }
            }
            Ok(None) => break,
            Err(err) => {
                warn!("Landmark stream failed: {err}");
                stream.stop();
                return Err(err);
            }
        }
        if let Some(interval) = interval {
            thread::sleep(interval);
        }
    }
    stream.stop();
    Ok(produced)
}

impl StreamHandle {
    /// Most recent frame received so far. Returns the same frame again when
    /// nothing new arrived; `None` before the first frame and after `stop`.
    pub fn latest(&mut self) -> Option<&LandmarkFrame> {
        let receiver = self.receiver.as_ref()?;
        if let Some(frame) = receiver.try_iter().last() {
            self.latest = Some(frame);
        }
        self.latest.as_ref()
    }

    /// True once the producer thread has exited.
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Cancel the producer and wait for it. Frames still in flight are
    /// discarded. Returns how many frames the producer emitted.
    pub fn stop(&mut self) -> Result<u64, CaptureError> {
        self.stop.store(true, Ordering::Release);
        // Dropping the receiver unblocks a producer waiting on a full channel.
        self.receiver = None;
        self.latest = None;

        let Some(worker) = self.worker.take() else {
            return Ok(0);
        };
        let produced = worker
            .join()
            .map_err(|_| CaptureError::CaptureFailed("landmark producer panicked".into()))??;
        info!("Landmark producer stopped after {} frames", produced);
        Ok(produced)
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        if self.worker.is_some() {
            if let Err(err) = self.stop() {
                warn!("Landmark producer ended with an error: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReplaySource;
    use lumiere_data::HandLandmark;
    use std::time::Instant;

    fn replay(frames: usize) -> ReplaySource {
        let pose = vec![HandLandmark::default(); 21];
        ReplaySource::from_frames(vec![Some(pose); frames], Some(30.0))
    }

    fn wait_until_finished(handle: &StreamHandle) {
        let start = Instant::now();
        while !handle.is_finished() {
            assert!(start.elapsed() < Duration::from_secs(5), "producer did not finish");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_latest_is_most_recent() {
        let mut handle = spawn_stream(replay(5), Pacing::Immediate);
        wait_until_finished(&handle);
        assert_eq!(handle.latest().map(|f| f.sequence), Some(5));
        // Repeats are allowed.
        assert_eq!(handle.latest().map(|f| f.sequence), Some(5));
        assert_eq!(handle.stop().unwrap(), 5);
    }

    #[test]
    fn test_stop_cancels_endless_stream() {
        let mut handle = spawn_stream(replay(3).with_looping(true), Pacing::Immediate);
        thread::sleep(Duration::from_millis(20));
        let produced = handle.stop().unwrap();
        assert!(produced > 0);
        assert!(handle.latest().is_none());
        assert!(handle.is_finished());
    }

    #[test]
    fn test_stop_twice() {
        let mut handle = spawn_stream(replay(1), Pacing::Realtime);
        handle.stop().unwrap();
        assert_eq!(handle.stop().unwrap(), 0);
    }

    #[test]
    fn test_stream_error_is_reported() {
        struct Broken;

        impl LandmarkStream for Broken {
            fn next_frame(&mut self) -> Result<Option<LandmarkFrame>, StreamError> {
                Err(StreamError::InvalidData("corrupt".into()))
            }
            fn frame_rate(&self) -> Option<f32> {
                None
            }
            fn is_active(&self) -> bool {
                true
            }
            fn stop(&mut self) {}
        }

        let mut handle = spawn_stream(Broken, Pacing::Immediate);
        wait_until_finished(&handle);
        assert!(matches!(
            handle.stop(),
            Err(CaptureError::Stream(StreamError::InvalidData(_)))
        ));

        // Dropping a handle whose producer failed reports instead of panicking.
        let handle = spawn_stream(Broken, Pacing::Immediate);
        wait_until_finished(&handle);
        drop(handle);
    }
}
