//! Landmark-to-gesture classification

use crate::gesture::Debounce;
use crate::ingest::LandmarkFrame;
use lumiere_data::types::{FINGER_TIPS, INDEX_TIP, THUMB_TIP};
use lumiere_data::{GestureConfig, GestureKind, GestureState, HandPose};
use tracing::{debug, trace};

/// Result of one classifier update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureUpdate {
    /// Raw classification of the latest frame.
    pub state: GestureState,
    /// Debounced gesture, present once it has held for the full window.
    pub stable: Option<GestureKind>,
}

/// Classify a single complete hand pose.
///
/// Rules, first match wins:
/// 1. every fingertip within `fist_threshold` of the palm: fist
/// 2. every fingertip beyond `open_threshold`: open hand
/// 3. thumb tip within `pinch_threshold` of the index tip: pinch
/// 4. anything else: point
///
/// Distances are measured in hand-scale units (wrist to middle knuckle) so the
/// thresholds hold regardless of how far the hand is from the camera. A
/// degenerate pose with zero scale is treated as no hand.
pub fn classify_pose(pose: &HandPose, config: &GestureConfig) -> GestureState {
    let palm = pose.palm_center();
    let position = palm.truncate();
    let scale = pose.hand_scale();
    if !(scale > f32::EPSILON) {
        return GestureState::new(GestureKind::Idle, position);
    }

    let tip_ratios = FINGER_TIPS.map(|tip| pose.landmark(tip).to_vec3().distance(palm) / scale);

    if tip_ratios.iter().all(|r| *r < config.fist_threshold) {
        return GestureState::new(GestureKind::Fist, position);
    }
    if tip_ratios.iter().all(|r| *r > config.open_threshold) {
        return GestureState::new(GestureKind::OpenHand, position);
    }

    let pinch = pose.landmark(THUMB_TIP).distance(pose.landmark(INDEX_TIP)) / scale;
    if pinch < config.pinch_threshold {
        return GestureState::pinch(position, pinch);
    }

    GestureState::new(GestureKind::Point, position)
}

/// Stateful classifier holding the debounce counter.
///
/// Safe to call every render tick with the most recent detector frame: a frame
/// whose sequence number was already counted is a repeat and leaves the
/// counter untouched.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    config: GestureConfig,
    debounce: Debounce,
    last_sequence: Option<u64>,
    current: GestureState,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        let debounce = Debounce::new(config.debounce_frames);
        Self {
            config,
            debounce,
            last_sequence: None,
            current: GestureState::idle(),
        }
    }

    /// Classify the latest frame. `None` means the detector has nothing,
    /// which is the same as seeing no hand.
    pub fn update(&mut self, frame: Option<&LandmarkFrame>) -> GestureUpdate {
        if let Some(frame) = frame {
            if self.last_sequence == Some(frame.sequence) {
                trace!("Repeat of frame {}, keeping {}", frame.sequence, self.current.kind);
                return self.snapshot();
            }
            self.last_sequence = Some(frame.sequence);
        }

        let state = match frame.and_then(LandmarkFrame::pose) {
            Some(pose) => classify_pose(&pose, &self.config),
            // Keep the pointer where it was so cursors do not jump.
            None => GestureState::new(GestureKind::Idle, self.current.position),
        };

        if state.kind != self.current.kind {
            debug!("Raw gesture {} -> {}", self.current.kind, state.kind);
        }
        self.current = state;
        self.debounce.observe(state.kind);
        self.snapshot()
    }

    /// Latest raw gesture.
    pub fn current(&self) -> GestureState {
        self.current
    }

    pub fn stable(&self) -> Option<GestureKind> {
        self.debounce.stable()
    }

    /// Forget all history, as if the camera had just been switched on.
    pub fn reset(&mut self) {
        self.debounce.reset();
        self.last_sequence = None;
        self.current = GestureState::idle();
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    fn snapshot(&self) -> GestureUpdate {
        GestureUpdate {
            state: self.current,
            stable: self.debounce.stable(),
        }
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use lumiere_data::{HandLandmark, hand_pose};

    fn pose(kind: GestureKind, center: Vec2) -> HandPose {
        HandPose::from_landmarks(&hand_pose(kind, center)).unwrap()
    }

    fn frame(kind: GestureKind, sequence: u64) -> LandmarkFrame {
        LandmarkFrame::new(hand_pose(kind, Vec2::splat(0.5)), sequence as f64 / 30.0, sequence)
    }

    #[test]
    fn test_classify_reference_poses() {
        let config = GestureConfig::default();
        let center = Vec2::new(0.4, 0.6);
        let kinds = [
            GestureKind::Fist,
            GestureKind::OpenHand,
            GestureKind::Pinch,
            GestureKind::Point,
        ];
        for kind in kinds {
            let state = classify_pose(&pose(kind, center), &config);
            assert_eq!(state.kind, kind);
            assert!((state.position - center).length() < 1e-5);
        }
    }

    #[test]
    fn test_pinch_reports_distance() {
        let pinch = pose(GestureKind::Pinch, Vec2::splat(0.5));
        let state = classify_pose(&pinch, &GestureConfig::default());
        let distance = state.pinch_distance.unwrap();
        assert!(distance > 0.0 && distance < 0.25);
    }

    #[test]
    fn test_non_pinch_has_no_distance() {
        let point = pose(GestureKind::Point, Vec2::splat(0.5));
        let state = classify_pose(&point, &GestureConfig::default());
        assert!(state.pinch_distance.is_none());
    }

    #[test]
    fn test_classification_is_scale_invariant() {
        // The same fist, shrunk to a quarter of the size around its palm.
        let center = Vec2::splat(0.5);
        let small: Vec<HandLandmark> = hand_pose(GestureKind::Fist, center)
            .into_iter()
            .map(|p| {
                HandLandmark::new(
                    center.x + (p.x - center.x) * 0.25,
                    center.y + (p.y - center.y) * 0.25,
                    0.0,
                )
            })
            .collect();
        let pose = HandPose::from_landmarks(&small).unwrap();
        assert_eq!(classify_pose(&pose, &GestureConfig::default()).kind, GestureKind::Fist);
    }

    #[test]
    fn test_degenerate_pose_is_idle() {
        let points = vec![HandLandmark::new(0.5, 0.5, 0.0); 21];
        let pose = HandPose::from_landmarks(&points).unwrap();
        assert_eq!(classify_pose(&pose, &GestureConfig::default()).kind, GestureKind::Idle);
    }

    #[test]
    fn test_no_hand_is_idle_regardless_of_history() {
        let mut classifier = GestureClassifier::default();
        for seq in 0..5 {
            classifier.update(Some(&frame(GestureKind::Fist, seq)));
        }
        assert_eq!(classifier.stable(), Some(GestureKind::Fist));

        let update = classifier.update(Some(&LandmarkFrame::none(1.0, 10)));
        assert_eq!(update.state.kind, GestureKind::Idle);
        let update = classifier.update(None);
        assert_eq!(update.state.kind, GestureKind::Idle);
    }

    #[test]
    fn test_short_frame_is_idle() {
        let mut classifier = GestureClassifier::default();
        let mut points = hand_pose(GestureKind::OpenHand, Vec2::splat(0.5));
        points.truncate(20);
        let update = classifier.update(Some(&LandmarkFrame::new(points, 0.0, 1)));
        assert_eq!(update.state.kind, GestureKind::Idle);
    }

    #[test]
    fn test_debounce_window() {
        let mut classifier = GestureClassifier::default();
        assert_eq!(classifier.update(Some(&frame(GestureKind::OpenHand, 1))).stable, None);
        assert_eq!(classifier.update(Some(&frame(GestureKind::OpenHand, 2))).stable, None);
        assert_eq!(
            classifier.update(Some(&frame(GestureKind::OpenHand, 3))).stable,
            Some(GestureKind::OpenHand)
        );
    }

    #[test]
    fn test_repeated_frame_does_not_advance_debounce() {
        let mut classifier = GestureClassifier::default();
        let first = frame(GestureKind::Fist, 1);
        for _ in 0..10 {
            let update = classifier.update(Some(&first));
            assert_eq!(update.state.kind, GestureKind::Fist);
            assert_eq!(update.stable, None);
        }
        classifier.update(Some(&frame(GestureKind::Fist, 2)));
        let update = classifier.update(Some(&frame(GestureKind::Fist, 3)));
        assert_eq!(update.stable, Some(GestureKind::Fist));
    }

    #[test]
    fn test_single_conflicting_frame_does_not_flap() {
        let mut classifier = GestureClassifier::default();
        for seq in 1..=4 {
            classifier.update(Some(&frame(GestureKind::OpenHand, seq)));
        }
        let update = classifier.update(Some(&frame(GestureKind::Fist, 5)));
        assert_eq!(update.state.kind, GestureKind::Fist);
        assert_ne!(update.stable, Some(GestureKind::Fist));
    }

    #[test]
    fn test_idle_keeps_last_pointer() {
        let mut classifier = GestureClassifier::default();
        let center = Vec2::new(0.2, 0.3);
        classifier.update(Some(&LandmarkFrame::new(hand_pose(GestureKind::Point, center), 0.0, 1)));
        let update = classifier.update(Some(&LandmarkFrame::none(0.1, 2)));
        assert!((update.state.position - center).length() < 1e-5);
    }

    #[test]
    fn test_reset() {
        let mut classifier = GestureClassifier::default();
        for seq in 1..=3 {
            classifier.update(Some(&frame(GestureKind::Fist, seq)));
        }
        classifier.reset();
        assert_eq!(classifier.stable(), None);
        assert_eq!(classifier.current(), GestureState::idle());
    }
}
