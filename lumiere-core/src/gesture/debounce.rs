//! Consecutive-match counter for raw gesture classifications.

use lumiere_data::GestureKind;

/// Requires `window` consecutive identical observations before a gesture
/// counts as stable. Once stable it stays stable until a different gesture
/// is observed.
#[derive(Debug, Clone)]
pub struct Debounce {
    window: u32,
    candidate: GestureKind,
    streak: u32,
}

impl Debounce {
    pub fn new(window: u32) -> Self {
        Self {
            window: window.max(1),
            candidate: GestureKind::Idle,
            streak: 0,
        }
    }

    /// Record one raw classification and return the stable gesture, if any.
    pub fn observe(&mut self, kind: GestureKind) -> Option<GestureKind> {
        if kind == self.candidate {
            self.streak = self.streak.saturating_add(1);
        } else {
            self.candidate = kind;
            self.streak = 1;
        }
        self.stable()
    }

    pub fn stable(&self) -> Option<GestureKind> {
        (self.streak >= self.window).then_some(self.candidate)
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn window(&self) -> u32 {
        self.window
    }

    pub fn reset(&mut self) {
        self.candidate = GestureKind::Idle;
        self.streak = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_full_window() {
        let mut debounce = Debounce::new(3);
        assert_eq!(debounce.observe(GestureKind::Fist), None);
        assert_eq!(debounce.observe(GestureKind::Fist), None);
        assert_eq!(debounce.observe(GestureKind::Fist), Some(GestureKind::Fist));
        assert_eq!(debounce.observe(GestureKind::Fist), Some(GestureKind::Fist));
    }

    #[test]
    fn test_conflicting_frame_restarts_streak() {
        let mut debounce = Debounce::new(3);
        debounce.observe(GestureKind::OpenHand);
        debounce.observe(GestureKind::OpenHand);
        assert_eq!(debounce.observe(GestureKind::Fist), None);
        assert_eq!(debounce.observe(GestureKind::OpenHand), None);
        assert_eq!(debounce.streak(), 1);
    }

    #[test]
    fn test_alternating_frames_never_stabilize() {
        let mut debounce = Debounce::new(2);
        for i in 0..20 {
            let kind = if i % 2 == 0 {
                GestureKind::Fist
            } else {
                GestureKind::OpenHand
            };
            assert_eq!(debounce.observe(kind), None);
        }
    }

    #[test]
    fn test_zero_window_behaves_as_one() {
        let mut debounce = Debounce::new(0);
        assert_eq!(debounce.window(), 1);
        assert_eq!(debounce.observe(GestureKind::Pinch), Some(GestureKind::Pinch));
    }

    #[test]
    fn test_reset() {
        let mut debounce = Debounce::new(1);
        debounce.observe(GestureKind::Fist);
        debounce.reset();
        assert_eq!(debounce.stable(), None);
        assert_eq!(debounce.streak(), 0);
    }
}
