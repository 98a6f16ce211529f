//! Status overlay text.

use lumiere_core::RenderState;
use lumiere_data::{AppMode, GestureKind};

/// Hint shown under the current gesture.
pub fn gesture_hint(kind: GestureKind) -> Option<&'static str> {
    match kind {
        GestureKind::Idle => Some("Show hand to interact"),
        GestureKind::Fist => Some("Forming the Tree"),
        GestureKind::OpenHand => Some("Exploding particles"),
        GestureKind::Pinch => Some("Focusing content"),
        GestureKind::Point => None,
    }
}

/// The parts of a render state the overlay depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub mode: AppMode,
    pub gesture: GestureKind,
    pub manual_controls: bool,
}

impl Status {
    pub fn from_render_state(state: &RenderState) -> Self {
        Self {
            mode: state.mode,
            gesture: state.gesture,
            manual_controls: state.manual_controls_visible,
        }
    }

    /// One-line overlay: either the gesture readout or the manual buttons.
    pub fn line(&self) -> String {
        if self.manual_controls {
            let (tree, explode) = match self.mode {
                AppMode::Tree => ("[TREE MODE]", " EXPLODE MODE "),
                _ => (" TREE MODE ", "[EXPLODE MODE]"),
            };
            return format!("{} | {}{}", self.mode, tree, explode);
        }
        match gesture_hint(self.gesture) {
            Some(hint) => format!("{} | Current Gesture: {} - {}", self.mode, self.gesture, hint),
            None => format!("{} | Current Gesture: {}", self.mode, self.gesture),
        }
    }
}

/// Remembers the last status so only changes are reported.
#[derive(Debug, Default)]
pub struct StatusLine {
    last: Option<Status>,
}

impl StatusLine {
    /// New overlay text if anything visible changed.
    pub fn observe(&mut self, state: &RenderState) -> Option<String> {
        let status = Status::from_render_state(state);
        if self.last == Some(status) {
            return None;
        }
        self.last = Some(status);
        Some(status.line())
    }
}
