//! Mode transition table.

use glam::Vec2;
use lumiere_data::{AppMode, GestureKind, ManualCommand};

/// Something that may change the application mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModeEvent {
    /// A debounced gesture, with the pointer it was made at.
    Gesture { kind: GestureKind, pointer: Vec2 },
    /// A manual UI button. Applies unconditionally.
    Manual(ManualCommand),
}

/// Compute the next mode.
///
/// | current    | event      | next     |
/// |------------|------------|----------|
/// | any        | fist       | tree     |
/// | tree       | open hand  | exploded |
/// | exploded   | pinch      | focus on the picked photo, if any |
///
/// Everything else leaves the mode unchanged. There is no gesture out of
/// focus other than the fist. `pick` is only called for a pinch while
/// exploded and maps the pointer to a photo particle id.
pub fn transition(
    current: AppMode,
    event: ModeEvent,
    pick: impl FnOnce(Vec2) -> Option<u32>,
) -> AppMode {
    match event {
        ModeEvent::Manual(command) => command.target_mode(),
        ModeEvent::Gesture { kind, pointer } => match (current, kind) {
            (_, GestureKind::Fist) => AppMode::Tree,
            (AppMode::Tree, GestureKind::OpenHand) => AppMode::Exploded,
            (AppMode::Exploded, GestureKind::Pinch) => match pick(pointer) {
                Some(particle) => AppMode::Focus { particle },
                None => current,
            },
            _ => current,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_MODES: [AppMode; 3] =
        [AppMode::Tree, AppMode::Exploded, AppMode::Focus { particle: 4 }];

    fn gesture(kind: GestureKind) -> ModeEvent {
        ModeEvent::Gesture {
            kind,
            pointer: Vec2::splat(0.5),
        }
    }

    fn no_pick(_: Vec2) -> Option<u32> {
        None
    }

    #[test]
    fn test_fist_always_returns_to_tree() {
        for mode in ALL_MODES {
            assert_eq!(transition(mode, gesture(GestureKind::Fist), no_pick), AppMode::Tree);
        }
    }

    #[test]
    fn test_open_hand_only_explodes_from_tree() {
        assert_eq!(
            transition(AppMode::Tree, gesture(GestureKind::OpenHand), no_pick),
            AppMode::Exploded
        );
        assert_eq!(
            transition(AppMode::Exploded, gesture(GestureKind::OpenHand), no_pick),
            AppMode::Exploded
        );
        let focus = AppMode::Focus { particle: 4 };
        assert_eq!(transition(focus, gesture(GestureKind::OpenHand), no_pick), focus);
    }

    #[test]
    fn test_pinch_focuses_picked_particle() {
        let next = transition(AppMode::Exploded, gesture(GestureKind::Pinch), |_| Some(9));
        assert_eq!(next, AppMode::Focus { particle: 9 });
    }

    #[test]
    fn test_pinch_without_target_is_noop() {
        assert_eq!(
            transition(AppMode::Exploded, gesture(GestureKind::Pinch), no_pick),
            AppMode::Exploded
        );
    }

    #[test]
    fn test_pinch_ignored_outside_exploded() {
        let mut picked = false;
        let next = transition(AppMode::Tree, gesture(GestureKind::Pinch), |_| {
            picked = true;
            Some(1)
        });
        assert_eq!(next, AppMode::Tree);
        assert!(!picked);

        let focus = AppMode::Focus { particle: 4 };
        assert_eq!(transition(focus, gesture(GestureKind::Pinch), |_| Some(1)), focus);
    }

    #[test]
    fn test_idle_and_point_are_noops() {
        for mode in ALL_MODES {
            assert_eq!(transition(mode, gesture(GestureKind::Idle), no_pick), mode);
            assert_eq!(transition(mode, gesture(GestureKind::Point), no_pick), mode);
        }
    }

    #[test]
    fn test_manual_commands_set_mode_directly() {
        for mode in ALL_MODES {
            assert_eq!(
                transition(mode, ModeEvent::Manual(ManualCommand::ShowTree), no_pick),
                AppMode::Tree
            );
            assert_eq!(
                transition(mode, ModeEvent::Manual(ManualCommand::Explode), no_pick),
                AppMode::Exploded
            );
        }
    }
}
