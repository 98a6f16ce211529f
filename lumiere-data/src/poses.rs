//! Synthetic reference hand poses.
//!
//! Each pose is laid out around a palm center so the pointer it produces is
//! exactly the requested position. Used by the demo script and by replays
//! recorded without a detector.

use crate::types::{
    FINGER_MCPS, GestureKind, HAND_LANDMARK_COUNT, HandLandmark, INDEX_MCP, MIDDLE_MCP, PINKY_MCP,
    RING_MCP, THUMB_CMC, THUMB_IP, THUMB_MCP, THUMB_TIP, WRIST,
};
use glam::Vec2;

/// Wrist and knuckles, relative to the palm center (image y grows downward).
const PALM: [(usize, [f32; 2]); 5] = [
    (WRIST, [0.0, 0.16]),
    (INDEX_MCP, [-0.06, -0.04]),
    (MIDDLE_MCP, [-0.02, -0.04]),
    (RING_MCP, [0.02, -0.04]),
    (PINKY_MCP, [0.06, -0.04]),
];

const THUMB_BASE: [[f32; 2]; 3] = [[-0.05, 0.12], [-0.09, 0.07], [-0.12, 0.03]];
const THUMB_OUT: [f32; 2] = [-0.16, -0.01];
const THUMB_TUCKED: [f32; 2] = [-0.03, 0.0];

/// PIP, DIP, tip offsets from the knuckle for a straight finger.
const EXTENDED: [[f32; 2]; 3] = [[0.0, -0.07], [0.0, -0.13], [0.0, -0.18]];

/// PIP, DIP, tip for a finger folded back into the palm.
fn curled(mcp_x: f32) -> [[f32; 2]; 3] {
    [[mcp_x, -0.09], [mcp_x, -0.05], [mcp_x * 0.8, -0.01]]
}

fn extended(mcp: [f32; 2]) -> [[f32; 2]; 3] {
    EXTENDED.map(|[dx, dy]| [mcp[0] + dx, mcp[1] + dy])
}

/// Index finger bent over to touch the thumb tip.
const INDEX_PINCHED: [[f32; 2]; 3] = [[-0.08, -0.10], [-0.11, -0.10], [-0.12, -0.08]];
const THUMB_PINCHED: [f32; 2] = [-0.11, -0.07];

/// A 21-landmark hand showing `kind` with its palm centered on `center`.
///
/// `GestureKind::Idle` has no pose and yields an empty frame.
pub fn hand_pose(kind: GestureKind, center: Vec2) -> Vec<HandLandmark> {
    let mut offsets = [[0.0f32; 2]; HAND_LANDMARK_COUNT];
    for (index, offset) in PALM {
        offsets[index] = offset;
    }
    for (joint, offset) in [THUMB_CMC, THUMB_MCP, THUMB_IP].into_iter().zip(THUMB_BASE) {
        offsets[joint] = offset;
    }

    // Per finger (index, middle, ring, pinky): extended or curled.
    let (fingers, thumb_tip) = match kind {
        GestureKind::Idle => return Vec::new(),
        GestureKind::Fist => ([false; 4], THUMB_TUCKED),
        GestureKind::OpenHand => ([true; 4], THUMB_OUT),
        GestureKind::Point => ([true, false, false, false], THUMB_TUCKED),
        GestureKind::Pinch => ([false, true, true, true], THUMB_PINCHED),
    };
    offsets[THUMB_TIP] = thumb_tip;

    for (finger, &mcp_index) in FINGER_MCPS.iter().enumerate() {
        let mcp = offsets[mcp_index];
        let joints = if fingers[finger] {
            extended(mcp)
        } else if kind == GestureKind::Pinch && mcp_index == INDEX_MCP {
            INDEX_PINCHED
        } else {
            curled(mcp[0])
        };
        // PIP, DIP and tip follow their knuckle in landmark order.
        for (step, joint) in joints.into_iter().enumerate() {
            offsets[mcp_index + 1 + step] = joint;
        }
    }

    offsets
        .iter()
        .map(|[dx, dy]| HandLandmark::new(center.x + dx, center.y + dy, 0.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HandPose;

    #[test]
    fn test_pose_is_centered() {
        let center = Vec2::new(0.3, 0.7);
        let kinds = [
            GestureKind::Fist,
            GestureKind::OpenHand,
            GestureKind::Point,
            GestureKind::Pinch,
        ];
        for kind in kinds {
            let points = hand_pose(kind, center);
            let pose = HandPose::from_landmarks(&points).unwrap();
            assert!((pose.palm_center().truncate() - center).length() < 1e-5);
            assert!((pose.hand_scale() - 0.201).abs() < 1e-3);
        }
    }

    #[test]
    fn test_idle_has_no_landmarks() {
        assert!(hand_pose(GestureKind::Idle, Vec2::splat(0.5)).is_empty());
    }
}
