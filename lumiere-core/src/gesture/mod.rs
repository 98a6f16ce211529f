//! Gesture classification
//!
//! Turns per-frame hand landmarks into discrete gestures and debounces them
//! so that a single noisy frame never reaches the mode machine.

pub mod classifier;
pub mod debounce;

pub use classifier::{GestureClassifier, GestureUpdate, classify_pose};
pub use debounce::Debounce;
