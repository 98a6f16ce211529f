//! Mode control
//!
//! The TREE / EXPLODED / FOCUS transition table and the camera session that
//! decides whether gestures or manual buttons drive it.

pub mod mode;
pub mod session;

pub use mode::{ModeEvent, transition};
pub use session::{CameraAccess, CameraSession, SessionError, SessionState};
