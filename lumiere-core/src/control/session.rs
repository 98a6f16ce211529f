//! Camera session capability.
//!
//! Whether gesture input is live is an explicit value owned by the
//! experience, not a global flag. Lifecycle:
//!
//! ```text
//! Uninitialized --request--> Granted --activate--> Active --revoke--> Revoked
//!       |
//!       +--request (denied)--> Denied   (terminal, no retry)
//! ```

use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised by the camera session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Camera permission denied: {0}")]
    PermissionDenied(String),

    #[error("Camera permission was already denied for this session")]
    AlreadyDenied,

    #[error("Invalid session transition from {from} to {to}")]
    InvalidTransition {
        from: SessionState,
        to: SessionState,
    },
}

/// Lifecycle state of the camera capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Granted,
    Active,
    Revoked,
    Denied,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Uninitialized => write!(f, "uninitialized"),
            SessionState::Granted => write!(f, "granted"),
            SessionState::Active => write!(f, "active"),
            SessionState::Revoked => write!(f, "revoked"),
            SessionState::Denied => write!(f, "denied"),
        }
    }
}

/// Something that can ask the platform for camera access.
pub trait CameraAccess {
    /// Perform the one-shot permission request.
    fn request_access(&mut self) -> Result<(), SessionError>;
}

/// Session-scoped camera capability.
#[derive(Debug, Default)]
pub struct CameraSession {
    state: SessionState,
}

impl CameraSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Ask for camera access once.
    ///
    /// A denial is reported once and sticks for the rest of the session; later
    /// calls fail with [`SessionError::AlreadyDenied`] without touching the
    /// device again.
    pub fn request(&mut self, access: &mut dyn CameraAccess) -> Result<(), SessionError> {
        match self.state {
            SessionState::Uninitialized => {}
            SessionState::Denied => return Err(SessionError::AlreadyDenied),
            from => {
                return Err(SessionError::InvalidTransition {
                    from,
                    to: SessionState::Granted,
                });
            }
        }

        match access.request_access() {
            Ok(()) => {
                info!("Camera access granted");
                self.state = SessionState::Granted;
                Ok(())
            }
            Err(err) => {
                warn!("{err}; falling back to manual controls");
                self.state = SessionState::Denied;
                Err(err)
            }
        }
    }

    /// Start delivering gesture input.
    pub fn activate(&mut self) -> Result<(), SessionError> {
        self.move_to(SessionState::Granted, SessionState::Active)?;
        info!("Gesture input active");
        Ok(())
    }

    /// Tear down gesture input. Further frames are discarded.
    pub fn revoke(&mut self) -> Result<(), SessionError> {
        self.move_to(SessionState::Active, SessionState::Revoked)?;
        info!("Gesture input revoked");
        Ok(())
    }

    pub fn gestures_enabled(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Manual mode buttons are offered whenever gestures are not live.
    pub fn manual_controls_visible(&self) -> bool {
        !self.gestures_enabled()
    }

    fn move_to(&mut self, expected: SessionState, to: SessionState) -> Result<(), SessionError> {
        if self.state != expected {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingAccess {
        grant: bool,
        calls: usize,
    }

    impl CameraAccess for CountingAccess {
        fn request_access(&mut self) -> Result<(), SessionError> {
            self.calls += 1;
            if self.grant {
                Ok(())
            } else {
                Err(SessionError::PermissionDenied("user dismissed prompt".into()))
            }
        }
    }

    #[test]
    fn test_full_lifecycle() {
        let mut session = CameraSession::new();
        assert!(session.manual_controls_visible());

        let mut access = CountingAccess { grant: true, calls: 0 };
        session.request(&mut access).unwrap();
        assert_eq!(session.state(), SessionState::Granted);
        assert!(!session.gestures_enabled());

        session.activate().unwrap();
        assert!(session.gestures_enabled());
        assert!(!session.manual_controls_visible());

        session.revoke().unwrap();
        assert_eq!(session.state(), SessionState::Revoked);
        assert!(session.manual_controls_visible());
    }

    #[test]
    fn test_denial_is_permanent() {
        let mut session = CameraSession::new();
        let mut access = CountingAccess { grant: false, calls: 0 };
        assert!(matches!(
            session.request(&mut access),
            Err(SessionError::PermissionDenied(_))
        ));
        assert_eq!(session.state(), SessionState::Denied);

        access.grant = true;
        assert!(matches!(session.request(&mut access), Err(SessionError::AlreadyDenied)));
        assert_eq!(access.calls, 1);
        assert!(session.manual_controls_visible());
    }

    #[test]
    fn test_cannot_activate_without_grant() {
        let mut session = CameraSession::new();
        assert!(matches!(
            session.activate(),
            Err(SessionError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_cannot_request_twice() {
        let mut session = CameraSession::new();
        let mut access = CountingAccess { grant: true, calls: 0 };
        session.request(&mut access).unwrap();
        assert!(session.request(&mut access).is_err());
        assert_eq!(access.calls, 1);
    }

    #[test]
    fn test_revoked_cannot_reactivate() {
        let mut session = CameraSession::new();
        let mut access = CountingAccess { grant: true, calls: 0 };
        session.request(&mut access).unwrap();
        session.activate().unwrap();
        session.revoke().unwrap();
        assert!(session.activate().is_err());
        assert!(session.revoke().is_err());
    }
}
