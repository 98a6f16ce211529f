//! The single owner of all interactive state, advanced once per rendered frame.

use crate::control::{CameraAccess, CameraSession, ModeEvent, SessionError, transition};
use crate::gesture::GestureClassifier;
use crate::ingest::LandmarkFrame;
use crate::scene::{ParticleAnimator, PhotoLibrary, PhotoRef, RenderState};
use lumiere_data::{
    AppMode, ConfigError, ExperienceConfig, GestureState, ManualCommand, particle_layout,
};
use rand::Rng;
use tracing::{debug, info, trace};

/// Inputs available to one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput<'a> {
    /// Most recent detector result. May repeat across ticks.
    pub frame: Option<&'a LandmarkFrame>,
    /// Button pressed since the last tick.
    pub manual: Option<ManualCommand>,
    /// Seconds since the previous tick.
    pub dt: f32,
}

impl<'a> TickInput<'a> {
    pub fn idle(dt: f32) -> Self {
        Self {
            dt,
            ..Self::default()
        }
    }

    pub fn with_frame(frame: &'a LandmarkFrame, dt: f32) -> Self {
        Self {
            frame: Some(frame),
            manual: None,
            dt,
        }
    }

    pub fn with_manual(command: ManualCommand, dt: f32) -> Self {
        Self {
            frame: None,
            manual: Some(command),
            dt,
        }
    }
}

/// Mode, gesture, camera session, particles and photos for one session.
///
/// Everything is mutated only from [`Experience::tick`] and the explicit
/// command methods; there are no other writers.
pub struct Experience {
    config: ExperienceConfig,
    classifier: GestureClassifier,
    session: CameraSession,
    animator: ParticleAnimator,
    photos: PhotoLibrary,
    gesture: GestureState,
    mode: AppMode,
    render: RenderState,
    ticks: u64,
}

impl Experience {
    /// Build a session with a fresh random explosion layout.
    pub fn new(config: ExperienceConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    /// Build a session drawing the explosion layout from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        config: ExperienceConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let particles = particle_layout(&config.scene, rng);
        let animator = ParticleAnimator::new(particles, config.animation.clone());
        let photos = PhotoLibrary::with_defaults(config.scene.max_photos);
        let classifier = GestureClassifier::new(config.gesture.clone());

        info!(
            "Experience ready: {} particles, {} photo slots, {} photos",
            animator.len(),
            config.scene.photo_count,
            photos.len()
        );

        let mut experience = Self {
            config,
            classifier,
            session: CameraSession::new(),
            animator,
            photos,
            gesture: GestureState::idle(),
            mode: AppMode::Tree,
            render: RenderState::new(),
            ticks: 0,
        };
        experience.refresh_render_state();
        Ok(experience)
    }

    /// Advance one frame.
    ///
    /// A manual command applies first and suppresses any gesture event this
    /// tick. Frames are classified only while the camera session is active;
    /// otherwise they are dropped.
    pub fn tick(&mut self, input: TickInput<'_>) -> &RenderState {
        let previous = self.mode;

        let gesture_event = if self.session.gestures_enabled() {
            let update = self.classifier.update(input.frame);
            self.gesture = update.state;
            update.stable.map(|kind| ModeEvent::Gesture {
                kind,
                pointer: update.state.position,
            })
        } else {
            if let Some(frame) = input.frame {
                trace!("Gesture input inactive, dropping frame {}", frame.sequence);
            }
            None
        };

        if let Some(command) = input.manual {
            if gesture_event.is_some() {
                debug!("Manual {:?} overrides gesture this tick", command);
            }
            self.mode = transition(self.mode, ModeEvent::Manual(command), |_| None);
        } else if let Some(event) = gesture_event {
            let animator = &self.animator;
            let projection = &self.config.pointer;
            let radius = self.config.gesture.pick_radius;
            self.mode = transition(self.mode, event, |pointer| {
                animator.pick_photo(projection.to_world(pointer), radius)
            });
        }

        if self.mode != previous {
            match self.mode {
                AppMode::Focus { particle } => {
                    info!("Mode {} -> {} (particle {})", previous, self.mode, particle)
                }
                _ => info!("Mode {} -> {}", previous, self.mode),
            }
            self.animator.set_mode(self.mode);
        }

        self.animator.step(input.dt);
        self.ticks += 1;
        self.refresh_render_state();
        &self.render
    }

    /// Apply a manual command outside of a tick.
    pub fn apply_manual(&mut self, command: ManualCommand) {
        let next = transition(self.mode, ModeEvent::Manual(command), |_| None);
        if next != self.mode {
            info!("Mode {} -> {} (manual)", self.mode, next);
            self.mode = next;
            self.animator.set_mode(next);
            self.refresh_render_state();
        }
    }

    /// Request camera access once and, if granted, start gesture input.
    ///
    /// On failure the session stays in manual mode for good.
    pub fn request_camera(&mut self, access: &mut dyn CameraAccess) -> Result<(), SessionError> {
        self.session.request(access)?;
        self.session.activate()?;
        self.classifier.reset();
        self.refresh_render_state();
        Ok(())
    }

    /// Tear down gesture input. Frames still in flight are ignored from now on.
    pub fn disable_camera(&mut self) -> Result<(), SessionError> {
        self.session.revoke()?;
        self.classifier.reset();
        self.gesture = GestureState::idle();
        self.refresh_render_state();
        Ok(())
    }

    /// Add user photos; photo particles keep their identity and positions.
    pub fn add_photos<I>(&mut self, photos: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<PhotoRef>,
    {
        let dropped = self.photos.add_photos(photos);
        self.refresh_render_state();
        dropped
    }

    fn refresh_render_state(&mut self) {
        self.render.update(
            &self.animator,
            &self.photos,
            &self.gesture,
            self.session.manual_controls_visible(),
        );
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn session(&self) -> &CameraSession {
        &self.session
    }

    pub fn animator(&self) -> &ParticleAnimator {
        &self.animator
    }

    pub fn photos(&self) -> &PhotoLibrary {
        &self.photos
    }

    pub fn render_state(&self) -> &RenderState {
        &self.render
    }

    pub fn config(&self) -> &ExperienceConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
