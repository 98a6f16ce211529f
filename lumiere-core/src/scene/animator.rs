//! Per-tick particle easing toward the current mode's layout

use glam::{Vec2, Vec3};
use lumiere_data::{AnimationConfig, AppMode, ParticleData};
use tracing::debug;

/// Owns the particle set and moves it toward the targets of the current mode.
///
/// Motion is exponential smoothing, never a snap, so changing mode mid-flight
/// stays continuous. Arrival is approximate and raises no event.
#[derive(Debug, Clone)]
pub struct ParticleAnimator {
    config: AnimationConfig,
    particles: Vec<ParticleData>,
    /// Displayed scale per particle; eases between `ParticleData::scale` and
    /// the focus scale.
    scales: Vec<f32>,
    mode: AppMode,
    elapsed: f32,
}

impl ParticleAnimator {
    pub fn new(particles: Vec<ParticleData>, config: AnimationConfig) -> Self {
        let scales = particles.iter().map(|p| p.scale).collect();
        Self {
            config,
            particles,
            scales,
            mode: AppMode::Tree,
            elapsed: 0.0,
        }
    }

    /// Retarget every particle. Positions are untouched until the next step.
    pub fn set_mode(&mut self, mode: AppMode) {
        if mode != self.mode {
            debug!("Animator retargeting {} -> {}", self.mode, mode);
            self.mode = mode;
        }
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    /// Where `particle` is heading in the current mode.
    pub fn target_for(&self, particle: &ParticleData) -> Vec3 {
        match self.mode {
            AppMode::Tree => particle.tree_position(),
            AppMode::Exploded => particle.exploded_position(),
            AppMode::Focus { particle: focused } if focused == particle.id() => {
                self.config.focus_anchor()
            }
            AppMode::Focus { .. } => particle.exploded_position(),
        }
    }

    fn target_scale(&self, particle: &ParticleData) -> f32 {
        match self.mode {
            AppMode::Focus { particle: focused } if focused == particle.id() => {
                self.config.focus_scale
            }
            _ => particle.scale,
        }
    }

    /// Advance one tick. `dt` only drives the idle twinkle clock; easing is
    /// a fixed fraction per tick.
    pub fn step(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
        let damping = self.config.damping;

        for index in 0..self.particles.len() {
            let target = self.target_for(&self.particles[index]);
            let target_scale = self.target_scale(&self.particles[index]);

            let particle = &mut self.particles[index];
            particle.position += (target - particle.position) * damping;

            let scale = &mut self.scales[index];
            *scale += (target_scale - *scale) * damping;
        }
    }

    /// Small sinusoidal drift keyed by particle id and elapsed time.
    pub fn twinkle_offset(&self, id: u32) -> Vec3 {
        let amplitude = self.config.twinkle_amplitude;
        let phase = self.elapsed * self.config.twinkle_speed + id as f32 * 0.37;
        Vec3::new(
            (phase * 0.7).cos() * amplitude * 0.5,
            phase.sin() * amplitude,
            (phase * 1.3).sin() * amplitude * 0.5,
        )
    }

    /// Nearest photo particle to `world` (scene XY plane) within `radius`.
    pub fn pick_photo(&self, world: Vec2, radius: f32) -> Option<u32> {
        self.particles
            .iter()
            .filter(|p| p.kind.is_photo())
            .map(|p| (p.id(), p.position.truncate().distance(world)))
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    pub fn particles(&self) -> &[ParticleData] {
        &self.particles
    }

    pub fn particle(&self, id: u32) -> Option<&ParticleData> {
        self.particles.get(id as usize).filter(|p| p.id() == id)
    }

    /// Current displayed scale of particle `index`.
    pub fn scale_of(&self, index: usize) -> f32 {
        self.scales[index]
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
