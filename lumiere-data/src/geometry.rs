//! Target layouts for the particle field.
//!
//! The tree layout is a deterministic golden-angle spiral on a cone; the
//! exploded layout samples uniformly inside a sphere.

use crate::config::SceneConfig;
use crate::types::{ParticleColor, ParticleData, ParticleKind};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};
use tracing::debug;

/// Angular step between consecutive tree particles.
pub const GOLDEN_ANGLE_DEGREES: f32 = 137.5;

/// Place particle `index` of `total` on the surface of a cone.
///
/// Height grows linearly with `index` across `[-height / 2, height / 2]` while
/// the radius shrinks linearly from `radius` at the base to zero at the apex.
pub fn tree_position(index: usize, total: usize, height: f32, radius: f32) -> Vec3 {
    let norm_y = if total == 0 {
        0.0
    } else {
        index as f32 / total as f32
    };
    let y = norm_y * height - height / 2.0;
    let current_radius = radius * (1.0 - norm_y);
    let angle = index as f32 * GOLDEN_ANGLE_DEGREES * (PI / 180.0);
    Vec3::new(angle.cos() * current_radius, y, angle.sin() * current_radius)
}

/// Uniform random point inside a sphere, using the thread-local RNG.
pub fn exploded_position(radius: f32) -> Vec3 {
    exploded_position_with(&mut rand::thread_rng(), radius)
}

/// Uniform random point inside a sphere of `radius`.
///
/// `phi = acos(U[-1, 1])` keeps the poles from clustering and the cube root on
/// the radial draw keeps density uniform through the volume.
pub fn exploded_position_with<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = rng.gen_range(0.0..TAU);
    let phi = rng.gen_range(-1.0f32..=1.0).acos();
    let r = rng.gen_range(0.0f32..=1.0).cbrt() * radius;
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
    .clamp_length_max(radius)
}

/// Build the fixed particle set for a session.
///
/// Photo particles are spread evenly along the tree; the remaining ornaments
/// cycle through shapes and palette colors by index.
pub fn particle_layout<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Vec<ParticleData> {
    let total = config.particle_count;
    let photo_count = config.photo_count.min(total);
    let stride = if photo_count == 0 { 0 } else { total / photo_count };

    let particles: Vec<ParticleData> = (0..total)
        .map(|index| {
            let tree = tree_position(index, total, config.tree_height, config.tree_radius);
            let exploded = exploded_position_with(rng, config.explosion_radius);

            let photo_slot = (stride > 0 && index % stride == stride / 2)
                .then(|| index / stride)
                .filter(|slot| *slot < photo_count);

            let (kind, color, scale) = match photo_slot {
                Some(slot) => (ParticleKind::Photo { slot }, ParticleColor::White, 1.0),
                None => (
                    ParticleKind::ORNAMENTS[index % ParticleKind::ORNAMENTS.len()],
                    ParticleColor::ORNAMENTS[index % ParticleColor::ORNAMENTS.len()],
                    rng.gen_range(0.15..0.4),
                ),
            };

            ParticleData::new(index as u32, tree, exploded, scale, color, kind)
        })
        .collect();

    debug!(
        "Generated {} particles ({} photo slots)",
        particles.len(),
        particles.iter().filter(|p| p.kind.is_photo()).count()
    );
    particles
}
