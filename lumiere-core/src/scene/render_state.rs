//! Per-tick output consumed by the external renderer.

use crate::scene::{ParticleAnimator, PhotoLibrary};
use bytemuck::{Pod, Zeroable};
use lumiere_data::{AppMode, GestureKind, GestureState, ParticleData, ParticleKind};
use serde::Serialize;

/// GPU-ready per-particle instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize)]
pub struct RenderInstance {
    /// Eased position plus idle twinkle.
    pub position: [f32; 3],
    pub scale: f32,
    /// Linear RGB.
    pub color: [f32; 3],
    /// One of the `KIND_*` codes.
    pub kind: u32,
    /// Index into the photo library, or -1.
    pub photo_index: i32,
}

impl RenderInstance {
    pub const KIND_SPHERE: u32 = 0;
    pub const KIND_CUBE: u32 = 1;
    pub const KIND_CANDY: u32 = 2;
    pub const KIND_PHOTO: u32 = 3;

    fn build(
        particle: &ParticleData,
        position: glam::Vec3,
        scale: f32,
        photos: &PhotoLibrary,
    ) -> Self {
        let (kind, photo_index) = match particle.kind {
            ParticleKind::Sphere => (Self::KIND_SPHERE, -1),
            ParticleKind::Cube => (Self::KIND_CUBE, -1),
            ParticleKind::Candy => (Self::KIND_CANDY, -1),
            ParticleKind::Photo { slot } => (
                Self::KIND_PHOTO,
                photos
                    .photo_for_slot(slot)
                    .map_or(-1, |(index, _)| index as i32),
            ),
        };
        Self {
            position: position.to_array(),
            scale,
            color: particle.color.rgb().to_array(),
            kind,
            photo_index,
        }
    }
}

/// Everything the renderer and the status overlay need for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderState {
    pub mode: AppMode,
    pub gesture: GestureKind,
    /// Normalized pointer (palm center).
    pub pointer: [f32; 2],
    pub pinch_distance: Option<f32>,
    pub manual_controls_visible: bool,
    pub instances: Vec<RenderInstance>,
}

impl RenderState {
    pub fn new() -> Self {
        let idle = GestureState::idle();
        Self {
            mode: AppMode::Tree,
            gesture: idle.kind,
            pointer: idle.position.to_array(),
            pinch_distance: None,
            manual_controls_visible: true,
            instances: Vec::new(),
        }
    }

    /// Rebuild in place from the animator, reusing the instance buffer.
    pub fn update(
        &mut self,
        animator: &ParticleAnimator,
        photos: &PhotoLibrary,
        gesture: &GestureState,
        manual_controls_visible: bool,
    ) {
        self.mode = animator.mode();
        self.gesture = gesture.kind;
        self.pointer = gesture.position.to_array();
        self.pinch_distance = gesture.pinch_distance;
        self.manual_controls_visible = manual_controls_visible;

        self.instances.clear();
        self.instances.extend(animator.particles().iter().enumerate().map(|(index, particle)| {
            let position = particle.position + animator.twinkle_offset(particle.id());
            RenderInstance::build(particle, position, animator.scale_of(index), photos)
        }));
    }

    /// Raw bytes of the instance buffer, ready for upload.
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new()
    }
}
