use glam::Vec3;

use super::color::Rgb;

/// Static per-instance data produced by the layout generator.
///
/// Created once when the scene is built and never mutated afterwards;
/// every frame's transform is derived from it and the transition progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleRecord {
    /// Assembled-state location on or inside the cone.
    pub rest_position: Vec3,
    /// Direction and magnitude the particle travels as progress rises.
    pub dispersed_velocity: Vec3,
    pub base_scale: f32,
    /// Euler angles (XYZ order) at rest.
    pub base_rotation: Vec3,
    pub color: Rgb,
}
