use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::components::color::Rgb;

/// Per-instance transform written into the frame buffer for the host renderer.
/// Must match the TypeScript protocol: 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct InstanceTransform {
    /// World-space position (tree group space).
    pub position: [f32; 3],
    /// Euler angles in radians, XYZ order.
    pub rotation: [f32; 3],
    /// Uniform scale.
    pub scale: f32,
    /// Linear RGB.
    pub color: [f32; 3],
    pub _pad: [f32; 2],
}

impl InstanceTransform {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(position: Vec3, rotation: Vec3, scale: f32, color: Rgb) -> Self {
        Self {
            position: position.to_array(),
            rotation: rotation.to_array(),
            scale,
            color: color.to_array(),
            _pad: [0.0; 2],
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn rotation(&self) -> Vec3 {
        Vec3::from_array(self.rotation)
    }
}

/// Topper transform plus the point light that rides along with it.
/// 16 floats = 64 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct TopperInstance {
    pub transform: InstanceTransform,
    /// Position of the topper's point light, in tree group space (before `tree_offset`).
    pub light_position: [f32; 3],
    pub light_intensity: f32,
}

impl TopperInstance {
    pub const FLOATS: usize = 16;
}

/// Per-flake snow position. 3 floats.
pub type SnowPoint = [f32; 3];

/// Number of floats per snow flake.
pub const SNOW_FLOATS: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_transform_is_12_floats() {
        assert_eq!(std::mem::size_of::<InstanceTransform>(), 48);
        assert_eq!(InstanceTransform::FLOATS * 4, InstanceTransform::STRIDE_BYTES);
    }

    #[test]
    fn topper_instance_is_16_floats() {
        assert_eq!(std::mem::size_of::<TopperInstance>(), TopperInstance::FLOATS * 4);
    }

    #[test]
    fn accessors_round_trip() {
        let t = InstanceTransform::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.1, 0.2, 0.3), 0.5, Rgb::WHITE);
        assert_eq!(t.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.rotation(), Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(t.color, [1.0, 1.0, 1.0]);
    }
}
