//! The cap that crowns the tree.
//!
//! It follows the same progress as the particles but moves between two fixed
//! transforms: it lifts up and slightly forward while tumbling on three axes.

use std::f32::consts::PI;

use glam::{EulerRot, Quat, Vec3};

use crate::api::config::TreeConfig;
use crate::components::color::Rgb;
use crate::renderer::instance::{InstanceTransform, TopperInstance};

/// Distance below the cone height at which the cap rests on the tip.
const REST_DROP: f32 = 7.2;

#[derive(Debug, Clone, PartialEq)]
pub struct Topper {
    pub rest_position: Vec3,
    pub departure_velocity: Vec3,
    /// Euler angles (XYZ) at rest.
    pub rest_rotation: Vec3,
    /// Rotation added at full dispersal.
    pub rotation_sweep: Vec3,
    pub scale: f32,
    pub color: Rgb,
    /// Light position in the cap's local (unscaled) frame.
    pub light_offset: Vec3,
    pub light_intensity: f32,
    pub light_distance: f32,
    pub light_color: Rgb,
}

impl Topper {
    pub fn for_tree(config: &TreeConfig) -> Self {
        Self {
            rest_position: Vec3::new(0.0, config.height - REST_DROP, 0.0),
            departure_velocity: Vec3::new(0.0, 8.0, 2.0),
            rest_rotation: Vec3::new(-0.1, 0.0, 0.0),
            rotation_sweep: Vec3::new(PI, PI * 0.5, PI * 0.2),
            scale: 3.8,
            color: Rgb::from_u32(0xFF0000),
            light_offset: Vec3::new(0.0, 4.0, 4.0),
            light_intensity: 30.0,
            light_distance: 10.0,
            light_color: Rgb::from_u32(0xFFAAAA),
        }
    }

    pub fn position(&self, progress: f32) -> Vec3 {
        self.rest_position + self.departure_velocity * progress
    }

    pub fn rotation(&self, progress: f32) -> Vec3 {
        self.rest_rotation + self.rotation_sweep * progress
    }

    /// The cap's light, carried through the cap's own rotation and scale.
    pub fn light_position(&self, progress: f32) -> Vec3 {
        let r = self.rotation(progress);
        let orientation = Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z);
        self.position(progress) + orientation * (self.light_offset * self.scale)
    }

    pub fn evaluate(&self, progress: f32) -> TopperInstance {
        TopperInstance {
            transform: InstanceTransform::new(
                self.position(progress),
                self.rotation(progress),
                self.scale,
                self.color,
            ),
            light_position: self.light_position(progress).to_array(),
            light_intensity: self.light_intensity,
        }
    }
}
