//! Scene lights for the host's forward renderer.
//!
//! Lights are static for the whole session; the host reads them once from
//! the scene description. The topper's own point light moves and is carried
//! in the frame buffer instead (see `TopperInstance`).

use glam::Vec3;
use serde::Serialize;

use crate::components::color::{palette, Rgb};

/// A light source. Tagged by `type` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Light {
    Ambient {
        color: Rgb,
        intensity: f32,
    },
    /// Sky color from above, ground color from below.
    Hemisphere {
        sky: Rgb,
        ground: Rgb,
        intensity: f32,
    },
    Spot {
        position: Vec3,
        color: Rgb,
        intensity: f32,
        /// Falloff distance in world units (0 = infinite).
        distance: f32,
        /// Cone half-angle in radians.
        angle: f32,
        /// Edge softness in [0, 1].
        penumbra: f32,
        cast_shadow: bool,
        shadow_bias: f32,
    },
    Point {
        position: Vec3,
        color: Rgb,
        intensity: f32,
        distance: f32,
    },
}

/// Ordered collection of scene lights.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct LightState {
    lights: Vec<Light>,
}

impl LightState {
    pub fn new() -> Self {
        Self { lights: Vec::new() }
    }

    /// The showroom rig: soft ambient and hemisphere fill, a warm golden key
    /// spot from above right, and a cool fill from behind left.
    pub fn showroom() -> Self {
        let mut state = Self::new();
        state.add(Light::Ambient {
            color: Rgb::WHITE,
            intensity: 1.5,
        });
        state.add(Light::Hemisphere {
            sky: Rgb::from_u32(0xFFF0F0),
            ground: Rgb::from_u32(0x050505),
            intensity: 2.0,
        });
        state.add(Light::Spot {
            position: Vec3::new(10.0, 20.0, 10.0),
            color: Rgb::from_u32(palette::WARM_LIGHT),
            intensity: 800.0,
            distance: 200.0,
            angle: 0.4,
            penumbra: 1.0,
            cast_shadow: true,
            shadow_bias: -0.0001,
        });
        state.add(Light::Point {
            position: Vec3::new(-10.0, 5.0, -10.0),
            color: Rgb::from_u32(0xBFDBFE),
            intensity: 200.0,
            distance: 50.0,
        });
        state
    }

    pub fn add(&mut self, light: Light) {
        self.lights.push(light);
    }
}
