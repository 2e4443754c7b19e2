use std::f32::consts::{FRAC_PI_4, PI, TAU};

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::api::types::Mode;

/// Orbit camera around the tree. Perspective, Y-up, no panning.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Point the camera orbits and looks at.
    pub target: Vec3,
    /// Rotation around the Y axis (radians).
    pub azimuth: f32,
    /// Angle from the +Y axis (radians), clamped to keep the floor in view.
    pub polar: f32,
    /// Distance from target.
    pub distance: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport width / height.
    pub aspect: f32,
    /// Auto-rotate speed; 1.0 is one full turn per minute.
    pub auto_rotate_speed: f32,
}

/// GPU-side camera data. 20 floats = 80 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 3],
    pub fov_y: f32,
}

impl CameraUniform {
    pub const FLOATS: usize = 20;
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_from(Vec3::new(0.0, 4.0, 18.0), Vec3::new(0.0, 2.0, 0.0))
    }
}

impl OrbitCamera {
    pub const MIN_POLAR: f32 = FRAC_PI_4;
    pub const MAX_POLAR: f32 = PI / 1.9;
    pub const MIN_DISTANCE: f32 = 10.0;
    pub const MAX_DISTANCE: f32 = 40.0;
    const ORBIT_SENSITIVITY: f32 = 0.005;
    const ZOOM_SPEED: f32 = 0.1;

    /// Place the camera at `eye` looking at `target`, clamped to the orbit limits.
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length();
        let polar = if distance > 0.0 { (offset.y / distance).clamp(-1.0, 1.0).acos() } else { PI / 2.0 };
        Self {
            target,
            azimuth: offset.x.atan2(offset.z),
            polar: polar.clamp(Self::MIN_POLAR, Self::MAX_POLAR),
            distance: distance.clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE),
            fov_y: 45f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
            auto_rotate_speed: 0.5,
        }
    }

    /// World-space camera position.
    pub fn eye(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.target + Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a) * self.distance
    }

    /// Orbit by a pointer drag in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.azimuth = (self.azimuth - dx * Self::ORBIT_SENSITIVITY).rem_euclid(TAU);
        self.polar = (self.polar - dy * Self::ORBIT_SENSITIVITY).clamp(Self::MIN_POLAR, Self::MAX_POLAR);
    }

    /// Zoom (positive = zoom in).
    pub fn zoom(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.distance *= 1.0 - delta * Self::ZOOM_SPEED;
        self.distance = self.distance.clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);
    }

    /// Update the aspect ratio from the viewport size in pixels.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Auto-rotate while the tree is assembled; hold still while dispersed.
    pub fn tick(&mut self, dt: f32, mode: Mode) {
        if mode == Mode::Assembled && dt > 0.0 {
            let rate = TAU / 60.0 * self.auto_rotate_speed;
            self.azimuth = (self.azimuth - rate * dt).rem_euclid(TAU);
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    /// Perspective projection with depth in [0, 1] (WebGPU convention).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: (self.projection_matrix() * self.view_matrix()).to_cols_array_2d(),
            eye: self.eye().to_array(),
            fov_y: self.fov_y,
        }
    }
}
