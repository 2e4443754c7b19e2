//! Static scene description handed to the host once at startup.
//!
//! Everything here is unaffected by the transition: pedestal, floor, tree
//! core, lights, star shell and sparkles. The animated groups are described
//! by primitive, material and frame-buffer section so the host can set up
//! its instanced draws.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec3;
use serde::Serialize;

use crate::api::config::TreeConfig;
use crate::bridge::protocol::ProtocolLayout;
use crate::components::color::{palette, Rgb};
use crate::components::group::GroupKind;
use crate::core::rng::Rng;
use crate::renderer::camera::OrbitCamera;
use crate::systems::ambient::{scatter_box, scatter_shell};
use crate::systems::lighting::{Light, LightState};
use crate::systems::topper::Topper;

/// Salt mixed into the scene seed so ambient scatter never shifts the tree layout.
const AMBIENT_SALT: u64 = 0xA5A5_0000_5A5A;

/// Mesh primitive. Tagged by `type` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
        theta_start: f32,
        theta_length: f32,
    },
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
        /// Polar sweep; `PI` is a full sphere, `PI / 2` a dome.
        theta_length: f32,
    },
    Plane {
        width: f32,
        height: f32,
    },
}

impl Primitive {
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        Primitive::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
            theta_start: 0.0,
            theta_length: TAU,
        }
    }

    pub fn sphere(radius: f32, segments: u32) -> Self {
        Primitive::Sphere {
            radius,
            width_segments: segments,
            height_segments: segments,
            theta_length: PI,
        }
    }
}

/// Physically based material parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Material {
    pub color: Rgb,
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
    pub env_map_intensity: f32,
}

impl Material {
    pub fn standard(color: Rgb, roughness: f32, metalness: f32) -> Self {
        Self {
            color,
            roughness,
            metalness,
            emissive: Rgb::BLACK,
            emissive_intensity: 0.0,
            env_map_intensity: 1.0,
        }
    }

    pub fn with_env(mut self, intensity: f32) -> Self {
        self.env_map_intensity = intensity;
        self
    }

    pub fn with_emissive(mut self, emissive: Rgb, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }
}

/// A single non-instanced mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prop {
    pub name: &'static str,
    pub primitive: Primitive,
    pub position: Vec3,
    /// Euler angles (XYZ).
    pub rotation: Vec3,
    pub material: Material,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Prop {
    fn new(name: &'static str, primitive: Primitive, position: Vec3, material: Material) -> Self {
        Self {
            name,
            primitive,
            position,
            rotation: Vec3::ZERO,
            material,
            cast_shadow: true,
            receive_shadow: true,
        }
    }

    fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }
}

/// One instanced group: what to draw and where its transforms live.
#[derive(Debug, Clone, Serialize)]
pub struct GroupDescription {
    pub name: &'static str,
    pub count: usize,
    /// Float offset of the group's section in the frame buffer.
    pub offset: usize,
    pub primitive: Primitive,
    /// Base material; per-instance colors multiply it.
    pub material: Material,
}

#[derive(Debug, Clone, Serialize)]
pub struct StarField {
    pub points: Vec<Vec3>,
    pub size: f32,
    pub twinkle_speed: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SparkleField {
    pub points: Vec<Vec3>,
    pub color: Rgb,
    pub size: f32,
    pub opacity: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnowStyle {
    pub count: usize,
    pub offset: usize,
    pub size: f32,
    pub color: Rgb,
    pub opacity: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CameraLimits {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

/// Image-based lighting that the materials' `env_map_intensity` scales.
#[derive(Debug, Clone, Serialize)]
pub struct Environment {
    /// Named HDR preset the host resolves to a cube map.
    pub preset: &'static str,
    pub blur: f32,
    /// Whether the map is also drawn as the backdrop.
    pub as_background: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostProcess {
    pub bloom_threshold: f32,
    pub bloom_intensity: f32,
    pub bloom_radius: f32,
    pub vignette_offset: f32,
    pub vignette_darkness: f32,
    pub exposure: f32,
}

/// Everything the host needs to build the static scene.
#[derive(Debug, Clone, Serialize)]
pub struct SceneDescription {
    pub background: Rgb,
    /// Offset of the whole tree group (tree, topper, pedestal, floor).
    pub tree_offset: Vec3,
    pub tree: Vec<Prop>,
    /// Cap parts in the topper's local space; the frame buffer carries its transform.
    pub topper_parts: Vec<Prop>,
    pub pedestal: Vec<Prop>,
    pub floor: Prop,
    pub groups: Vec<GroupDescription>,
    pub lights: LightState,
    /// The topper's light at rest. Its position and intensity are refreshed
    /// every frame from the topper section of the frame buffer.
    pub topper_light: Light,
    pub environment: Environment,
    pub stars: StarField,
    pub sparkles: SparkleField,
    pub snow: SnowStyle,
    pub camera: CameraLimits,
    pub post: PostProcess,
}

impl SceneDescription {
    pub fn build(config: &TreeConfig, layout: &ProtocolLayout) -> Self {
        let mut rng = Rng::new(config.seed ^ AMBIENT_SALT);
        let gold = Rgb::from_u32(palette::GOLD);
        let camera = OrbitCamera::default();
        let topper = Topper::for_tree(config);

        Self {
            background: Rgb::from_u32(0x020202),
            tree_offset: Vec3::new(0.0, -2.0, 0.0),
            tree: tree_core(config),
            topper_parts: topper_parts(),
            pedestal: pedestal(),
            floor: Prop::new(
                "floor",
                Primitive::Plane { width: 200.0, height: 200.0 },
                Vec3::new(0.0, -5.0, 0.0),
                Material::standard(Rgb::from_u32(0x050505), 0.1, 0.8),
            )
            .rotated(Vec3::new(-FRAC_PI_2, 0.0, 0.0)),
            groups: GroupKind::ALL
                .iter()
                .map(|&kind| describe_group(kind, layout))
                .collect(),
            lights: LightState::showroom(),
            topper_light: Light::Point {
                position: topper.light_position(0.0),
                color: topper.light_color,
                intensity: topper.light_intensity,
                distance: topper.light_distance,
            },
            environment: Environment {
                preset: "city",
                blur: 0.8,
                as_background: false,
            },
            stars: StarField {
                points: scatter_shell(config.star_count, 60.0, 110.0, &mut rng),
                size: 4.0,
                twinkle_speed: 0.5,
            },
            sparkles: SparkleField {
                points: scatter_box(config.sparkle_count, Vec3::new(0.0, 2.0, 0.0), 12.0, &mut rng),
                color: gold,
                size: 4.0,
                opacity: 0.8,
                speed: 0.3,
            },
            snow: SnowStyle {
                count: layout.snow_count,
                offset: layout.snow_offset,
                size: 0.15,
                color: Rgb::WHITE,
                opacity: 0.4,
            },
            camera: CameraLimits {
                fov_degrees: camera.fov_y.to_degrees(),
                near: camera.near,
                far: camera.far,
                min_polar: OrbitCamera::MIN_POLAR,
                max_polar: OrbitCamera::MAX_POLAR,
                min_distance: OrbitCamera::MIN_DISTANCE,
                max_distance: OrbitCamera::MAX_DISTANCE,
            },
            post: PostProcess {
                bloom_threshold: 1.0,
                bloom_intensity: 1.2,
                bloom_radius: 0.5,
                vignette_offset: 0.1,
                vignette_darkness: 0.8,
                exposure: 1.1,
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn tree_core(config: &TreeConfig) -> Vec<Prop> {
    let center = Vec3::new(0.0, 1.0, 0.0);
    vec![
        Prop::new(
            "trunk",
            Primitive::cylinder(0.4, 1.2, config.height * 0.8, 16),
            center,
            Material::standard(Rgb::from_u32(0x2D1B0E), 0.9, 0.0),
        ),
        Prop::new(
            "crown_core",
            Primitive::Cone {
                radius: config.radius * 0.6,
                height: config.height,
                radial_segments: 32,
            },
            center,
            Material::standard(Rgb::from_u32(0x012204), 0.9, 0.0),
        ),
    ]
}

fn topper_parts() -> Vec<Prop> {
    let red = Material::standard(Rgb::from_u32(0xFF0000), 0.4, 0.1);
    vec![
        Prop::new(
            "cap_dome",
            Primitive::Sphere {
                radius: 0.7,
                width_segments: 32,
                height_segments: 16,
                theta_length: FRAC_PI_2,
            },
            Vec3::new(0.0, 0.5, 0.0),
            red,
        ),
        Prop::new(
            "cap_brim",
            Primitive::Cylinder {
                radius_top: 0.72,
                radius_bottom: 0.72,
                height: 0.05,
                radial_segments: 32,
                theta_start: -PI / 2.5,
                theta_length: PI / 1.25,
            },
            Vec3::new(0.0, 0.5, 0.6),
            red,
        )
        .rotated(Vec3::new(0.3, 0.0, 0.0)),
        Prop::new("cap_button", Primitive::sphere(0.08, 16), Vec3::new(0.0, 1.2, 0.0), red),
    ]
}

fn pedestal() -> Vec<Prop> {
    let base = -5.0;
    let gold = Material::standard(Rgb::from_u32(palette::GOLD), 0.1, 1.0).with_env(1.5);
    vec![
        Prop::new(
            "plinth",
            Primitive::cylinder(4.5, 4.8, 0.5, 8),
            Vec3::new(0.0, base + 0.25, 0.0),
            Material::standard(Rgb::from_u32(0x0A0A0A), 0.1, 0.8),
        ),
        Prop::new(
            "base_ring",
            Primitive::cylinder(3.5, 3.8, 0.4, 64),
            Vec3::new(0.0, base + 0.6, 0.0),
            gold,
        ),
        Prop::new(
            "urn",
            Primitive::cylinder(2.0, 3.0, 2.0, 64),
            Vec3::new(0.0, base + 1.5, 0.0),
            Material::standard(Rgb::from_u32(0x3F0000), 0.2, 0.4),
        ),
        Prop::new(
            "upper_rim",
            Primitive::cylinder(2.2, 2.2, 0.15, 64),
            Vec3::new(0.0, base + 2.5, 0.0),
            gold,
        ),
    ]
}

fn describe_group(kind: GroupKind, layout: &ProtocolLayout) -> GroupDescription {
    let (primitive, material) = match kind {
        GroupKind::Needles => (
            Primitive::Cone {
                radius: 0.2,
                height: 0.6,
                radial_segments: 5,
            },
            Material::standard(Rgb::from_u32(palette::EMERALD), 0.3, 0.2),
        ),
        GroupKind::GlossyOrnaments => (
            Primitive::sphere(0.7, 32),
            Material::standard(Rgb::WHITE, 0.05, 0.95).with_env(1.5),
        ),
        GroupKind::MatteOrnaments => (
            Primitive::sphere(0.7, 32),
            Material::standard(Rgb::WHITE, 0.7, 0.3).with_env(0.5),
        ),
        GroupKind::Icicles => (
            Primitive::Cone {
                radius: 0.25,
                height: 1.8,
                radial_segments: 8,
            },
            Material::standard(Rgb::WHITE, 0.1, 0.9)
                .with_emissive(Rgb::from_u32(0xE0F2FE), 0.2)
                .with_env(2.0),
        ),
    };
    GroupDescription {
        name: kind.name(),
        count: layout.group_counts[kind.index()],
        offset: layout.group_offsets[kind.index()],
        primitive,
        material,
    }
}
