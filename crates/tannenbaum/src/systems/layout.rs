//! Procedural particle layout on a cone.
//!
//! Every group samples a height, a radial fraction and an angle on the cone,
//! then derives its disperse velocity from the direction of that point seen
//! from the cone's base centre. All draws come from one seeded [`Rng`].

use std::f32::consts::TAU;

use glam::Vec3;

use crate::api::config::TreeConfig;
use crate::components::color::{palette, Rgb};
use crate::components::group::{GroupKind, VisualGroup};
use crate::components::particle::ParticleRecord;
use crate::core::rng::Rng;

/// Radial band that ornaments and icicles sample, as a fraction of the local radius.
pub const ORNAMENT_SHELL: RadialFill = RadialFill::Shell { min: 0.85, max: 1.10 };

/// Where on the cone cross-section a group samples its radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RadialFill {
    /// Uniform fraction of the local radius, filling the cone volume.
    Volume,
    /// Fraction in `[min, max)` of the local radius, hugging the outer skin.
    Shell { min: f32, max: f32 },
}

impl RadialFill {
    fn sample(self, rng: &mut Rng) -> f32 {
        match self {
            RadialFill::Volume => rng.next_f32(),
            RadialFill::Shell { min, max } => rng.range(min, max),
        }
    }

    /// Largest radial fraction this fill can produce.
    pub fn max_fraction(self) -> f32 {
        match self {
            RadialFill::Volume => 1.0,
            RadialFill::Shell { max, .. } => max,
        }
    }
}

/// Cone the tree is built on. Apex at `height`, base of `max_radius` at y = 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeShape {
    pub height: f32,
    pub max_radius: f32,
    pub vertical_offset: f32,
}

impl ConeShape {
    pub fn from_config(config: &TreeConfig) -> Self {
        Self {
            height: config.height,
            max_radius: config.radius,
            vertical_offset: config.vertical_offset,
        }
    }

    /// Cone radius at local height `y`, shrinking linearly to zero at the apex.
    pub fn radius_at(&self, y: f32) -> f32 {
        if self.height <= 0.0 {
            return 0.0;
        }
        ((self.height - y) / self.height * self.max_radius).max(0.0)
    }
}

/// Rest position and disperse velocity for a particle at cone coordinates
/// (`y`, `radius`, `theta`) travelling at `speed`.
///
/// A point on the cone's axis at its base has no direction; it flies straight up.
pub fn place_on_cone(cone: &ConeShape, y: f32, radius: f32, theta: f32, speed: f32) -> (Vec3, Vec3) {
    let local = Vec3::new(radius * theta.cos(), y, radius * theta.sin());
    let direction = local.try_normalize().unwrap_or(Vec3::Y);
    let rest = local + Vec3::Y * cone.vertical_offset;
    (rest, direction * speed)
}

#[derive(Debug, Clone, Copy)]
enum ColorSource {
    Solid(u32),
    Palette(&'static [u32]),
}

impl ColorSource {
    fn sample(self, rng: &mut Rng) -> Rgb {
        match self {
            ColorSource::Solid(rgb) => Rgb::from_u32(rgb),
            ColorSource::Palette(colors) => rng
                .pick(colors)
                .map(|&rgb| Rgb::from_u32(rgb))
                .unwrap_or_default(),
        }
    }
}

/// Sampling parameters for one group.
#[derive(Debug, Clone, Copy)]
struct Recipe {
    fill: RadialFill,
    speed: (f32, f32),
    scale: (f32, f32),
    scale_multiplier: f32,
    /// Random tilt and heading at rest (needles only).
    tilted: bool,
    colors: ColorSource,
}

impl Recipe {
    fn for_kind(kind: GroupKind) -> Self {
        let ornament = Recipe {
            fill: ORNAMENT_SHELL,
            speed: (5.0, 13.0),
            scale: (0.3, 0.7),
            scale_multiplier: 1.0,
            tilted: false,
            colors: ColorSource::Palette(&palette::ORNAMENTS),
        };
        match kind {
            GroupKind::Needles => Recipe {
                fill: RadialFill::Volume,
                speed: (2.0, 7.0),
                scale: (0.5, 1.0),
                scale_multiplier: 1.0,
                tilted: true,
                colors: ColorSource::Solid(palette::EMERALD),
            },
            GroupKind::GlossyOrnaments | GroupKind::MatteOrnaments => ornament,
            GroupKind::Icicles => Recipe {
                scale_multiplier: 1.2,
                colors: ColorSource::Palette(&palette::ICICLES),
                ..ornament
            },
        }
    }

    fn sample(&self, cone: &ConeShape, rng: &mut Rng) -> ParticleRecord {
        let y = rng.next_f32() * cone.height;
        let radius = self.fill.sample(rng) * cone.radius_at(y);
        let theta = rng.next_f32() * TAU;
        let speed = rng.range(self.speed.0, self.speed.1);
        let (rest_position, dispersed_velocity) = place_on_cone(cone, y, radius, theta, speed);

        let base_scale = rng.range(self.scale.0, self.scale.1) * self.scale_multiplier;
        let base_rotation = if self.tilted {
            Vec3::new(rng.next_f32() * 0.5, rng.next_f32() * TAU, 0.0)
        } else {
            Vec3::ZERO
        };

        ParticleRecord {
            rest_position,
            dispersed_velocity,
            base_scale,
            base_rotation,
            color: self.colors.sample(rng),
        }
    }
}

/// Radial fill a group uses, exposed for bounds checks.
pub fn radial_fill(kind: GroupKind) -> RadialFill {
    Recipe::for_kind(kind).fill
}

/// Produce exactly `count` records for one group.
pub fn generate_group(kind: GroupKind, count: usize, config: &TreeConfig, rng: &mut Rng) -> VisualGroup {
    let cone = ConeShape::from_config(config);
    let recipe = Recipe::for_kind(kind);
    let records = (0..count).map(|_| recipe.sample(&cone, rng)).collect();
    VisualGroup::new(kind, records)
}

/// Build every visual group in frame-buffer order.
pub fn generate_tree(config: &TreeConfig, rng: &mut Rng) -> Vec<VisualGroup> {
    GroupKind::ALL
        .iter()
        .map(|&kind| generate_group(kind, config.group_count(kind), config, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> TreeConfig {
        TreeConfig::default().with_counts(2_000, 1_200)
    }

    fn build(config: &TreeConfig) -> Vec<VisualGroup> {
        let mut rng = Rng::new(config.seed);
        generate_tree(config, &mut rng)
    }

    #[test]
    fn produces_exact_counts() {
        let config = small_config();
        let groups = build(&config);
        assert_eq!(groups.len(), 4);
        for group in &groups {
            assert_eq!(group.len(), config.group_count(group.kind()), "{}", group.kind().name());
        }
        assert_eq!(groups[3].kind(), GroupKind::Icicles);
        assert_eq!(groups[3].len(), 240);
    }

    #[test]
    fn rest_positions_stay_inside_cone_bounds() {
        let config = small_config();
        let cone = ConeShape::from_config(&config);
        for group in build(&config) {
            let max_fraction = radial_fill(group.kind()).max_fraction();
            for record in group.records() {
                let y = record.rest_position.y - config.vertical_offset;
                assert!(y >= 0.0 && y < config.height + 1e-4, "height {} out of range", y);
                let radial = Vec3::new(record.rest_position.x, 0.0, record.rest_position.z).length();
                let limit = cone.radius_at(y) * max_fraction + 1e-4;
                assert!(radial <= limit, "{}: radius {} exceeds {}", group.kind().name(), radial, limit);
                assert!(radial <= config.radius * max_fraction + 1e-4);
            }
        }
    }

    #[test]
    fn ornaments_hug_the_surface() {
        let config = small_config();
        let cone = ConeShape::from_config(&config);
        let groups = build(&config);
        for record in groups[1].records() {
            let y = record.rest_position.y - config.vertical_offset;
            let radial = Vec3::new(record.rest_position.x, 0.0, record.rest_position.z).length();
            assert!(radial >= cone.radius_at(y) * 0.85 - 1e-4);
        }
    }

    #[test]
    fn velocities_point_away_from_base_centre() {
        let config = small_config();
        for group in build(&config) {
            for record in group.records() {
                let local = record.rest_position - Vec3::Y * config.vertical_offset;
                let v = record.dispersed_velocity;
                assert!(v.is_finite());
                assert!(local.dot(v) >= -1e-4, "velocity points inward");
            }
        }
    }

    #[test]
    fn speeds_fall_in_group_ranges() {
        let config = small_config();
        let groups = build(&config);
        for record in groups[0].records() {
            let speed = record.dispersed_velocity.length();
            assert!(speed >= 2.0 - 1e-3 && speed <= 7.0 + 1e-3, "needle speed {}", speed);
        }
        for record in groups[3].records() {
            let speed = record.dispersed_velocity.length();
            assert!(speed >= 5.0 - 1e-3 && speed <= 13.0 + 1e-3, "icicle speed {}", speed);
        }
    }

    #[test]
    fn icicles_are_larger_and_icy() {
        let config = small_config();
        let groups = build(&config);
        let icy = [Rgb::from_u32(palette::ICE_WHITE), Rgb::from_u32(palette::ICE_BLUE)];
        for record in groups[3].records() {
            assert!(record.base_scale >= 0.36 - 1e-4 && record.base_scale <= 0.84 + 1e-4);
            assert!(icy.contains(&record.color));
            assert_eq!(record.base_rotation, Vec3::ZERO);
        }
    }

    #[test]
    fn needles_are_emerald_and_tilted() {
        let config = small_config();
        let groups = build(&config);
        let emerald = Rgb::from_u32(palette::EMERALD);
        for record in groups[0].records() {
            assert_eq!(record.color, emerald);
            assert!(record.base_rotation.x >= 0.0 && record.base_rotation.x < 0.5);
            assert!(record.base_rotation.y >= 0.0 && record.base_rotation.y < TAU);
            assert_eq!(record.base_rotation.z, 0.0);
        }
    }

    #[test]
    fn same_seed_reproduces_layout() {
        let config = small_config();
        let a = build(&config);
        let b = build(&config);
        for (ga, gb) in a.iter().zip(&b) {
            assert_eq!(ga.records(), gb.records());
        }
        let c = build(&config.clone().with_seed(config.seed + 1));
        assert_ne!(a[0].records()[0], c[0].records()[0]);
    }

    #[test]
    fn apex_particle_flies_straight_up() {
        let cone = ConeShape::from_config(&TreeConfig::default());
        let radius = cone.radius_at(cone.height);
        assert_eq!(radius, 0.0);
        let (rest, velocity) = place_on_cone(&cone, cone.height, radius, 1.0, 4.0);
        assert!(velocity.is_finite());
        assert!((velocity - Vec3::Y * 4.0).length() < 1e-5);
        assert_eq!(rest, Vec3::new(0.0, cone.height + cone.vertical_offset, 0.0));
    }

    #[test]
    fn base_centre_particle_falls_back_to_up() {
        let cone = ConeShape::from_config(&TreeConfig::default());
        let (_, velocity) = place_on_cone(&cone, 0.0, 0.0, 0.0, 6.0);
        assert!(!velocity.is_nan());
        assert_eq!(velocity, Vec3::Y * 6.0);
    }

    #[test]
    fn radius_shrinks_linearly() {
        let cone = ConeShape::from_config(&TreeConfig::default());
        assert_eq!(cone.radius_at(0.0), cone.max_radius);
        assert!((cone.radius_at(cone.height / 2.0) - cone.max_radius / 2.0).abs() < 1e-6);
        assert_eq!(cone.radius_at(cone.height + 1.0), 0.0);
    }
}
