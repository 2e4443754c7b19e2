//! Ambient particles around the tree: falling snow, a star shell and gold
//! sparkles. None of them react to the assemble/disperse transition.

use glam::Vec3;

use crate::core::rng::Rng;
use crate::renderer::instance::SnowPoint;

/// Snow volume: x and z in [-HALF_WIDTH, HALF_WIDTH), y in [FLOOR, SPAWN_TOP).
const SNOW_HALF_WIDTH: f32 = 25.0;
const SNOW_FLOOR: f32 = -10.0;
const SNOW_SPAWN_TOP: f32 = 30.0;
const FALL_SCALE: f32 = 2.0;

/// Falling snow, advanced every frame and wrapped back to the top.
#[derive(Debug, Clone)]
pub struct Snowfall {
    positions: Vec<SnowPoint>,
    speeds: Vec<f32>,
}

impl Snowfall {
    pub fn new(count: usize, rng: &mut Rng) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut speeds = Vec::with_capacity(count);
        for _ in 0..count {
            positions.push([
                rng.range(-SNOW_HALF_WIDTH, SNOW_HALF_WIDTH),
                rng.range(SNOW_FLOOR, SNOW_SPAWN_TOP),
                rng.range(-SNOW_HALF_WIDTH, SNOW_HALF_WIDTH),
            ]);
            speeds.push(rng.range(0.5, 2.0));
        }
        Self { positions, speeds }
    }

    pub fn tick(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        for (p, speed) in self.positions.iter_mut().zip(&self.speeds) {
            p[1] -= speed * dt * FALL_SCALE;
            if p[1] < SNOW_FLOOR {
                p[1] = SNOW_SPAWN_TOP;
            }
        }
    }

    pub fn positions(&self) -> &[SnowPoint] {
        &self.positions
    }
}

/// Scatter `count` points uniformly in direction on a shell between two radii.
pub fn scatter_shell(count: usize, inner: f32, outer: f32, rng: &mut Rng) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let y = rng.range(-1.0, 1.0);
            let theta = rng.range(0.0, std::f32::consts::TAU);
            let ring = (1.0 - y * y).max(0.0).sqrt();
            let dir = Vec3::new(ring * theta.cos(), y, ring * theta.sin());
            dir * rng.range(inner, outer)
        })
        .collect()
}

/// Scatter `count` points uniformly in a cube of edge `size` around `center`.
pub fn scatter_box(count: usize, center: Vec3, size: f32, rng: &mut Rng) -> Vec<Vec3> {
    let half = size * 0.5;
    (0..count)
        .map(|_| {
            center
                + Vec3::new(
                    rng.range(-half, half),
                    rng.range(-half, half),
                    rng.range(-half, half),
                )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snow_starts_inside_volume() {
        let mut rng = Rng::new(5);
        let snow = Snowfall::new(500, &mut rng);
        assert_eq!(snow.positions().len(), 500);
        for p in snow.positions() {
            assert!(p[0].abs() <= SNOW_HALF_WIDTH);
            assert!(p[1] >= SNOW_FLOOR && p[1] <= SNOW_SPAWN_TOP);
        }
    }

    #[test]
    fn snow_falls_and_wraps() {
        let mut rng = Rng::new(5);
        let mut snow = Snowfall::new(200, &mut rng);
        let before: Vec<f32> = snow.positions().iter().map(|p| p[1]).collect();
        snow.tick(0.1);
        for (p, y) in snow.positions().iter().zip(&before) {
            assert!(p[1] < *y || p[1] == SNOW_SPAWN_TOP);
        }
        for _ in 0..1_000 {
            snow.tick(0.1);
        }
        for p in snow.positions() {
            assert!(p[1] >= SNOW_FLOOR && p[1] <= SNOW_SPAWN_TOP, "flake escaped at {}", p[1]);
        }
    }

    #[test]
    fn snow_ignores_bad_dt() {
        let mut rng = Rng::new(5);
        let mut snow = Snowfall::new(10, &mut rng);
        let before = snow.positions().to_vec();
        snow.tick(f32::NAN);
        snow.tick(-1.0);
        assert_eq!(snow.positions(), &before[..]);
    }

    #[test]
    fn shell_points_between_radii() {
        let mut rng = Rng::new(11);
        for p in scatter_shell(1_000, 60.0, 110.0, &mut rng) {
            let r = p.length();
            assert!(r >= 60.0 - 1e-3 && r <= 110.0 + 1e-3, "radius {}", r);
        }
    }

    #[test]
    fn box_points_inside_cube() {
        let mut rng = Rng::new(11);
        let center = Vec3::new(0.0, 2.0, 0.0);
        for p in scatter_box(400, center, 12.0, &mut rng) {
            let d = (p - center).abs();
            assert!(d.max_element() <= 6.0 + 1e-5);
        }
    }
}
