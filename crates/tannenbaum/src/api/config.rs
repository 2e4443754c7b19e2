use crate::components::group::GroupKind;

/// Build-time scene constants.
pub const NEEDLE_COUNT: usize = 12_000;
pub const ORNAMENT_COUNT: usize = 1_200;
pub const TREE_HEIGHT: f32 = 12.0;
pub const TREE_RADIUS: f32 = 4.5;
/// Shifts the cone down so it sits centered in the scene.
pub const VERTICAL_OFFSET: f32 = -5.0;
pub const SNOW_COUNT: usize = 1_500;
pub const STAR_COUNT: usize = 3_000;
pub const SPARKLE_COUNT: usize = 400;
pub const DEFAULT_SEED: u64 = 0x2512_2024;
/// Exponential approach rate `k` of the transition, per second.
pub const TRANSITION_RATE: f32 = 2.0;

/// How the ornament budget is shared between the three ornament groups.
/// Each share is a whole percentage; counts are floored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrnamentSplit {
    pub glossy_percent: usize,
    pub matte_percent: usize,
    pub icicle_percent: usize,
}

impl OrnamentSplit {
    fn share(total: usize, percent: usize) -> usize {
        total * percent / 100
    }
}

impl Default for OrnamentSplit {
    fn default() -> Self {
        Self {
            glossy_percent: 50,
            matte_percent: 30,
            icicle_percent: 20,
        }
    }
}

/// Configuration for the scene. `Default` returns the build-time constants.
#[derive(Debug, Clone)]
pub struct TreeConfig {
    /// Number of foliage needles.
    pub needle_count: usize,
    /// Total ornament budget, split by `ornament_split`.
    pub ornament_count: usize,
    pub ornament_split: OrnamentSplit,
    /// Cone height in world units.
    pub height: f32,
    /// Cone base radius in world units.
    pub radius: f32,
    /// Vertical shift applied to every rest position.
    pub vertical_offset: f32,
    /// Seed for every random draw made while building the scene.
    pub seed: u64,
    /// Exponential approach rate of the transition (per second).
    pub transition_rate: f32,
    pub snow_count: usize,
    pub star_count: usize,
    pub sparkle_count: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            needle_count: NEEDLE_COUNT,
            ornament_count: ORNAMENT_COUNT,
            ornament_split: OrnamentSplit::default(),
            height: TREE_HEIGHT,
            radius: TREE_RADIUS,
            vertical_offset: VERTICAL_OFFSET,
            seed: DEFAULT_SEED,
            transition_rate: TRANSITION_RATE,
            snow_count: SNOW_COUNT,
            star_count: STAR_COUNT,
            sparkle_count: SPARKLE_COUNT,
        }
    }
}

impl TreeConfig {
    /// Fixed instance count for a visual group.
    pub fn group_count(&self, kind: GroupKind) -> usize {
        let split = &self.ornament_split;
        match kind {
            GroupKind::Needles => self.needle_count,
            GroupKind::GlossyOrnaments => OrnamentSplit::share(self.ornament_count, split.glossy_percent),
            GroupKind::MatteOrnaments => OrnamentSplit::share(self.ornament_count, split.matte_percent),
            GroupKind::Icicles => OrnamentSplit::share(self.ornament_count, split.icicle_percent),
        }
    }

    /// Return a copy with a different seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Return a copy with smaller particle budgets, for tests and previews.
    pub fn with_counts(mut self, needles: usize, ornaments: usize) -> Self {
        self.needle_count = needles;
        self.ornament_count = ornaments;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_split_matches_budget() {
        let config = TreeConfig::default();
        assert_eq!(config.group_count(GroupKind::Needles), 12_000);
        assert_eq!(config.group_count(GroupKind::GlossyOrnaments), 600);
        assert_eq!(config.group_count(GroupKind::MatteOrnaments), 360);
        assert_eq!(config.group_count(GroupKind::Icicles), 240);
    }

    #[test]
    fn split_floors_odd_totals() {
        let config = TreeConfig::default().with_counts(0, 7);
        assert_eq!(config.group_count(GroupKind::GlossyOrnaments), 3);
        assert_eq!(config.group_count(GroupKind::MatteOrnaments), 2);
        assert_eq!(config.group_count(GroupKind::Icicles), 1);
    }
}
