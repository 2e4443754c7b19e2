use glam::Vec3;

use super::particle::ParticleRecord;

/// Identity of a visual group. Groups are fixed at startup and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// Foliage needles filling the cone volume.
    Needles,
    /// Mirror-finish sphere ornaments.
    GlossyOrnaments,
    /// Satin sphere ornaments.
    MatteOrnaments,
    /// Long crystal cones.
    Icicles,
}

impl GroupKind {
    /// Every group, in frame-buffer order.
    pub const ALL: [GroupKind; 4] = [
        GroupKind::Needles,
        GroupKind::GlossyOrnaments,
        GroupKind::MatteOrnaments,
        GroupKind::Icicles,
    ];

    pub fn index(self) -> usize {
        match self {
            GroupKind::Needles => 0,
            GroupKind::GlossyOrnaments => 1,
            GroupKind::MatteOrnaments => 2,
            GroupKind::Icicles => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            GroupKind::Needles => "needles",
            GroupKind::GlossyOrnaments => "glossy_ornaments",
            GroupKind::MatteOrnaments => "matte_ornaments",
            GroupKind::Icicles => "icicles",
        }
    }

    /// How the group moves while dispersing.
    pub fn motion(self) -> GroupMotion {
        match self {
            // Needles drift slowest and shrink the most.
            GroupKind::Needles => GroupMotion {
                speed_multiplier: 3.0,
                shrink_factor: 0.8,
                spin: SpinRule::Fixed(Vec3::new(1.0, 1.0, 0.0)),
            },
            GroupKind::GlossyOrnaments | GroupKind::MatteOrnaments => GroupMotion {
                speed_multiplier: 5.0,
                shrink_factor: 0.5,
                spin: SpinRule::Velocity,
            },
            GroupKind::Icicles => GroupMotion {
                speed_multiplier: 6.0,
                shrink_factor: 0.5,
                spin: SpinRule::Velocity,
            },
        }
    }
}

/// Per-axis spin added to the base rotation, scaled by progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinRule {
    /// Same angular sweep for every particle in the group.
    Fixed(Vec3),
    /// The particle's own velocity components are used as angles, so
    /// faster particles spin further.
    Velocity,
}

impl SpinRule {
    /// Total rotation swept by a particle between progress 0 and 1.
    pub fn sweep(self, velocity: Vec3) -> Vec3 {
        match self {
            SpinRule::Fixed(sweep) => sweep,
            SpinRule::Velocity => velocity,
        }
    }
}

/// Group-wide animation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupMotion {
    /// Distance multiplier applied to the disperse velocity.
    pub speed_multiplier: f32,
    /// Fraction of the base scale lost when fully dispersed.
    pub shrink_factor: f32,
    pub spin: SpinRule,
}

/// A fixed batch of particles sharing one primitive and material.
#[derive(Debug, Clone)]
pub struct VisualGroup {
    kind: GroupKind,
    motion: GroupMotion,
    records: Vec<ParticleRecord>,
}

impl VisualGroup {
    pub fn new(kind: GroupKind, records: Vec<ParticleRecord>) -> Self {
        Self {
            kind,
            motion: kind.motion(),
            records,
        }
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn motion(&self) -> &GroupMotion {
        &self.motion
    }

    pub fn records(&self) -> &[ParticleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_through_all() {
        for kind in GroupKind::ALL {
            assert_eq!(GroupKind::from_index(kind.index()), Some(kind));
        }
        assert_eq!(GroupKind::from_index(4), None);
    }

    #[test]
    fn icicles_outpace_spheres_outpace_needles() {
        let needles = GroupKind::Needles.motion().speed_multiplier;
        let spheres = GroupKind::GlossyOrnaments.motion().speed_multiplier;
        let icicles = GroupKind::Icicles.motion().speed_multiplier;
        assert!(needles < spheres && spheres < icicles);
    }

    #[test]
    fn velocity_spin_uses_velocity() {
        let v = Vec3::new(1.5, -2.0, 0.25);
        assert_eq!(SpinRule::Velocity.sweep(v), v);
        assert_eq!(SpinRule::Fixed(Vec3::X).sweep(v), Vec3::X);
    }
}
