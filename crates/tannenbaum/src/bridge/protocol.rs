//! Frame buffer layout.
//! Must stay in sync with the TypeScript reader (`frameLayout.ts`).
//!
//! All offsets are in floats from the start of the buffer:
//!
//! ```text
//! [header 16][camera 20][topper 16][needles][glossy][matte][icicles][snow]
//! ```
//!
//! Group sections hold `count * 12` floats, the snow section `count * 3`.

use crate::api::config::TreeConfig;
use crate::components::group::GroupKind;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::{InstanceTransform, TopperInstance, SNOW_FLOATS};

/// Number of floats in the frame header.
pub const HEADER_FLOATS: usize = 16;

/// Slot indices inside the header.
pub mod header {
    pub const PROGRESS: usize = 0;
    pub const TARGET: usize = 1;
    /// 0 = assembled, 1 = dispersed.
    pub const MODE: usize = 2;
    /// 0 = idle, 1 = loading, 2 = wish ready.
    pub const WISH_STATE: usize = 3;
    pub const GROUP_COUNT: usize = 4;
    /// Wrapping frame counter (as float).
    pub const FRAME: usize = 5;
    /// 1 when the instance sections changed this frame.
    pub const INSTANCES_DIRTY: usize = 6;
    pub const SNOW_COUNT: usize = 7;
}

/// Computed offsets for a given scene configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolLayout {
    pub camera_offset: usize,
    pub topper_offset: usize,
    /// Per group, indexed by `GroupKind::index()`.
    pub group_offsets: [usize; 4],
    pub group_counts: [usize; 4],
    pub snow_offset: usize,
    pub snow_count: usize,
    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Build a layout from explicit group and snow counts.
    pub fn new(group_counts: [usize; 4], snow_count: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let topper_offset = camera_offset + CameraUniform::FLOATS;

        let mut group_offsets = [0usize; 4];
        let mut cursor = topper_offset + TopperInstance::FLOATS;
        for (offset, count) in group_offsets.iter_mut().zip(group_counts) {
            *offset = cursor;
            cursor += count * InstanceTransform::FLOATS;
        }

        let snow_offset = cursor;
        let buffer_total_floats = snow_offset + snow_count * SNOW_FLOATS;

        Self {
            camera_offset,
            topper_offset,
            group_offsets,
            group_counts,
            snow_offset,
            snow_count,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &TreeConfig) -> Self {
        let counts = GroupKind::ALL.map(|kind| config.group_count(kind));
        Self::new(counts, config.snow_count)
    }

    /// Float range of one group's instance section.
    pub fn group_range(&self, kind: GroupKind) -> std::ops::Range<usize> {
        let i = kind.index();
        let start = self.group_offsets[i];
        start..start + self.group_counts[i] * InstanceTransform::FLOATS
    }

    pub fn camera_range(&self) -> std::ops::Range<usize> {
        self.camera_offset..self.camera_offset + CameraUniform::FLOATS
    }

    pub fn topper_range(&self) -> std::ops::Range<usize> {
        self.topper_offset..self.topper_offset + TopperInstance::FLOATS
    }

    pub fn snow_range(&self) -> std::ops::Range<usize> {
        self.snow_offset..self.snow_offset + self.snow_count * SNOW_FLOATS
    }
}
