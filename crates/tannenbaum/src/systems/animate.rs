//! Per-frame evaluation of particle transforms.
//!
//! [`evaluate`] is a pure function of a record and the transition progress:
//! every tick recomputes each transform from scratch, so there is no drift.
//! [`TreeAnimator`] owns the frame buffer and is its only writer; the host
//! only ever reads it through the raw pointer.

use crate::api::config::TreeConfig;
use crate::bridge::protocol::{header, ProtocolLayout, HEADER_FLOATS};
use crate::components::group::{GroupKind, GroupMotion, VisualGroup};
use crate::components::particle::ParticleRecord;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::{InstanceTransform, SnowPoint, TopperInstance};
use crate::systems::topper::Topper;

/// Transform of one particle at `progress` in [0, 1].
pub fn evaluate(record: &ParticleRecord, motion: &GroupMotion, progress: f32) -> InstanceTransform {
    let position = record.rest_position + record.dispersed_velocity * (progress * motion.speed_multiplier);
    let rotation = record.base_rotation + motion.spin.sweep(record.dispersed_velocity) * progress;
    let scale = record.base_scale * (1.0 - progress * motion.shrink_factor);
    InstanceTransform::new(position, rotation, scale, record.color)
}

/// Header values written once per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameHeader {
    pub progress: f32,
    pub target: f32,
    pub mode: u32,
    pub wish_state: u32,
    pub frame: u32,
    pub instances_dirty: bool,
}

/// Owns the visual groups, the topper and the flat frame buffer.
pub struct TreeAnimator {
    groups: Vec<VisualGroup>,
    topper: Topper,
    layout: ProtocolLayout,
    frame: Vec<f32>,
}

impl TreeAnimator {
    /// Allocate the frame buffer for `config` and write the assembled pose.
    ///
    /// Groups must come in `GroupKind::ALL` order with the configured counts.
    pub fn new(config: &TreeConfig, groups: Vec<VisualGroup>, topper: Topper) -> Self {
        let layout = ProtocolLayout::from_config(config);
        debug_assert!(groups
            .iter()
            .all(|g| g.len() == layout.group_counts[g.kind().index()]));

        let mut animator = Self {
            groups,
            topper,
            frame: vec![0.0; layout.buffer_total_floats],
            layout,
        };
        animator.frame[header::GROUP_COUNT] = animator.groups.len() as f32;
        animator.frame[header::SNOW_COUNT] = animator.layout.snow_count as f32;
        animator.write_transforms(0.0);
        animator
    }

    /// Recompute every particle and topper transform for `progress`.
    pub fn write_transforms(&mut self, progress: f32) {
        for group in &self.groups {
            let range = self.layout.group_range(group.kind());
            let out: &mut [InstanceTransform] = bytemuck::cast_slice_mut(&mut self.frame[range]);
            let motion = group.motion();
            for (slot, record) in out.iter_mut().zip(group.records()) {
                *slot = evaluate(record, motion, progress);
            }
        }

        let topper = self.topper.evaluate(progress);
        self.frame[self.layout.topper_range()].copy_from_slice(bytemuck::cast_slice(&[topper]));
    }

    pub fn write_camera(&mut self, camera: &CameraUniform) {
        self.frame[self.layout.camera_range()].copy_from_slice(bytemuck::cast_slice(std::slice::from_ref(camera)));
    }

    /// Copy snow positions. Extra points beyond the configured count are ignored.
    pub fn write_snow(&mut self, points: &[SnowPoint]) {
        let range = self.layout.snow_range();
        let out: &mut [SnowPoint] = bytemuck::cast_slice_mut(&mut self.frame[range]);
        let n = out.len().min(points.len());
        out[..n].copy_from_slice(&points[..n]);
    }

    pub fn write_header(&mut self, h: &FrameHeader) {
        self.frame[header::PROGRESS] = h.progress;
        self.frame[header::TARGET] = h.target;
        self.frame[header::MODE] = h.mode as f32;
        self.frame[header::WISH_STATE] = h.wish_state as f32;
        self.frame[header::FRAME] = h.frame as f32;
        self.frame[header::INSTANCES_DIRTY] = if h.instances_dirty { 1.0 } else { 0.0 };
    }

    pub fn groups(&self) -> &[VisualGroup] {
        &self.groups
    }

    pub fn topper(&self) -> &Topper {
        &self.topper
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    /// Current transforms of one group.
    pub fn instances(&self, kind: GroupKind) -> &[InstanceTransform] {
        bytemuck::cast_slice(&self.frame[self.layout.group_range(kind)])
    }

    pub fn topper_instance(&self) -> &TopperInstance {
        &bytemuck::cast_slice::<f32, TopperInstance>(&self.frame[self.layout.topper_range()])[0]
    }

    pub fn header(&self) -> &[f32] {
        &self.frame[..HEADER_FLOATS]
    }

    /// The whole frame buffer, read-only.
    pub fn frame(&self) -> &[f32] {
        &self.frame
    }

    /// Raw pointer to the frame buffer for host reads.
    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn frame_len(&self) -> usize {
        self.frame.len()
    }
}
