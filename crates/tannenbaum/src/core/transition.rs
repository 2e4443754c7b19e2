use crate::api::types::Mode;

/// Below this distance from the target, progress snaps and ticks become no-ops.
pub const SETTLE_EPSILON: f32 = 1e-5;

/// Frame-rate independent exponential approach of `progress` toward `target`.
///
/// `progress` is written only by [`TransitionState::tick`]; `target` only by
/// [`TransitionState::set_mode`]. Changing the target never moves progress,
/// so reversing mid-flight is continuous.
#[derive(Debug, Clone)]
pub struct TransitionState {
    progress: f32,
    target: f32,
    rate: f32,
}

impl TransitionState {
    /// Start assembled and at rest. `rate` is the approach constant `k` per second.
    pub fn new(rate: f32) -> Self {
        Self {
            progress: 0.0,
            target: 0.0,
            rate: rate.max(0.0),
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.target = mode.target();
    }

    pub fn is_settled(&self) -> bool {
        (self.target - self.progress).abs() < SETTLE_EPSILON
    }

    /// Fraction of the remaining distance covered in `dt` seconds.
    pub fn blend_factor(&self, dt: f32) -> f32 {
        1.0 - (-self.rate * dt).exp()
    }

    /// Advance by `dt` seconds. Returns `true` if progress changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.is_settled() {
            return false;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if dt == 0.0 {
            return false;
        }

        let before = self.progress;
        self.progress += (self.target - self.progress) * self.blend_factor(dt);
        self.progress = self.progress.clamp(0.0, 1.0);
        if self.is_settled() {
            self.progress = self.target;
        }
        self.progress != before
    }
}

impl Default for TransitionState {
    fn default() -> Self {
        Self::new(crate::api::config::TRANSITION_RATE)
    }
}
