use bytemuck::{Pod, Zeroable};

/// Which layout the tree is heading toward. Owned by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Assembled,
    Dispersed,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Assembled => Mode::Dispersed,
            Mode::Dispersed => Mode::Assembled,
        }
    }

    /// Transition target: 0 when assembled, 1 when dispersed.
    pub fn target(self) -> f32 {
        match self {
            Mode::Assembled => 0.0,
            Mode::Dispersed => 1.0,
        }
    }

    /// Numeric code used in the frame header and the wasm exports.
    pub fn code(self) -> u32 {
        match self {
            Mode::Assembled => 0,
            Mode::Dispersed => 1,
        }
    }
}

/// A scene event forwarded to the host through the events buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SceneEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SceneEvent {
    pub const FLOATS: usize = 4;

    /// `a` = new mode code.
    pub const MODE_CHANGED: u32 = 1;
    /// `a` = ticket id.
    pub const WISH_LOADING: u32 = 2;
    /// `a` = ticket id. Text is read through the wish accessor.
    pub const WISH_READY: u32 = 3;
    pub const WISH_DISMISSED: u32 = 4;
    /// Progress reached its target. `a` = mode code.
    pub const TRANSITION_SETTLED: u32 = 5;

    pub fn new(kind: u32, a: f32) -> Self {
        Self {
            kind: kind as f32,
            a,
            b: 0.0,
            c: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_toggles_back_and_forth() {
        assert_eq!(Mode::Assembled.toggled(), Mode::Dispersed);
        assert_eq!(Mode::Assembled.toggled().toggled(), Mode::Assembled);
    }

    #[test]
    fn mode_targets() {
        assert_eq!(Mode::Assembled.target(), 0.0);
        assert_eq!(Mode::Dispersed.target(), 1.0);
    }

    #[test]
    fn scene_event_is_4_floats() {
        assert_eq!(std::mem::size_of::<SceneEvent>(), SceneEvent::FLOATS * 4);
    }
}
