use crate::api::types::Mode;

/// Commands the host forwards from the overlay and the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The overlay's mode button was pressed.
    ToggleMode,
    /// Force a specific mode (keyboard shortcuts, deep links).
    SetMode(Mode),
    DismissWish,
    /// Pointer drag in pixels.
    Orbit { dx: f32, dy: f32 },
    /// Wheel delta; positive zooms in.
    Zoom { delta: f32 },
    /// Canvas resized, in CSS pixels.
    Resize { width: f32, height: f32 },
}

/// A queue of input events.
/// The host pushes events between frames; the showcase drains them at the start of each tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::ToggleMode);
        q.push(InputEvent::Zoom { delta: 2.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events, vec![InputEvent::ToggleMode, InputEvent::Zoom { delta: 2.0 }]);
        assert!(q.is_empty());
    }

    #[test]
    fn drain_preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::SetMode(Mode::Dispersed));
        q.push(InputEvent::Resize { width: 800.0, height: 600.0 });
        q.push(InputEvent::DismissWish);
        let events = q.drain();
        assert_eq!(events[0], InputEvent::SetMode(Mode::Dispersed));
        assert_eq!(events[2], InputEvent::DismissWish);
        assert!(q.drain().is_empty());
    }
}
