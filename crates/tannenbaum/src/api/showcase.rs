use crate::api::config::TreeConfig;
use crate::api::overlay::{OverlayState, WishTicket};
use crate::api::types::{Mode, SceneEvent};
use crate::core::rng::Rng;
use crate::core::transition::TransitionState;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::camera::OrbitCamera;
use crate::systems::ambient::Snowfall;
use crate::systems::animate::{FrameHeader, TreeAnimator};
use crate::systems::composition::SceneDescription;
use crate::systems::layout::generate_tree;
use crate::systems::topper::Topper;

/// The whole interactive scene: layout, transition, overlay, camera and
/// ambient snow, driven one host frame at a time.
///
/// Input pushed between frames is applied at the start of the next
/// [`tick`](Self::tick). Wish requests and completions happen outside the
/// tick (they are async on the host); their events are held back and
/// published with the next frame.
pub struct TreeShowcase {
    config: TreeConfig,
    transition: TransitionState,
    overlay: OverlayState,
    camera: OrbitCamera,
    snow: Snowfall,
    animator: TreeAnimator,
    input: InputQueue,
    events: Vec<SceneEvent>,
    pending_events: Vec<SceneEvent>,
    frame_count: u32,
}

impl TreeShowcase {
    pub fn new(config: TreeConfig) -> Self {
        let mut rng = Rng::new(config.seed);
        let groups = generate_tree(&config, &mut rng);
        let snow = Snowfall::new(config.snow_count, &mut rng);
        let topper = Topper::for_tree(&config);
        let animator = TreeAnimator::new(&config, groups, topper);

        log::info!(
            "Tree built: {} needles, {} ornaments, {} snowflakes, {} floats per frame",
            config.needle_count,
            config.ornament_count,
            config.snow_count,
            animator.frame_len(),
        );

        let mut showcase = Self {
            transition: TransitionState::new(config.transition_rate),
            overlay: OverlayState::new(),
            camera: OrbitCamera::default(),
            snow,
            animator,
            input: InputQueue::new(),
            events: Vec::with_capacity(8),
            pending_events: Vec::new(),
            frame_count: 0,
            config,
        };
        showcase.publish(true);
        showcase
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Advance one host frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.events.clear();
        self.events.append(&mut self.pending_events);

        for event in self.input.drain() {
            self.apply(event);
        }

        let moved = self.transition.tick(dt);
        if moved && self.transition.is_settled() {
            self.events.push(SceneEvent::new(
                SceneEvent::TRANSITION_SETTLED,
                self.overlay.mode().code() as f32,
            ));
        }
        if moved {
            self.animator.write_transforms(self.transition.progress());
        }

        self.camera.tick(dt, self.overlay.mode());
        self.snow.tick(dt);
        self.frame_count = self.frame_count.wrapping_add(1);
        self.publish(moved);
    }

    fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::ToggleMode => {
                let mode = self.overlay.toggle_mode();
                self.on_mode_changed(mode);
            }
            InputEvent::SetMode(mode) => {
                if self.overlay.set_mode(mode) {
                    self.on_mode_changed(mode);
                }
            }
            InputEvent::DismissWish => {
                if self.dismiss() {
                    self.events.push(SceneEvent::new(SceneEvent::WISH_DISMISSED, 0.0));
                }
            }
            InputEvent::Orbit { dx, dy } => self.camera.orbit(dx, dy),
            InputEvent::Zoom { delta } => self.camera.zoom(delta),
            InputEvent::Resize { width, height } => self.camera.resize(width, height),
        }
    }

    fn on_mode_changed(&mut self, mode: Mode) {
        self.transition.set_mode(mode);
        self.events.push(SceneEvent::new(SceneEvent::MODE_CHANGED, mode.code() as f32));
    }

    fn dismiss(&mut self) -> bool {
        let visible = self.overlay.wish().is_some() || self.overlay.is_loading();
        self.overlay.dismiss_wish();
        visible
    }

    /// Write camera, snow and header. Instance sections are written by the caller when progress moved.
    fn publish(&mut self, instances_dirty: bool) {
        self.animator.write_camera(&self.camera.uniform());
        self.animator.write_snow(self.snow.positions());
        self.animator.write_header(&FrameHeader {
            progress: self.transition.progress(),
            target: self.transition.target(),
            mode: self.overlay.mode().code(),
            wish_state: self.overlay.wish_state().code(),
            frame: self.frame_count,
            instances_dirty,
        });
    }

    /// Start a wish. `None` while another request is in flight.
    pub fn request_wish(&mut self) -> Option<WishTicket> {
        let ticket = self.overlay.request_wish()?;
        self.pending_events
            .push(SceneEvent::new(SceneEvent::WISH_LOADING, ticket.0 as f32));
        Some(ticket)
    }

    /// Deliver a finished wish. Returns `false` if the ticket went stale.
    pub fn complete_wish(&mut self, ticket: WishTicket, text: String) -> bool {
        if !self.overlay.complete_wish(ticket, text) {
            return false;
        }
        self.pending_events
            .push(SceneEvent::new(SceneEvent::WISH_READY, ticket.0 as f32));
        true
    }

    pub fn dismiss_wish(&mut self) {
        if self.dismiss() {
            self.pending_events
                .push(SceneEvent::new(SceneEvent::WISH_DISMISSED, 0.0));
        }
    }

    pub fn describe(&self) -> SceneDescription {
        SceneDescription::build(&self.config, self.animator.layout())
    }

    pub fn scene_json(&self) -> Result<String, serde_json::Error> {
        self.describe().to_json()
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.overlay.mode()
    }

    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    pub fn transition(&self) -> &TransitionState {
        &self.transition
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn animator(&self) -> &TreeAnimator {
        &self.animator
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Events published by the last tick.
    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::protocol::header;
    use crate::components::group::GroupKind;

    const FRAME: f32 = 1.0 / 60.0;

    fn showcase() -> TreeShowcase {
        TreeShowcase::new(TreeConfig::default().with_counts(400, 100).with_seed(9))
    }

    fn event_kinds(s: &TreeShowcase) -> Vec<u32> {
        s.events().iter().map(|e| e.kind as u32).collect()
    }

    #[test]
    fn starts_assembled_at_rest() {
        let mut s = showcase();
        assert_eq!(s.mode(), Mode::Assembled);
        let before = s.animator().instances(GroupKind::Needles).to_vec();
        s.tick(FRAME);
        assert_eq!(s.transition().progress(), 0.0);
        assert_eq!(s.animator().instances(GroupKind::Needles), &before[..]);
        assert_eq!(s.animator().header()[header::INSTANCES_DIRTY], 0.0);
        assert_eq!(s.animator().header()[header::FRAME], 1.0);
    }

    #[test]
    fn toggle_disperses_and_reassembles() {
        let mut s = showcase();
        s.push_input(InputEvent::ToggleMode);
        s.tick(FRAME);
        assert_eq!(s.mode(), Mode::Dispersed);
        assert_eq!(event_kinds(&s), vec![SceneEvent::MODE_CHANGED]);
        assert!(s.transition().progress() > 0.0);
        assert_eq!(s.animator().header()[header::INSTANCES_DIRTY], 1.0);
        assert_eq!(s.animator().header()[header::MODE], 1.0);

        let mut settled = false;
        for _ in 0..1_200 {
            s.tick(FRAME);
            settled |= event_kinds(&s).contains(&SceneEvent::TRANSITION_SETTLED);
        }
        assert!(settled);
        assert_eq!(s.transition().progress(), 1.0);

        s.push_input(InputEvent::ToggleMode);
        for _ in 0..1_200 {
            s.tick(FRAME);
        }
        assert_eq!(s.transition().progress(), 0.0);
        let needles = &s.animator().groups()[GroupKind::Needles.index()];
        for (slot, record) in s.animator().instances(GroupKind::Needles).iter().zip(needles.records()) {
            assert_eq!(slot.position(), record.rest_position);
        }
    }

    #[test]
    fn set_mode_to_current_is_silent() {
        let mut s = showcase();
        s.push_input(InputEvent::SetMode(Mode::Assembled));
        s.tick(FRAME);
        assert!(s.events().is_empty());
    }

    #[test]
    fn camera_spins_only_when_assembled() {
        let mut s = showcase();
        let start = s.camera().azimuth;
        s.tick(0.5);
        assert_ne!(s.camera().azimuth, start);

        s.push_input(InputEvent::SetMode(Mode::Dispersed));
        s.tick(FRAME);
        let held = s.camera().azimuth;
        s.tick(0.5);
        assert_eq!(s.camera().azimuth, held);
    }

    #[test]
    fn wish_events_publish_on_next_tick() {
        let mut s = showcase();
        let ticket = s.request_wish().unwrap();
        assert!(s.request_wish().is_none());
        s.tick(FRAME);
        assert_eq!(event_kinds(&s), vec![SceneEvent::WISH_LOADING]);
        assert_eq!(s.animator().header()[header::WISH_STATE], 1.0);

        assert!(s.complete_wish(ticket, "Opulence".to_string()));
        s.tick(FRAME);
        assert_eq!(event_kinds(&s), vec![SceneEvent::WISH_READY]);
        assert_eq!(s.overlay().wish(), Some("Opulence"));
        assert_eq!(s.animator().header()[header::WISH_STATE], 2.0);

        s.push_input(InputEvent::DismissWish);
        s.tick(FRAME);
        assert_eq!(event_kinds(&s), vec![SceneEvent::WISH_DISMISSED]);
        assert_eq!(s.animator().header()[header::WISH_STATE], 0.0);
        s.tick(FRAME);
        assert!(s.events().is_empty());
    }

    #[test]
    fn late_wish_after_dismiss_is_dropped() {
        let mut s = showcase();
        let ticket = s.request_wish().unwrap();
        s.dismiss_wish();
        assert!(!s.complete_wish(ticket, "late".to_string()));
        s.tick(FRAME);
        assert_eq!(
            event_kinds(&s),
            vec![SceneEvent::WISH_LOADING, SceneEvent::WISH_DISMISSED]
        );
        assert_eq!(s.overlay().wish(), None);
    }

    #[test]
    fn scene_json_lists_groups() {
        let s = showcase();
        let json = s.scene_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["groups"][0]["count"], 400);
        assert_eq!(value["groups"][1]["count"], 50);
    }

    #[test]
    fn snow_section_updates_every_tick() {
        let mut s = showcase();
        let range = s.animator().layout().snow_range();
        let before = s.animator().frame()[range.clone()].to_vec();
        s.tick(0.1);
        assert_ne!(&s.animator().frame()[range], &before[..]);
    }
}
