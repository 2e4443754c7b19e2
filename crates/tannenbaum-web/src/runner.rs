use tannenbaum::{GroupKind, InputEvent, TreeConfig, TreeShowcase, WishTicket};
#[cfg(feature = "phrase")]
use tannenbaum::{PhraseConfig, PhraseService};

/// Owns the scene and the phrase service behind the wasm exports.
///
/// wasm-bindgen cannot export methods that borrow across an await, so the
/// wish flow is split: [`begin_wish`](Self::begin_wish) hands out a ticket and
/// a service handle, and the export completes it with
/// [`finish_wish`](Self::finish_wish) once the future resolves.
pub struct SceneRunner {
    showcase: TreeShowcase,
    #[cfg(feature = "phrase")]
    phrase: PhraseService,
}

impl SceneRunner {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            showcase: TreeShowcase::new(config),
            #[cfg(feature = "phrase")]
            phrase: PhraseService::new(PhraseConfig::from_build_env()),
        }
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.showcase.push_input(event);
    }

    pub fn tick(&mut self, dt: f32) {
        self.showcase.tick(dt);
    }

    /// Reserve a wish ticket. `None` while a request is already in flight.
    #[cfg(feature = "phrase")]
    pub fn begin_wish(&mut self) -> Option<(WishTicket, PhraseService)> {
        let ticket = self.showcase.request_wish()?;
        Some((ticket, self.phrase.clone()))
    }

    pub fn finish_wish(&mut self, ticket: WishTicket, text: String) -> bool {
        self.showcase.complete_wish(ticket, text)
    }

    pub fn dismiss_wish(&mut self) {
        self.showcase.dismiss_wish();
    }

    pub fn showcase(&self) -> &TreeShowcase {
        &self.showcase
    }

    // ---- Frame buffer accessors ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.showcase.animator().frame_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.showcase.animator().frame_len() as u32
    }

    pub fn camera_offset(&self) -> u32 {
        self.showcase.animator().layout().camera_offset as u32
    }

    pub fn topper_offset(&self) -> u32 {
        self.showcase.animator().layout().topper_offset as u32
    }

    /// Float offset of a group section, or 0 for an unknown index.
    pub fn group_offset(&self, index: u32) -> u32 {
        GroupKind::from_index(index as usize)
            .map(|kind| self.showcase.animator().layout().group_offsets[kind.index()] as u32)
            .unwrap_or(0)
    }

    pub fn group_count(&self, index: u32) -> u32 {
        GroupKind::from_index(index as usize)
            .map(|kind| self.showcase.animator().layout().group_counts[kind.index()] as u32)
            .unwrap_or(0)
    }

    pub fn snow_offset(&self) -> u32 {
        self.showcase.animator().layout().snow_offset as u32
    }

    pub fn snow_count(&self) -> u32 {
        self.showcase.animator().layout().snow_count as u32
    }

    // ---- Events and UI state ----

    pub fn events_ptr(&self) -> *const f32 {
        self.showcase.events_ptr()
    }

    pub fn events_len(&self) -> u32 {
        self.showcase.events().len() as u32
    }

    pub fn wish_text(&self) -> Option<String> {
        self.showcase.overlay().wish().map(str::to_string)
    }

    pub fn is_wish_loading(&self) -> bool {
        self.showcase.overlay().is_loading()
    }

    pub fn mode(&self) -> u32 {
        self.showcase.mode().code()
    }

    pub fn progress(&self) -> f32 {
        self.showcase.transition().progress()
    }

    pub fn toggle_label(&self) -> &'static str {
        self.showcase.overlay().toggle_label()
    }

    pub fn wish_label(&self) -> &'static str {
        self.showcase.overlay().wish_label()
    }

    /// Static scene description as JSON. Errors are stringified for the JS side.
    pub fn scene_json(&self) -> Result<String, String> {
        self.showcase.scene_json().map_err(|e| e.to_string())
    }
}
