//! UI-side state: the mode toggle and the wish button.
//!
//! The overlay owns the authoritative `Mode`; the transition only ever reads
//! it. Wish requests are identified by tickets so that a completion arriving
//! after a dismissal (or after a newer request) is dropped.

use crate::api::types::Mode;

/// Identifies one wish request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WishTicket(pub u32);

/// Where the wish button is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WishState {
    #[default]
    Idle,
    Loading,
    Ready,
}

impl WishState {
    /// Numeric code for the frame header: 0 idle, 1 loading, 2 ready.
    pub fn code(self) -> u32 {
        match self {
            WishState::Idle => 0,
            WishState::Loading => 1,
            WishState::Ready => 2,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OverlayState {
    mode: Mode,
    wish: Option<String>,
    pending: Option<WishTicket>,
    next_ticket: u32,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Flip the mode and return the new one.
    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = self.mode.toggled();
        log::debug!("Mode toggled to {:?}", self.mode);
        self.mode
    }

    /// Returns `true` if the mode actually changed.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        log::debug!("Mode set to {:?}", mode);
        true
    }

    /// Start a wish request. Returns `None` while one is already in flight.
    ///
    /// A previous wish stays visible until the new one lands.
    pub fn request_wish(&mut self) -> Option<WishTicket> {
        if self.pending.is_some() {
            return None;
        }
        self.next_ticket = self.next_ticket.wrapping_add(1);
        let ticket = WishTicket(self.next_ticket);
        self.pending = Some(ticket);
        log::debug!("Wish requested, ticket {}", ticket.0);
        Some(ticket)
    }

    /// Apply a finished request. Stale tickets are ignored; returns whether the text was taken.
    pub fn complete_wish(&mut self, ticket: WishTicket, text: String) -> bool {
        if self.pending != Some(ticket) {
            log::warn!("Dropping wish for stale ticket {}", ticket.0);
            return false;
        }
        self.pending = None;
        self.wish = Some(text);
        true
    }

    /// Hide the wish and forget any request in flight.
    pub fn dismiss_wish(&mut self) {
        self.wish = None;
        self.pending = None;
    }

    pub fn wish(&self) -> Option<&str> {
        self.wish.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_ticket(&self) -> Option<WishTicket> {
        self.pending
    }

    pub fn wish_state(&self) -> WishState {
        if self.pending.is_some() {
            WishState::Loading
        } else if self.wish.is_some() {
            WishState::Ready
        } else {
            WishState::Idle
        }
    }

    /// Label for the mode toggle: names the action it will perform.
    pub fn toggle_label(&self) -> &'static str {
        match self.mode {
            Mode::Assembled => "DISPERSE",
            Mode::Dispersed => "ASSEMBLE",
        }
    }

    pub fn wish_label(&self) -> &'static str {
        if self.is_loading() {
            "CONJURING OPULENCE..."
        } else {
            "MAKE A LUXURY WISH"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_mode_and_label() {
        let mut overlay = OverlayState::new();
        assert_eq!(overlay.mode(), Mode::Assembled);
        assert_eq!(overlay.toggle_label(), "DISPERSE");
        assert_eq!(overlay.toggle_mode(), Mode::Dispersed);
        assert_eq!(overlay.toggle_label(), "ASSEMBLE");
        assert!(!overlay.set_mode(Mode::Dispersed));
        assert!(overlay.set_mode(Mode::Assembled));
    }

    #[test]
    fn wish_cycle() {
        let mut overlay = OverlayState::new();
        assert_eq!(overlay.wish_state(), WishState::Idle);

        let ticket = overlay.request_wish().unwrap();
        assert!(overlay.is_loading());
        assert_eq!(overlay.wish_label(), "CONJURING OPULENCE...");
        assert_eq!(overlay.request_wish(), None, "second request while loading");

        assert!(overlay.complete_wish(ticket, "Golden".to_string()));
        assert_eq!(overlay.wish(), Some("Golden"));
        assert_eq!(overlay.wish_state(), WishState::Ready);
        assert_eq!(overlay.wish_label(), "MAKE A LUXURY WISH");

        overlay.dismiss_wish();
        assert_eq!(overlay.wish(), None);
        assert_eq!(overlay.wish_state(), WishState::Idle);
    }

    #[test]
    fn dismissal_drops_late_completion() {
        let mut overlay = OverlayState::new();
        let ticket = overlay.request_wish().unwrap();
        overlay.dismiss_wish();
        assert!(!overlay.complete_wish(ticket, "late".to_string()));
        assert_eq!(overlay.wish(), None);
    }

    #[test]
    fn old_ticket_cannot_overwrite_newer_request() {
        let mut overlay = OverlayState::new();
        let first = overlay.request_wish().unwrap();
        overlay.dismiss_wish();
        let second = overlay.request_wish().unwrap();
        assert_ne!(first, second);
        assert!(!overlay.complete_wish(first, "old".to_string()));
        assert!(overlay.is_loading());
        assert!(overlay.complete_wish(second, "new".to_string()));
        assert_eq!(overlay.wish(), Some("new"));
    }

    #[test]
    fn wish_state_codes() {
        assert_eq!(WishState::Idle.code(), 0);
        assert_eq!(WishState::Loading.code(), 1);
        assert_eq!(WishState::Ready.code(), 2);
    }
}
