//! Dismissible dialog lifecycle shared by the about and settings dialogs

use std::time::{Duration, Instant};

/// Length of the open and close animations
pub const MODAL_ANIMATION: Duration = Duration::from_millis(180);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Opening { since: Instant },
    Open,
    Closing { since: Instant },
}

/// What dismissed the dialog
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    CloseButton,
    Overlay,
    Escape,
}

/// Which dialog a [`Modal`] is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalKind {
    About,
    Settings,
}

#[derive(Clone, Debug)]
pub struct Modal {
    pub kind: ModalKind,
    pub title: &'static str,
    pub description: &'static str,
    pub trigger_icon: &'static str,
    pub close_icon: &'static str,
    state: ModalState,
}

impl Modal {
    pub fn new(
        kind: ModalKind,
        title: &'static str,
        description: &'static str,
        trigger_icon: &'static str,
    ) -> Self {
        Self {
            kind,
            title,
            description,
            trigger_icon,
            close_icon: "✕",
            state: ModalState::Closed,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    /// Trigger activation. Ignored unless the dialog is fully closed or on
    /// its way out, in which case it reverses.
    pub fn open(&mut self, now: Instant) {
        match self.state {
            ModalState::Closed | ModalState::Closing { .. } => {
                self.state = ModalState::Opening { since: now };
                tracing::debug!(modal = self.title, "Modal opening");
            }
            ModalState::Opening { .. } | ModalState::Open => {}
        }
    }

    pub fn close(&mut self, reason: CloseReason, now: Instant) {
        match self.state {
            ModalState::Open | ModalState::Opening { .. } => {
                self.state = ModalState::Closing { since: now };
                tracing::debug!(modal = self.title, ?reason, "Modal closing");
            }
            ModalState::Closed | ModalState::Closing { .. } => {}
        }
    }

    /// Advance finished animations
    pub fn tick(&mut self, now: Instant) {
        match self.state {
            ModalState::Opening { since } if now.duration_since(since) >= MODAL_ANIMATION => {
                self.state = ModalState::Open;
            }
            ModalState::Closing { since } if now.duration_since(since) >= MODAL_ANIMATION => {
                self.state = ModalState::Closed;
            }
            _ => {}
        }
    }

    /// Whether the overlay and dialog are on screen at all
    pub fn is_present(&self) -> bool {
        !matches!(self.state, ModalState::Closed)
    }

    /// Whether the dialog takes input. A closing dialog lets input through.
    pub fn is_interactive(&self) -> bool {
        matches!(self.state, ModalState::Open | ModalState::Opening { .. })
    }

    /// Animation progress in `0.0..=1.0`, where 1.0 is fully shown.
    pub fn visibility(&self, now: Instant) -> f32 {
        let fraction = |since: Instant| {
            (now.duration_since(since).as_secs_f32() / MODAL_ANIMATION.as_secs_f32()).min(1.0)
        };
        match self.state {
            ModalState::Closed => 0.0,
            ModalState::Opening { since } => fraction(since),
            ModalState::Open => 1.0,
            ModalState::Closing { since } => 1.0 - fraction(since),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn about() -> Modal {
        Modal::new(ModalKind::About, "about", "useful information", "?")
    }

    #[test]
    fn starts_closed_without_content() {
        let modal = about();
        assert_eq!(modal.state(), ModalState::Closed);
        assert!(!modal.is_present());
    }

    #[test]
    fn trigger_runs_through_opening_to_open() {
        let t0 = Instant::now();
        let mut modal = about();
        modal.open(t0);
        assert!(matches!(modal.state(), ModalState::Opening { .. }));
        assert!(modal.is_present());

        modal.tick(t0 + MODAL_ANIMATION / 2);
        assert!(matches!(modal.state(), ModalState::Opening { .. }));

        modal.tick(t0 + MODAL_ANIMATION);
        assert_eq!(modal.state(), ModalState::Open);
    }

    #[test]
    fn every_close_reason_returns_to_closed() {
        for reason in [CloseReason::CloseButton, CloseReason::Overlay, CloseReason::Escape] {
            let t0 = Instant::now();
            let mut modal = about();
            modal.open(t0);
            modal.tick(t0 + MODAL_ANIMATION);

            modal.close(reason, t0 + MODAL_ANIMATION);
            assert!(matches!(modal.state(), ModalState::Closing { .. }));
            assert!(!modal.is_interactive());
            assert!(modal.is_present());

            modal.tick(t0 + MODAL_ANIMATION * 2);
            assert_eq!(modal.state(), ModalState::Closed);
            assert!(!modal.is_present());
        }
    }

    #[test]
    fn close_while_closed_is_ignored() {
        let mut modal = about();
        modal.close(CloseReason::Escape, Instant::now());
        assert_eq!(modal.state(), ModalState::Closed);
    }

    #[test]
    fn reopen_during_close_reverses() {
        let t0 = Instant::now();
        let mut modal = about();
        modal.open(t0);
        modal.tick(t0 + MODAL_ANIMATION);
        modal.close(CloseReason::Overlay, t0 + MODAL_ANIMATION);
        modal.open(t0 + MODAL_ANIMATION + MODAL_ANIMATION / 4);
        assert!(matches!(modal.state(), ModalState::Opening { .. }));
    }

    #[test]
    fn visibility_follows_animation() {
        let t0 = Instant::now();
        let mut modal = about();
        assert_eq!(modal.visibility(t0), 0.0);
        modal.open(t0);
        assert!(modal.visibility(t0 + MODAL_ANIMATION / 2) < 1.0);
        modal.tick(t0 + MODAL_ANIMATION);
        assert_eq!(modal.visibility(t0 + MODAL_ANIMATION), 1.0);
    }
}
