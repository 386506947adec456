//! State behind the "pick random movie" action

use std::time::Instant;

use super::routes::Route;

/// Handed out per activation; only the newest one may navigate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickTicket {
    generation: u64,
}

impl PickTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Clone, Debug, Default)]
pub struct RandomPicker {
    generation: u64,
    loading: bool,
    loading_since: Option<Instant>,
}

impl RandomPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// When the pending activation started, for the spinner
    pub fn loading_since(&self) -> Option<Instant> {
        self.loading_since.filter(|_| self.loading)
    }

    pub fn begin(&mut self) -> PickTicket {
        self.generation += 1;
        self.loading = true;
        self.loading_since = Some(Instant::now());
        PickTicket { generation: self.generation }
    }

    fn is_current(&self, ticket: PickTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Resolve `ticket` with a fetched id. Returns the route to navigate to,
    /// or `None` when a newer activation superseded this one.
    pub fn finish(&mut self, ticket: PickTicket, id: u64) -> Option<Route> {
        if !self.is_current(ticket) {
            tracing::debug!(
                generation = ticket.generation,
                current = self.generation,
                id,
                "Dropping stale random pick"
            );
            return None;
        }
        self.loading = false;
        Some(Route::Movie(id))
    }

    /// Resolve `ticket` without an id. Returns whether it was current, in
    /// which case loading is cleared.
    pub fn fail(&mut self, ticket: PickTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.loading = false;
        true
    }
}
