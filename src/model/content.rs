//! Main content state: the current route and the movie card shown for it

use std::time::{Duration, Instant};

use super::movie::{overview_display, MovieDetails, OverviewDisplay};
use super::routes::Route;

/// Card slide-in duration after navigation
pub const CARD_ENTRANCE: Duration = Duration::from_millis(300);

/// Cosmetic poster loading state. There is no failed state: a poster that
/// never arrives stays `Loading`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PosterState {
    Loading,
    Loaded,
}

/// Everything one movie card shows and the card's own toggles
#[derive(Clone, Debug)]
pub struct MovieCard {
    pub movie: MovieDetails,
    /// YouTube key; used as-is even when empty
    pub trailer: String,
    pub show_more: bool,
    pub poster: PosterState,
    pub shown_at: Instant,
}

impl MovieCard {
    pub fn new(movie: MovieDetails, trailer: impl Into<String>) -> Self {
        Self {
            movie,
            trailer: trailer.into(),
            show_more: false,
            poster: PosterState::Loading,
            shown_at: Instant::now(),
        }
    }

    pub fn overview(&self) -> OverviewDisplay<'_> {
        overview_display(self.movie.overview(), self.show_more)
    }

    /// Flip between the cut and full overview. Returns the new state.
    pub fn toggle_show_more(&mut self) -> bool {
        self.show_more = !self.show_more;
        self.show_more
    }

    /// Entrance animation progress in `0.0..=1.0`
    pub fn entrance(&self, now: Instant) -> f32 {
        (now.duration_since(self.shown_at).as_secs_f32() / CARD_ENTRANCE.as_secs_f32()).min(1.0)
    }
}

#[derive(Clone, Debug, Default)]
pub enum ContentView {
    #[default]
    Home,
    Movie(MovieCard),
}

/// Content area state with back navigation
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub route: Route,
    pub view: ContentView,
    pub navigation_stack: Vec<Route>,
    pub is_loading: bool,
    /// Bumped by every navigation; only the newest may complete
    pub navigation_generation: u64,
}

impl ContentState {
    pub fn card(&self) -> Option<&MovieCard> {
        match &self.view {
            ContentView::Movie(card) => Some(card),
            ContentView::Home => None,
        }
    }

    pub fn card_mut(&mut self) -> Option<&mut MovieCard> {
        match &mut self.view {
            ContentView::Movie(card) => Some(card),
            ContentView::Home => None,
        }
    }
}
