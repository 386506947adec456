//! Main application model with state management

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::cache::FetchCache;
use super::content::{ContentState, ContentView, MovieCard, PosterState};
use super::genres::Genre;
use super::modal::{CloseReason, ModalKind};
use super::picker::PickTicket;
use super::preferences::{Preferences, PreferencesStore};
use super::routes::{random_id_key, RandomIdResponse, Route};
use super::source::MovieSource;
use super::types::{Focus, Hover, UiState, Viewport};

/// Error notifications clear themselves after this long
const ERROR_TTL: Duration = Duration::from_secs(5);

/// Main application model containing all state.
///
/// Cheap to clone; every clone shares the same state.
#[derive(Clone)]
pub struct AppModel {
    pub source: Arc<dyn MovieSource>,
    pub random_ids: FetchCache<RandomIdResponse>,
    preferences: Arc<Mutex<Preferences>>,
    preferences_store: PreferencesStore,
    pub site_url: String,
    pub browser: Option<String>,
    pub ui_state: Arc<Mutex<UiState>>,
    pub content_state: Arc<Mutex<ContentState>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(
        source: Arc<dyn MovieSource>,
        preferences_store: PreferencesStore,
        preferences: Preferences,
        site_url: String,
        browser: Option<String>,
    ) -> Self {
        Self {
            source,
            random_ids: FetchCache::new(),
            preferences: Arc::new(Mutex::new(preferences)),
            preferences_store,
            site_url,
            browser,
            ui_state: Arc::new(Mutex::new(UiState::default())),
            content_state: Arc::new(Mutex::new(ContentState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    // ========================================================================
    // Preferences
    // ========================================================================

    pub async fn preferences(&self) -> Preferences {
        self.preferences.lock().await.clone()
    }

    /// Apply `change` and persist the result. A failed write is logged and
    /// the in-memory preferences still change.
    pub async fn update_preferences(&self, change: impl FnOnce(&mut Preferences)) -> Preferences {
        let mut prefs = self.preferences.lock().await;
        change(&mut prefs);
        if let Err(e) = self.preferences_store.save(&prefs) {
            tracing::warn!(error = %e, path = %self.preferences_store.path().display(), "Could not save preferences");
        }
        prefs.clone()
    }

    /// Fetch key for the current genre filter
    pub async fn random_id_key(&self) -> String {
        random_id_key(&self.preferences.lock().await.genres)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn set_viewport(&self, width: u16, height: u16) {
        self.ui_state.lock().await.viewport = Viewport { width, height };
    }

    // ========================================================================
    // Focus, modals, hover
    // ========================================================================

    pub async fn cycle_focus_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.focus = state.focus.next();
    }

    pub async fn cycle_focus_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.focus = state.focus.prev();
    }

    pub async fn focus(&self) -> Focus {
        self.ui_state.lock().await.focus
    }

    pub async fn set_focus(&self, focus: Focus) {
        self.ui_state.lock().await.focus = focus;
    }

    pub async fn open_modal(&self, kind: ModalKind) {
        let mut state = self.ui_state.lock().await;
        if kind == ModalKind::About {
            state.about_scroll = 0;
        }
        state.hover = None;
        state.modal_mut(kind).open(Instant::now());
    }

    /// Close `kind`. Focus stays where it was; it does not jump back to the
    /// trigger.
    pub async fn close_modal(&self, kind: ModalKind, reason: CloseReason) {
        let mut state = self.ui_state.lock().await;
        state.modal_mut(kind).close(reason, Instant::now());
    }

    pub async fn interactive_modal(&self) -> Option<ModalKind> {
        self.ui_state.lock().await.interactive_modal()
    }

    pub async fn tick(&self, now: Instant) {
        let mut state = self.ui_state.lock().await;
        state.about.tick(now);
        state.settings.tick(now);
        if let Some(timestamp) = state.error_timestamp {
            if now.saturating_duration_since(timestamp) >= ERROR_TTL {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn set_hover(&self, trigger: Option<ModalKind>) {
        let mut state = self.ui_state.lock().await;
        match (trigger, state.hover) {
            (Some(kind), Some(hover)) if hover.trigger == kind => {}
            (Some(kind), _) => state.hover = Some(Hover { trigger: kind, since: Instant::now() }),
            (None, _) => state.hover = None,
        }
    }

    pub async fn scroll_about(&self, down: bool) {
        let mut state = self.ui_state.lock().await;
        state.about_scroll = if down {
            state.about_scroll.saturating_add(1)
        } else {
            state.about_scroll.saturating_sub(1)
        };
    }

    pub async fn settings_move_up(&self) {
        let mut state = self.ui_state.lock().await;
        if state.settings_selected > 0 {
            state.settings_selected -= 1;
        }
    }

    pub async fn settings_move_down(&self) {
        let mut state = self.ui_state.lock().await;
        let last = state.settings_rows().len().saturating_sub(1);
        if state.settings_selected < last {
            state.settings_selected += 1;
        }
    }

    pub async fn set_settings_selected(&self, index: usize) {
        let mut state = self.ui_state.lock().await;
        let last = state.settings_rows().len().saturating_sub(1);
        state.settings_selected = index.min(last);
    }

    pub async fn set_genre_catalogue(&self, genres: Vec<Genre>) {
        let mut state = self.ui_state.lock().await;
        if genres.is_empty() {
            return;
        }
        state.genre_catalogue = genres;
        let last = state.settings_rows().len().saturating_sub(1);
        state.settings_selected = state.settings_selected.min(last);
    }

    // ========================================================================
    // Random pick
    // ========================================================================

    pub async fn begin_pick(&self) -> PickTicket {
        self.ui_state.lock().await.picker.begin()
    }

    pub async fn finish_pick(&self, ticket: PickTicket, id: u64) -> Option<Route> {
        self.ui_state.lock().await.picker.finish(ticket, id)
    }

    pub async fn fail_pick(&self, ticket: PickTicket) -> bool {
        self.ui_state.lock().await.picker.fail(ticket)
    }

    #[cfg(test)]
    pub async fn is_picking(&self) -> bool {
        self.ui_state.lock().await.picker.is_loading()
    }

    // ========================================================================
    // Errors & help
    // ========================================================================

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Content & navigation
    // ========================================================================

    pub async fn current_route(&self) -> Route {
        self.content_state.lock().await.route
    }

    /// Start a navigation and show the loading state. Only the navigation
    /// started last may complete, so a slow load never replaces a newer one.
    pub async fn begin_navigation(&self) -> u64 {
        let mut state = self.content_state.lock().await;
        state.navigation_generation += 1;
        state.is_loading = true;
        state.navigation_generation
    }

    /// Show `view` for `route` if `generation` is still the newest
    /// navigation. With `push`, the route being left goes on the back stack.
    /// Returns whether the view was shown.
    pub async fn complete_navigation(&self, generation: u64, route: Route, view: ContentView, push: bool) -> bool {
        let mut state = self.content_state.lock().await;
        if generation != state.navigation_generation {
            tracing::debug!(
                generation,
                current = state.navigation_generation,
                path = %route,
                "Dropping superseded navigation"
            );
            return false;
        }
        if push && state.route != route {
            let previous = state.route;
            state.navigation_stack.push(previous);
        }
        state.route = route;
        state.view = view;
        state.is_loading = false;
        true
    }

    /// End a navigation that could not load. Returns whether it was still
    /// the newest one, in which case loading is cleared.
    pub async fn fail_navigation(&self, generation: u64) -> bool {
        let mut state = self.content_state.lock().await;
        if generation != state.navigation_generation {
            return false;
        }
        state.is_loading = false;
        true
    }

    pub async fn pop_route(&self) -> Option<Route> {
        self.content_state.lock().await.navigation_stack.pop()
    }

    /// Put a popped route back on top of the stack
    pub async fn restore_route(&self, route: Route) {
        self.content_state.lock().await.navigation_stack.push(route);
    }

    /// Toggle the card's overview. Returns the new `show_more`, or `None`
    /// without a card or when the overview is short enough to need none.
    pub async fn toggle_show_more(&self) -> Option<bool> {
        let mut state = self.content_state.lock().await;
        let card = state.card_mut()?;
        card.overview().toggle?;
        Some(card.toggle_show_more())
    }

    pub async fn current_card(&self) -> Option<MovieCard> {
        self.content_state.lock().await.card().cloned()
    }

    /// Mark the poster of movie `id` loaded, if that card is still shown
    pub async fn mark_poster_loaded(&self, id: u64) {
        let mut state = self.content_state.lock().await;
        if let Some(card) = state.card_mut() {
            if card.movie.id == id {
                card.poster = PosterState::Loaded;
            }
        }
    }
}
