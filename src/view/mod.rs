//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `theme`: Palette and letter case applied to all text
//! - `utils`: Shared utility functions (centring, spinner, wrapping)
//! - `layout`: Page shell (header, pick button, footer, tooltips)
//! - `content`: Main content area rendering
//! - `card`: The movie card
//! - `about`: About dialog body
//! - `overlays`: Dialogs, error notification, help popup
//!
//! Geometry helpers are public so the controller hit-tests mouse clicks
//! against the same rectangles that were drawn.

mod theme;
mod utils;
mod layout;
mod content;
mod card;
mod about;
mod overlays;

pub use card::{card_areas, CardHit};
pub use layout::ScreenAreas;
pub use overlays::{close_button_area, dialog_area, settings_row_at};

use std::time::Instant;

use theme::Theme;

use ratatui::{widgets::Block, Frame};

use crate::model::{ContentState, ModalKind, Preferences, UiState};

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        ui_state: &UiState,
        content_state: &ContentState,
        preferences: &Preferences,
        now: Instant,
    ) {
        let theme = Theme::new(preferences);
        frame.render_widget(Block::default().style(theme.base()), frame.area());

        let areas = ScreenAreas::compute(frame.area());

        layout::render_header(frame, &areas, ui_state, &theme);
        layout::render_pick_button(frame, &areas, ui_state, &theme, now);
        content::render_main_content(frame, areas.main, ui_state, content_state, &theme, now);
        layout::render_footer(frame, &areas, &theme);
        layout::render_tooltip(frame, &areas, ui_state, &theme, now);

        // Dialogs draw their own overlay; a closing one may still be on
        // screen while the other opens
        for kind in [ModalKind::About, ModalKind::Settings] {
            overlays::render_modal(frame, kind, ui_state, preferences, &theme, now);
        }

        // Error notification overlay (if there's an error)
        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state, &theme);
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame, &theme);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_helpers::buffer_text;
    use super::*;
    use crate::model::{
        ContentView, LetterCase, MovieCard, MovieDetails, Route, CARD_ENTRANCE, MODAL_ANIMATION,
    };
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(ui: &UiState, content: &ContentState, prefs: &Preferences, now: Instant) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|f| AppView::render(f, ui, content, prefs, now))
            .unwrap();
        buffer_text(&terminal)
    }

    fn movie_content(overview_len: usize) -> ContentState {
        let movie = MovieDetails {
            id: 27205,
            title: "Inception".into(),
            overview: Some("a".repeat(overview_len)),
            release_date: Some("2010-07-15".into()),
            runtime: Some(148),
            ..Default::default()
        };
        ContentState {
            route: Route::Movie(27205),
            view: ContentView::Movie(MovieCard::new(movie, "YoHD9XEInc0")),
            ..Default::default()
        }
    }

    #[test]
    fn home_shows_pick_button_in_lowercase() {
        let text = draw(&UiState::default(), &ContentState::default(), &Preferences::default(), Instant::now());
        assert!(text.contains("pick random movie"));
        assert!(!text.contains("Pick random movie"));
        assert!(text.contains("movie explorer"));
    }

    #[test]
    fn default_letter_case_keeps_authored_text() {
        let prefs = Preferences { letter_case: LetterCase::Default, ..Default::default() };
        let text = draw(&UiState::default(), &ContentState::default(), &prefs, Instant::now());
        assert!(text.contains("Pick random movie"));
    }

    #[test]
    fn long_overview_card_offers_show_more() {
        let content = movie_content(650);
        let now = content.card().unwrap().shown_at + CARD_ENTRANCE;
        let text = draw(&UiState::default(), &content, &Preferences::default(), now);
        assert!(text.contains("inception"));
        assert!(text.contains("show more"));
        assert!(text.contains("148 min"));
    }

    #[test]
    fn short_overview_card_has_no_toggle() {
        let content = movie_content(20);
        let now = content.card().unwrap().shown_at + CARD_ENTRANCE;
        let text = draw(&UiState::default(), &content, &Preferences::default(), now);
        assert!(!text.contains("show more"));
        assert!(!text.contains("show less"));
    }

    #[test]
    fn closed_modal_renders_no_content() {
        let text = draw(&UiState::default(), &ContentState::default(), &Preferences::default(), Instant::now());
        assert!(!text.contains("useful information and resources"));
    }

    #[test]
    fn open_about_modal_renders_title_and_description() {
        let t0 = Instant::now();
        let mut ui = UiState::default();
        ui.about.open(t0);
        ui.about.tick(t0 + MODAL_ANIMATION);

        let text = draw(&ui, &ContentState::default(), &Preferences::default(), t0 + MODAL_ANIMATION);
        assert!(text.contains("useful information and resources about this application"));
        assert!(text.contains("what and why"));
        assert!(text.contains("✕"));
    }

    #[test]
    fn settings_modal_lists_genres_and_appearance() {
        let t0 = Instant::now();
        let mut ui = UiState::default();
        ui.settings.open(t0);
        ui.settings.tick(t0 + MODAL_ANIMATION);

        let mut prefs = Preferences::default();
        prefs.genres.toggle(28);
        let text = draw(&ui, &ContentState::default(), &prefs, t0 + MODAL_ANIMATION);
        assert!(text.contains("[x] action"));
        assert!(text.contains("[ ] adventure"));
    }

    #[test]
    fn error_notification_is_drawn() {
        let mut ui = UiState::default();
        ui.error_message = Some("Could not pick a movie".into());
        let text = draw(&ui, &ContentState::default(), &Preferences::default(), Instant::now());
        assert!(text.contains("could not pick a movie"));
    }

    #[test]
    fn main_area_sits_below_pick_button() {
        let areas = ScreenAreas::compute(ratatui::layout::Rect::new(0, 0, 100, 40));
        assert_eq!(areas.main, ratatui::layout::Rect::new(0, 6, 100, 33));
    }
}
