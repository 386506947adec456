//! Core type definitions for the application

use std::time::Instant;

use super::genres::{builtin_genres, Genre};
use super::modal::{Modal, ModalKind};
use super::picker::RandomPicker;

/// Keyboard focus among the page's controls
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    PickButton,
    AboutTrigger,
    SettingsTrigger,
    Card,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::PickButton => Focus::Card,
            Focus::Card => Focus::AboutTrigger,
            Focus::AboutTrigger => Focus::SettingsTrigger,
            Focus::SettingsTrigger => Focus::PickButton,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::PickButton => Focus::SettingsTrigger,
            Focus::Card => Focus::PickButton,
            Focus::AboutTrigger => Focus::Card,
            Focus::SettingsTrigger => Focus::AboutTrigger,
        }
    }
}

/// A row of the settings dialog
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsRow {
    Genre(usize),
    LetterCase,
    Theme,
}

/// Mouse hover over a dialog trigger, for its tooltip
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hover {
    pub trigger: ModalKind,
    pub since: Instant,
}

/// Terminal size as last drawn, for mouse hit testing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// UI state for the application
#[derive(Clone)]
pub struct UiState {
    pub focus: Focus,
    pub about: Modal,
    pub settings: Modal,
    pub about_scroll: u16,
    pub genre_catalogue: Vec<Genre>,
    pub settings_selected: usize,
    pub picker: RandomPicker,
    pub hover: Option<Hover>,
    pub viewport: Viewport,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}

impl UiState {
    pub fn modal(&self, kind: ModalKind) -> &Modal {
        match kind {
            ModalKind::About => &self.about,
            ModalKind::Settings => &self.settings,
        }
    }

    pub fn modal_mut(&mut self, kind: ModalKind) -> &mut Modal {
        match kind {
            ModalKind::About => &mut self.about,
            ModalKind::Settings => &mut self.settings,
        }
    }

    /// The dialog currently taking input, if any
    pub fn interactive_modal(&self) -> Option<ModalKind> {
        [ModalKind::About, ModalKind::Settings]
            .into_iter()
            .find(|kind| self.modal(*kind).is_interactive())
    }

    pub fn settings_rows(&self) -> Vec<SettingsRow> {
        let mut rows: Vec<SettingsRow> = (0..self.genre_catalogue.len()).map(SettingsRow::Genre).collect();
        rows.push(SettingsRow::LetterCase);
        rows.push(SettingsRow::Theme);
        rows
    }

    pub fn selected_settings_row(&self) -> Option<SettingsRow> {
        self.settings_rows().get(self.settings_selected).copied()
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            focus: Focus::default(),
            about: Modal::new(
                ModalKind::About,
                "about",
                "useful information and resources about this application",
                "?",
            ),
            settings: Modal::new(
                ModalKind::Settings,
                "settings",
                "pick genres and tweak how things look",
                "⚙",
            ),
            about_scroll: 0,
            genre_catalogue: builtin_genres(),
            settings_selected: 0,
            picker: RandomPicker::new(),
            hover: None,
            viewport: Viewport::default(),
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_both_ways() {
        let mut focus = Focus::PickButton;
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::PickButton);
        assert_eq!(Focus::PickButton.next().prev(), Focus::PickButton);
    }

    #[test]
    fn settings_rows_end_with_appearance() {
        let ui = UiState::default();
        let rows = ui.settings_rows();
        assert_eq!(rows.len(), ui.genre_catalogue.len() + 2);
        assert_eq!(rows.last(), Some(&SettingsRow::Theme));
        assert_eq!(ui.selected_settings_row(), Some(SettingsRow::Genre(0)));
    }

    #[test]
    fn no_modal_is_interactive_by_default() {
        assert_eq!(UiState::default().interactive_modal(), None);
    }
}
