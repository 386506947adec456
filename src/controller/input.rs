//! Key and mouse event handling

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::model::{CloseReason, Focus, ModalKind, UiState};
use crate::view::{card_areas, close_button_area, dialog_area, settings_row_at, CardHit, ScreenAreas};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = &self.model;

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_error().await;
            }
            return Ok(());
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        // An open dialog takes all input until it starts closing
        if let Some(kind) = model.interactive_modal().await {
            match (kind, key.code) {
                (_, KeyCode::Esc) => model.close_modal(kind, CloseReason::Escape).await,
                (_, KeyCode::Char('x') | KeyCode::Char('X')) => {
                    model.close_modal(kind, CloseReason::CloseButton).await
                }
                (ModalKind::About, KeyCode::Up | KeyCode::Char('k')) => model.scroll_about(false).await,
                (ModalKind::About, KeyCode::Down | KeyCode::Char('j')) => model.scroll_about(true).await,
                (ModalKind::Settings, KeyCode::Up | KeyCode::Char('k')) => model.settings_move_up().await,
                (ModalKind::Settings, KeyCode::Down | KeyCode::Char('j')) => model.settings_move_down().await,
                (ModalKind::Settings, KeyCode::Enter | KeyCode::Char(' ')) => self.activate_settings_row().await,
                (ModalKind::Settings, KeyCode::Char('c') | KeyCode::Char('C')) => self.clear_genres().await,
                _ => {}
            }
            return Ok(());
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                model.set_should_quit(true).await;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    model.cycle_focus_backward().await;
                } else {
                    model.cycle_focus_forward().await;
                }
            }
            KeyCode::BackTab => {
                model.cycle_focus_backward().await;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.activate_focus().await;
            }
            // Pick random movie
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.spawn_pick();
            }
            // Dialogs
            KeyCode::Char('a') | KeyCode::Char('A') => {
                model.open_modal(ModalKind::About).await;
            }
            KeyCode::Char('o') | KeyCode::Char('O') | KeyCode::Char(',') => {
                model.open_modal(ModalKind::Settings).await;
            }
            // Card actions
            KeyCode::Char('m') | KeyCode::Char('M') => {
                if let Some(show_more) = model.toggle_show_more().await {
                    tracing::debug!(show_more, "Overview toggled");
                }
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.open_trailer().await;
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.open_share().await;
            }
            KeyCode::Backspace => {
                let controller = self.clone();
                tokio::spawn(async move {
                    controller.go_back().await;
                });
            }
            // Show help popup
            KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }

    pub async fn handle_mouse_event(&self, mouse: MouseEvent) -> Result<()> {
        let ui_state = self.model.get_ui_state().await;
        let screen = Rect::new(0, 0, ui_state.viewport.width, ui_state.viewport.height);
        let (column, row) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Moved => {
                let hovered = if ui_state.interactive_modal().is_some() {
                    None
                } else {
                    ScreenAreas::compute(screen).trigger_at(column, row)
                };
                self.model.set_hover(hovered).await;
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
                let down = mouse.kind == MouseEventKind::ScrollDown;
                match ui_state.interactive_modal() {
                    Some(ModalKind::About) => self.model.scroll_about(down).await,
                    Some(ModalKind::Settings) if down => self.model.settings_move_down().await,
                    Some(ModalKind::Settings) => self.model.settings_move_up().await,
                    None => {}
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(&ui_state, screen, column, row).await;
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_click(&self, ui_state: &UiState, screen: Rect, column: u16, row: u16) {
        let model = &self.model;
        let pos = Position::new(column, row);

        if ui_state.error_message.is_some() {
            model.clear_error().await;
            return;
        }
        if ui_state.show_help_popup {
            model.hide_help_popup().await;
            return;
        }

        if let Some(kind) = ui_state.interactive_modal() {
            let dialog = dialog_area(screen, kind, ui_state.modal(kind).visibility(Instant::now()));
            if close_button_area(dialog).contains(pos) {
                model.close_modal(kind, CloseReason::CloseButton).await;
            } else if !dialog.contains(pos) {
                model.close_modal(kind, CloseReason::Overlay).await;
            } else if kind == ModalKind::Settings {
                if let Some(index) = settings_row_at(dialog, ui_state, column, row) {
                    model.set_settings_selected(index).await;
                    self.activate_settings_row().await;
                }
            }
            return;
        }

        let areas = ScreenAreas::compute(screen);
        if let Some(kind) = areas.trigger_at(column, row) {
            model.set_focus(match kind {
                ModalKind::About => Focus::AboutTrigger,
                ModalKind::Settings => Focus::SettingsTrigger,
            })
            .await;
            model.open_modal(kind).await;
            return;
        }

        if areas.is_pick_button(column, row) {
            model.set_focus(Focus::PickButton).await;
            self.spawn_pick();
            return;
        }

        let Some(card) = model.current_card().await else {
            return;
        };
        let card_areas = card_areas(areas.main, &card, Instant::now());
        if !card_areas.card.contains(pos) {
            return;
        }
        model.set_focus(Focus::Card).await;
        match card_areas.hit(column, row) {
            Some(CardHit::Toggle) => {
                model.toggle_show_more().await;
            }
            Some(CardHit::Trailer) => self.open_trailer().await,
            Some(CardHit::Share) => self.open_share().await,
            None => {}
        }
    }

    /// Enter on the focused control
    async fn activate_focus(&self) {
        match self.model.focus().await {
            Focus::PickButton => self.spawn_pick(),
            Focus::AboutTrigger => self.model.open_modal(ModalKind::About).await,
            Focus::SettingsTrigger => self.model.open_modal(ModalKind::Settings).await,
            Focus::Card => {
                self.model.toggle_show_more().await;
            }
        }
    }

    /// Run a pick in the background so the loading state gets drawn
    fn spawn_pick(&self) {
        let controller = self.clone();
        tokio::spawn(async move {
            controller.pick_random_movie().await;
        });
    }
}
