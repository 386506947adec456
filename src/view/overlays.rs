//! Overlay rendering (dialogs, error notification, help popup)

use std::time::Instant;

use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{ModalKind, Preferences, SettingsRow, UiState};
use super::about::about_lines;
use super::theme::Theme;
use super::utils::{centered_rect, wrapped_height};

/// Where the dialog for `kind` sits in `area` at the given animation
/// progress. Dialogs grow slightly into place while opening.
pub fn dialog_area(area: Rect, kind: ModalKind, visibility: f32) -> Rect {
    let (width, height): (u16, u16) = match kind {
        ModalKind::About => (72, 32),
        ModalKind::Settings => (48, 30),
    };
    let full = centered_rect(
        area,
        width.min(area.width.saturating_sub(4)),
        height.min(area.height.saturating_sub(2)),
    );
    let scale = 0.92 + 0.08 * visibility.clamp(0.0, 1.0);
    centered_rect(
        full,
        (full.width as f32 * scale).round() as u16,
        (full.height as f32 * scale).round() as u16,
    )
}

/// The close control, drawn on the dialog's top border
pub fn close_button_area(dialog: Rect) -> Rect {
    Rect {
        x: dialog.x + dialog.width.saturating_sub(4),
        y: dialog.y,
        width: 3u16.min(dialog.width),
        height: 1u16.min(dialog.height),
    }
}

/// Inside of the dialog below its description line
pub fn dialog_body_area(dialog: Rect) -> Rect {
    Rect {
        x: dialog.x + 2,
        y: dialog.y + 3,
        width: dialog.width.saturating_sub(4),
        height: dialog.height.saturating_sub(4),
    }
}

/// First settings row shown so that `selected` stays visible
pub fn settings_scroll(selected: usize, visible_rows: u16) -> usize {
    selected.saturating_sub((visible_rows as usize).saturating_sub(1))
}

/// Index of the settings row under the given cell, if any
pub fn settings_row_at(dialog: Rect, ui_state: &UiState, column: u16, row: u16) -> Option<usize> {
    let body = dialog_body_area(dialog);
    if !body.contains(Position::new(column, row)) {
        return None;
    }
    let index = settings_scroll(ui_state.settings_selected, body.height) + (row - body.y) as usize;
    (index < ui_state.settings_rows().len()).then_some(index)
}

pub fn render_modal(
    frame: &mut Frame,
    kind: ModalKind,
    ui_state: &UiState,
    preferences: &Preferences,
    theme: &Theme,
    now: Instant,
) {
    let modal = ui_state.modal(kind);
    if !modal.is_present() {
        return;
    }

    let area = frame.area();
    // Overlay dims whatever sits behind the dialog
    frame.buffer_mut().set_style(area, Style::default().add_modifier(Modifier::DIM));

    let visibility = modal.visibility(now);
    let dialog = dialog_area(area, kind, visibility);
    frame.render_widget(Clear, dialog);

    let mut border = theme.border(true);
    let mut content = theme.surface();
    if visibility < 1.0 {
        border = border.add_modifier(Modifier::DIM);
        content = content.add_modifier(Modifier::DIM);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .style(content)
        .title(Span::styled(format!(" {} ", theme.text(modal.title)), theme.strong()))
        .title(Line::from(Span::styled(format!(" {} ", modal.close_icon), theme.muted())).right_aligned());
    frame.render_widget(block, dialog);

    let description = Rect {
        x: dialog.x + 2,
        y: dialog.y + 1,
        width: dialog.width.saturating_sub(4),
        height: 1u16.min(dialog.height.saturating_sub(2)),
    };
    frame.render_widget(
        Paragraph::new(Span::styled(theme.text(modal.description), theme.muted())),
        description,
    );

    let body = dialog_body_area(dialog);
    match kind {
        ModalKind::About => {
            let about = Paragraph::new(about_lines(theme))
                .wrap(Wrap { trim: false })
                .scroll((ui_state.about_scroll, 0));
            frame.render_widget(about, body);
        }
        ModalKind::Settings => render_settings_body(frame, body, ui_state, preferences, theme),
    }
}

fn render_settings_body(frame: &mut Frame, area: Rect, ui_state: &UiState, preferences: &Preferences, theme: &Theme) {
    let rows = ui_state.settings_rows();
    let scroll = settings_scroll(ui_state.settings_selected, area.height);

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(scroll)
        .take(area.height as usize)
        .map(|(i, row)| {
            let (marker, label, value) = match *row {
                SettingsRow::Genre(index) => {
                    let genre = &ui_state.genre_catalogue[index];
                    let checked = preferences.genres.contains(genre.id);
                    (if checked { "[x]" } else { "[ ]" }, genre.name.clone(), String::new())
                }
                SettingsRow::LetterCase => ("Aa ", "letter case".to_string(), preferences.letter_case.label().to_string()),
                SettingsRow::Theme => ("◐  ", "theme".to_string(), preferences.theme.label().to_string()),
            };

            let selected = i == ui_state.settings_selected;
            let style = if selected {
                theme.accent().add_modifier(Modifier::REVERSED)
            } else {
                theme.base()
            };

            let mut spans = vec![
                Span::styled(format!("{} ", marker), style),
                Span::styled(theme.text(&label), style),
            ];
            if !value.is_empty() {
                spans.push(Span::styled(format!(": {}", theme.text(&value)), style));
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState, theme: &Theme) {
    if let Some(ref error_msg) = ui_state.error_message {
        let area = frame.area();
        let message = theme.text(error_msg);

        // Fixed width popup (responsive to screen size)
        let popup_width = 52u16.min(area.width.saturating_sub(4));
        let inner_width = popup_width.saturating_sub(2);

        // Height: top border (1) + error lines + bottom border (1)
        let popup_height = (2 + wrapped_height(&message, inner_width).max(1)).min(area.height.saturating_sub(4));

        let popup_area = Rect {
            x: area.width.saturating_sub(popup_width) / 2,
            y: area.height.saturating_sub(popup_height) / 2,
            width: popup_width,
            height: popup_height,
        };

        frame.render_widget(Clear, popup_area);

        let error_widget = Paragraph::new(message)
            .style(theme.error())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.error())
                    .title(format!(" {} ", theme.text("Error (Esc to dismiss)")))
                    .title_style(theme.error().add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(theme.palette.surface)),
            );

        frame.render_widget(error_widget, popup_area);
    }
}

pub fn render_help_popup(frame: &mut Frame, theme: &Theme) {
    let area = frame.area();

    let keybindings = [
        ("", "── Movies ──"),
        ("R", "Pick random movie"),
        ("M", "Show more / less of the overview"),
        ("T", "Open trailer"),
        ("S", "Share on twitter"),
        ("Backspace", "Go back"),
        ("", ""),
        ("", "── Dialogs ──"),
        ("A", "About"),
        ("O / ,", "Settings"),
        ("↑ / ↓", "Move / scroll"),
        ("Enter / Space", "Toggle setting"),
        ("C", "Clear genre filter"),
        ("Esc / X", "Close dialog"),
        ("", ""),
        ("", "── General ──"),
        ("Tab / Shift+Tab", "Cycle focus"),
        ("Enter", "Activate focused control"),
        ("H / ?", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let popup_width = 56u16.min(area.width);
    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_area = centered_rect(area, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(format!("{:^50}", theme.text(desc)), theme.accent()))
            } else {
                Line::from(vec![
                    Span::styled(format!("{:>16}", key), theme.strong()),
                    Span::raw("  "),
                    Span::styled(theme.text(desc), theme.base()),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border(true))
                .title(format!(" {} ", theme.text("Help (H or Esc to close)")))
                .title_style(theme.strong()),
        )
        .style(theme.surface());

    frame.render_widget(help_text, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_button_is_on_top_border_at_right() {
        let dialog = Rect::new(10, 5, 40, 20);
        let close = close_button_area(dialog);
        assert_eq!(close.y, 5);
        assert_eq!(close.x + close.width, 49);
    }

    #[test]
    fn open_dialog_is_full_size() {
        let area = Rect::new(0, 0, 100, 40);
        let open = dialog_area(area, ModalKind::About, 1.0);
        let opening = dialog_area(area, ModalKind::About, 0.0);
        assert_eq!(open.width, 72);
        assert!(opening.width < open.width);
    }

    #[test]
    fn settings_scroll_keeps_selection_visible() {
        assert_eq!(settings_scroll(0, 10), 0);
        assert_eq!(settings_scroll(9, 10), 0);
        assert_eq!(settings_scroll(12, 10), 3);
    }

    #[test]
    fn settings_rows_are_hit_testable() {
        let ui = UiState::default();
        let dialog = dialog_area(Rect::new(0, 0, 100, 40), ModalKind::Settings, 1.0);
        let body = dialog_body_area(dialog);
        assert_eq!(settings_row_at(dialog, &ui, body.x, body.y), Some(0));
        assert_eq!(settings_row_at(dialog, &ui, body.x, body.y + 2), Some(2));
        assert_eq!(settings_row_at(dialog, &ui, 0, 0), None);
    }
}
