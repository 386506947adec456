//! Page shell: header with dialog triggers, pick button, main slot, footer

use std::time::{Duration, Instant};

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::model::{Focus, ModalKind, UiState};
use super::theme::Theme;
use super::utils::{centered_rect, spinner_frame};

/// Widest the page column gets
const MAX_PAGE_WIDTH: u16 = 100;
const TRIGGER_WIDTH: u16 = 5;
const PICK_BUTTON_WIDTH: u16 = 24;
/// Hover time before a trigger shows its tooltip
pub const TOOLTIP_DELAY: Duration = Duration::from_millis(150);

/// Where everything on the page sits for a given terminal size.
///
/// Drawing and mouse hit testing both go through this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenAreas {
    pub page: Rect,
    pub title: Rect,
    pub about_trigger: Rect,
    pub settings_trigger: Rect,
    pub pick_button: Rect,
    pub main: Rect,
    pub footer: Rect,
}

impl ScreenAreas {
    pub fn compute(area: Rect) -> Self {
        let page_width = area.width.min(MAX_PAGE_WIDTH);
        let page = Rect {
            x: area.x + (area.width - page_width) / 2,
            y: area.y,
            width: page_width,
            height: area.height,
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Pick button
                Constraint::Min(0),    // Main content
                Constraint::Length(1), // Footer
            ])
            .split(page);

        let header = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(TRIGGER_WIDTH),
                Constraint::Length(TRIGGER_WIDTH),
            ])
            .split(rows[0]);

        Self {
            page,
            title: header[0],
            about_trigger: header[1],
            settings_trigger: header[2],
            pick_button: centered_rect(rows[1], PICK_BUTTON_WIDTH, 3),
            main: rows[2],
            footer: rows[3],
        }
    }

    pub fn trigger(&self, kind: ModalKind) -> Rect {
        match kind {
            ModalKind::About => self.about_trigger,
            ModalKind::Settings => self.settings_trigger,
        }
    }

    pub fn trigger_at(&self, column: u16, row: u16) -> Option<ModalKind> {
        let pos = Position::new(column, row);
        [ModalKind::About, ModalKind::Settings]
            .into_iter()
            .find(|kind| self.trigger(*kind).contains(pos))
    }

    pub fn is_pick_button(&self, column: u16, row: u16) -> bool {
        self.pick_button.contains(Position::new(column, row))
    }
}

pub fn render_header(frame: &mut Frame, areas: &ScreenAreas, ui_state: &UiState, theme: &Theme) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(theme.text("movie explorer"), theme.strong()),
        Span::styled(theme.text("  · find something to watch"), theme.muted()),
    ]))
    .block(Block::default().borders(Borders::NONE))
    .style(theme.base());
    frame.render_widget(title, areas.title.inner(ratatui::layout::Margin::new(1, 1)));

    for kind in [ModalKind::About, ModalKind::Settings] {
        let modal = ui_state.modal(kind);
        let focused = matches!(
            (kind, ui_state.focus),
            (ModalKind::About, Focus::AboutTrigger) | (ModalKind::Settings, Focus::SettingsTrigger)
        );
        let hovered = ui_state.hover.is_some_and(|h| h.trigger == kind);

        let trigger = Paragraph::new(modal.trigger_icon)
            .centered()
            .style(theme.surface())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border(focused || hovered)),
            );
        frame.render_widget(trigger, areas.trigger(kind));
    }
}

pub fn render_pick_button(frame: &mut Frame, areas: &ScreenAreas, ui_state: &UiState, theme: &Theme, now: Instant) {
    let loading = ui_state.picker.is_loading();
    let label = match ui_state.picker.loading_since() {
        Some(since) => spinner_frame(since, now).to_string(),
        None => theme.text("Pick random movie"),
    };

    let mut style = theme.surface();
    if loading {
        style = style.add_modifier(Modifier::DIM);
    }

    let button = Paragraph::new(label)
        .centered()
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border(ui_state.focus == Focus::PickButton)),
        );
    frame.render_widget(button, areas.pick_button);
}

pub fn render_footer(frame: &mut Frame, areas: &ScreenAreas, theme: &Theme) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(theme.text("data by TMDB"), theme.muted()),
        Span::styled("  ·  ", theme.muted()),
        Span::styled(theme.text("r pick · m more · t trailer · s share · h help · q quit"), theme.muted()),
    ]))
    .centered()
    .style(theme.base());
    frame.render_widget(footer, areas.footer);
}

/// Tooltip with the dialog title under a hovered (or focused) trigger
pub fn render_tooltip(frame: &mut Frame, areas: &ScreenAreas, ui_state: &UiState, theme: &Theme, now: Instant) {
    let hovered = ui_state
        .hover
        .filter(|h| now.duration_since(h.since) >= TOOLTIP_DELAY)
        .map(|h| h.trigger);
    let focused = match ui_state.focus {
        Focus::AboutTrigger => Some(ModalKind::About),
        Focus::SettingsTrigger => Some(ModalKind::Settings),
        _ => None,
    };
    let Some(kind) = hovered.or(focused) else {
        return;
    };
    if ui_state.modal(kind).is_present() {
        return;
    }

    let text = theme.text(ui_state.modal(kind).title);
    let width = text.chars().count() as u16 + 2;
    let trigger = areas.trigger(kind);
    let page_right = areas.page.x + areas.page.width;
    let area = Rect {
        x: (trigger.x + trigger.width / 2).saturating_sub(width / 2).min(page_right.saturating_sub(width)),
        y: trigger.y + trigger.height,
        width,
        height: 1,
    }
    .intersection(frame.area());
    if area.is_empty() {
        return;
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(text).centered().style(theme.surface()), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triggers_sit_at_the_right_of_the_header() {
        let areas = ScreenAreas::compute(Rect::new(0, 0, 80, 30));
        assert_eq!(areas.settings_trigger.x + areas.settings_trigger.width, 80);
        assert_eq!(areas.about_trigger.x + TRIGGER_WIDTH, areas.settings_trigger.x);
        assert_eq!(areas.trigger_at(areas.about_trigger.x + 1, 1), Some(ModalKind::About));
        assert_eq!(areas.trigger_at(0, 0), None);
    }

    #[test]
    fn page_is_centred_on_wide_terminals() {
        let areas = ScreenAreas::compute(Rect::new(0, 0, 200, 40));
        assert_eq!(areas.page.width, MAX_PAGE_WIDTH);
        assert_eq!(areas.page.x, 50);
    }

    #[test]
    fn pick_button_is_hit_testable() {
        let areas = ScreenAreas::compute(Rect::new(0, 0, 80, 30));
        let b = areas.pick_button;
        assert!(areas.is_pick_button(b.x + 1, b.y + 1));
        assert!(!areas.is_pick_button(0, 0));
        assert_eq!(b.y, 3);
    }

    #[test]
    fn tooltip_waits_for_hover_delay() {
        use crate::model::{Hover, Preferences};
        use crate::view::test_helpers::buffer_text;
        use ratatui::{backend::TestBackend, Terminal};

        let t0 = Instant::now();
        let theme = Theme::new(&Preferences::default());
        let mut ui = UiState::default();
        ui.hover = Some(Hover { trigger: ModalKind::About, since: t0 });

        let tooltip_row = |now: Instant| {
            let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
            terminal
                .draw(|f| {
                    let areas = ScreenAreas::compute(f.area());
                    render_tooltip(f, &areas, &ui, &theme, now);
                })
                .unwrap();
            buffer_text(&terminal).lines().nth(3).unwrap_or_default().to_string()
        };

        assert!(!tooltip_row(t0).contains("about"));
        assert!(tooltip_row(t0 + TOOLTIP_DELAY).contains("about"));
    }
}
