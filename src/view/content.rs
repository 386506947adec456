//! Main content area rendering (home page, loading state, movie card)

use std::time::Instant;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{ContentState, ContentView, Focus, UiState};
use super::card::render_movie_card;
use super::theme::Theme;

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
    theme: &Theme,
    now: Instant,
) {
    let is_focused = ui_state.focus == Focus::Card;

    if content_state.is_loading {
        let loading = Paragraph::new(theme.text("Loading..."))
            .style(theme.muted())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .padding(Padding::horizontal(1))
                    .border_style(theme.border(is_focused)),
            );
        frame.render_widget(loading, area);
        return;
    }

    match &content_state.view {
        ContentView::Home => {
            let lines = vec![
                Line::from(Span::styled(theme.text("Can't decide what to watch?"), theme.strong())),
                Line::from(""),
                Line::from(Span::styled(
                    theme.text("Press r or click the button above and a random movie will show up here."),
                    theme.muted(),
                )),
                Line::from(Span::styled(
                    theme.text("Narrow it down by genre in the settings (o)."),
                    theme.muted(),
                )),
            ];
            let home = Paragraph::new(lines)
                .centered()
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .padding(Padding::new(1, 1, 1, 0))
                        .border_style(theme.border(is_focused)),
                );
            frame.render_widget(home, area);
        }
        ContentView::Movie(card) => {
            render_movie_card(frame, area, card, is_focused, theme, now);
        }
    }
}
