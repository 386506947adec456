//! Movie card: poster panel, title, genres, chips, overview and links

use std::time::Instant;

use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{MovieCard, PosterState};
use super::theme::Theme;
use super::utils::wrapped_height;

const POSTER_WIDTH: u16 = 24;
/// Below this card width the poster panel is left out
const POSTER_MIN_CARD_WIDTH: u16 = 56;
/// Rows the card travels while sliding in
const ENTRANCE_ROWS: f32 = 4.0;

pub const TRAILER_LABEL: &str = "[t] trailer";
pub const SHARE_LABEL: &str = "[s] share";

/// Clickable regions of a drawn card
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardAreas {
    pub card: Rect,
    pub poster: Option<Rect>,
    pub body: Rect,
    pub overview: Rect,
    pub toggle: Option<Rect>,
    pub trailer: Rect,
    pub share: Rect,
}

/// What a click on the card hit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardHit {
    Toggle,
    Trailer,
    Share,
}

impl CardAreas {
    pub fn hit(&self, column: u16, row: u16) -> Option<CardHit> {
        let pos = Position::new(column, row);
        if self.toggle.is_some_and(|r| r.contains(pos)) {
            Some(CardHit::Toggle)
        } else if self.trailer.contains(pos) {
            Some(CardHit::Trailer)
        } else if self.share.contains(pos) {
            Some(CardHit::Share)
        } else {
            None
        }
    }
}

/// Lay the card out in `area` as it looks at `now`
pub fn card_areas(area: Rect, card: &MovieCard, now: Instant) -> CardAreas {
    let offset = ((1.0 - card.entrance(now)) * ENTRANCE_ROWS).round() as u16;
    let offset = offset.min(area.height);
    let card_rect = Rect {
        x: area.x,
        y: area.y + offset,
        width: area.width,
        height: area.height - offset,
    };

    // Border plus one column of padding on each side
    let inner = Rect {
        x: card_rect.x + 2,
        y: card_rect.y + 1,
        width: card_rect.width.saturating_sub(4),
        height: card_rect.height.saturating_sub(2),
    };

    let (poster, body) = if card_rect.width >= POSTER_MIN_CARD_WIDTH {
        let poster = Rect { width: POSTER_WIDTH.min(inner.width), ..inner };
        let body = Rect {
            x: inner.x + POSTER_WIDTH + 2,
            width: inner.width.saturating_sub(POSTER_WIDTH + 2),
            ..inner
        };
        (Some(poster), body)
    } else {
        (None, inner)
    };

    let overview = card.overview();
    // Title, genres, chips, blank line
    let overview_y = body.y + 4;
    let overview_height = wrapped_height(&overview.text, body.width);
    let overview_rect = Rect { x: body.x, y: overview_y, width: body.width, height: overview_height };

    let mut next_row = overview_y + overview_height;
    let toggle = overview.toggle.map(|label| {
        let rect = Rect { x: body.x, y: next_row, width: (label.chars().count() as u16 + 4).min(body.width), height: 1 };
        next_row += 1;
        rect
    });

    let links_y = next_row + 1;
    let trailer = Rect { x: body.x, y: links_y, width: TRAILER_LABEL.len() as u16, height: 1 };
    let share = Rect {
        x: trailer.x + trailer.width + 2,
        y: links_y,
        width: SHARE_LABEL.len() as u16,
        height: 1,
    };

    let clip = |r: Rect| r.intersection(card_rect);
    CardAreas {
        card: card_rect,
        poster: poster.map(clip),
        body: clip(body),
        overview: clip(overview_rect),
        toggle: toggle.map(clip),
        trailer: clip(trailer),
        share: clip(share),
    }
}

pub fn render_movie_card(frame: &mut Frame, area: Rect, card: &MovieCard, focused: bool, theme: &Theme, now: Instant) {
    let areas = card_areas(area, card, now);
    if areas.card.is_empty() {
        return;
    }

    frame.render_widget(Clear, areas.card);
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border(focused))
            .style(theme.surface()),
        areas.card,
    );

    if let Some(poster) = areas.poster {
        render_poster(frame, poster, card, theme);
    }

    let movie = &card.movie;
    let mut chips = Vec::new();
    let year = movie.release_year();
    if !year.is_empty() {
        chips.push(Span::styled(format!(" {} ", year), theme.base()));
        chips.push(Span::raw(" "));
    }
    chips.push(Span::styled(format!(" {} ", theme.text(&movie.runtime_label())), theme.base()));
    if let Some(date) = movie.release_date_parsed() {
        let released = format!("  released {}", date.format("%B %-d, %Y"));
        chips.push(Span::styled(theme.text(&released), theme.muted()));
    }

    let header = vec![
        Line::from(Span::styled(theme.text(&movie.title), theme.strong())),
        Line::from(Span::styled(theme.text(&movie.genre_summary()), theme.muted())),
        Line::from(chips),
    ];
    let header_area = Rect { height: 3u16.min(areas.body.height), ..areas.body };
    frame.render_widget(Paragraph::new(header), header_area);

    let overview = card.overview();
    frame.render_widget(
        Paragraph::new(theme.text(&overview.text))
            .style(theme.muted())
            .wrap(Wrap { trim: false }),
        areas.overview,
    );

    if let (Some(label), Some(rect)) = (overview.toggle, areas.toggle) {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("[m] ", theme.muted()),
                Span::styled(theme.text(label), theme.accent().add_modifier(Modifier::UNDERLINED)),
            ])),
            rect,
        );
    }

    frame.render_widget(Paragraph::new(Span::styled(theme.text(TRAILER_LABEL), theme.accent())), areas.trailer);
    frame.render_widget(Paragraph::new(Span::styled(theme.text(SHARE_LABEL), theme.accent())), areas.share);
}

fn render_poster(frame: &mut Frame, area: Rect, card: &MovieCard, theme: &Theme) {
    let (style, caption) = match card.poster {
        PosterState::Loading => (
            Style::default()
                .fg(theme.palette.muted)
                .bg(theme.palette.border)
                .add_modifier(Modifier::DIM),
            "loading poster",
        ),
        PosterState::Loaded => (
            Style::default().fg(theme.palette.app_bg).bg(theme.palette.accent),
            "poster",
        ),
    };

    let title = theme.text(&card.movie.title);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(theme.text(caption)),
    ];

    let poster = Paragraph::new(lines)
        .centered()
        .wrap(Wrap { trim: true })
        .style(style)
        .block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(poster, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MovieDetails, Preferences, CARD_ENTRANCE};
    use crate::view::test_helpers::buffer_text;
    use ratatui::{backend::TestBackend, Terminal};

    fn long_card() -> MovieCard {
        let movie = MovieDetails {
            id: 603,
            title: "The Matrix".into(),
            overview: Some("w".repeat(600)),
            release_date: Some("1999-03-30".into()),
            runtime: Some(136),
            ..Default::default()
        };
        MovieCard::new(movie, "vKQi3bBA1y8")
    }

    #[test]
    fn settled_card_has_no_entrance_offset() {
        let card = long_card();
        let area = Rect::new(0, 6, 80, 30);
        let areas = card_areas(area, &card, card.shown_at + CARD_ENTRANCE);
        assert_eq!(areas.card, area);
        assert!(areas.poster.is_some());
        assert!(areas.toggle.is_some());
    }

    #[test]
    fn card_slides_in_from_below() {
        let card = long_card();
        let area = Rect::new(0, 6, 80, 30);
        let areas = card_areas(area, &card, card.shown_at);
        assert_eq!(areas.card.y, 6 + ENTRANCE_ROWS as u16);
    }

    #[test]
    fn link_hits_resolve() {
        let card = long_card();
        let areas = card_areas(Rect::new(0, 0, 80, 40), &card, card.shown_at + CARD_ENTRANCE);
        assert_eq!(areas.hit(areas.trailer.x, areas.trailer.y), Some(CardHit::Trailer));
        assert_eq!(areas.hit(areas.share.x + 1, areas.share.y), Some(CardHit::Share));
        let toggle = areas.toggle.unwrap();
        assert_eq!(areas.hit(toggle.x, toggle.y), Some(CardHit::Toggle));
        assert_eq!(areas.hit(0, 0), None);
    }

    #[test]
    fn renders_year_runtime_and_toggle() {
        let card = long_card();
        let theme = Theme::new(&Preferences::default());
        let backend = TestBackend::new(80, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let now = card.shown_at + CARD_ENTRANCE;

        terminal
            .draw(|f| render_movie_card(f, f.area(), &card, false, &theme, now))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("the matrix"));
        assert!(text.contains("1999"));
        assert!(text.contains("136 min"));
        assert!(text.contains("show more"));
        assert!(text.contains("[t] trailer"));
        assert!(text.contains("loading poster"));
        assert!(text.contains("released march 30, 1999"));
    }
}
