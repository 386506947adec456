//! Utility functions for rendering UI components

use std::time::Instant;

use ratatui::layout::Rect;

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// A `width` x `height` rect centred in `area`, clipped to it
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// Spinner glyph for the current instant, relative to `since`
pub fn spinner_frame(since: Instant, now: Instant) -> &'static str {
    let step = now.duration_since(since).as_millis() / 80;
    SPINNER[(step as usize) % SPINNER.len()]
}

/// Number of rows `text` takes when wrapped at `width` columns
pub fn wrapped_height(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    text.lines()
        .map(|line| ((line.chars().count() as f32) / (width as f32)).ceil().max(1.0) as u16)
        .sum()
}
