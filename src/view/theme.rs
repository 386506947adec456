//! Colour palette and letter case applied to everything drawn

use ratatui::style::{Color, Modifier, Style};

use crate::model::{LetterCase, Preferences, ThemeMode};

/// Slate scale, steps named after the radix colour steps they mirror
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub app_bg: Color,
    pub surface: Color,
    pub border: Color,
    pub border_hover: Color,
    pub muted: Color,
    pub text: Color,
    pub accent: Color,
    pub error: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            app_bg: Color::Rgb(0x11, 0x11, 0x13),
            surface: Color::Rgb(0x21, 0x22, 0x25),
            border: Color::Rgb(0x43, 0x48, 0x4e),
            border_hover: Color::Rgb(0x5a, 0x61, 0x69),
            muted: Color::Rgb(0xb0, 0xb4, 0xba),
            text: Color::Rgb(0xed, 0xee, 0xf0),
            accent: Color::Rgb(0x3c, 0xbe, 0xc9),
            error: Color::Rgb(0xff, 0x95, 0x92),
        }
    }

    pub fn light() -> Self {
        Self {
            app_bg: Color::Rgb(0xfc, 0xfc, 0xfd),
            surface: Color::Rgb(0xf0, 0xf0, 0xf3),
            border: Color::Rgb(0xcd, 0xce, 0xd6),
            border_hover: Color::Rgb(0xb9, 0xbb, 0xc6),
            muted: Color::Rgb(0x60, 0x64, 0x6c),
            text: Color::Rgb(0x1c, 0x20, 0x24),
            accent: Color::Rgb(0x00, 0x7c, 0x9e),
            error: Color::Rgb(0xce, 0x2c, 0x31),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub palette: Palette,
    pub letter_case: LetterCase,
}

impl Theme {
    pub fn new(preferences: &Preferences) -> Self {
        let palette = match preferences.theme {
            ThemeMode::Dark => Palette::dark(),
            ThemeMode::Light => Palette::light(),
        };
        Self { palette, letter_case: preferences.letter_case }
    }

    /// `s` in the user's letter case
    pub fn text(&self, s: &str) -> String {
        match self.letter_case {
            LetterCase::Lowercase => s.to_lowercase(),
            LetterCase::Default => s.to_string(),
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.palette.text).bg(self.palette.app_bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.palette.muted)
    }

    pub fn strong(&self) -> Style {
        Style::default().fg(self.palette.text).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, highlighted: bool) -> Style {
        if highlighted {
            Style::default().fg(self.palette.border_hover)
        } else {
            Style::default().fg(self.palette.border)
        }
    }

    pub fn surface(&self) -> Style {
        Style::default().fg(self.palette.text).bg(self.palette.surface)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.palette.accent).add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.palette.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_preference_lowercases() {
        let theme = Theme::new(&Preferences::default());
        assert_eq!(theme.text("Pick Random Movie"), "pick random movie");
    }

    #[test]
    fn default_case_keeps_text() {
        let prefs = Preferences { letter_case: LetterCase::Default, ..Default::default() };
        assert_eq!(Theme::new(&prefs).text("The Matrix"), "The Matrix");
    }
}
