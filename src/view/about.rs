//! Body of the about dialog

use ratatui::text::{Line, Span};

use super::theme::Theme;

struct Tool {
    name: &'static str,
    link: &'static str,
}

struct StackEntry {
    category: &'static str,
    tools: &'static [Tool],
}

const STACK: &[StackEntry] = &[
    StackEntry {
        category: "terminal ui",
        tools: &[
            Tool { name: "ratatui", link: "https://ratatui.rs/" },
            Tool { name: "crossterm", link: "https://github.com/crossterm-rs/crossterm" },
        ],
    },
    StackEntry {
        category: "runtime",
        tools: &[
            Tool { name: "tokio", link: "https://tokio.rs/" },
            Tool { name: "futures", link: "https://rust-lang.github.io/futures-rs/" },
        ],
    },
    StackEntry {
        category: "data fetching",
        tools: &[
            Tool { name: "reqwest", link: "https://github.com/seanmonstar/reqwest" },
            Tool { name: "serde", link: "https://serde.rs/" },
        ],
    },
    StackEntry {
        category: "movies data",
        tools: &[Tool {
            name: "tmdb api",
            link: "https://developers.themoviedb.org/3/getting-started/introduction",
        }],
    },
];

pub const TWITTER_URL: &str = "https://twitter.com/gabxyzdev";
pub const GITHUB_URL: &str = "https://github.com/gabxyz";
pub const TMDB_URL: &str = "https://www.themoviedb.org/";

pub fn about_lines(theme: &Theme) -> Vec<Line<'static>> {
    let heading = |s: &str| Line::from(Span::styled(theme.text(s), theme.strong()));
    let body = |s: &str| Line::from(Span::styled(theme.text(s), theme.muted()));
    let link = |label: &str, url: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {} ↗ ", theme.text(label)), theme.base()),
            Span::styled(url, theme.muted()),
        ])
    };

    let mut lines = vec![
        heading("what and why"),
        body(
            "this is a little app for people that, just like me, have trouble choosing a movie \
             to watch. press r and let chance decide.",
        ),
        Line::from(""),
        heading("built with"),
        body("these are some of the tools used to build it."),
    ];

    for entry in STACK {
        lines.push(Line::from(Span::styled(format!("{} -->", theme.text(entry.category)), theme.base())));
        for tool in entry.tools {
            lines.push(link(tool.name, tool.link));
        }
    }

    lines.extend([
        Line::from(""),
        heading("me"),
        body("i'm gabriel, passionate about well-crafted user interfaces and clean design."),
        link("twitter", TWITTER_URL),
        link("github", GITHUB_URL),
        Line::from(""),
        heading("notes"),
        body(
            "you may have noticed that the text here is all lowercase. this is intentional, \
             it simply looks nicer. if you dislike it, you can change it in the settings menu.",
        ),
        Line::from(""),
        Line::from(vec![
            Span::styled("TMDB ", theme.accent()),
            Span::styled(
                theme.text("movie explorer uses the TMDB API but is not endorsed or certified by TMDB."),
                theme.muted(),
            ),
        ]),
        link("themoviedb.org", TMDB_URL),
    ]);

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LetterCase, Preferences};

    fn plain(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn lists_author_links_and_attribution() {
        let text = plain(&about_lines(&Theme::new(&Preferences::default())));
        assert!(text.contains(TWITTER_URL));
        assert!(text.contains(GITHUB_URL));
        assert!(text.contains("not endorsed or certified by tmdb"));
        assert!(text.contains("built with"));
        assert!(text.contains("ratatui"));
    }

    #[test]
    fn attribution_keeps_case_when_asked() {
        let prefs = Preferences { letter_case: LetterCase::Default, ..Default::default() };
        let text = plain(&about_lines(&Theme::new(&prefs)));
        assert!(text.contains("uses the TMDB API but is not endorsed or certified by TMDB."));
    }
}
