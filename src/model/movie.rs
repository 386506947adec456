//! Movie records as returned by TMDB, and the text shown for them on a card

use std::borrow::Cow;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

use super::genres::Genre;

/// Overviews longer than this are cut on the card until expanded.
pub const OVERVIEW_LIMIT: usize = 500;
/// How many genre names the card lists.
pub const GENRE_SUMMARY_LIMIT: usize = 3;

pub const TRAILER_URL: &str = "https://www.youtube.com/watch?v=";
pub const SHARE_URL: &str = "https://twitter.com/intent/tweet";

/// Full movie record from `GET /movie/{id}?append_to_response=videos`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub videos: VideoList,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

impl MovieDetails {
    pub fn overview(&self) -> &str {
        self.overview.as_deref().unwrap_or("")
    }

    /// YouTube key of the first trailer, or of any YouTube video if the
    /// movie has no trailer.
    pub fn trailer_key(&self) -> Option<String> {
        let youtube = || self.videos.results.iter().filter(|v| v.site == "YouTube" && !v.key.is_empty());
        youtube()
            .find(|v| v.kind == "Trailer")
            .or_else(|| youtube().next())
            .map(|v| v.key.clone())
    }

    pub fn genre_summary(&self) -> String {
        genre_summary(&self.genres)
    }

    /// First four characters of the release date, empty when unknown.
    pub fn release_year(&self) -> String {
        self.release_date
            .as_deref()
            .map(|d| d.chars().take(4).collect())
            .unwrap_or_default()
    }

    /// Release date parsed as a calendar date, when TMDB sent a full one.
    pub fn release_date_parsed(&self) -> Option<chrono::NaiveDate> {
        self.release_date
            .as_deref()
            .and_then(|d| chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    pub fn runtime_label(&self) -> String {
        match self.runtime {
            Some(minutes) => format!("{} min", minutes),
            None => " min".to_string(),
        }
    }
}

/// Up to the first three genre names, comma separated.
pub fn genre_summary(genres: &[Genre]) -> String {
    genres
        .iter()
        .take(GENRE_SUMMARY_LIMIT)
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// What the overview paragraph shows, and the label of its toggle if any
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverviewDisplay<'a> {
    pub text: Cow<'a, str>,
    pub toggle: Option<&'static str>,
}

pub fn overview_display(overview: &str, show_more: bool) -> OverviewDisplay<'_> {
    if overview.chars().count() <= OVERVIEW_LIMIT {
        return OverviewDisplay { text: Cow::Borrowed(overview), toggle: None };
    }

    if show_more {
        OverviewDisplay { text: Cow::Borrowed(overview), toggle: Some("show less") }
    } else {
        let short: String = overview.chars().take(OVERVIEW_LIMIT).collect();
        OverviewDisplay { text: Cow::Owned(format!("{}...", short)), toggle: Some("show more") }
    }
}

pub fn trailer_url(trailer_key: &str) -> String {
    format!("{}{}", TRAILER_URL, trailer_key)
}

/// Tweet intent for `title`, linking back to `path` on `site_url`.
pub fn share_url(title: &str, site_url: &str, path: &str) -> String {
    format!(
        "{}?text={}%20%0A%0A&url={}{}",
        SHARE_URL,
        utf8_percent_encode(title, NON_ALPHANUMERIC),
        site_url.trim_end_matches('/'),
        path
    )
}

pub fn poster_url(image_base_url: &str, poster_path: &str) -> String {
    format!("{}{}", image_base_url.trim_end_matches('/'), poster_path)
}
