//! Genre catalogue and the user's genre filter

use serde::{Deserialize, Serialize};

/// A TMDB movie genre
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

/// TMDB's movie genre list, used until the live list has been fetched.
pub const BUILTIN_GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

pub fn builtin_genres() -> Vec<Genre> {
    BUILTIN_GENRES
        .iter()
        .map(|(id, name)| Genre { id: *id, name: name.to_string() })
        .collect()
}

/// Genre ids constraining the random pick.
///
/// Keeps insertion order and never holds the same id twice, also when read
/// back from disk. Empty means "any genre".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<u32>", into = "Vec<u32>")]
pub struct GenreFilter {
    ids: Vec<u32>,
}

impl GenreFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = u32>) -> Self {
        let mut filter = Self::new();
        for id in ids {
            if !filter.contains(id) {
                filter.ids.push(id);
            }
        }
        filter
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    /// Add or remove `id`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: u32) -> bool {
        if let Some(pos) = self.ids.iter().position(|g| *g == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Pipe-separated ids, the form both the local route and TMDB's
    /// `with_genres` ("any of") expect.
    pub fn to_query(&self) -> String {
        self.ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl From<Vec<u32>> for GenreFilter {
    fn from(ids: Vec<u32>) -> Self {
        Self::from_ids(ids)
    }
}

impl From<GenreFilter> for Vec<u32> {
    fn from(filter: GenreFilter) -> Self {
        filter.ids
    }
}
