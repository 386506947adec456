//! Local routes: the random-id fetch key and the in-app navigation paths

use std::fmt;

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::genres::GenreFilter;

pub const RANDOM_ID_ROUTE: &str = "/api/randomId";
const GENRES_PARAM: &str = "genresId";

/// Fetch key for a random movie id scoped to `genres`.
///
/// An empty filter still carries the parameter: `/api/randomId?genresId=`.
pub fn random_id_key(genres: &GenreFilter) -> String {
    format!("{}?{}={}", RANDOM_ID_ROUTE, GENRES_PARAM, genres.to_query())
}

/// Inverse of [`random_id_key`]. Also accepts a percent-encoded pipe.
pub fn parse_random_id_key(key: &str) -> Result<GenreFilter, ApiError> {
    let (path, query) = key.split_once('?').unwrap_or((key, ""));
    if path != RANDOM_ID_ROUTE {
        return Err(ApiError::InvalidRoute(key.to_string()));
    }

    let raw = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == GENRES_PARAM)
        .map(|(_, value)| value)
        .unwrap_or("");
    let decoded = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| ApiError::InvalidRoute(key.to_string()))?;

    let mut ids = Vec::new();
    for part in decoded.split('|').filter(|p| !p.is_empty()) {
        let id = part
            .trim()
            .parse::<u32>()
            .map_err(|_| ApiError::InvalidRoute(key.to_string()))?;
        ids.push(id);
    }
    Ok(GenreFilter::from_ids(ids))
}

/// Body returned by the random-id route
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomIdResponse {
    #[serde(default)]
    pub id: Option<u64>,
}

/// Navigation target inside the client
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Home,
    Movie(u64),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Movie(id) => format!("/movie/{}", id),
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Some(Route::Home);
        }
        trimmed
            .strip_prefix("/movie/")
            .and_then(|id| id.parse().ok())
            .map(Route::Movie)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_key_for_empty_selection() {
        assert_eq!(random_id_key(&GenreFilter::new()), "/api/randomId?genresId=");
    }

    #[test]
    fn fetch_key_for_two_genres() {
        let key = random_id_key(&GenreFilter::from_ids([28, 12]));
        assert_eq!(key, "/api/randomId?genresId=28|12");
    }

    #[test]
    fn parse_accepts_built_keys() {
        let filter = GenreFilter::from_ids([28, 12]);
        assert_eq!(parse_random_id_key(&random_id_key(&filter)).unwrap(), filter);
        assert!(parse_random_id_key("/api/randomId?genresId=").unwrap().is_empty());
        assert!(parse_random_id_key("/api/randomId").unwrap().is_empty());
    }

    #[test]
    fn parse_accepts_encoded_pipe() {
        let filter = parse_random_id_key("/api/randomId?genresId=28%7C12").unwrap();
        assert_eq!(filter.ids(), &[28, 12]);
    }

    #[test]
    fn parse_rejects_other_routes_and_bad_ids() {
        assert!(matches!(
            parse_random_id_key("/api/other?genresId=1"),
            Err(ApiError::InvalidRoute(_))
        ));
        assert!(matches!(
            parse_random_id_key("/api/randomId?genresId=action"),
            Err(ApiError::InvalidRoute(_))
        ));
    }

    #[test]
    fn response_without_id_decodes_to_none() {
        let body: RandomIdResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(body.id, None);
        let body: RandomIdResponse = serde_json::from_str(r#"{"id": 603}"#).unwrap();
        assert_eq!(body.id, Some(603));
    }

    #[test]
    fn movie_route_paths() {
        assert_eq!(Route::Movie(603).path(), "/movie/603");
        assert_eq!(Route::parse("/movie/603"), Some(Route::Movie(603)));
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse("/movie/undefined"), None);
    }
}
