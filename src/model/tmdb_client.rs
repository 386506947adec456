//! TMDB API client backing the random-id route, the movie page and posters

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use super::error::ApiError;
use super::genres::{Genre, GenreFilter};
use super::movie::{poster_url, MovieDetails};
use super::routes::RandomIdResponse;
use super::source::MovieSource;

/// TMDB refuses discover pages past this one
pub const MAX_DISCOVER_PAGE: u32 = 500;

#[derive(Debug, Deserialize)]
struct DiscoverPage {
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    results: Vec<DiscoverMovie>,
}

#[derive(Clone, Debug, Deserialize)]
struct DiscoverMovie {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct GenreList {
    #[serde(default)]
    genres: Vec<Genre>,
}

/// How the API key is presented
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Credential {
    /// v3 key as `api_key` query parameter
    QueryKey,
    /// v4 read access token as bearer header
    Bearer,
}

impl Credential {
    fn detect(key: &str) -> Self {
        // v4 tokens are JWTs
        if key.starts_with("eyJ") && key.matches('.').count() == 2 {
            Credential::Bearer
        } else {
            Credential::QueryKey
        }
    }
}

/// TMDB client with per-filter page count memo
#[derive(Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    api_key: String,
    credential: Credential,
    api_url: String,
    image_url: String,
    page_counts: Arc<RwLock<HashMap<String, u32>>>,
}

impl TmdbClient {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("movie-explorer/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            credential: Credential::detect(&config.api_key),
            api_key: config.api_key.clone(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            image_url: config.image_url.clone(),
            page_counts: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        crate::log_api_request!(operation, path = %path);

        let mut request = self.http.get(format!("{}{}", self.api_url, path)).query(query);
        request = match self.credential {
            Credential::QueryKey => request.query(&[("api_key", self.api_key.as_str())]),
            Credential::Bearer => request.bearer_auth(&self.api_key),
        };

        let result = async {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ApiError::Status { status: status.as_u16(), body });
            }
            let bytes = response.bytes().await?;
            Ok::<T, ApiError>(serde_json::from_slice::<T>(&bytes)?)
        }
        .await;

        crate::log_api_result!(operation, result);
        result
    }

    async fn discover(&self, genres: &GenreFilter, page: u32) -> Result<DiscoverPage, ApiError> {
        let mut query = vec![
            ("include_adult", "false".to_string()),
            ("sort_by", "popularity.desc".to_string()),
            ("page", page.to_string()),
        ];
        if !genres.is_empty() {
            query.push(("with_genres", genres.to_query()));
        }
        self.get_json("discover", "/discover/movie", &query).await
    }
}

/// Pages worth sampling from, given TMDB's reported total
pub fn sampleable_pages(total_pages: u32) -> u32 {
    total_pages.clamp(1, MAX_DISCOVER_PAGE)
}

fn pick_id<R: Rng + ?Sized>(results: &[DiscoverMovie], rng: &mut R) -> Option<u64> {
    results.choose(rng).map(|m| m.id)
}

#[async_trait]
impl MovieSource for TmdbClient {
    async fn random_id(&self, genres: &GenreFilter) -> Result<RandomIdResponse, ApiError> {
        let memo_key = genres.to_query();
        let known_pages = self.page_counts.read().await.get(&memo_key).copied();

        let (page, first_page) = match known_pages {
            Some(pages) => (rand::rng().random_range(1..=pages), None),
            None => {
                let first = self.discover(genres, 1).await?;
                let pages = sampleable_pages(first.total_pages);
                self.page_counts.write().await.insert(memo_key, pages);
                (rand::rng().random_range(1..=pages), Some(first))
            }
        };

        let results = match first_page {
            Some(first) if page == 1 => first.results,
            _ => self.discover(genres, page).await?.results,
        };

        let id = pick_id(&results, &mut rand::rng()).ok_or(ApiError::NoResults)?;
        tracing::debug!(genres = %genres.to_query(), page, id, "Random movie picked");
        Ok(RandomIdResponse { id: Some(id) })
    }

    async fn movie(&self, id: u64) -> Result<MovieDetails, ApiError> {
        self.get_json(
            "movie_details",
            &format!("/movie/{}", id),
            &[("append_to_response", "videos".to_string())],
        )
        .await
    }

    async fn poster(&self, poster_path: &str) -> Result<usize, ApiError> {
        let url = poster_url(&self.image_url, poster_path);
        crate::log_api_request!("poster", url = %url);
        let result = async {
            let response = self.http.get(&url).send().await?.error_for_status()?;
            Ok::<usize, ApiError>(response.bytes().await?.len())
        }
        .await;
        crate::log_api_result!("poster", result);
        result
    }

    async fn genres(&self) -> Result<Vec<Genre>, ApiError> {
        let list: GenreList = self.get_json("genres", "/genre/movie/list", &[]).await?;
        Ok(list.genres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn page_range_is_clamped() {
        assert_eq!(sampleable_pages(0), 1);
        assert_eq!(sampleable_pages(37), 37);
        assert_eq!(sampleable_pages(42_000), MAX_DISCOVER_PAGE);
    }

    #[test]
    fn picks_one_of_the_results() {
        let results = vec![DiscoverMovie { id: 1 }, DiscoverMovie { id: 2 }, DiscoverMovie { id: 3 }];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let id = pick_id(&results, &mut rng).unwrap();
            assert!((1..=3).contains(&id));
        }
        assert_eq!(pick_id(&[], &mut rng), None);
    }

    #[test]
    fn credential_kind_follows_key_shape() {
        assert_eq!(Credential::detect("0123456789abcdef"), Credential::QueryKey);
        assert_eq!(Credential::detect("eyJhbGciOi.eyJhdWQiOi.sig"), Credential::Bearer);
    }

    #[test]
    fn discover_page_tolerates_sparse_json() {
        let page: DiscoverPage = serde_json::from_str(r#"{"results": [{"id": 603, "title": "x"}]}"#).unwrap();
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.results.len(), 1);
    }

    #[test]
    fn client_builds_from_config() {
        let config = AppConfig::from_lookup(|name| match name {
            "TMDB_API_KEY" => Some("abc".to_string()),
            "TMDB_API_URL" => Some("https://example.test/3/".to_string()),
            _ => None,
        })
        .unwrap();
        let client = TmdbClient::new(&config).unwrap();
        assert_eq!(client.api_url, "https://example.test/3");
        assert_eq!(client.credential, Credential::QueryKey);
    }
}
