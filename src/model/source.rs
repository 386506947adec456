//! The seam between the UI and wherever movies come from

use async_trait::async_trait;

use super::error::ApiError;
use super::genres::{Genre, GenreFilter};
use super::movie::MovieDetails;
use super::routes::{parse_random_id_key, RandomIdResponse};

#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Resolve the random-id route for an already parsed genre filter
    async fn random_id(&self, genres: &GenreFilter) -> Result<RandomIdResponse, ApiError>;

    async fn movie(&self, id: u64) -> Result<MovieDetails, ApiError>;

    /// Download the poster image. Only completion matters to the card.
    async fn poster(&self, poster_path: &str) -> Result<usize, ApiError>;

    async fn genres(&self) -> Result<Vec<Genre>, ApiError>;
}

/// Serve a `/api/randomId?genresId=...` fetch key against `source`.
pub async fn resolve_random_id(source: &dyn MovieSource, key: &str) -> Result<RandomIdResponse, ApiError> {
    let genres = parse_random_id_key(key)?;
    source.random_id(&genres).await
}
