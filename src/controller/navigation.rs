//! Navigation-related controller methods (random pick, routes, background loads)

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use crate::model::{
    resolve_random_id, ApiError, ContentView, MovieCard, MovieSource, RandomIdResponse, Route,
};
use super::AppController;

/// Fetcher for the random-id cache, answering fetch keys from `source`
fn random_id_fetcher(
    source: Arc<dyn MovieSource>,
) -> impl FnOnce(String) -> BoxFuture<'static, Result<RandomIdResponse, ApiError>> {
    move |key: String| async move { resolve_random_id(source.as_ref(), &key).await }.boxed()
}

impl AppController {
    /// Revalidate the random id for the current genre filter so the first
    /// pick has something warm in the cache.
    pub async fn prefetch_random_id(&self) {
        let key = self.model.random_id_key().await;
        let fetcher = random_id_fetcher(self.model.source.clone());

        match self.model.random_ids.revalidate(&key, fetcher).await {
            Ok(RandomIdResponse { id: Some(id) }) => {
                tracing::debug!(key = %key, id, "Prefetched random movie id");
            }
            Ok(RandomIdResponse { id: None }) => {
                tracing::debug!(key = %key, "Prefetch returned no id");
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Prefetch failed");
            }
        }
    }

    /// The "pick random movie" action: fetch a fresh id for the current
    /// filter and navigate to it. Only the newest activation navigates.
    pub async fn pick_random_movie(&self) {
        let ticket = self.model.begin_pick().await;
        let key = self.model.random_id_key().await;
        tracing::info!(key = %key, generation = ticket.generation(), "Picking random movie");

        let fetcher = random_id_fetcher(self.model.source.clone());
        let result = self.model.random_ids.mutate(&key, fetcher).await;

        let error = match result {
            Ok(RandomIdResponse { id: Some(id) }) => {
                if let Some(route) = self.model.finish_pick(ticket, id).await {
                    tracing::info!(id, "Random movie picked");
                    self.navigate(route, true).await;
                }
                return;
            }
            Ok(RandomIdResponse { id: None }) => ApiError::NoResults,
            Err(e) => e,
        };

        if self.model.fail_pick(ticket).await {
            tracing::error!(key = %key, error = %error, "Random pick failed");
            self.model.set_error(Self::format_error(&error)).await;
        } else {
            tracing::debug!(key = %key, error = %error, "Ignoring failure of superseded pick");
        }
    }

    /// Show `route`. With `push`, the route being left is remembered for
    /// going back. Returns whether the route ended up on screen; a load
    /// that fails or is overtaken by a newer navigation does not.
    pub async fn navigate(&self, route: Route, push: bool) -> bool {
        tracing::debug!(path = %route, push, "Navigating");
        let generation = self.model.begin_navigation().await;
        let id = match route {
            Route::Home => {
                return self.model.complete_navigation(generation, Route::Home, ContentView::Home, push).await;
            }
            Route::Movie(id) => id,
        };

        match self.model.source.movie(id).await {
            Ok(movie) => {
                let trailer = movie.trailer_key().unwrap_or_default();
                let poster_path = movie.poster_path.clone();
                tracing::info!(id, title = %movie.title, "Movie loaded");
                let card = MovieCard::new(movie, trailer);
                if !self.model.complete_navigation(generation, route, ContentView::Movie(card), push).await {
                    return false;
                }

                if let Some(path) = poster_path {
                    let controller = self.clone();
                    tokio::spawn(async move {
                        controller.load_poster(id, &path).await;
                    });
                }
                true
            }
            Err(e) => {
                if self.model.fail_navigation(generation).await {
                    tracing::error!(id, error = %e, "Failed to load movie");
                    self.model.set_error(Self::format_error(&e)).await;
                } else {
                    tracing::debug!(id, error = %e, "Ignoring failure of superseded navigation");
                }
                false
            }
        }
    }

    /// Return to the previous route. The route stays on the back stack when
    /// it cannot be shown.
    pub async fn go_back(&self) {
        let Some(route) = self.model.pop_route().await else {
            tracing::debug!("Back stack is empty");
            return;
        };
        if !self.navigate(route, false).await {
            self.model.restore_route(route).await;
        }
    }

    /// Download the poster of movie `id`. A failure leaves the card showing
    /// its loading state.
    pub async fn load_poster(&self, id: u64, poster_path: &str) {
        match self.model.source.poster(poster_path).await {
            Ok(bytes) => {
                tracing::debug!(id, bytes, "Poster loaded");
                self.model.mark_poster_loaded(id).await;
            }
            Err(e) => {
                tracing::warn!(id, poster_path, error = %e, "Poster download failed");
            }
        }
    }

    /// Replace the built-in genre list with TMDB's current one
    pub async fn load_genres(&self) {
        match self.model.source.genres().await {
            Ok(genres) => {
                tracing::info!(count = genres.len(), "Genres loaded");
                self.model.set_genre_catalogue(genres).await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not load genres, keeping built-in list");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::model::test_support::{model_with, movie, FakeSource};
    use crate::model::PosterState;

    fn id(id: u64) -> Result<RandomIdResponse, ApiError> {
        Ok(RandomIdResponse { id: Some(id) })
    }

    #[tokio::test]
    async fn pick_navigates_to_fetched_id() {
        let source = Arc::new(FakeSource::with_ids([id(603)]));
        let (model, _dir) = model_with(source.clone());
        let controller = AppController::new(model);

        controller.pick_random_movie().await;

        let model = controller.model();
        assert_eq!(model.current_route().await, Route::Movie(603));
        assert_eq!(model.current_card().await.map(|c| c.movie.id), Some(603));
        assert!(!model.is_picking().await);
        assert_eq!(source.random_calls(), 1);
    }

    #[tokio::test]
    async fn pick_uses_current_genre_filter() {
        let source = Arc::new(FakeSource::with_ids([id(1)]));
        let (model, _dir) = model_with(source.clone());
        model
            .update_preferences(|p| {
                p.genres.toggle(28);
                p.genres.toggle(12);
            })
            .await;
        let controller = AppController::new(model);

        controller.pick_random_movie().await;

        let seen = source.seen_genres.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].ids(), &[28, 12]);
    }

    #[tokio::test]
    async fn failed_pick_clears_loading_and_keeps_route() {
        let source = Arc::new(FakeSource::with_ids([Err(ApiError::Timeout)]));
        let (model, _dir) = model_with(source);
        let controller = AppController::new(model);

        controller.pick_random_movie().await;

        let model = controller.model();
        assert_eq!(model.current_route().await, Route::Home);
        assert!(!model.is_picking().await);
        assert!(model.has_error().await);
    }

    #[tokio::test]
    async fn missing_id_is_a_failure() {
        let source = Arc::new(FakeSource::with_ids([Ok(RandomIdResponse { id: None })]));
        let (model, _dir) = model_with(source);
        let controller = AppController::new(model);

        controller.pick_random_movie().await;

        assert_eq!(controller.model().current_route().await, Route::Home);
        assert!(controller.model().has_error().await);
    }

    #[tokio::test]
    async fn pick_after_prefetch_fetches_a_fresh_id() {
        let source = Arc::new(FakeSource::with_ids([id(1), id(2)]));
        let (model, _dir) = model_with(source.clone());
        let controller = AppController::new(model);

        controller.prefetch_random_id().await;
        let key = controller.model().random_id_key().await;
        assert_eq!(controller.model().random_ids.get(&key).await, Some(RandomIdResponse { id: Some(1) }));

        controller.pick_random_movie().await;
        assert_eq!(controller.model().current_route().await, Route::Movie(2));
        assert_eq!(source.random_calls(), 2);
    }

    #[tokio::test]
    async fn back_returns_to_previous_movie() {
        let source = Arc::new(FakeSource::with_ids([id(10), id(20)]));
        let (model, _dir) = model_with(source);
        let controller = AppController::new(model);

        controller.pick_random_movie().await;
        controller.pick_random_movie().await;
        assert_eq!(controller.model().current_route().await, Route::Movie(20));

        controller.go_back().await;
        assert_eq!(controller.model().current_route().await, Route::Movie(10));
        controller.go_back().await;
        assert_eq!(controller.model().current_route().await, Route::Home);
    }

    #[tokio::test]
    async fn slow_older_pick_cannot_replace_newer_movie() {
        let source = Arc::new(FakeSource {
            slow_movie: Some((1, Duration::from_millis(300))),
            ..FakeSource::with_ids([id(1), id(2)])
        });
        let (model, _dir) = model_with(source);
        let controller = AppController::new(model);

        let first = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.pick_random_movie().await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.pick_random_movie().await;
        assert_eq!(controller.model().current_route().await, Route::Movie(2));

        first.await.unwrap();
        let content = controller.model().get_content_state().await;
        assert_eq!(content.route, Route::Movie(2));
        assert_eq!(content.card().map(|c| c.movie.id), Some(2));
        assert_eq!(content.navigation_stack, vec![Route::Home]);
        assert!(!content.is_loading);
    }

    #[tokio::test]
    async fn back_during_slow_load_wins() {
        let source = Arc::new(FakeSource {
            slow_movie: Some((5, Duration::from_millis(300))),
            ..Default::default()
        });
        let (model, _dir) = model_with(source);
        let controller = AppController::new(model);
        controller.model().show(Route::Movie(3), ContentView::Movie(MovieCard::new(movie(3), ""))).await;

        let slow = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.navigate(Route::Movie(5), true).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.go_back().await;

        assert!(!slow.await.unwrap());
        assert_eq!(controller.model().current_route().await, Route::Home);
    }

    #[tokio::test]
    async fn failed_back_keeps_route_on_stack() {
        let source = Arc::new(FakeSource { missing_movie: Some(10), ..Default::default() });
        let (model, _dir) = model_with(source);
        let controller = AppController::new(model);
        controller.model().show(Route::Movie(10), ContentView::Movie(MovieCard::new(movie(10), ""))).await;
        controller.model().show(Route::Movie(20), ContentView::Movie(MovieCard::new(movie(20), ""))).await;

        controller.go_back().await;

        let content = controller.model().get_content_state().await;
        assert_eq!(content.route, Route::Movie(20));
        assert_eq!(content.navigation_stack, vec![Route::Home, Route::Movie(10)]);
        assert!(!content.is_loading);
        assert!(controller.model().has_error().await);
    }

    #[tokio::test]
    async fn poster_failure_leaves_card_loading() {
        let source = Arc::new(FakeSource { poster_fails: true, ..Default::default() });
        let (model, _dir) = model_with(source);
        let controller = AppController::new(model);
        let card = MovieCard::new(movie(7), "");
        controller.model().show(Route::Movie(7), ContentView::Movie(card)).await;

        controller.load_poster(7, "/poster7.jpg").await;
        assert_eq!(controller.model().current_card().await.unwrap().poster, PosterState::Loading);
    }

    #[tokio::test]
    async fn poster_success_marks_card_loaded() {
        let (model, _dir) = model_with(Arc::new(FakeSource::default()));
        let controller = AppController::new(model);
        let card = MovieCard::new(movie(8), "");
        controller.model().show(Route::Movie(8), ContentView::Movie(card)).await;

        controller.load_poster(8, "/poster8.jpg").await;
        assert_eq!(controller.model().current_card().await.unwrap().poster, PosterState::Loaded);
    }

    #[tokio::test]
    async fn genres_replace_builtin_catalogue() {
        let (model, _dir) = model_with(Arc::new(FakeSource::default()));
        let controller = AppController::new(model);
        controller.load_genres().await;
        assert_eq!(controller.model().get_ui_state().await.genre_catalogue.len(), 2);
    }
}
