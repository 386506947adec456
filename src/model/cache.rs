//! Keyed fetch cache with request deduplication
//!
//! `revalidate` joins a request already in flight for the same key, so
//! concurrent callers share one network round trip and all see the same
//! result. `mutate` always starts a fresh request. Every request gets a
//! generation number and an entry is only replaced by a newer generation,
//! so a slow response can never overwrite a fresher one. Callers of the
//! slow request get the fresher value instead.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;

use super::error::ApiError;

type SharedFetch<T> = Shared<BoxFuture<'static, Result<T, ApiError>>>;

struct CacheEntry<T> {
    value: T,
    generation: u64,
}

struct InFlight<T: Clone> {
    generation: u64,
    future: SharedFetch<T>,
}

struct CacheInner<T: Clone> {
    entries: HashMap<String, CacheEntry<T>>,
    in_flight: HashMap<String, InFlight<T>>,
    next_generation: u64,
}

#[derive(Clone)]
pub struct FetchCache<T: Clone> {
    inner: Arc<Mutex<CacheInner<T>>>,
}

impl<T> FetchCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner {
                entries: HashMap::new(),
                in_flight: HashMap::new(),
                next_generation: 0,
            })),
        }
    }

    #[cfg(test)]
    pub async fn get(&self, key: &str) -> Option<T> {
        let inner = self.inner.lock().await;
        inner.entries.get(key).map(|e| e.value.clone())
    }

    /// Generation of the cached value, if any
    #[cfg(test)]
    pub async fn generation(&self, key: &str) -> Option<u64> {
        let inner = self.inner.lock().await;
        inner.entries.get(key).map(|e| e.generation)
    }

    #[cfg(test)]
    pub async fn is_in_flight(&self, key: &str) -> bool {
        self.inner.lock().await.in_flight.contains_key(key)
    }

    /// Fetch `key`, joining a request already in flight for it.
    pub async fn revalidate<F, Fut>(&self, key: &str, fetcher: F) -> Result<T, ApiError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        self.run(key, fetcher, false).await
    }

    /// Fetch `key` with a new request even if one is in flight.
    pub async fn mutate<F, Fut>(&self, key: &str, fetcher: F) -> Result<T, ApiError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        self.run(key, fetcher, true).await
    }

    async fn run<F, Fut>(&self, key: &str, fetcher: F, force: bool) -> Result<T, ApiError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let (generation, future) = {
            let mut inner = self.inner.lock().await;
            match inner.in_flight.get(key) {
                Some(in_flight) if !force => {
                    tracing::trace!(key, generation = in_flight.generation, "Joining in-flight request");
                    (in_flight.generation, in_flight.future.clone())
                }
                _ => {
                    inner.next_generation += 1;
                    let generation = inner.next_generation;
                    let future = fetcher(key.to_string()).boxed().shared();
                    inner.in_flight.insert(
                        key.to_string(),
                        InFlight { generation, future: future.clone() },
                    );
                    tracing::trace!(key, generation, "Starting request");
                    (generation, future)
                }
            }
        };

        let result = future.await;

        // Any waiter may finish the bookkeeping; it is idempotent per generation.
        let mut inner = self.inner.lock().await;
        if inner.in_flight.get(key).is_some_and(|f| f.generation == generation) {
            inner.in_flight.remove(key);
        }
        let value = result?;
        let fresher = inner
            .entries
            .get(key)
            .filter(|entry| entry.generation > generation)
            .map(|entry| (entry.generation, entry.value.clone()));
        if let Some((current, fresher)) = fresher {
            tracing::debug!(key, generation, current, "Discarding stale response");
            return Ok(fresher);
        }
        inner.entries.insert(key.to_string(), CacheEntry { value: value.clone(), generation });
        Ok(value)
    }
}

impl<T> Default for FetchCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
