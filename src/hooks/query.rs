use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use tokio::sync::watch;
use tracing::debug;

use super::state::QueryState;
use crate::cache::{QueryCache, QueryKey};
use crate::errors::RequestFailed;

/// Resolve one query through the cache.
///
/// A disabled query makes no call and reports `Idle`.
pub async fn run_query<T, F, Fut>(
    cache: &QueryCache,
    key: QueryKey,
    enabled: bool,
    fetcher: F,
) -> QueryState<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, RequestFailed>>,
{
    if !enabled {
        debug!(key = %key, "Query disabled, skipping fetch");
        return QueryState::idle();
    }

    QueryState::from_result(cache.fetch(key, fetcher).await)
}

/// Like [`run_query`], but in the background: the receiver starts at
/// `Loading` and moves to `Success` or `Error` when the fetch completes.
/// Dropping the receiver does not cancel the fetch.
pub fn watch_query<T, F, Fut>(
    cache: QueryCache,
    key: QueryKey,
    enabled: bool,
    fetcher: F,
) -> watch::Receiver<QueryState<T>>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, RequestFailed>> + Send + 'static,
{
    if !enabled {
        let (_sender, receiver) = watch::channel(QueryState::idle());
        return receiver;
    }

    let (sender, receiver) = watch::channel(QueryState::loading());
    tokio::spawn(async move {
        let state = run_query(&cache, key, true, fetcher).await;
        sender.send_replace(state);
    });
    receiver
}

/// A mutation and the query prefixes it makes stale when it succeeds
pub struct Mutation<'a> {
    cache: &'a QueryCache,
    invalidates: Vec<QueryKey>,
}

impl<'a> Mutation<'a> {
    pub fn new(cache: &'a QueryCache) -> Self {
        Self {
            cache,
            invalidates: Vec::new(),
        }
    }

    pub fn invalidates(mut self, prefix: QueryKey) -> Self {
        self.invalidates.push(prefix);
        self
    }

    /// Run the mutation; only a success invalidates anything
    pub async fn run<T, Fut>(self, mutation: Fut) -> Result<T, RequestFailed>
    where
        Fut: Future<Output = Result<T, RequestFailed>>,
    {
        let result = mutation.await;

        match &result {
            Ok(_) => {
                for prefix in &self.invalidates {
                    self.cache.invalidate(prefix).await;
                }
            }
            Err(e) => debug!("Mutation failed, cache left untouched: {}", e),
        }

        result
    }
}
