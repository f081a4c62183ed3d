//! Time-boxed query cache with in-flight coalescing

use crate::provider::FetchResult;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Identity of a cached query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl From<&str> for QueryKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

type SharedFetch<T> = Shared<BoxFuture<'static, FetchResult<Arc<T>>>>;

struct Entry<T> {
    value: Option<(Arc<T>, Instant)>,
    in_flight: Option<SharedFetch<T>>,
}

impl<T> Default for Entry<T> {
    fn default() -> Self {
        Self {
            value: None,
            in_flight: None,
        }
    }
}

/// Caches query results for `stale_time` and shares one in-flight read
/// between every caller that asks for the same key while it is pending.
///
/// Failed reads are handed to all waiters but never stored.
pub struct QueryCache<T> {
    stale_time: Duration,
    entries: Mutex<HashMap<QueryKey, Entry<T>>>,
}

impl<T: Send + Sync + 'static> QueryCache<T> {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            stale_time,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn stale_time(&self) -> Duration {
        self.stale_time
    }

    /// Return the cached value if still fresh, otherwise join or start a read
    pub async fn fetch<F, Fut>(&self, key: &QueryKey, fetcher: F) -> FetchResult<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FetchResult<T>> + Send + 'static,
    {
        let pending = {
            let mut entries = self.entries.lock().await;
            let entry = entries.entry(key.clone()).or_default();

            if let Some((value, fetched_at)) = &entry.value {
                if fetched_at.elapsed() < self.stale_time {
                    tracing::trace!("Query {} served from cache", key);
                    return Ok(Arc::clone(value));
                }
            }

            match &entry.in_flight {
                Some(pending) => {
                    tracing::debug!("Query {} joined in-flight read", key);
                    pending.clone()
                }
                None => {
                    tracing::debug!("Query {} started", key);
                    let pending = fetcher().map(|r| r.map(Arc::new)).boxed().shared();
                    entry.in_flight = Some(pending.clone());
                    pending
                }
            }
        };

        let result = pending.clone().await;

        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.get_mut(key) {
            let ours = entry
                .in_flight
                .as_ref()
                .is_some_and(|current| current.ptr_eq(&pending));
            if ours {
                entry.in_flight = None;
                if let Ok(value) = &result {
                    entry.value = Some((Arc::clone(value), Instant::now()));
                }
            }
        }

        result
    }

    /// Cached value for `key` if it is still within the freshness window
    #[cfg(test)]
    async fn get_fresh(&self, key: &QueryKey) -> Option<Arc<T>> {
        let entries = self.entries.lock().await;
        entries
            .get(key)
            .and_then(|entry| entry.value.as_ref())
            .filter(|(_, fetched_at)| fetched_at.elapsed() < self.stale_time)
            .map(|(value, _)| Arc::clone(value))
    }

    /// Drop the cached value so the next fetch reads the provider again
    pub async fn invalidate(&self, key: &QueryKey) {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.get_mut(key) {
            entry.value = None;
        }
    }
}
