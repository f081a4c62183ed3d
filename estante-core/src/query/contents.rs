//! The content list query

use super::{QueryCache, QueryKey, QueryState};
use crate::provider::ContentProvider;
use crate::types::ContentItem;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Key the content list is cached under
pub const CONTENTS_QUERY_KEY: &str = "conteudos";

/// How long a successful read stays fresh
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(60);

/// Reads the whole content collection, newest first, through a
/// [`QueryCache`]. Never retries on its own; callers decide how to report a
/// failure.
/// Counts a read as outstanding until dropped, so a cancelled fetch does
/// not leave the query stuck loading
struct Outstanding<'a>(&'a AtomicUsize);

impl<'a> Outstanding<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for Outstanding<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct ContentsQuery {
    provider: Arc<dyn ContentProvider>,
    cache: QueryCache<Vec<ContentItem>>,
    key: QueryKey,
    outstanding: AtomicUsize,
    last: Mutex<QueryState<Vec<ContentItem>>>,
}

impl ContentsQuery {
    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        Self::with_stale_time(provider, DEFAULT_STALE_TIME)
    }

    pub fn with_stale_time(provider: Arc<dyn ContentProvider>, stale_time: Duration) -> Self {
        Self {
            provider,
            cache: QueryCache::new(stale_time),
            key: QueryKey::from(CONTENTS_QUERY_KEY),
            outstanding: AtomicUsize::new(0),
            last: Mutex::new(QueryState::loading()),
        }
    }

    /// Run the query (or reuse the cached / in-flight result)
    pub async fn fetch(&self) -> QueryState<Vec<ContentItem>> {
        let _outstanding = Outstanding::enter(&self.outstanding);

        let provider = Arc::clone(&self.provider);
        let result = self
            .cache
            .fetch(&self.key, move || async move { provider.list_contents().await })
            .await;

        let state = match result {
            Ok(items) => QueryState::success(items.as_ref().clone()),
            Err(error) => {
                tracing::warn!(
                    "Content query against {} failed: {}",
                    self.provider.name(),
                    error
                );
                QueryState::failure(error)
            }
        };

        *self.last.lock().unwrap_or_else(|e| e.into_inner()) = state.clone();
        state
    }

    /// Latest known state without issuing a read.
    ///
    /// Reports loading until the first read completes and while any read is
    /// outstanding.
    pub fn state(&self) -> QueryState<Vec<ContentItem>> {
        let mut state = self.last.lock().unwrap_or_else(|e| e.into_inner()).clone();
        if self.outstanding.load(Ordering::SeqCst) > 0 {
            state.is_loading = true;
        }
        state
    }

    /// Forget the cached list so the next fetch reads the provider
    pub async fn invalidate(&self) {
        self.cache.invalidate(&self.key).await;
    }

    pub fn stale_time(&self) -> Duration {
        self.cache.stale_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MemoryProvider;
    use crate::types::ContentKind;
    use chrono::Utc;

    fn provider() -> Arc<MemoryProvider> {
        let item = ContentItem::new("1", "Guia", ContentKind::Ebook, "u.pdf", Utc::now());
        Arc::new(MemoryProvider::new(vec![item]).with_delay(Duration::from_millis(200)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_fetch_does_not_stay_loading() {
        let query = ContentsQuery::new(provider());

        let cancelled = tokio::time::timeout(Duration::from_millis(10), query.fetch()).await;
        assert!(cancelled.is_err());

        let state = query.fetch().await;
        assert_eq!(state.data.len(), 1);

        let state = query.state();
        assert!(!state.is_loading);
        assert!(!state.is_error);
        assert_eq!(state.data.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_state_is_loading_while_read_is_pending() {
        let query = Arc::new(ContentsQuery::new(provider()));
        assert!(query.state().is_loading);

        let pending = tokio::spawn({
            let query = Arc::clone(&query);
            async move { query.fetch().await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(query.state().is_loading);

        pending.await.unwrap();
        assert!(!query.state().is_loading);
    }
}
