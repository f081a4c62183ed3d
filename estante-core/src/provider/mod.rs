//! Data provider abstraction
//!
//! The content collection lives in a managed table owned by a third party.
//! This crate only ever reads it, newest first.

mod rest;

pub use rest::RestProvider;

use crate::error::FetchError;
use crate::types::ContentItem;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use std::time::Duration;

/// Result type for provider reads
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Read-only access to the content table
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Read every row, ordered by creation time descending
    async fn list_contents(&self) -> FetchResult<Vec<ContentItem>>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Order rows the way the provider query does (newest first)
pub fn sort_newest_first(items: &mut [ContentItem]) {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Provider backed by a JSON file holding an array of rows
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ContentProvider for JsonFileProvider {
    async fn list_contents(&self) -> FetchResult<Vec<ContentItem>> {
        let data = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::Provider(format!("{}: {}", self.path.display(), e)))?;
        let mut items: Vec<ContentItem> =
            serde_json::from_str(&data).map_err(|e| FetchError::Decode(e.to_string()))?;
        sort_newest_first(&mut items);
        Ok(items)
    }

    fn name(&self) -> &'static str {
        "json-file"
    }
}

/// In-memory provider (for testing)
///
/// Counts reads, can be told to fail, and can delay each read so tests can
/// observe in-flight coalescing.
#[derive(Default)]
pub struct MemoryProvider {
    items: RwLock<Vec<ContentItem>>,
    failure: RwLock<Option<FetchError>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MemoryProvider {
    pub fn new(items: Vec<ContentItem>) -> Self {
        Self {
            items: RwLock::new(items),
            ..Self::default()
        }
    }

    /// A provider whose every read fails with `error`
    pub fn failing(error: FetchError) -> Self {
        Self {
            failure: RwLock::new(Some(error)),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_items(&self, items: Vec<ContentItem>) {
        *self.items.write().unwrap_or_else(|e| e.into_inner()) = items;
    }

    pub fn set_failure(&self, error: Option<FetchError>) {
        *self.failure.write().unwrap_or_else(|e| e.into_inner()) = error;
    }

    /// Number of reads issued against this provider
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentProvider for MemoryProvider {
    async fn list_contents(&self) -> FetchResult<Vec<ContentItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = self
            .failure
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
        {
            return Err(error);
        }
        let mut items = self.items.read().unwrap_or_else(|e| e.into_inner()).clone();
        sort_newest_first(&mut items);
        Ok(items)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
