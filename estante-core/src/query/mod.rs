//! Cached, coalescing reads of the content collection

mod cache;
mod contents;

pub use cache::{QueryCache, QueryKey};
pub use contents::{ContentsQuery, CONTENTS_QUERY_KEY, DEFAULT_STALE_TIME};

use crate::error::FetchError;

/// What a caller sees of a query: data, loading flag and error.
///
/// `data` is the empty value whenever the query failed, so failures never
/// render stale or partial rows.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: T,
    pub is_loading: bool,
    pub is_error: bool,
    pub error: Option<FetchError>,
}

impl<T: Default> QueryState<T> {
    pub fn loading() -> Self {
        Self {
            data: T::default(),
            is_loading: true,
            is_error: false,
            error: None,
        }
    }

    pub fn success(data: T) -> Self {
        Self {
            data,
            is_loading: false,
            is_error: false,
            error: None,
        }
    }

    pub fn failure(error: FetchError) -> Self {
        Self {
            data: T::default(),
            is_loading: false,
            is_error: true,
            error: Some(error),
        }
    }
}
