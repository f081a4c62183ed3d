//! Content list handlers

use crate::session::{ClientCommand, ClientPlatform};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use estante_core::carousel::Banner;
use estante_core::grid::GridView;
use estante_core::{ContentFilter, ContentItem, ContentStats};
use serde::{Deserialize, Serialize};

/// Query parameters for listing contents
#[derive(Debug, Deserialize)]
pub struct ListContentsQuery {
    /// `todos`, `ebook` or `desenho` (defaults to `todos`)
    pub filter: Option<String>,
}

/// List response
#[derive(Debug, Serialize)]
pub struct ListContentsResponse {
    pub filter: ContentFilter,
    pub total: usize,
    pub contents: Vec<ContentItem>,
    pub grid: GridView,
    pub error: Option<String>,
}

/// List contents, newest first, narrowed by the filter.
///
/// A provider failure answers 502 with an empty list rather than stale rows.
pub async fn list_contents(
    State(state): State<AppState>,
    Query(query): Query<ListContentsQuery>,
) -> Result<(StatusCode, Json<ListContentsResponse>), (StatusCode, String)> {
    let filter = match query.filter.as_deref() {
        Some(raw) => raw
            .parse::<ContentFilter>()
            .map_err(|e| (StatusCode::BAD_REQUEST, e))?,
        None => ContentFilter::All,
    };

    let page = state.load_page().await;
    let contents: Vec<ContentItem> = filter.apply(page.contents()).into_iter().cloned().collect();
    let grid = GridView::build(&contents, page.is_loading());
    let error = page.error().map(|e| e.to_string());
    let status = if error.is_some() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(ListContentsResponse {
            filter,
            total: contents.len(),
            contents,
            grid,
            error,
        }),
    ))
}

/// Counts over the whole collection
pub async fn content_stats(State(state): State<AppState>) -> Json<ContentStats> {
    Json(state.load_page().await.stats())
}

/// Get a single content item
pub async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContentItem>, StatusCode> {
    let page = state.load_page().await;
    page.find(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Download response: what the browser should save
#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub started: bool,
    pub commands: Vec<ClientCommand>,
}

/// Card "download" action
pub async fn download_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DownloadResponse>, StatusCode> {
    let page = state.load_page().await;
    let item = page.find(&id).ok_or(StatusCode::NOT_FOUND)?;

    let outbox = ClientPlatform::default();
    let started = page.download(item, &outbox);
    tracing::info!("Download of {} requested", item.id);

    Ok(Json(DownloadResponse {
        started,
        commands: outbox.drain(),
    }))
}

/// Banner carousel response
#[derive(Debug, Serialize)]
pub struct BannersResponse {
    pub banners: Vec<Banner>,
    pub active: usize,
}

pub async fn list_banners(State(state): State<AppState>) -> Json<BannersResponse> {
    let carousel = state.carousel.read().await;
    Json(BannersResponse {
        banners: carousel.banners().to_vec(),
        active: carousel.active(),
    })
}
