//! Viewer session handlers

use crate::session::{ClientEvent, SessionView, ViewerSession};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct OpenViewerRequest {
    pub content_id: String,
}

fn parse_session_id(id: &str) -> Result<Uuid, StatusCode> {
    Uuid::parse_str(id).map_err(|_| StatusCode::BAD_REQUEST)
}

/// "Read" action: open a viewer session on a content item
pub async fn open_viewer(
    State(state): State<AppState>,
    Json(request): Json<OpenViewerRequest>,
) -> Result<(StatusCode, Json<SessionView>), StatusCode> {
    let session = {
        let mut page = state.load_page().await;
        let modal = page.read(&request.content_id).ok_or(StatusCode::NOT_FOUND)?;
        tracing::info!("Opening viewer on {}", modal.title);
        let item = page.find(&request.content_id).ok_or(StatusCode::NOT_FOUND)?;
        ViewerSession::start(item, state.notifier.clone())
    };

    let id = Uuid::new_v4();
    let view = session.view(&id.to_string()).await;
    state.sessions.write().await.insert(id, session);

    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_viewer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, StatusCode> {
    let uuid = parse_session_id(&id)?;
    let sessions = state.sessions.read().await;
    let session = sessions.get(&uuid).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(session.view(&id).await))
}

/// Post a browser event (button, key, embed failure, fullscreen change)
pub async fn viewer_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(event): Json<ClientEvent>,
) -> Result<Json<SessionView>, StatusCode> {
    let uuid = parse_session_id(&id)?;

    let (view, closed) = {
        let sessions = state.sessions.read().await;
        let session = sessions.get(&uuid).ok_or(StatusCode::NOT_FOUND)?;
        let closed = session.apply(event).await;
        (session.view(&id).await, closed)
    };

    if closed {
        tracing::debug!("Viewer session {} closed itself", uuid);
        state.sessions.write().await.remove(&uuid);
        state.page.lock().await.close_modal();
    }

    Ok(Json(view))
}

/// Close and forget a session
pub async fn close_viewer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let uuid = parse_session_id(&id)?;
    let session = state
        .sessions
        .write()
        .await
        .remove(&uuid)
        .ok_or(StatusCode::NOT_FOUND)?;
    session.close().await;
    state.page.lock().await.close_modal();
    Ok(StatusCode::NO_CONTENT)
}
