//! Toast handlers

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use estante_core::notify::{Toast, ToastId};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub id: ToastId,
    #[serde(flatten)]
    pub toast: Toast,
}

/// Toasts that are still visible
pub async fn list_notifications(State(state): State<AppState>) -> Json<Vec<NotificationResponse>> {
    Json(
        state
            .notifications
            .active()
            .into_iter()
            .map(|n| NotificationResponse {
                id: n.id,
                toast: n.toast,
            })
            .collect(),
    )
}

pub async fn dismiss_notification(
    State(state): State<AppState>,
    Path(id): Path<ToastId>,
) -> StatusCode {
    state.notifier.dismiss(id);
    StatusCode::NO_CONTENT
}
