//! Request handlers

mod contents;
mod notifications;
mod sync;
mod viewer;

pub use contents::*;
pub use notifications::*;
pub use sync::*;
pub use viewer::*;

use axum::Json;
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
