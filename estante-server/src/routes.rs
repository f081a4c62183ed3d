//! API routes

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Origins allowed when none are configured (local front-end development)
const DEV_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let allow_origin = match origins {
        Some([only]) if only == "*" => AllowOrigin::any(),
        Some(origins) => AllowOrigin::list(
            origins
                .iter()
                .filter_map(|s| s.parse::<HeaderValue>().ok()),
        ),
        None => AllowOrigin::list(DEV_ORIGINS.into_iter().map(HeaderValue::from_static)),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(state.cors_origins.as_deref());

    let api_routes = Router::new()
        // Content endpoints
        .route("/contents", get(handlers::list_contents))
        .route("/contents/stats", get(handlers::content_stats))
        .route("/contents/:id", get(handlers::get_content))
        .route("/contents/:id/download", get(handlers::download_content))
        .route("/banners", get(handlers::list_banners))
        // Viewer sessions
        .route("/viewer", post(handlers::open_viewer))
        .route(
            "/viewer/:id",
            get(handlers::get_viewer).delete(handlers::close_viewer),
        )
        .route("/viewer/:id/events", post(handlers::viewer_event))
        // Toasts
        .route("/notifications", get(handlers::list_notifications))
        .route(
            "/notifications/:id",
            axum::routing::delete(handlers::dismiss_notification),
        )
        // SSE endpoint
        .route("/sync", get(handlers::sync_events));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
