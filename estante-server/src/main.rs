//! Estante Server - HTTP backend for the library front-end

use anyhow::{Context, Result};
use estante_core::EstanteConfig;
use estante_server::{routes, state};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "estante_server=debug,estante_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = EstanteConfig::from_env().context("Invalid configuration")?;

    // Create application state
    let state = state::AppState::new(&config)?;
    state.spawn_carousel_autoplay();

    // Warm the content cache so the first page load is fast
    let warm = state.contents.fetch().await;
    if warm.is_error {
        tracing::warn!("Initial content load failed; serving empty list until it recovers");
    } else {
        tracing::info!("Loaded {} content items", warm.data.len());
    }

    // Build router
    let app = routes::create_router(state);

    // Start server
    tracing::info!("Starting server on {}", config.bind);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
