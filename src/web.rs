//! Web server assembly

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::config::CieloConfig;
use crate::fetch::ReadingsCell;
use crate::settings::SettingsStore;
use crate::{api, page};

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Immutable configuration
    pub config: Arc<CieloConfig>,
    /// Selected-location store (single writer: the picker flow)
    pub settings: Arc<SettingsStore>,
    /// Latest committed weather readings
    pub readings: Arc<ReadingsCell>,
}

impl AppState {
    #[must_use]
    pub fn new(config: CieloConfig) -> Self {
        Self {
            config: Arc::new(config),
            settings: Arc::new(SettingsStore::new()),
            readings: Arc::new(ReadingsCell::new()),
        }
    }
}

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(page::home))
        .nest("/api", api::router())
        .fallback_service(ServeDir::new("static"))
        .layer(cors)
        .with_state(state)
}

pub async fn run(config: CieloConfig) -> Result<()> {
    let port = config.server.port;
    let state = AppState::new(config);
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", port);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
