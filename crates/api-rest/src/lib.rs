//! # API REST
//!
//! REST API implementation for the song library.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, status codes, CORS, request tracing)
//!
//! Uses `api-shared` for wire types and `songlib-core` for all catalog logic.

#![warn(rust_2018_idioms)]

mod error;
mod handlers;

use std::sync::Arc;

use anyhow::Context;
use api_shared::{AddSongReq, ErrorRes, HealthRes, SongRes, UpdateSongReq};
use axum::{routing::get, Router};
use songlib_core::{config, init_db, CatalogService, CoreConfig, EnrichmentClient, SqliteSongStore};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

impl AppState {
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }

    /// Opens the database, builds the enrichment client and wires the catalog service.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated, or the HTTP client
    /// cannot be built.
    pub async fn from_config(cfg: &CoreConfig) -> anyhow::Result<Self> {
        let pool = init_db(cfg.database_url(), cfg.db_max_connections())
            .await
            .with_context(|| format!("failed to open database {}", cfg.database_url()))?;
        let details = EnrichmentClient::new(cfg.enrichment_base_url(), cfg.enrichment_timeout())?;

        let catalog = CatalogService::with_config(
            cfg,
            Arc::new(SqliteSongStore::new(pool)),
            Arc::new(details),
        );
        Ok(Self::new(catalog))
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Song Library API", description = "Online song library"),
    paths(
        handlers::health,
        handlers::add_song,
        handlers::list_songs,
        handlers::get_song,
        handlers::get_song_text,
        handlers::update_song,
        handlers::delete_song,
    ),
    components(schemas(HealthRes, ErrorRes, AddSongReq, UpdateSongReq, SongRes))
)]
pub struct ApiDoc;

/// Builds the REST router with OpenAPI docs, permissive CORS and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/songs", get(handlers::list_songs).post(handlers::add_song))
        .route(
            "/songs/:id",
            get(handlers::get_song)
                .put(handlers::update_song)
                .delete(handlers::delete_song),
        )
        .route("/songs/:id/text", get(handlers::get_song_text))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Resolve [`CoreConfig`] from process environment variables.
///
/// # Environment Variables
/// - `DATABASE_URL`: SQLite URL (default: "sqlite:songlib.db")
/// - `SONGLIB_DB_MAX_CONNECTIONS`: pool size (default: 5)
/// - `ENRICHMENT_BASE_URL`: base URL of the song lookup service (required)
/// - `ENRICHMENT_TIMEOUT_SECS`: optional HTTP timeout for lookups
/// - `SONGLIB_MAX_PAGE_LIMIT`: optional cap on `limit` for list and text pages
pub fn config_from_env() -> anyhow::Result<CoreConfig> {
    let var = |name: &str| std::env::var(name).ok();

    let cfg = CoreConfig::new(
        config::database_url_from_env_value(var("DATABASE_URL")),
        config::db_max_connections_from_env_value(var("SONGLIB_DB_MAX_CONNECTIONS"))?,
        &config::enrichment_base_url_from_env_value(var("ENRICHMENT_BASE_URL"))?,
    )?
    .with_enrichment_timeout(config::enrichment_timeout_from_env_value(var(
        "ENRICHMENT_TIMEOUT_SECS",
    ))?)
    .with_max_page_limit(config::positive_from_env_value(
        "SONGLIB_MAX_PAGE_LIMIT",
        var("SONGLIB_MAX_PAGE_LIMIT"),
    )?);

    Ok(cfg)
}

/// Serves `app` on `addr` until Ctrl-C is received.
pub async fn serve(addr: &str, app: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for shutdown signal: {e}");
            }
            tracing::info!("-- Shutting down song library REST API");
        })
        .await?;

    Ok(())
}
