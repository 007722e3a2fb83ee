use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{config_from_env, router, serve, AppState};

/// Main entry point for the song library service
///
/// Loads `.env`, resolves configuration, opens (and migrates) the database and serves the
/// REST API with OpenAPI docs at `/swagger-ui`.
///
/// # Environment Variables
/// - `SONGLIB_REST_ADDR`: REST server address (default: "0.0.0.0:8080")
/// - `DATABASE_URL`, `SONGLIB_DB_MAX_CONNECTIONS`, `ENRICHMENT_BASE_URL`,
///   `ENRICHMENT_TIMEOUT_SECS`, `SONGLIB_MAX_PAGE_LIMIT`: see [`api_rest::config_from_env`]
/// - `RUST_LOG`: tracing filter (defaults: `songlib_run`, `songlib_core`, `api_rest` at info; `tower_http` at debug)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - configuration is missing or invalid,
/// - the database cannot be opened or migrated, or
/// - the server address cannot be bound.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("songlib_run=info".parse()?)
                .add_directive("songlib_core=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("SONGLIB_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

    let cfg = config_from_env()?;
    let state = AppState::from_config(&cfg).await?;
    tracing::info!("Database ready at {}", cfg.database_url());

    tracing::info!("++ Starting song library REST API on {}", rest_addr);
    serve(&rest_addr, router(state)).await
}
