//! Standalone REST API server binary.
//!
//! Runs only the REST server, with OpenAPI/Swagger UI. Useful during development; the
//! workspace's `songlib-run` binary is the usual entry point.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{config_from_env, router, serve, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("songlib_core=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("SONGLIB_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

    let cfg = config_from_env()?;
    let state = AppState::from_config(&cfg).await?;

    tracing::info!("++ Starting standalone REST API on {}", addr);
    serve(&addr, router(state)).await
}
