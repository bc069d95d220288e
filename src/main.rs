use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{cors_layer, router, serve, AppState};
use clinic_core::config::data_dir_from_env_value;
use clinic_core::CoreConfig;

/// Main entry point for the clinic records service
///
/// Resolves configuration once, prepares the data directory and serves the REST API.
///
/// # Environment Variables
/// - `CLINIC_REST_ADDR`: REST server address (default: "0.0.0.0:5001")
/// - `CLINIC_DATA_DIR`: Directory for record storage (default: "clinic_data")
/// - `CLINIC_CORS_ORIGIN`: The only origin allowed to call the API (default: any)
///
/// # Errors
/// Returns an error if logging cannot be initialised, the data directory cannot be
/// prepared, the CORS origin is not a valid header value, or the server fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic_run=info".parse()?)
                .add_directive("clinic_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("CLINIC_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:5001".into());
    let data_dir = data_dir_from_env_value(std::env::var("CLINIC_DATA_DIR").ok());
    let cors_origin = std::env::var("CLINIC_CORS_ORIGIN")
        .ok()
        .filter(|origin| !origin.trim().is_empty());

    let cfg = Arc::new(CoreConfig::new(data_dir)?);
    cfg.ensure_layout()?;
    tracing::info!("++ Clinic data directory: {}", cfg.data_dir().display());

    let cors = cors_layer(cors_origin.as_deref())?;
    match &cors_origin {
        Some(origin) => tracing::info!("++ CORS restricted to {}", origin),
        None => tracing::info!("++ CORS permissive"),
    }

    tracing::info!("++ Starting clinic REST on {}", rest_addr);
    serve(&rest_addr, router(AppState::new(cfg), cors)).await?;

    Ok(())
}
