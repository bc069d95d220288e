//! # API REST
//!
//! REST API for the clinic case-records service.
//!
//! Handles:
//! - HTTP endpoints with axum, under `/api`
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (status codes, error bodies, CORS, body limits)
//!
//! All record logic lives in `clinic-core`; handlers only parse ids, call a service and
//! shape the response.

#![warn(rust_2018_idioms)]

pub mod docs;
pub mod error;
mod routes;

use axum::extract::DefaultBodyLimit;
use axum::http::header::InvalidHeaderValue;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use clinic_core::{BunchService, CoreConfig, FollowUpService, MedicineService, PatientService};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use docs::ApiDoc;
pub use error::{ApiError, ApiResult};

/// Largest accepted request body. Medicine images travel inline as data URLs.
pub const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub patients: PatientService,
    pub follow_ups: FollowUpService,
    pub medicines: MedicineService,
    pub bunches: BunchService,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            patients: PatientService::new(cfg.clone()),
            follow_ups: FollowUpService::new(cfg.clone()),
            medicines: MedicineService::new(cfg.clone()),
            bunches: BunchService::new(cfg),
        }
    }
}

/// Builds the CORS layer.
///
/// With an origin, only that origin may call the API and credentials are allowed.
/// Without one, any origin may call it.
///
/// # Errors
///
/// Returns an error if `origin` is not a valid header value.
pub fn cors_layer(origin: Option<&str>) -> Result<CorsLayer, InvalidHeaderValue> {
    let Some(origin) = origin else {
        return Ok(CorsLayer::permissive());
    };

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::exact(HeaderValue::from_str(origin)?))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// The full application: health probe, `/api` routes and Swagger UI.
pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .nest("/api", routes::api_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Binds `addr` and serves `app` until the process is stopped.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(addr: &str, app: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("-- Clinic REST API listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}
