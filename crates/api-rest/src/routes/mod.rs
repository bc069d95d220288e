//! HTTP handlers, one module per resource.

pub(crate) mod bunches;
pub(crate) mod health;
pub(crate) mod medicines;
pub(crate) mod patients;

use crate::AppState;
use axum::Router;

/// Every resource route, to be nested under `/api`.
pub(crate) fn api_router() -> Router<AppState> {
    Router::new()
        .merge(patients::router())
        .merge(medicines::router())
        .merge(bunches::router())
}
