//! `/api/medicines`: the medicine catalog.

use crate::error::ApiResult;
use crate::AppState;
use api_shared::{ErrorRes, MessageRes};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, put};
use axum::Router;
use clinic_core::models::Medicine;
use clinic_core::parse_record_id;
use serde_json::Value;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/medicines", get(list_medicines).post(create_medicine))
        .route("/medicines/:id", put(update_medicine).delete(delete_medicine))
}

#[utoipa::path(
    get,
    path = "/api/medicines",
    responses(
        (status = 200, description = "Catalog sorted by name", body = [Medicine])
    )
)]
#[axum::debug_handler]
pub(crate) async fn list_medicines(State(state): State<AppState>) -> Json<Vec<Medicine>> {
    Json(state.medicines.list())
}

#[utoipa::path(
    post,
    path = "/api/medicines",
    request_body = Medicine,
    responses(
        (status = 201, description = "Medicine added to the catalog", body = Medicine),
        (status = 400, description = "Validation failed", body = ErrorRes)
    )
)]
/// Add a catalog entry. `name`, `category` and `oneLiner` are required.
#[axum::debug_handler]
pub(crate) async fn create_medicine(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Medicine>)> {
    let Json(payload) = payload?;
    let medicine = state.medicines.create(payload)?;
    Ok((StatusCode::CREATED, Json(medicine)))
}

#[utoipa::path(
    put,
    path = "/api/medicines/{id}",
    params(("id" = String, Path, description = "Medicine id")),
    request_body = Medicine,
    responses(
        (status = 200, description = "Updated medicine", body = Medicine),
        (status = 400, description = "Validation failed", body = ErrorRes),
        (status = 404, description = "No such medicine", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub(crate) async fn update_medicine(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Medicine>> {
    let id = parse_record_id("medicine", &id)?;
    let Json(payload) = payload?;
    Ok(Json(state.medicines.update(id, payload)?))
}

#[utoipa::path(
    delete,
    path = "/api/medicines/{id}",
    params(("id" = String, Path, description = "Medicine id")),
    responses(
        (status = 200, description = "Medicine removed", body = MessageRes),
        (status = 404, description = "No such medicine", body = ErrorRes)
    )
)]
/// Remove a catalog entry. Bunches that still list it simply skip it from now on.
#[axum::debug_handler]
pub(crate) async fn delete_medicine(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageRes>> {
    let id = parse_record_id("medicine", &id)?;
    state.medicines.delete(id)?;
    Ok(Json(MessageRes::new("Medicine deleted successfully")))
}
