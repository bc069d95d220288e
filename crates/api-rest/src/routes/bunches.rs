//! `/api/bunches`: named medicine presets, always returned populated.

use crate::error::ApiResult;
use crate::AppState;
use api_shared::{ErrorRes, MessageRes};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, put};
use axum::Router;
use clinic_core::models::{BunchInput, BunchView};
use clinic_core::parse_record_id;
use serde_json::Value;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/bunches", get(list_bunches).post(create_bunch))
        .route("/bunches/:id", put(update_bunch).delete(delete_bunch))
}

#[utoipa::path(
    get,
    path = "/api/bunches",
    responses(
        (status = 200, description = "Bunches with their medicines, newest first", body = [BunchView])
    )
)]
#[axum::debug_handler]
pub(crate) async fn list_bunches(State(state): State<AppState>) -> Json<Vec<BunchView>> {
    Json(state.bunches.list())
}

#[utoipa::path(
    post,
    path = "/api/bunches",
    request_body = BunchInput,
    responses(
        (status = 201, description = "Bunch created", body = BunchView),
        (status = 400, description = "Validation failed", body = ErrorRes)
    )
)]
/// Create a bunch. `selectedMedicineIds` may hold bare ids or medicine objects.
#[axum::debug_handler]
pub(crate) async fn create_bunch(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<BunchView>)> {
    let Json(payload) = payload?;
    let bunch = state.bunches.create(payload)?;
    Ok((StatusCode::CREATED, Json(bunch)))
}

#[utoipa::path(
    put,
    path = "/api/bunches/{id}",
    params(("id" = String, Path, description = "Bunch id")),
    request_body = BunchInput,
    responses(
        (status = 200, description = "Updated bunch", body = BunchView),
        (status = 400, description = "Validation failed", body = ErrorRes),
        (status = 404, description = "No such bunch", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub(crate) async fn update_bunch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<BunchView>> {
    let id = parse_record_id("bunch", &id)?;
    let Json(payload) = payload?;
    Ok(Json(state.bunches.update(id, payload)?))
}

#[utoipa::path(
    delete,
    path = "/api/bunches/{id}",
    params(("id" = String, Path, description = "Bunch id")),
    responses(
        (status = 200, description = "Bunch deleted", body = MessageRes),
        (status = 404, description = "No such bunch", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub(crate) async fn delete_bunch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageRes>> {
    let id = parse_record_id("bunch", &id)?;
    state.bunches.delete(id)?;
    Ok(Json(MessageRes::new("Deleted")))
}
