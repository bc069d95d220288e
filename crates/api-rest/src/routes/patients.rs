//! `/api/patients` and the follow-ups nested under it.
//!
//! Every follow-up operation answers with the full parent patient.

use crate::error::ApiResult;
use crate::AppState;
use api_shared::{ErrorRes, MessageRes};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post, put};
use axum::Router;
use clinic_core::models::{FollowUp, Patient};
use clinic_core::parse_record_id;
use serde_json::Value;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/patients", get(list_patients).post(create_patient))
        .route(
            "/patients/:id",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
        .route("/patients/:id/followups", post(add_follow_up))
        .route(
            "/patients/:id/followups/:follow_up_id",
            put(update_follow_up).delete(delete_follow_up),
        )
}

#[utoipa::path(
    get,
    path = "/api/patients",
    responses(
        (status = 200, description = "All patients, newest first", body = [Patient]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub(crate) async fn list_patients(State(state): State<AppState>) -> Json<Vec<Patient>> {
    Json(state.patients.list())
}

#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = Patient,
    responses(
        (status = 201, description = "Patient registered", body = Patient),
        (status = 400, description = "Validation failed", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Register a new patient from an intake form.
///
/// `_id`, `followUps` and the timestamps are assigned by the server; `maritalStatus` and
/// `pMainDate` are defaulted when absent.
#[axum::debug_handler]
pub(crate) async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Patient>)> {
    let Json(payload) = payload?;
    let patient = state.patients.create(payload)?;
    Ok((StatusCode::CREATED, Json(patient)))
}

#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient", body = Patient),
        (status = 400, description = "Malformed id", body = ErrorRes),
        (status = 404, description = "No such patient", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub(crate) async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Patient>> {
    let id = parse_record_id("patient", &id)?;
    Ok(Json(state.patients.get(id)?))
}

#[utoipa::path(
    put,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    request_body = Patient,
    responses(
        (status = 200, description = "Updated patient", body = Patient),
        (status = 400, description = "Validation failed", body = ErrorRes),
        (status = 404, description = "No such patient", body = ErrorRes)
    )
)]
/// Update a patient. Fields that are sent overwrite the stored ones; the rest are kept.
#[axum::debug_handler]
pub(crate) async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Patient>> {
    let id = parse_record_id("patient", &id)?;
    let Json(payload) = payload?;
    Ok(Json(state.patients.update(id, payload)?))
}

#[utoipa::path(
    delete,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient and follow-ups deleted", body = MessageRes),
        (status = 404, description = "No such patient", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub(crate) async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageRes>> {
    let id = parse_record_id("patient", &id)?;
    state.patients.delete(id)?;
    Ok(Json(MessageRes::new("Patient record deleted successfully")))
}

#[utoipa::path(
    post,
    path = "/api/patients/{id}/followups",
    params(("id" = String, Path, description = "Patient id")),
    request_body = FollowUp,
    responses(
        (status = 200, description = "Patient with the new follow-up appended", body = Patient),
        (status = 400, description = "Validation failed", body = ErrorRes),
        (status = 404, description = "No such patient", body = ErrorRes)
    )
)]
/// Append a follow-up visit. `previousAppointment` is optional.
#[axum::debug_handler]
pub(crate) async fn add_follow_up(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Patient>> {
    let patient_id = parse_record_id("patient", &id)?;
    let Json(payload) = payload?;
    Ok(Json(state.follow_ups.add_follow_up(patient_id, payload)?))
}

#[utoipa::path(
    put,
    path = "/api/patients/{id}/followups/{follow_up_id}",
    params(
        ("id" = String, Path, description = "Patient id"),
        ("follow_up_id" = String, Path, description = "Follow-up id")
    ),
    request_body = FollowUp,
    responses(
        (status = 200, description = "Patient with the follow-up updated", body = Patient),
        (status = 400, description = "Validation failed", body = ErrorRes),
        (status = 404, description = "No such patient or follow-up", body = ErrorRes)
    )
)]
/// Update the fields of one follow-up that are present in the body.
#[axum::debug_handler]
pub(crate) async fn update_follow_up(
    State(state): State<AppState>,
    Path((id, follow_up_id)): Path<(String, String)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Patient>> {
    let patient_id = parse_record_id("patient", &id)?;
    let follow_up_id = parse_record_id("follow-up", &follow_up_id)?;
    let Json(payload) = payload?;
    Ok(Json(state.follow_ups.update_follow_up(
        patient_id,
        follow_up_id,
        payload,
    )?))
}

#[utoipa::path(
    delete,
    path = "/api/patients/{id}/followups/{follow_up_id}",
    params(
        ("id" = String, Path, description = "Patient id"),
        ("follow_up_id" = String, Path, description = "Follow-up id")
    ),
    responses(
        (status = 200, description = "Patient without the follow-up", body = Patient),
        (status = 404, description = "No such patient or follow-up", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub(crate) async fn delete_follow_up(
    State(state): State<AppState>,
    Path((id, follow_up_id)): Path<(String, String)>,
) -> ApiResult<Json<Patient>> {
    let patient_id = parse_record_id("patient", &id)?;
    let follow_up_id = parse_record_id("follow-up", &follow_up_id)?;
    Ok(Json(
        state.follow_ups.delete_follow_up(patient_id, follow_up_id)?,
    ))
}

