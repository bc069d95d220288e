//! Mapping of core errors onto HTTP responses.

use api_shared::ErrorRes;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use clinic_core::ClinicError;

/// Error returned by every handler. Rendered as an [`ErrorRes`] body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ClinicError> for ApiError {
    fn from(err: ClinicError) -> Self {
        if !err.is_client_error() {
            tracing::error!("Internal error: {:?}", err);
            return Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }

        let status = match &err {
            ClinicError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };
        Self::new(status, err.to_string())
    }
}

/// Malformed JSON, a missing body or a wrong content type is a bad request.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorRes::new(self.message))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_core_errors_to_status_codes() {
        let cases = [
            (ClinicError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (ClinicError::NotFound("Patient"), StatusCode::NOT_FOUND),
            (
                clinic_core::parse_record_id("patient", "x").unwrap_err(),
                StatusCode::BAD_REQUEST,
            ),
            (
                ClinicError::FileRead(std::io::Error::other("disk")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = ApiError::from(ClinicError::FileWrite(std::io::Error::other("/srv/secret")));
        assert_eq!(err.message(), "Internal server error");
    }

    #[test]
    fn not_found_names_the_record_kind() {
        let err = ApiError::from(ClinicError::NotFound("Follow-up record"));
        assert_eq!(err.message(), "Follow-up record not found");
    }
}
