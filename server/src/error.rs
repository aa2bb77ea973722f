//! Error code contract shared by services and handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use wire::UpdateElementResponse;

/// Grepable error code and HTTP status for failure responses.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Failure body in the update endpoint's response shape.
pub(crate) fn error_response<E: ErrorCode>(err: &E) -> (StatusCode, Json<UpdateElementResponse>) {
    (err.status(), Json(UpdateElementResponse::failure(err.error_code(), err.to_string())))
}

/// A body that does not decode into a request is an invalid patch.
impl ErrorCode for JsonRejection {
    fn error_code(&self) -> &'static str {
        "E_INVALID_PATCH"
    }

    fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}
