use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Payment pipeline failures.
///
/// Every variant collapses to `400 {"error": message}`, matching the
/// deployed behavior: the handler does not reveal which check failed
/// through the status code.
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Missing Authorization header")]
    MissingAuthorization,

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Invalid plan type")]
    InvalidPlanType,

    #[error("Invalid user authentication")]
    InvalidAuthentication,

    #[error("User ID mismatch")]
    UserIdMismatch,

    #[error("{0}")]
    InvalidBody(String),

    #[error("{0}")]
    Gateway(String),
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
