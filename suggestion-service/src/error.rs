use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Everything the suggestion pipeline can fail with, in pipeline order.
///
/// The response shape is intentionally uneven to match the deployed
/// behavior: 400/401 answers carry a bare `{error}` body while 429/500
/// answers carry `{success: false, error}`.
#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("Missing required fields: imageUrl and language")]
    MissingFields,

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Missing authorization header")]
    MissingAuthorization,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Failed to check suggestion limit")]
    QuotaCheckFailed,

    #[error("Monthly suggestion limit reached. Upgrade to premium for more suggestions.")]
    QuotaExceeded,

    #[error("Failed to process image")]
    ImageProcessing,

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

impl SuggestionError {
    fn status(&self) -> StatusCode {
        match self {
            SuggestionError::MissingFields | SuggestionError::UnsupportedLanguage(_) => {
                StatusCode::BAD_REQUEST
            }
            SuggestionError::MissingAuthorization | SuggestionError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            SuggestionError::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            SuggestionError::QuotaCheckFailed
            | SuggestionError::ImageProcessing
            | SuggestionError::Upstream(_)
            | SuggestionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SuggestionError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match status {
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                json!({ "error": self.to_string() })
            }
            _ => json!({ "success": false, "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(SuggestionError::MissingFields.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            SuggestionError::UnsupportedLanguage("DE".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SuggestionError::MissingAuthorization.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            SuggestionError::QuotaExceeded.status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            SuggestionError::QuotaCheckFailed.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            SuggestionError::Upstream("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
