//! The suggestion pipeline: validate, authenticate, gate, call upstream,
//! respond. Strictly sequential, no retries, every failure becomes a JSON
//! response via [`SuggestionError`].

use crate::dtos::{Language, SuggestionRequest, SuggestionResponse};
use crate::error::SuggestionError;
use crate::startup::AppState;
use crate::utils::BodyJson;
use axum::{extract::State, http::HeaderMap, Json};
use service_core::auth::bearer_token;

pub async fn ai_suggestions(
    State(state): State<AppState>,
    headers: HeaderMap,
    BodyJson(request): BodyJson<SuggestionRequest>,
) -> Result<Json<SuggestionResponse>, SuggestionError> {
    let (image_url, language_tag) = match (request.image_url, request.language) {
        (Some(image_url), Some(language)) if !image_url.is_empty() && !language.is_empty() => {
            (image_url, language)
        }
        _ => return Err(SuggestionError::MissingFields),
    };

    // Unknown tags fail closed; there is no default instruction.
    let language = Language::parse(&language_tag)
        .ok_or(SuggestionError::UnsupportedLanguage(language_tag))?;

    let token = bearer_token(&headers).ok_or(SuggestionError::MissingAuthorization)?;
    let principal = state
        .identity
        .verify(token)
        .await
        .map_err(|e| {
            tracing::debug!(error = %e, "authentication failed");
            SuggestionError::Unauthorized
        })?;

    // The gate must be consulted before any upstream work happens. A gate
    // failure is a server error, a denial is a rate-limit error.
    let allowed = state
        .quota
        .can_request(&principal.id, token)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %principal.id, error = %e, "Error checking suggestion limit");
            SuggestionError::QuotaCheckFailed
        })?;
    if !allowed {
        return Err(SuggestionError::QuotaExceeded);
    }

    let image = state
        .images
        .fetch_encoded(&image_url)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error fetching/converting image");
            SuggestionError::ImageProcessing
        })?;

    let suggestions = state
        .provider
        .suggest(&image, language)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "AI suggestions error");
            SuggestionError::Upstream(e.to_string())
        })?;

    // Best-effort accounting: a failed increment never blocks the response.
    if let Err(e) = state.quota.increment(&principal.id, token).await {
        tracing::warn!(user_id = %principal.id, error = %e, "Error incrementing suggestions count");
    }

    Ok(Json(SuggestionResponse {
        success: true,
        suggestions: suggestions.trim().to_string(),
        language,
    }))
}
