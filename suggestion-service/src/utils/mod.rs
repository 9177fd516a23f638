use crate::error::SuggestionError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// JSON body extractor whose rejection falls into the handler's catch-all
/// error class, matching the deployed function's behavior for unparseable
/// bodies. Content-type is deliberately not enforced.
pub struct BodyJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for BodyJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = SuggestionError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| SuggestionError::Internal(format!("Failed to read request body: {}", e)))?;

        let value = serde_json::from_slice(&bytes)
            .map_err(|e| SuggestionError::Internal(format!("Json parse error: {}", e)))?;

        Ok(BodyJson(value))
    }
}
