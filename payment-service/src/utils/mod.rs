use crate::error::PaymentError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// JSON body extractor whose rejection is the handler's uniform 400 shape.
/// Content-type is deliberately not enforced.
pub struct BodyJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for BodyJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = PaymentError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| PaymentError::InvalidBody(format!("Failed to read request body: {}", e)))?;

        let value = serde_json::from_slice(&bytes)
            .map_err(|e| PaymentError::InvalidBody(format!("Invalid JSON body: {}", e)))?;

        Ok(BodyJson(value))
    }
}
