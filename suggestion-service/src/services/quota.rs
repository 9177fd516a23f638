//! The per-principal monthly quota gate.
//!
//! The counter itself lives behind two remote procedures owned by the
//! external data store; this service only asks the gate and reports usage.
//! Check-and-increment atomicity is the store's obligation, not ours.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("quota gate error: {0}")]
pub struct QuotaError(pub String);

#[async_trait]
pub trait QuotaGate: Send + Sync {
    /// May this principal make another suggestion request this month?
    async fn can_request(&self, user_id: &str, access_token: &str) -> Result<bool, QuotaError>;

    /// Record one consumed request. Callers treat failures as non-fatal.
    async fn increment(&self, user_id: &str, access_token: &str) -> Result<(), QuotaError>;
}

/// Gate backed by Supabase remote procedures, executed with the caller's
/// own bearer token so row-level security applies.
#[derive(Clone)]
pub struct SupabaseQuotaGate {
    client: Client,
    base_url: String,
    anon_key: Secret<String>,
}

impl SupabaseQuotaGate {
    pub fn new(base_url: &str, anon_key: Secret<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        }
    }

    async fn call_rpc(
        &self,
        function: &str,
        user_id: &str,
        access_token: &str,
    ) -> Result<reqwest::Response, QuotaError> {
        let url = format!("{}/rest/v1/rpc/{}", self.base_url, function);

        let response = self
            .client
            .post(&url)
            .header("apikey", self.anon_key.expose_secret())
            .bearer_auth(access_token)
            .json(&json!({ "user_uuid": user_id }))
            .send()
            .await
            .map_err(|e| QuotaError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuotaError(format!("{} returned {}: {}", function, status, body)));
        }

        Ok(response)
    }
}

#[async_trait]
impl QuotaGate for SupabaseQuotaGate {
    async fn can_request(&self, user_id: &str, access_token: &str) -> Result<bool, QuotaError> {
        let response = self
            .call_rpc("can_request_suggestion", user_id, access_token)
            .await?;

        response
            .json::<bool>()
            .await
            .map_err(|e| QuotaError(format!("unexpected gate response: {}", e)))
    }

    async fn increment(&self, user_id: &str, access_token: &str) -> Result<(), QuotaError> {
        self.call_rpc("increment_suggestions_count", user_id, access_token)
            .await?;
        Ok(())
    }
}
