//! Stripe payment gateway client.
//!
//! Implements the PaymentIntents API for payment initiation. Stripe speaks
//! form-encoded requests with bracketed keys for nested fields.

use crate::config::StripeConfig;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

/// Request to create a payment intent.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePaymentIntent {
    /// Amount in the gateway's smallest currency unit (cents for USD).
    pub amount_minor: i64,
    /// Currency code (e.g. "usd").
    pub currency: String,
    /// Human-readable description shown on receipts.
    pub description: String,
    /// Metadata key/value pairs attached to the intent.
    pub metadata: Vec<(String, String)>,
}

/// A created payment intent with the client-side credentials needed to
/// complete payment.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    Api(String),

    #[error("payment gateway network error: {0}")]
    Network(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment_intent(
        &self,
        request: &CreatePaymentIntent,
    ) -> Result<PaymentIntent, GatewayError>;
}

/// Stripe API error response.
#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PaymentIntentResponse {
    id: String,
    client_secret: String,
}

/// Stripe client for interacting with the Stripe API.
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    config: StripeConfig,
}

impl StripeClient {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn form_params(request: &CreatePaymentIntent) -> Vec<(String, String)> {
        let mut params = vec![
            ("amount".to_string(), request.amount_minor.to_string()),
            ("currency".to_string(), request.currency.clone()),
            ("description".to_string(), request.description.clone()),
            (
                "automatic_payment_methods[enabled]".to_string(),
                "true".to_string(),
            ),
        ];
        for (key, value) in &request.metadata {
            params.push((format!("metadata[{}]", key), value.clone()));
        }
        params
    }
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_payment_intent(
        &self,
        request: &CreatePaymentIntent,
    ) -> Result<PaymentIntent, GatewayError> {
        let url = format!("{}/v1/payment_intents", self.config.api_base_url);
        let params = Self::form_params(request);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.secret_key.expose_secret())
            .form(&params)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        tracing::debug!(status = %status, "Stripe create_payment_intent response");

        if status.is_success() {
            let intent: PaymentIntentResponse = serde_json::from_str(&body)
                .map_err(|e| GatewayError::Api(format!("unexpected intent payload: {}", e)))?;
            tracing::info!(
                intent_id = %intent.id,
                amount = request.amount_minor,
                currency = %request.currency,
                "Stripe payment intent created"
            );
            Ok(PaymentIntent {
                id: intent.id,
                client_secret: intent.client_secret,
            })
        } else {
            let message = serde_json::from_str::<StripeErrorBody>(&body)
                .ok()
                .and_then(|e| e.error.message.or(e.error.error_type))
                .unwrap_or(body);
            tracing::error!(status = %status, message = %message, "Stripe payment intent creation failed");
            Err(GatewayError::Api(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_params_use_bracketed_keys() {
        let request = CreatePaymentIntent {
            amount_minor: 1999,
            currency: "usd".to_string(),
            description: "Everywear Premium Annual Subscription".to_string(),
            metadata: vec![
                ("user_id".to_string(), "user-123".to_string()),
                ("plan_type".to_string(), "annual".to_string()),
            ],
        };

        let params = StripeClient::form_params(&request);

        assert!(params.contains(&("amount".to_string(), "1999".to_string())));
        assert!(params.contains(&(
            "automatic_payment_methods[enabled]".to_string(),
            "true".to_string()
        )));
        assert!(params.contains(&("metadata[user_id]".to_string(), "user-123".to_string())));
        assert!(params.contains(&("metadata[plan_type]".to_string(), "annual".to_string())));
    }
}
