//! The payment pipeline: authenticate, validate, authorize, create the
//! intent, respond. Linear, no retries; every failure becomes the uniform
//! 400 `{error}` response via [`PaymentError`].

use crate::dtos::{CreatePaymentRequest, CreatePaymentResponse, PlanType};
use crate::error::PaymentError;
use crate::services::CreatePaymentIntent;
use crate::startup::AppState;
use crate::utils::BodyJson;
use axum::{extract::State, http::HeaderMap, Json};
use service_core::auth::bearer_token;

pub async fn create_subscription_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    BodyJson(request): BodyJson<CreatePaymentRequest>,
) -> Result<Json<CreatePaymentResponse>, PaymentError> {
    let token = bearer_token(&headers).ok_or(PaymentError::MissingAuthorization)?;

    let amount = request
        .amount
        .as_ref()
        .and_then(|value| value.as_f64())
        .filter(|amount| *amount > 0.0)
        .ok_or(PaymentError::InvalidAmount)?;

    let plan = request
        .plan_type
        .as_deref()
        .and_then(PlanType::parse)
        .ok_or(PaymentError::InvalidPlanType)?;

    let principal = state.identity.verify(token).await.map_err(|e| {
        tracing::debug!(error = %e, "authentication failed");
        PaymentError::InvalidAuthentication
    })?;

    // A caller may only create payment intents for themselves.
    if request.user_id.as_deref() != Some(principal.id.as_str()) {
        return Err(PaymentError::UserIdMismatch);
    }

    let currency = request
        .currency
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| state.config.stripe.default_currency.clone());

    let intent_request = CreatePaymentIntent {
        // Gateway convention: integer minor units, rounded to nearest.
        amount_minor: (amount * 100.0).round() as i64,
        currency,
        description: format!("Everywear Premium {} Subscription", plan.label()),
        metadata: vec![
            ("user_id".to_string(), principal.id.clone()),
            ("plan_type".to_string(), plan.as_str().to_string()),
            ("email".to_string(), principal.email.unwrap_or_default()),
        ],
    };

    let intent = state
        .gateway
        .create_payment_intent(&intent_request)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Create payment intent error");
            PaymentError::Gateway(e.to_string())
        })?;

    Ok(Json(CreatePaymentResponse {
        client_secret: intent.client_secret,
        payment_intent_id: intent.id,
    }))
}
