use serde::{Deserialize, Serialize};

/// Inbound request body for `POST /create-subscription-payment`.
///
/// `amount` is kept as a raw JSON value so that a non-numeric amount is
/// caught by the handler's own validation (`Invalid amount`) rather than a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub amount: Option<serde_json::Value>,
    pub currency: Option<String>,
    pub user_id: Option<String>,
    pub plan_type: Option<String>,
}

/// The fixed set of subscription plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanType {
    Monthly,
    Annual,
}

impl PlanType {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "monthly" => Some(PlanType::Monthly),
            "annual" => Some(PlanType::Annual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Monthly => "monthly",
            PlanType::Annual => "annual",
        }
    }

    /// Human-readable label used in the payment description.
    pub fn label(&self) -> &'static str {
        match self {
            PlanType::Monthly => "Monthly",
            PlanType::Annual => "Annual",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatePaymentResponse {
    pub client_secret: String,
    pub payment_intent_id: String,
}
