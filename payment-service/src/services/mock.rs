//! Mock gateway implementation for testing.

use crate::services::stripe::{
    CreatePaymentIntent, GatewayError, PaymentGateway, PaymentIntent,
};
use async_trait::async_trait;
use std::sync::Mutex;

/// Mock payment gateway that records every request it receives.
pub struct MockPaymentGateway {
    outcome: Result<PaymentIntent, String>,
    requests: Mutex<Vec<CreatePaymentIntent>>,
}

impl MockPaymentGateway {
    pub fn succeeding() -> Self {
        Self {
            outcome: Ok(PaymentIntent {
                id: "pi_test_123".to_string(),
                client_secret: "pi_test_123_secret_456".to_string(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// The create-intent requests received so far.
    pub fn requests(&self) -> Vec<CreatePaymentIntent> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_payment_intent(
        &self,
        request: &CreatePaymentIntent,
    ) -> Result<PaymentIntent, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.outcome {
            Ok(intent) => Ok(intent.clone()),
            Err(message) => Err(GatewayError::Api(message.clone())),
        }
    }
}
