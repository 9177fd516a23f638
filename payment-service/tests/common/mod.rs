use payment_service::config::{Config, ServerConfig, StripeConfig, SupabaseConfig};
use payment_service::services::mock::MockPaymentGateway;
use payment_service::{AppState, Application};
use secrecy::Secret;
use service_core::auth::{MockIdentityVerifier, Principal};
use std::sync::Arc;

pub const TEST_USER_ID: &str = "user-123";

pub fn test_principal() -> Principal {
    Principal {
        id: TEST_USER_ID.to_string(),
        email: Some("user@example.com".to_string()),
    }
}

fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port
        },
        supabase: SupabaseConfig {
            url: "http://supabase.invalid".to_string(),
            anon_key: Secret::new("test-anon-key".to_string()),
        },
        stripe: StripeConfig {
            secret_key: Secret::new("sk_test_123".to_string()),
            api_base_url: "http://stripe.invalid".to_string(),
            default_currency: "usd".to_string(),
        },
        service_name: "payment-service-test".to_string(),
    }
}

pub struct TestApp {
    pub address: String,
    pub identity: Arc<MockIdentityVerifier>,
    pub gateway: Arc<MockPaymentGateway>,
}

impl TestApp {
    /// Spawn the app with the given mock capabilities on a random port.
    pub async fn spawn(identity: MockIdentityVerifier, gateway: MockPaymentGateway) -> Self {
        let identity = Arc::new(identity);
        let gateway = Arc::new(gateway);

        let state = AppState {
            config: test_config(),
            identity: identity.clone(),
            gateway: gateway.clone(),
        };

        let app = Application::build_with_state(state)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            identity,
            gateway,
        }
    }

    /// Happy-path app: any token maps to the test principal, gateway
    /// succeeds.
    pub async fn spawn_default() -> Self {
        Self::spawn(
            MockIdentityVerifier::allowing(test_principal()),
            MockPaymentGateway::succeeding(),
        )
        .await
    }
}
