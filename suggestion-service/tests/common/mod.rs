use secrecy::Secret;
use service_core::auth::{MockIdentityVerifier, Principal};
use std::sync::Arc;
use suggestion_service::config::{Config, OpenRouterConfig, ServerConfig, SupabaseConfig};
use suggestion_service::services::mock::{
    MockImageFetcher, MockQuotaGate, MockSuggestionProvider,
};
use suggestion_service::{AppState, Application};

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
        openrouter: OpenRouterConfig {
            api_key: Secret::new("test-api-key".to_string()),
            api_base_url: "http://openrouter.invalid/api/v1".to_string(),
            model: "google/gemini-2.5-flash-lite".to_string(),
            referer: "https://everywear.app".to_string(),
        },
        service_name: "suggestion-service-test".to_string(),
    }
}

pub struct TestApp {
    pub address: String,
    pub identity: Arc<MockIdentityVerifier>,
    pub quota: Arc<MockQuotaGate>,
    pub images: Arc<MockImageFetcher>,
    pub provider: Arc<MockSuggestionProvider>,
}

impl TestApp {
    /// Spawn the app with the given mock capabilities on a random port.
    pub async fn spawn(
        identity: MockIdentityVerifier,
        quota: MockQuotaGate,
        images: MockImageFetcher,
        provider: MockSuggestionProvider,
    ) -> Self {
        let identity = Arc::new(identity);
        let quota = Arc::new(quota);
        let images = Arc::new(images);
        let provider = Arc::new(provider);

        let state = AppState {
            config: test_config(),
            identity: identity.clone(),
            quota: quota.clone(),
            images: images.clone(),
            provider: provider.clone(),
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
            quota,
            images,
            provider,
        }
    }

    /// Happy-path app: any token maps to the test principal, quota allows,
    /// image fetch succeeds, provider answers.
    pub async fn spawn_default() -> Self {
        Self::spawn(
            MockIdentityVerifier::allowing(test_principal()),
            MockQuotaGate::allowing(),
            MockImageFetcher::succeeding(),
            MockSuggestionProvider::returning("- A denim jacket\n\nTry white sneakers."),
        )
        .await
    }
}
