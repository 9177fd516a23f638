use secrecy::Secret;
use serde_json::json;
use service_core::auth::{AuthError, IdentityVerifier, SupabaseAuth};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn verifier_for(server: &MockServer) -> SupabaseAuth {
    SupabaseAuth::new(&server.uri(), Secret::new("anon-key".to_string()))
}

#[tokio::test]
async fn resolves_principal_from_user_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer user-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user-123",
            "email": "someone@example.com",
            "aud": "authenticated"
        })))
        .mount(&server)
        .await;

    let principal = verifier_for(&server)
        .verify("user-token")
        .await
        .expect("expected principal");

    assert_eq!(principal.id, "user-123");
    assert_eq!(principal.email.as_deref(), Some("someone@example.com"));
}

#[tokio::test]
async fn rejected_token_maps_to_invalid_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "invalid JWT" })),
        )
        .mount(&server)
        .await;

    let err = verifier_for(&server).verify("bad-token").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidToken));
}

#[tokio::test]
async fn identity_service_failure_maps_to_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = verifier_for(&server).verify("user-token").await.unwrap_err();
    assert!(matches!(err, AuthError::Provider(_)));
}
