//! Identity verification against the external auth authority.
//!
//! Both edge services resolve the caller's bearer credential to a
//! [`Principal`] before doing anything on the caller's behalf. The concrete
//! verifier talks to the Supabase auth endpoint; handlers only see the
//! [`IdentityVerifier`] trait so tests can swap in a mock.

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use thiserror::Error;

/// The authenticated identity behind a request. Never persisted here; owned
/// by the external identity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// The identity service rejected the credential.
    #[error("invalid token")]
    InvalidToken,

    /// The identity service itself failed (unreachable, 5xx, bad payload).
    #[error("identity provider error: {0}")]
    Provider(String),
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Resolve a bearer token to a principal, or fail.
    async fn verify(&self, token: &str) -> Result<Principal, AuthError>;
}

/// Extract the bearer token from the `Authorization` header.
///
/// The original functions are lenient about the `Bearer ` prefix: one passes
/// the raw header through, the other strips the prefix itself. Accept both.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    Some(value.strip_prefix("Bearer ").unwrap_or(value))
}

/// Verifier backed by the Supabase auth endpoint (`GET /auth/v1/user`).
#[derive(Clone)]
pub struct SupabaseAuth {
    client: Client,
    base_url: String,
    anon_key: Secret<String>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    email: Option<String>,
}

impl SupabaseAuth {
    pub fn new(base_url: &str, anon_key: Secret<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        }
    }
}

#[async_trait]
impl IdentityVerifier for SupabaseAuth {
    async fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        let url = format!("{}/auth/v1/user", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("apikey", self.anon_key.expose_secret())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(AuthError::InvalidToken);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "identity service error");
            return Err(AuthError::Provider(format!(
                "identity service returned {}",
                status
            )));
        }

        let user: UserResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Provider(format!("invalid user payload: {}", e)))?;

        Ok(Principal {
            id: user.id,
            email: user.email,
        })
    }
}

/// Mock verifier for tests: returns a fixed principal (or rejects every
/// token) and counts how often it was consulted.
pub struct MockIdentityVerifier {
    principal: Mutex<Option<Principal>>,
    calls: AtomicUsize,
}

impl MockIdentityVerifier {
    /// Verifier that accepts any token as the given principal.
    pub fn allowing(principal: Principal) -> Self {
        Self {
            principal: Mutex::new(Some(principal)),
            calls: AtomicUsize::new(0),
        }
    }

    /// Verifier that rejects every token.
    pub fn rejecting() -> Self {
        Self {
            principal: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityVerifier for MockIdentityVerifier {
    async fn verify(&self, _token: &str) -> Result<Principal, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.principal.lock().unwrap().clone() {
            Some(principal) => Ok(principal),
            None => Err(AuthError::InvalidToken),
        }
    }
}
