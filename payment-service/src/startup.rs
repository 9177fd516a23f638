//! Application startup and lifecycle management.

use crate::build_router;
use crate::config::Config;
use crate::services::{PaymentGateway, StripeClient};
use service_core::auth::{IdentityVerifier, SupabaseAuth};
use service_core::error::AppError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared application state. The identity service and payment gateway sit
/// behind trait objects so the pipeline is testable without network access.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub identity: Arc<dyn IdentityVerifier>,
    pub gateway: Arc<dyn PaymentGateway>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the concrete upstream clients.
    pub async fn build(config: Config) -> Result<Self, AppError> {
        let identity = Arc::new(SupabaseAuth::new(
            &config.supabase.url,
            config.supabase.anon_key.clone(),
        ));
        let gateway = Arc::new(StripeClient::new(config.stripe.clone()));

        tracing::info!("Stripe client initialized");

        let state = AppState {
            config,
            identity,
            gateway,
        };

        Self::build_with_state(state).await
    }

    /// Build the application around a prepared state (tests inject mock
    /// capabilities here). Port 0 binds a random free port.
    pub async fn build_with_state(state: AppState) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.server.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Payment service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router).await
    }
}
