use anyhow::Result;
use dotenvy::dotenv;
use secrecy::Secret;
use service_core::config::{env_or, require_env};

#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub supabase: SupabaseConfig,
    pub stripe: StripeConfig,
    pub service_name: String,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: Secret<String>,
}

#[derive(Clone, Debug)]
pub struct StripeConfig {
    pub secret_key: Secret<String>,
    pub api_base_url: String,
    /// Fallback when the request omits a currency.
    pub default_currency: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// A missing gateway secret or identity-service URL is a fatal
    /// configuration error here, not deep in a request path.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let host = env_or("PAYMENT_SERVICE_HOST", "0.0.0.0");
        let port = env_or("PAYMENT_SERVICE_PORT", "3002").parse()?;

        Ok(Self {
            server: ServerConfig { host, port },
            supabase: SupabaseConfig {
                url: require_env("SUPABASE_URL")?,
                anon_key: Secret::new(require_env("SUPABASE_ANON_KEY")?),
            },
            stripe: StripeConfig {
                secret_key: Secret::new(require_env("STRIPE_SECRET_KEY")?),
                api_base_url: env_or("STRIPE_API_URL", "https://api.stripe.com"),
                default_currency: env_or("STRIPE_DEFAULT_CURRENCY", "usd"),
            },
            service_name: "payment-service".to_string(),
        })
    }
}
