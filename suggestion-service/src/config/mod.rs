use anyhow::Result;
use dotenvy::dotenv;
use secrecy::Secret;
use service_core::config::{env_or, require_env};

#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub supabase: SupabaseConfig,
    pub openrouter: OpenRouterConfig,
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
pub struct OpenRouterConfig {
    pub api_key: Secret<String>,
    pub api_base_url: String,
    pub model: String,
    pub referer: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Required secrets are validated here so a misconfigured deployment
    /// fails at startup, not in the middle of a request.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let host = env_or("SUGGESTION_SERVICE_HOST", "0.0.0.0");
        let port = env_or("SUGGESTION_SERVICE_PORT", "3001").parse()?;

        Ok(Self {
            server: ServerConfig { host, port },
            supabase: SupabaseConfig {
                url: require_env("SUPABASE_URL")?,
                anon_key: Secret::new(require_env("SUPABASE_ANON_KEY")?),
            },
            openrouter: OpenRouterConfig {
                api_key: Secret::new(require_env("OPENROUTER_API_KEY")?),
                api_base_url: env_or("OPENROUTER_API_URL", "https://openrouter.ai/api/v1"),
                model: env_or("OPENROUTER_MODEL", "google/gemini-2.5-flash-lite"),
                referer: env_or("OPENROUTER_REFERER", "https://everywear.app"),
            },
            service_name: "suggestion-service".to_string(),
        })
    }
}
