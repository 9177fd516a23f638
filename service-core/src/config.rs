use crate::error::AppError;
use anyhow::anyhow;
use std::env;

/// Read a required environment variable, failing with a useful message.
pub fn require_env(key: &str) -> Result<String, AppError> {
    env::var(key).map_err(|_| AppError::ConfigError(anyhow!("{} must be set", key)))
}

/// Read an environment variable with a default.
pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
