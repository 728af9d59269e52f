use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails with a named error if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// HMAC key for bearer tokens. Must be at least 32 bytes.
    pub auth_token_secret: String,
    pub auth_token_ttl_hours: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            auth_token_secret: require_env("AUTH_TOKEN_SECRET")?,
            auth_token_ttl_hours: std::env::var("AUTH_TOKEN_TTL_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse::<u64>()
                .context("AUTH_TOKEN_TTL_HOURS must be a whole number of hours")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
