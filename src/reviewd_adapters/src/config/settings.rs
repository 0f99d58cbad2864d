use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

use super::constants::prod;

#[derive(Debug, Error)]
#[error("Failed to load settings: {0}")]
pub struct SettingsError(#[from] ConfigError);

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub auth: AuthSettings,
    pub redis: RedisSettings,
    pub email_client: EmailClientSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
    pub max_token_attempts: u32,
    pub attempt_window_in_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub host_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
}

impl Settings {
    /// Load settings from `config/default.json` (if present) and the
    /// `REVIEWD__`-prefixed environment, on top of built-in defaults.
    pub fn load() -> Result<Self, SettingsError> {
        let config = Config::builder()
            .set_default("app.address", prod::APP_ADDRESS)?
            .set_default("auth.jwt_secret", "insecure-dev-secret")?
            .set_default("auth.token_ttl_in_seconds", 3600)?
            .set_default("auth.max_token_attempts", 5)?
            .set_default("auth.attempt_window_in_seconds", 600)?
            .set_default("redis.host_name", "127.0.0.1")?
            .set_default("email_client.base_url", prod::email_client::BASE_URL)?
            .set_default("email_client.sender", prod::email_client::SENDER)?
            .set_default("email_client.auth_token", "")?
            .set_default(
                "email_client.timeout_in_millis",
                prod::email_client::TIMEOUT.as_millis() as u64,
            )?
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                Environment::with_prefix("REVIEWD")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
