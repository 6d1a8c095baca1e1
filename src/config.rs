//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup. A missing completion-API key is a
//! configuration error reported before any network attempt.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Completion API credential (required)
    pub openai_api_key: String,
    /// Model identifier
    pub openai_model: String,
    /// Alternate completion API endpoint base (e.g. a proxy or a mock)
    pub openai_base_url: String,
    /// Request timeout for completion calls, in seconds
    pub openai_timeout_secs: u64,

    /// Postgres connection string
    pub database_url: String,

    /// Base URL of the external auth service (GoTrue-style)
    pub auth_base_url: String,
    /// HS256 secret the auth service signs session tokens with
    pub auth_jwt_secret: Vec<u8>,

    /// Frontend URL for CORS and post-auth redirects
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            openai_api_key: env::var("OPENAI_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("OPENAI_API_KEY"))?,
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_timeout_secs: env::var("OPENAI_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            auth_base_url: env::var("AUTH_BASE_URL")
                .map_err(|_| ConfigError::Missing("AUTH_BASE_URL"))?,
            auth_jwt_secret: env::var("AUTH_JWT_SECRET")
                .map_err(|_| ConfigError::Missing("AUTH_JWT_SECRET"))?
                .into_bytes(),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }

    /// Default config for tests only.
    pub fn test_default() -> Self {
        Self {
            openai_api_key: "test-api-key".to_string(),
            openai_model: DEFAULT_MODEL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_timeout_secs: 5,
            database_url: "postgres://localhost/lifepattern_test".to_string(),
            auth_base_url: "http://localhost:9999".to_string(),
            auth_jwt_secret: b"test_jwt_secret_32_bytes_minimum".to_vec(),
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("OPENAI_API_KEY", "sk-test");
        env::set_var("DATABASE_URL", "postgres://localhost/lifepattern");
        env::set_var("AUTH_BASE_URL", "http://localhost:9999");
        env::set_var("AUTH_JWT_SECRET", "test_jwt_secret_32_bytes_minimum");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.openai_api_key, "sk-test");
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(config.port, 8080);
    }
}
