//! Configuration module
//!
//! Environment-driven configuration for the gateway: server port, backend
//! location and timeout, and request body bounds.

use std::env;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_BODY_SIZE_MB: usize = 50;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    /// Base URL of the product backend. The gateway never retries calls to it.
    pub backend_url: String,
    pub backend_timeout_secs: u64,
    pub max_body_size_mb: usize,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // Best-effort .env loading; real env vars win.
        dotenvy::dotenv().ok();

        let server_port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got '{raw}'"))?,
            Err(_) => DEFAULT_PORT,
        };

        let backend_url = env::var("BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let backend_timeout_secs = match env::var("BACKEND_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                anyhow::anyhow!("BACKEND_TIMEOUT_SECS must be a positive integer, got '{raw}'")
            })?,
            Err(_) => DEFAULT_BACKEND_TIMEOUT_SECS,
        };

        let max_body_size_mb = match env::var("MAX_BODY_SIZE_MB") {
            Ok(raw) => raw.parse::<usize>().map_err(|_| {
                anyhow::anyhow!("MAX_BODY_SIZE_MB must be a positive integer, got '{raw}'")
            })?,
            Err(_) => DEFAULT_MAX_BODY_SIZE_MB,
        };

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            server_port,
            backend_url,
            backend_timeout_secs,
            max_body_size_mb,
            environment,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn max_body_size_bytes(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server_port: DEFAULT_PORT,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            backend_timeout_secs: DEFAULT_BACKEND_TIMEOUT_SECS,
            max_body_size_mb: DEFAULT_MAX_BODY_SIZE_MB,
            environment: "development".to_string(),
        }
    }

    #[test]
    fn test_is_production() {
        let mut config = base_config();
        assert!(!config.is_production());

        config.environment = "production".to_string();
        assert!(config.is_production());

        config.environment = "PROD".to_string();
        assert!(config.is_production());
    }

    #[test]
    fn test_max_body_size_bytes() {
        let config = base_config();
        assert_eq!(config.max_body_size_bytes(), 50 * 1024 * 1024);
    }
}
