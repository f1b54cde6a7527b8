//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MOOLAH_GATEWAY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use moolah_gateway::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod error;
mod gateway;
mod server;

pub use error::{ConfigError, ValidationError};
pub use gateway::GatewayConfig;
pub use server::ServerConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (listener, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Moolah.io gateway settings
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MOOLAH_GATEWAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MOOLAH_GATEWAY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `MOOLAH_GATEWAY__GATEWAY__IPN_SECRET=...` -> `gateway.ipn_secret = ...`
    /// - `MOOLAH_GATEWAY__GATEWAY__BITCOIN_GUID=...` -> `gateway.bitcoin_guid = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MOOLAH_GATEWAY")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.gateway.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::Cryptocurrency;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to set environment variables for testing
    /// Uses double underscores to separate nested config values
    fn set_minimal_env() {
        env::set_var("MOOLAH_GATEWAY__GATEWAY__API_KEY", "key");
        env::set_var("MOOLAH_GATEWAY__GATEWAY__IPN_SECRET", "s3cret");
        env::set_var("MOOLAH_GATEWAY__GATEWAY__BITCOIN_GUID", "btc-guid");
        env::set_var("MOOLAH_GATEWAY__GATEWAY__SITE_URL", "https://shop.example.com");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("MOOLAH_GATEWAY__GATEWAY__API_KEY");
        env::remove_var("MOOLAH_GATEWAY__GATEWAY__IPN_SECRET");
        env::remove_var("MOOLAH_GATEWAY__GATEWAY__BITCOIN_GUID");
        env::remove_var("MOOLAH_GATEWAY__GATEWAY__SITE_URL");
        env::remove_var("MOOLAH_GATEWAY__SERVER__PORT");
        env::remove_var("MOOLAH_GATEWAY__SERVER__LOG_JSON");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.gateway.ipn_secret.expose_secret(), "s3cret");
        assert_eq!(
            config.gateway.guid_for(Cryptocurrency::Bitcoin),
            Some("btc-guid")
        );
        assert_eq!(config.gateway.site_url, "https://shop.example.com");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(!config.server.log_json);
    }

    #[test]
    fn test_json_logging_flag() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("MOOLAH_GATEWAY__SERVER__LOG_JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.server.log_json);
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("MOOLAH_GATEWAY__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_missing_secret_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MOOLAH_GATEWAY__GATEWAY__API_KEY", "key");
        env::set_var("MOOLAH_GATEWAY__GATEWAY__BITCOIN_GUID", "btc-guid");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("gateway.ipn_secret"))
        );
    }
}
