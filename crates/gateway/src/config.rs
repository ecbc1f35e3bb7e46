//! Gateway configuration.

use std::env;

use common::{ConfigError, DatabaseConfig, JwtConfig};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("SERVER_PORT") {
            Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "SERVER_PORT",
                value,
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
        })
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
