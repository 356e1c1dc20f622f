//! Environment-driven process configuration.

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("STOCKFLOW_BIND_ADDR is not a socket address: {value}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
}

impl ApiConfig {
    /// Read `STOCKFLOW_BIND_ADDR` (default `0.0.0.0:3000`).
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("STOCKFLOW_BIND_ADDR").ok();
        Self::from_bind_addr(raw.as_deref())
    }

    pub fn from_bind_addr(raw: Option<&str>) -> Result<Self, ConfigError> {
        let value = raw.unwrap_or(DEFAULT_BIND_ADDR);
        let bind_addr = value.parse().map_err(|source| ConfigError::BindAddr {
            value: value.to_string(),
            source,
        })?;
        Ok(Self { bind_addr })
    }
}
