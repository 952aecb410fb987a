//! Configuration for the manager service.

use std::net::SocketAddr;

use anyhow::Result;

/// Manager service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to listen on for provider connections.
    pub listen_addr: SocketAddr,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let listen_addr = std::env::var("PROVD_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:5051".to_string())
            .parse()?;

        let log_level = std::env::var("PROVD_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            listen_addr,
            log_level,
        })
    }
}
