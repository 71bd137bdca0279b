//! Configuration module for the party ledger backend.
//!
//! All configuration is loaded from environment variables with hardcoded fallbacks.

use std::env;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/partydb.sqlite";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection string for the record store
    pub database_url: String,
    /// Interface to listen on
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Accept `0` for entry quantity/price instead of treating it as missing
    pub allow_zero_amounts: bool,
}

/// A configuration value that could not be parsed.
#[derive(Debug)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid value {:?} for {}", self.value, self.key)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("PARTY_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let host = match lookup("PARTY_HOST") {
            Some(value) => value.parse().map_err(|_| ConfigError {
                key: "PARTY_HOST",
                value,
            })?,
            None => DEFAULT_HOST.parse().map_err(|_| ConfigError {
                key: "PARTY_HOST",
                value: DEFAULT_HOST.to_string(),
            })?,
        };

        let port = match lookup("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError { key: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let log_level =
            lookup("PARTY_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let allow_zero_amounts = match lookup("PARTY_ALLOW_ZERO_AMOUNTS") {
            Some(value) => parse_flag(&value).ok_or(ConfigError {
                key: "PARTY_ALLOW_ZERO_AMOUNTS",
                value,
            })?,
            None => false,
        };

        Ok(Self {
            database_url,
            host,
            port,
            log_level,
            allow_zero_amounts,
        })
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
