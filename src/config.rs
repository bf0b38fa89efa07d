//! Service configuration loaded from environment variables.

use serde::{Deserialize, Deserializer};

use crate::error::Result;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Debug mode. Only a case-insensitive "true" enables it.
    #[serde(default, deserialize_with = "truthy")]
    pub debug: bool,

    /// Log filter used when debug mode is off.
    #[serde(default)]
    pub rust_log: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5173
}

fn truthy<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().eq_ignore_ascii_case("true"))
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Socket address string to bind to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Log filter directive derived from debug mode and `RUST_LOG`.
    pub fn log_filter(&self) -> String {
        if self.debug {
            "devops_info_service=debug,info".to_string()
        } else {
            self.rust_log.clone().unwrap_or_else(|| "info".to_string())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
            rust_log: None,
        }
    }
}
