//! Configuration management for the Counsel daemon

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Main daemon configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Address to bind HTTP server
    pub bind_addr: SocketAddr,

    /// Enable CORS for the web client
    pub cors_enabled: bool,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8787".parse().expect("static bind address"),
            cors_enabled: true,
        }
    }
}

impl DaemonConfig {
    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix("COUNSEL").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load configuration with defaults and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables cannot be parsed
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let settings = config::Config::builder()
            .set_default("http.bind_addr", defaults.http.bind_addr.to_string())?
            .set_default("http.cors_enabled", defaults.http.cors_enabled)?
            .add_source(config::Environment::with_prefix("COUNSEL").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
