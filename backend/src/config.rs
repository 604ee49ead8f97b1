//! Server configuration.
//!
//! Defaults can be overridden by a YAML file named in
//! `SUBSCRIPTION_CALENDAR_CONFIG`, then by individual environment variables.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tower_http::cors::AllowOrigin;

use crate::domain::formatting::DEFAULT_CURRENCY;

pub const CONFIG_PATH_VAR: &str = "SUBSCRIPTION_CALENDAR_CONFIG";
pub const BIND_VAR: &str = "SUBSCRIPTION_CALENDAR_BIND";
pub const CORS_ORIGIN_VAR: &str = "SUBSCRIPTION_CALENDAR_CORS_ORIGIN";
pub const CURRENCY_VAR: &str = "SUBSCRIPTION_CALENDAR_CURRENCY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Origin of the rendering layer allowed by CORS
    pub cors_origin: String,
    /// Fallback log filter when RUST_LOG is unset
    pub log_level: String,
    /// Currency used for formatted amounts when a request names none
    pub currency: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            cors_origin: "http://localhost:8080".to_string(),
            log_level: "info".to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the optional YAML file and the environment
    pub fn load() -> Result<Self> {
        let config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Read a YAML config file; keys missing from the file keep their defaults
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml_content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: ServerConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Apply overrides looked up by environment variable name
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(bind) = non_empty(BIND_VAR) {
            self.bind_address = bind;
        }
        if let Some(origin) = non_empty(CORS_ORIGIN_VAR) {
            self.cors_origin = origin;
        }
        if let Some(currency) = non_empty(CURRENCY_VAR) {
            self.currency = currency;
        }
        self
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", self.bind_address))
    }

    pub fn allow_origin(&self) -> Result<AllowOrigin> {
        let origin = self
            .cors_origin
            .parse::<axum::http::HeaderValue>()
            .with_context(|| format!("Invalid CORS origin '{}'", self.cors_origin))?;
        Ok(AllowOrigin::exact(origin))
    }
}
