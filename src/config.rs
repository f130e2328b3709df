// config.rs
use crate::catalog::NormalizeConfig;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE: &str = "http://localhost:5000/api";
const DEFAULT_FILES_BASE: &str = "http://localhost:5000";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_MAX_WORKERS: usize = 8;
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1560518883-ce09059eeffa?w=800&q=80";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },
    #[error("{var} is not a valid socket address: {value}")]
    InvalidAddr { var: &'static str, value: String },
    #[error("{var} must be a positive integer, got {value}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub api_base: Url,
    pub files_base: Url,
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub http_timeout: Duration,
    pub placeholder_image: String,
}

impl PortalConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys take the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let parse_url = |var: &'static str, default: &str| {
            Url::parse(&get(var, default)).map_err(|e| ConfigError::InvalidUrl {
                var,
                reason: e.to_string(),
            })
        };

        let parse_positive = |var: &'static str, default: u64| {
            let value = get(var, &default.to_string());
            value
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidNumber { var, value })
        };

        let bind = get("PORTAL_BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind.parse().map_err(|_| ConfigError::InvalidAddr {
            var: "PORTAL_BIND_ADDR",
            value: bind.clone(),
        })?;

        Ok(Self {
            api_base: parse_url("PORTAL_API_BASE", DEFAULT_API_BASE)?,
            files_base: parse_url("PORTAL_FILES_BASE", DEFAULT_FILES_BASE)?,
            bind_addr,
            max_workers: parse_positive("PORTAL_MAX_WORKERS", DEFAULT_MAX_WORKERS as u64)? as usize,
            http_timeout: Duration::from_secs(parse_positive(
                "PORTAL_HTTP_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
            placeholder_image: parse_url("PORTAL_PLACEHOLDER_IMAGE", DEFAULT_PLACEHOLDER_IMAGE)?
                .to_string(),
        })
    }

    pub fn normalize(&self) -> NormalizeConfig {
        NormalizeConfig {
            files_base: self.files_base.as_str().trim_end_matches('/').to_string(),
            placeholder_image: self.placeholder_image.clone(),
        }
    }
}
