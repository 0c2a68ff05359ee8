//! API configuration.
//!
//! Configuration is loaded from `CUEUP_*` environment variables with
//! development defaults, so a bare `cargo run` serves on localhost.

use std::net::SocketAddr;

use crate::error::{ApiError, ApiResult};

/// API configuration for binding, CORS, and the bootstrap administrator.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind host. `CUEUP_BIND`, default `0.0.0.0`.
    pub bind_host: String,

    /// Bind port. `PORT` or `CUEUP_PORT`, default 8080.
    pub port: String,

    /// Allowed CORS origins (comma-separated in `CUEUP_CORS_ORIGINS`).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,

    /// Optional bootstrap administrator, created at startup when both
    /// `CUEUP_ADMIN_EMAIL` and `CUEUP_ADMIN_PASSWORD` are set. Without it a
    /// fresh store has no admin and the admin-only endpoints are
    /// unreachable.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: "8080".to_string(),
            cors_origins: Vec::new(),
            admin_email: None,
            admin_password: None,
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cors_origins = std::env::var("CUEUP_CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            bind_host: std::env::var("CUEUP_BIND").unwrap_or(defaults.bind_host),
            port: std::env::var("PORT")
                .ok()
                .or_else(|| std::env::var("CUEUP_PORT").ok())
                .unwrap_or(defaults.port),
            cors_origins,
            admin_email: std::env::var("CUEUP_ADMIN_EMAIL").ok(),
            admin_password: std::env::var("CUEUP_ADMIN_PASSWORD").ok(),
        }
    }

    /// Resolve the socket address to bind.
    pub fn bind_addr(&self) -> ApiResult<SocketAddr> {
        let port = self
            .port
            .parse::<u16>()
            .map_err(|_| ApiError::invalid_input(format!("Invalid port value: {}", self.port)))?;
        let addr = format!("{}:{}", self.bind_host, port);
        addr.parse::<SocketAddr>()
            .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
    }
}
