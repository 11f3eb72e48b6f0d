//! Process configuration read from the environment.

use std::env;
use std::net::SocketAddr;

use chrono::Duration;
use tracing::warn;
use uuid::Uuid;

use crate::domain::token::DEFAULT_TOKEN_LIFETIME_DAYS;

/// Configuration failures that should stop startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `BIND_ADDR` did not parse as a socket address.
    #[error("BIND_ADDR is not a valid socket address: {value}")]
    InvalidBindAddr {
        /// The offending value.
        value: String,
    },
    /// `TOKEN_LIFETIME_DAYS` did not parse as a positive integer.
    #[error("TOKEN_LIFETIME_DAYS is not a positive integer: {value}")]
    InvalidTokenLifetime {
        /// The offending value.
        value: String,
    },
    /// `TOKEN_SECRET` is required outside development builds.
    #[error("TOKEN_SECRET must be set (or TOKEN_ALLOW_EPHEMERAL=1 for development)")]
    MissingTokenSecret,
}

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// PostgreSQL URL; absent means in-memory fixture stores.
    pub database_url: Option<String>,
    /// Shared secret for bearer-token signing.
    pub token_secret: String,
    /// Issued token lifetime.
    pub token_lifetime: Duration,
    /// Password assigned by the one-time admin bootstrap.
    pub bootstrap_password: String,
}

fn non_empty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.trim().is_empty())
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// Development builds fall back to an ephemeral token secret when
    /// `TOKEN_SECRET` is unset; release builds refuse to start without one
    /// unless `TOKEN_ALLOW_EPHEMERAL=1` is set explicitly.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_raw = non_empty("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_owned());
        let bind_addr = bind_raw
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr { value: bind_raw })?;

        let token_secret = match non_empty("TOKEN_SECRET") {
            Some(secret) => secret,
            None => {
                let allow_dev = env::var("TOKEN_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
                if cfg!(debug_assertions) || allow_dev {
                    warn!("using ephemeral token secret; tokens will not survive restarts");
                    Uuid::new_v4().to_string()
                } else {
                    return Err(ConfigError::MissingTokenSecret);
                }
            }
        };

        let token_lifetime = match non_empty("TOKEN_LIFETIME_DAYS") {
            Some(raw) => {
                let days: i64 = raw
                    .parse()
                    .ok()
                    .filter(|days| *days > 0)
                    .ok_or(ConfigError::InvalidTokenLifetime { value: raw })?;
                Duration::days(days)
            }
            None => Duration::days(DEFAULT_TOKEN_LIFETIME_DAYS),
        };

        Ok(Self {
            bind_addr,
            database_url: non_empty("DATABASE_URL"),
            token_secret,
            token_lifetime,
            bootstrap_password: non_empty("BOOTSTRAP_PASSWORD")
                .unwrap_or_else(|| "admin123".to_owned()),
        })
    }
}
