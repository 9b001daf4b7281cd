//! Configuration management for the relay
//!
//! Configuration is loaded from environment variables.

use anyhow::{anyhow, Context, Result};
use std::env;

use crate::error::ErrorPolicy;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Apply a permissive cross-origin policy (any origin, method and header)
    pub allow_all_origins: bool,

    /// Timeout for outbound calls, `None` waits indefinitely
    pub upstream_timeout_secs: Option<u64>,

    /// Status policy for transport failures
    pub error_policy: ErrorPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            allow_all_origins: true,
            upstream_timeout_secs: None,
            error_policy: ErrorPolicy::Lenient,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            host: lookup("RELAY_HOST").unwrap_or(defaults.host),
            port: match lookup("RELAY_PORT") {
                Some(v) => v.parse().context("Invalid RELAY_PORT")?,
                None => defaults.port,
            },

            allow_all_origins: lookup("RELAY_CORS_ALLOW_ALL")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.allow_all_origins),

            upstream_timeout_secs: lookup("RELAY_UPSTREAM_TIMEOUT_SECS")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("Invalid RELAY_UPSTREAM_TIMEOUT_SECS")?,

            error_policy: match lookup("RELAY_ERROR_POLICY") {
                Some(v) => v
                    .parse::<ErrorPolicy>()
                    .map_err(|e: String| anyhow!(e))
                    .context("Invalid RELAY_ERROR_POLICY")?,
                None => defaults.error_policy,
            },
        })
    }
}
