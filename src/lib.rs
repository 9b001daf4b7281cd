//! Relay - stateless JSON forwarding relay
//!
//! Lets a browser frontend reach an n8n server and AI provider APIs without
//! same-origin restrictions. Callers post an envelope naming a target URL and
//! an API key; the relay attaches the key the way the target expects, makes
//! the call and hands the upstream status and body back unchanged.
//!
//! The relay forwards to whatever URL the caller names. It is meant to run
//! next to the frontend, not on a public interface.

pub mod config;
pub mod envelope;
pub mod error;
pub mod proxy;
pub mod routes;

use std::time::Duration;

use anyhow::Result;

pub use crate::config::Config;
pub use crate::envelope::{ForwardMethod, RelayEnvelope};
pub use crate::error::{ErrorPolicy, RelayError, RelayResult};
pub use crate::proxy::{AiTarget, AuthStrategy, Forwarder, N8nTarget, RelayTarget, RelayedResponse};

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    /// Forwarder over the shared HTTP client
    pub forwarder: Forwarder,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        // Connection pooling only; no timeout unless one is configured
        let mut builder = reqwest::Client::builder().pool_max_idle_per_host(16);
        if let Some(secs) = config.upstream_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build()?;

        Ok(Self {
            config,
            forwarder: Forwarder::new(http_client),
        })
    }
}
