//! Proxy module
//!
//! Plans and forwards relayed requests to n8n and AI provider APIs.

pub mod auth;
pub mod forwarder;
pub mod headers;
pub mod logging;
pub mod target;

pub use auth::{classify_ai_target, AuthStrategy};
pub use forwarder::{Forwarder, RelayedResponse};
pub use target::{AiTarget, N8nTarget, OutboundRequest, RelayTarget};
