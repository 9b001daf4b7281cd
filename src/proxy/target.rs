//! Relay targets
//!
//! A target turns a caller's envelope into a fully planned outbound request.
//! Planning does no I/O, so the credential placement and method dispatch of
//! each target can be checked without a network.

use reqwest::header::HeaderMap;
use reqwest::Url;
use serde_json::value::RawValue;

use crate::envelope::{ForwardMethod, RelayEnvelope};
use crate::error::{RelayError, RelayResult};
use crate::proxy::auth::{classify_ai_target, AuthStrategy, N8N_API_KEY_HEADER};
use crate::proxy::headers::build_base_headers;

/// An outbound call ready to be sent
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: ForwardMethod,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Box<RawValue>>,
}

/// Trait implemented by each relay endpoint
///
/// Implementations decide how the caller's key is attached and which methods
/// are forwarded. They MUST NOT perform I/O in [`RelayTarget::plan`].
pub trait RelayTarget: Send + Sync {
    /// Target name for logging and metrics
    fn name(&self) -> &'static str;

    /// Method used when the envelope does not name one
    fn default_method(&self) -> &'static str;

    /// Whether POST/PUT bodies are written to the diagnostic log
    fn logs_outbound_body(&self) -> bool {
        false
    }

    /// Build the outbound request for an envelope
    fn plan(&self, envelope: &RelayEnvelope) -> RelayResult<OutboundRequest>;
}

fn parse_target_url(raw: &str) -> RelayResult<Url> {
    Url::parse(raw).map_err(|e| RelayError::InvalidUrl(format!("{}: {}", raw, e)))
}

/// Generic forwarder for the n8n public API
///
/// Always sends the key in `X-N8N-API-KEY` and accepts GET, POST, PUT and
/// DELETE. Any other method is rejected before a URL is even parsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct N8nTarget;

impl RelayTarget for N8nTarget {
    fn name(&self) -> &'static str {
        "n8n"
    }

    fn default_method(&self) -> &'static str {
        "GET"
    }

    fn logs_outbound_body(&self) -> bool {
        true
    }

    fn plan(&self, envelope: &RelayEnvelope) -> RelayResult<OutboundRequest> {
        let credentials = envelope.credentials()?;
        let method: ForwardMethod = envelope.method_or(self.default_method()).parse()?;

        let mut url = parse_target_url(credentials.target_url)?;
        let mut headers = build_base_headers();
        AuthStrategy::ApiKeyHeader(N8N_API_KEY_HEADER).apply(
            credentials.api_key,
            &mut url,
            &mut headers,
        )?;

        let body = if method.carries_body() {
            envelope.body.clone()
        } else {
            None
        };

        Ok(OutboundRequest {
            method,
            url,
            headers,
            body,
        })
    }
}

/// Forwarder for AI provider APIs
///
/// The credential placement depends on the target host, see
/// [`classify_ai_target`]. `POST` is forwarded with its body; every other
/// method value, known or not, becomes a bodiless `GET`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AiTarget;

impl RelayTarget for AiTarget {
    fn name(&self) -> &'static str {
        "ai"
    }

    fn default_method(&self) -> &'static str {
        "POST"
    }

    fn plan(&self, envelope: &RelayEnvelope) -> RelayResult<OutboundRequest> {
        let credentials = envelope.credentials()?;
        let method = match envelope.method_or(self.default_method()) {
            "POST" => ForwardMethod::Post,
            _ => ForwardMethod::Get,
        };

        let mut url = parse_target_url(credentials.target_url)?;
        let mut headers = build_base_headers();
        classify_ai_target(&url).apply(credentials.api_key, &mut url, &mut headers)?;

        let body = match method {
            ForwardMethod::Post => envelope.body.clone(),
            _ => None,
        };

        Ok(OutboundRequest {
            method,
            url,
            headers,
            body,
        })
    }
}
