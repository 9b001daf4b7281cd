//! Request logging utilities for relayed calls
//!
//! Provides structured logging with short correlation IDs so a single
//! relayed call can be followed from arrival to upstream response.

use serde_json::value::RawValue;
use std::time::Instant;
use tracing::{debug, error, info, Span};
use uuid::Uuid;

use crate::error::RelayError;

/// Context for tracking a relayed request
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this request (for log correlation)
    pub trace_id: String,
    /// When the request started
    pub start_time: Instant,
    /// Relay target handling this request (`n8n`, `ai`)
    pub target: String,
    /// Outbound method, once planned
    pub method: Option<String>,
    /// Upstream host, once planned. Never the full URL, which may carry a key.
    pub upstream_host: Option<String>,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(target: &str) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string()[..8].to_string(), // Short ID for readability
            start_time: Instant::now(),
            target: target.to_string(),
            method: None,
            upstream_host: None,
        }
    }

    /// Set the outbound method
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set the upstream host
    pub fn with_upstream_host(mut self, host: impl Into<String>) -> Self {
        self.upstream_host = Some(host.into());
        self
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    /// Log request initiation
    pub fn log_request_start(&self) {
        info!(
            trace_id = %self.trace_id,
            relay = %self.target,
            method = ?self.method,
            upstream_host = ?self.upstream_host,
            "Relaying request"
        );
    }

    /// Dump the outbound body (debug level), exactly as it will be sent
    pub fn log_outbound_body(&self, path: &str, body: Option<&RawValue>) {
        let rendered = body.map(RawValue::get).unwrap_or("null");

        debug!(
            trace_id = %self.trace_id,
            relay = %self.target,
            method = ?self.method,
            path = %path,
            body = %rendered,
            "Outbound request body"
        );
    }

    /// Log response received from upstream
    pub fn log_upstream_response(&self, status: u16, body_len: usize) {
        info!(
            trace_id = %self.trace_id,
            relay = %self.target,
            upstream_host = ?self.upstream_host,
            status = %status,
            body_len = %body_len,
            elapsed_ms = %self.elapsed_ms(),
            "Response received from upstream"
        );
    }

    /// Log request failure
    pub fn log_error(&self, err: &RelayError) {
        error!(
            trace_id = %self.trace_id,
            relay = %self.target,
            method = ?self.method,
            upstream_host = ?self.upstream_host,
            kind = %err.kind(),
            elapsed_ms = %self.elapsed_ms(),
            error = %err,
            "Relay failed"
        );
    }

    /// Create a tracing span for this request
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "relay_request",
            trace_id = %self.trace_id,
            relay = %self.target,
        )
    }
}
