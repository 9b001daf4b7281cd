//! Outbound forwarding
//!
//! Parses the envelope, asks the target for a plan, sends it with the shared
//! `reqwest` client and captures the upstream status and body text.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::Instrument;

use crate::{
    envelope::RelayEnvelope,
    error::RelayResult,
    proxy::{
        logging::RequestContext,
        target::{OutboundRequest, RelayTarget},
    },
};

/// Upstream status and body, relayed verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayedResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Always labelled JSON, whatever the upstream declared
impl IntoResponse for RelayedResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}

/// Sends planned requests upstream
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
}

impl Forwarder {
    /// Create a forwarder over a shared HTTP client
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Relay one raw envelope through `target`
    pub async fn relay(&self, target: &dyn RelayTarget, raw: &[u8]) -> RelayResult<RelayedResponse> {
        let base = RequestContext::new(target.name());

        let request = match RelayEnvelope::from_slice(raw).and_then(|e| target.plan(&e)) {
            Ok(request) => request,
            Err(e) => {
                base.log_error(&e);
                return Err(e);
            }
        };

        let ctx = base
            .with_method(request.method.as_str())
            .with_upstream_host(request.url.host_str().unwrap_or_default());
        ctx.log_request_start();

        if target.logs_outbound_body() && request.method.carries_body() {
            ctx.log_outbound_body(request.url.path(), request.body.as_deref());
        }

        let span = ctx.create_span();
        self.send(request, &ctx).instrument(span).await.map_err(|e| {
            ctx.log_error(&e);
            e
        })
    }

    /// Send a planned request and read the whole upstream body
    pub async fn send(
        &self,
        request: OutboundRequest,
        ctx: &RequestContext,
    ) -> RelayResult<RelayedResponse> {
        let mut builder = self
            .client
            .request(request.method.to_reqwest(), request.url)
            .headers(request.headers);

        // Sent as received; Content-Type is already among the base headers
        if let Some(body) = request.body {
            builder = builder.body(body.get().to_owned());
        }

        let response = builder.send().await?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        let body = response.text().await?;

        ctx.log_upstream_response(status.as_u16(), body.len());

        Ok(RelayedResponse { status, body })
    }
}
