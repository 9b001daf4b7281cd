//! Relay endpoints
//!
//! `POST /proxy/n8n` and `POST /proxy/ai`. Both take the raw body so that a
//! malformed envelope is reported through the relay's own error policy
//! rather than the JSON extractor's rejection.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, response::IntoResponse, response::Response};
use bytes::Bytes;

use crate::{
    proxy::{AiTarget, N8nTarget, RelayTarget},
    routes::metrics::record_request,
    AppState,
};

/// Generic forwarder for the n8n API
pub async fn proxy_n8n(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    relay_through(&state, &N8nTarget, &body).await
}

/// Forwarder for AI provider APIs
pub async fn proxy_ai(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    relay_through(&state, &AiTarget, &body).await
}

async fn relay_through(state: &AppState, target: &dyn RelayTarget, body: &[u8]) -> Response {
    let start_time = Instant::now();
    let result = state.forwarder.relay(target, body).await;
    let duration = start_time.elapsed().as_secs_f64();

    match result {
        Ok(relayed) => {
            record_request(target.name(), "relayed", duration);
            relayed.into_response()
        }
        Err(e) => {
            record_request(target.name(), e.kind(), duration);
            e.into_response_with(state.config.error_policy)
        }
    }
}
