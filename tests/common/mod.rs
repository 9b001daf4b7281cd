//! Common test utilities for the relay
//!
//! Builds the real router over a real `AppState`; upstreams are `wiremock`
//! servers listening on localhost.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use relay::{routes::create_router, AppState, Config, ErrorPolicy};
use serde_json::{json, Value};
use wiremock::MockServer;

/// Test configuration constants
pub mod constants {
    /// API key sent to the n8n forwarder
    pub const TEST_N8N_API_KEY: &str = "test-n8n-api-key";
    /// API key sent to the AI forwarder
    pub const TEST_AI_API_KEY: &str = "test-ai-api-key";
    /// A local port nothing listens on
    pub const CLOSED_PORT_URL: &str = "http://127.0.0.1:1/unreachable";
}

/// Config for tests: loopback bind, given error policy
pub fn test_config(error_policy: ErrorPolicy) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        error_policy,
        ..Config::default()
    }
}

/// Test server over the real router
pub fn test_server_with(config: Config) -> TestServer {
    let state = Arc::new(AppState::new(config).expect("Failed to build app state"));
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

/// Test server with the default (lenient) error policy
pub fn test_server() -> TestServer {
    test_server_with(test_config(ErrorPolicy::Lenient))
}

/// Build a request envelope; `None` fields are omitted
pub fn envelope(
    url: Option<&str>,
    api_key: Option<&str>,
    method: Option<&str>,
    body: Option<Value>,
) -> Value {
    let mut envelope = json!({});
    let map = envelope.as_object_mut().expect("object");
    if let Some(url) = url {
        map.insert("url".into(), json!(url));
    }
    if let Some(api_key) = api_key {
        map.insert("apiKey".into(), json!(api_key));
    }
    if let Some(method) = method {
        map.insert("method".into(), json!(method));
    }
    if let Some(body) = body {
        map.insert("body".into(), body);
    }
    envelope
}

/// Full URL for a path on the mock upstream
pub fn upstream_url(server: &MockServer, path: &str) -> String {
    format!("{}{}", server.uri(), path)
}

/// Number of requests the mock upstream has seen
pub async fn received_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}
