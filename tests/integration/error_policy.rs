//! Transport failure reporting
//!
//! Malformed envelopes, unparsable URLs and unreachable upstreams all end in
//! an `{"error": ...}` body. The lenient policy answers 200, the strict one 502.

use axum::http::StatusCode;
use relay::ErrorPolicy;
use serde_json::{json, Value};

use crate::common::{constants::*, envelope, test_config, test_server, test_server_with};

fn assert_error_body(body: &Value) {
    let message = body["error"].as_str().expect("error message");
    assert!(!message.is_empty());
    assert_eq!(body.as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unreachable_upstream_is_200_under_lenient_policy() {
    let server = test_server();

    for endpoint in ["/proxy/n8n", "/proxy/ai"] {
        let response = server
            .post(endpoint)
            .json(&envelope(
                Some(CLOSED_PORT_URL),
                Some(TEST_N8N_API_KEY),
                Some("GET"),
                None,
            ))
            .await;

        response.assert_status_ok();
        assert_error_body(&response.json::<Value>());
    }
}

#[tokio::test]
async fn test_unreachable_upstream_is_502_under_strict_policy() {
    let server = test_server_with(test_config(ErrorPolicy::Strict));

    for endpoint in ["/proxy/n8n", "/proxy/ai"] {
        let response = server
            .post(endpoint)
            .json(&envelope(
                Some(CLOSED_PORT_URL),
                Some(TEST_AI_API_KEY),
                Some("GET"),
                None,
            ))
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        assert_error_body(&response.json::<Value>());
    }
}

#[tokio::test]
async fn test_malformed_envelope_follows_policy() {
    let lenient = test_server();
    let response = lenient.post("/proxy/n8n").text("{\"url\": ").await;
    response.assert_status_ok();
    assert_error_body(&response.json::<Value>());

    let strict = test_server_with(test_config(ErrorPolicy::Strict));
    let response = strict
        .post("/proxy/ai")
        .text("not json at all")
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_error_body(&response.json::<Value>());
}

#[tokio::test]
async fn test_relative_url_is_a_transport_failure() {
    let server = test_server();

    let response = server
        .post("/proxy/n8n")
        .json(&envelope(
            Some("/api/v1/workflows"),
            Some(TEST_N8N_API_KEY),
            None,
            None,
        ))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_error_body(&body);
    assert!(body["error"].as_str().unwrap().contains("Invalid target URL"));
}

#[tokio::test]
async fn test_presence_and_method_failures_ignore_policy() {
    let server = test_server_with(test_config(ErrorPolicy::Strict));

    let response = server
        .post("/proxy/n8n")
        .json(&json!({"url": CLOSED_PORT_URL}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/proxy/n8n")
        .json(&envelope(
            Some(CLOSED_PORT_URL),
            Some(TEST_N8N_API_KEY),
            Some("PATCH"),
            None,
        ))
        .await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
