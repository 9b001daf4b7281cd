//! AI forwarder integration tests
//!
//! Tests for `POST /proxy/ai` against a local upstream. A loopback host is
//! neither an OpenAI nor a Google host, so these calls exercise the
//! no-credential path; host classification itself is covered by unit tests
//! next to `classify_ai_target`.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{constants::*, envelope, received_count, test_server, upstream_url};

#[tokio::test]
async fn test_post_is_default_and_forwards_body() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_json(json!({"model": "gpt-4o-mini", "messages": []})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "chatcmpl-1"})))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = test_server();
    let response = server
        .post("/proxy/ai")
        .json(&envelope(
            Some(&upstream_url(&upstream, "/v1/chat/completions")),
            Some(TEST_AI_API_KEY),
            None,
            Some(json!({"model": "gpt-4o-mini", "messages": []})),
        ))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"id": "chatcmpl-1"}));
}

#[tokio::test]
async fn test_other_hosts_receive_no_credential() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"no key"}"#))
        .mount(&upstream)
        .await;

    let server = test_server();
    let response = server
        .post("/proxy/ai")
        .json(&envelope(
            Some(&upstream_url(&upstream, "/v1/messages")),
            Some(TEST_AI_API_KEY),
            Some("POST"),
            Some(json!({"prompt": "hi"})),
        ))
        .await;

    // Upstream rejection is relayed as-is
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.text(), r#"{"error":"no key"}"#);

    let requests = upstream.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert!(request.headers.get("authorization").is_none());
    assert!(request.headers.get("x-n8n-api-key").is_none());
    assert!(request.url.query().is_none());
    assert!(!String::from_utf8_lossy(&request.body).contains(TEST_AI_API_KEY));
}

#[tokio::test]
async fn test_non_post_methods_become_get_without_body() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": ["m1"]})))
        .expect(3)
        .mount(&upstream)
        .await;

    let server = test_server();
    let url = upstream_url(&upstream, "/v1/models");

    for requested in ["GET", "DELETE", "PATCH"] {
        let response = server
            .post("/proxy/ai")
            .json(&envelope(
                Some(&url),
                Some(TEST_AI_API_KEY),
                Some(requested),
                Some(json!({"dropped": true})),
            ))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({"data": ["m1"]}));
    }

    let requests = upstream.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.body.is_empty()));
}

#[tokio::test]
async fn test_missing_credentials_return_400_without_upstream_call() {
    let upstream = MockServer::start().await;
    let server = test_server();

    let response = server
        .post("/proxy/ai")
        .json(&envelope(
            Some(&upstream_url(&upstream, "/v1/chat/completions")),
            None,
            None,
            Some(json!({"model": "m"})),
        ))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(received_count(&upstream).await, 0);
}
