//! Header utilities for outbound requests
//!
//! Caller headers are never copied onto the outbound request. Every call
//! starts from the same JSON headers and gets its credential from an
//! [`AuthStrategy`](super::auth::AuthStrategy).

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};

/// Build the headers every outbound request starts with
pub fn build_base_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    headers
}
