//! Credential placement for outbound requests
//!
//! A target either carries the caller's key in a header, in a query
//! parameter, or not at all. AI targets pick the placement from the
//! host they point at.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Url;

use crate::error::{RelayError, RelayResult};

/// Header carrying the key for the n8n public API
pub const N8N_API_KEY_HEADER: &str = "x-n8n-api-key";

/// Query parameter carrying the key for Google APIs
pub const GOOGLE_KEY_PARAM: &str = "key";

/// Where the caller's API key goes on the outbound request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategy {
    /// `<name>: <key>`
    ApiKeyHeader(&'static str),
    /// `Authorization: Bearer <key>`
    BearerHeader,
    /// `?<name>=<key>`, skipped if the URL already has that parameter
    QueryParam(&'static str),
    /// No credential attached
    None,
}

/// Host fragments and the strategy each one selects, checked in order
const AI_HOST_RULES: &[(&str, AuthStrategy)] = &[
    ("openai.com", AuthStrategy::BearerHeader),
    ("googleapis.com", AuthStrategy::QueryParam(GOOGLE_KEY_PARAM)),
];

/// Pick the auth strategy for an AI provider URL from its host
pub fn classify_ai_target(url: &Url) -> AuthStrategy {
    let Some(host) = url.host_str() else {
        return AuthStrategy::None;
    };

    AI_HOST_RULES
        .iter()
        .find(|(fragment, _)| host.contains(fragment))
        .map(|(_, strategy)| *strategy)
        .unwrap_or(AuthStrategy::None)
}

impl AuthStrategy {
    /// Attach `api_key` to the outbound URL or headers
    pub fn apply(&self, api_key: &str, url: &mut Url, headers: &mut HeaderMap) -> RelayResult<()> {
        match self {
            AuthStrategy::ApiKeyHeader(name) => {
                let value = HeaderValue::from_str(api_key).map_err(|_| RelayError::InvalidHeader)?;
                headers.insert(HeaderName::from_static(*name), value);
            }
            AuthStrategy::BearerHeader => {
                let value = HeaderValue::from_str(&format!("Bearer {}", api_key))
                    .map_err(|_| RelayError::InvalidHeader)?;
                headers.insert(AUTHORIZATION, value);
            }
            AuthStrategy::QueryParam(name) => {
                let already_present = url.query_pairs().any(|(k, _)| k == *name);
                if !already_present {
                    url.query_pairs_mut().append_pair(name, api_key);
                }
            }
            AuthStrategy::None => {}
        }

        Ok(())
    }
}
