//! Request envelope
//!
//! The JSON document a caller posts to a relay endpoint:
//! `{"url": ..., "apiKey": ..., "method": ..., "body": ...}`.
//! It lives for one request and is never stored.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::value::RawValue;

use crate::error::{RelayError, RelayResult};

/// Per-request forwarding envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelayEnvelope {
    /// Absolute URL to forward to
    #[serde(rename = "url", default)]
    pub target_url: Option<String>,
    /// Caller-supplied credential
    #[serde(rename = "apiKey", default)]
    pub api_key: Option<String>,
    /// Outbound method; each target has its own default
    #[serde(default)]
    pub method: Option<String>,
    /// JSON body forwarded on POST/PUT, kept as the caller's exact text
    #[serde(default)]
    pub body: Option<Box<RawValue>>,
}

/// Target URL and API key, both guaranteed non-empty
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub target_url: &'a str,
    pub api_key: &'a str,
}

impl RelayEnvelope {
    /// Parse an envelope from a raw request body
    pub fn from_slice(bytes: &[u8]) -> RelayResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Presence check: both `url` and `apiKey` must be non-empty
    pub fn credentials(&self) -> RelayResult<Credentials<'_>> {
        let target_url = non_empty(self.target_url.as_deref());
        let api_key = non_empty(self.api_key.as_deref());

        match (target_url, api_key) {
            (Some(target_url), Some(api_key)) => Ok(Credentials {
                target_url,
                api_key,
            }),
            _ => Err(RelayError::MissingCredentials),
        }
    }

    /// Requested method, falling back to `default` when absent
    pub fn method_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.method.as_deref().unwrap_or(default)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Methods the relay knows how to forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl ForwardMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForwardMethod::Get => "GET",
            ForwardMethod::Post => "POST",
            ForwardMethod::Put => "PUT",
            ForwardMethod::Delete => "DELETE",
        }
    }

    /// Whether the envelope body travels with this method
    pub fn carries_body(&self) -> bool {
        matches!(self, ForwardMethod::Post | ForwardMethod::Put)
    }

    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            ForwardMethod::Get => reqwest::Method::GET,
            ForwardMethod::Post => reqwest::Method::POST,
            ForwardMethod::Put => reqwest::Method::PUT,
            ForwardMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for ForwardMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-sensitive: only the exact upper-case names are accepted
impl FromStr for ForwardMethod {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(ForwardMethod::Get),
            "POST" => Ok(ForwardMethod::Post),
            "PUT" => Ok(ForwardMethod::Put),
            "DELETE" => Ok(ForwardMethod::Delete),
            other => Err(RelayError::UnsupportedMethod(other.to_string())),
        }
    }
}
