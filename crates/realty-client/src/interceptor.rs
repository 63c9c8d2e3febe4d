//! Interceptor chains
//!
//! Three chains run around every request, each in registration order:
//! - `RequestInterceptor`: sees the fully prepared request before it is sent
//! - `ResponseInterceptor`: sees the raw response before envelope decoding
//! - `ErrorInterceptor`: sees every error before it becomes an envelope

use std::time::Duration;

use reqwest::{Method, StatusCode, header::HeaderMap};
use serde_json::Value;
use url::Url;

use crate::error::ApiError;

/// A request after URL, header and body construction
#[derive(Clone, Debug)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Value>,
    pub timeout: Duration,
}

/// A response with its body parsed as JSON.
///
/// Bodies that are not JSON are carried as a JSON string; empty bodies are `null`.
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl RawResponse {
    pub(crate) fn from_bytes(status: StatusCode, headers: HeaderMap, bytes: &[u8]) -> Self {
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
        };
        Self {
            status,
            headers,
            body,
        }
    }
}

#[async_trait::async_trait]
pub trait RequestInterceptor: Send + Sync {
    async fn intercept(&self, request: &mut PreparedRequest);
}

#[async_trait::async_trait]
pub trait ResponseInterceptor: Send + Sync {
    async fn intercept(&self, response: &mut RawResponse);
}

#[async_trait::async_trait]
pub trait ErrorInterceptor: Send + Sync {
    async fn intercept(&self, error: &mut ApiError);
}

/// Request interceptor that traces the outgoing request.
///
/// Header values and body values are never logged, only header names, body
/// size and top-level body field names.
pub struct LoggingInterceptor;

fn describe_body(body: Option<&Value>) -> String {
    let Some(body) = body else {
        return "none".to_string();
    };
    let bytes = serde_json::to_vec(body).map(|b| b.len()).unwrap_or_default();
    match body {
        Value::Object(map) => {
            let fields: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("{} bytes, fields [{}]", bytes, fields.join(", "))
        }
        _ => format!("{} bytes", bytes),
    }
}

#[async_trait::async_trait]
impl RequestInterceptor for LoggingInterceptor {
    async fn intercept(&self, request: &mut PreparedRequest) {
        let headers: Vec<&str> = request.headers.keys().map(|name| name.as_str()).collect();
        tracing::trace!(
            method = %request.method,
            url = %request.url,
            headers = ?headers,
            body = %describe_body(request.body.as_ref()),
            timeout_ms = request.timeout.as_millis() as u64,
            "Outgoing request"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_response_body_parsing() {
        let json = RawResponse::from_bytes(StatusCode::OK, HeaderMap::new(), br#"{"a":1}"#);
        assert_eq!(json.body, serde_json::json!({"a": 1}));

        let empty = RawResponse::from_bytes(StatusCode::NO_CONTENT, HeaderMap::new(), b"");
        assert_eq!(empty.body, Value::Null);

        let text = RawResponse::from_bytes(StatusCode::BAD_GATEWAY, HeaderMap::new(), b"<html>");
        assert_eq!(text.body, Value::String("<html>".to_string()));
    }

    #[test]
    fn test_logged_body_omits_values() {
        let login = serde_json::json!({"email": "agent@example.com", "password": "hunter2"});
        let described = describe_body(Some(&login));
        let size = serde_json::to_vec(&login).unwrap().len();

        assert_eq!(described, format!("{} bytes, fields [email, password]", size));
        assert!(!described.contains("hunter2"));
        assert!(!described.contains("agent@example.com"));

        assert_eq!(describe_body(None), "none");
        assert_eq!(describe_body(Some(&serde_json::json!([1, 2]))), "5 bytes");
    }
}
