// Response envelope and pagination meta

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Field-level validation errors, keyed by field name
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Pagination meta attached to list responses
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default = "first_page")]
    pub last_page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<u64>,
}

fn first_page() -> u32 {
    1
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            last_page: 1,
            per_page: 0,
            total: 0,
            from: None,
            to: None,
        }
    }
}

/// Uniform response envelope.
///
/// `is_error == false` implies `data` is present. Consumers check `is_error`
/// before trusting `data`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub is_error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Pagination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(default)]
    pub status: u16,
}

impl<T> ApiResponse<T> {
    /// Build a successful envelope
    pub fn success(data: T, status: u16) -> Self {
        Self {
            is_error: false,
            data: Some(data),
            message: None,
            meta: None,
            errors: None,
            status,
        }
    }

    /// Build an error envelope from a client error
    pub fn from_error(error: &ApiError) -> Self {
        Self {
            is_error: true,
            data: None,
            message: Some(error.to_string()),
            meta: None,
            errors: error.field_errors().cloned(),
            status: error.status(),
        }
    }

    /// Message for a single form field, falling back to the envelope message
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .as_ref()
            .and_then(|errors| errors.get(field))
            .and_then(|messages| messages.first())
            .or(self.message.as_ref())
            .map(String::as_str)
    }

    /// Message to show the user, or a generic fallback
    pub fn message_or_default(&self) -> &str {
        self.message.as_deref().unwrap_or(if self.is_error {
            "Something went wrong"
        } else {
            "Success"
        })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            is_error: self.is_error,
            data: self.data.map(f),
            message: self.message,
            meta: self.meta,
            errors: self.errors,
            status: self.status,
        }
    }

    /// Convert the envelope into a `Result`
    pub fn into_result(self) -> Result<T, ApiError> {
        match (self.is_error, self.data) {
            (false, Some(data)) => Ok(data),
            (_, _) => Err(ApiError::Server {
                status: self.status,
                message: self
                    .message
                    .unwrap_or_else(|| "Something went wrong".to_string()),
                errors: self.errors,
            }),
        }
    }
}

/// Wire shape of a server envelope before `data` is decoded into `T`
#[derive(Debug)]
pub(crate) struct RawEnvelope {
    pub is_error: bool,
    pub data: Value,
    pub message: Option<String>,
    pub meta: Option<Value>,
    pub errors: Option<FieldErrors>,
}

impl RawEnvelope {
    /// Interpret a response body. Objects carrying `isError` are envelopes;
    /// anything else is taken as the payload itself.
    ///
    /// Envelope fields are read one by one so a malformed `message` or
    /// `errors` never turns an error envelope into a payload.
    pub fn from_body(body: Value) -> Self {
        let mut map = match body {
            Value::Object(map) if map.contains_key("isError") => map,
            other => return Self::payload(other),
        };

        Self {
            is_error: map.get("isError").is_some_and(is_truthy),
            message: map
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_string),
            errors: map.get("errors").and_then(parse_field_errors),
            meta: map.remove("meta").filter(|m| !m.is_null()),
            data: map.remove("data").unwrap_or(Value::Null),
        }
    }

    fn payload(data: Value) -> Self {
        Self {
            is_error: false,
            data,
            message: None,
            meta: None,
            errors: None,
        }
    }

    /// Pagination meta, ignored when it does not have the expected shape
    pub fn pagination(&self) -> Option<Pagination> {
        self.meta
            .as_ref()
            .and_then(|meta| serde_json::from_value(meta.clone()).ok())
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
        Value::String(s) => s.eq_ignore_ascii_case("true") || s == "1",
        _ => false,
    }
}

/// Read field errors leniently: `{"field": ["a", "b"]}` or `{"field": "a"}`.
/// Entries of any other shape are skipped.
pub(crate) fn parse_field_errors(value: &Value) -> Option<FieldErrors> {
    let map = value.as_object()?;
    let errors: FieldErrors = map
        .iter()
        .filter_map(|(field, messages)| {
            let messages: Vec<String> = match messages {
                Value::String(message) => vec![message.clone()],
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
                _ => return None,
            };
            (!messages.is_empty()).then(|| (field.clone(), messages))
        })
        .collect();

    (!errors.is_empty()).then_some(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_serialization() {
        let response = ApiResponse::success(vec![1, 2, 3], 200);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"isError\":false"));
        assert!(json.contains("\"data\":[1,2,3]"));
        assert!(!json.contains("message"));
    }

    #[test]
    fn test_from_error() {
        let response: ApiResponse<String> = ApiResponse::from_error(&ApiError::Timeout);
        assert!(response.is_error);
        assert!(response.data.is_none());
        assert_eq!(response.message.as_deref(), Some("Request timeout"));
        assert_eq!(response.status, 408);
    }

    #[test]
    fn test_error_for_field_falls_back_to_message() {
        let mut errors = FieldErrors::new();
        errors.insert("price".to_string(), vec!["Price must be positive".to_string()]);
        let response: ApiResponse<()> = ApiResponse {
            is_error: true,
            data: None,
            message: Some("Validation failed".to_string()),
            meta: None,
            errors: Some(errors),
            status: 422,
        };

        assert_eq!(response.error_for("price"), Some("Price must be positive"));
        assert_eq!(response.error_for("title"), Some("Validation failed"));
    }

    #[test]
    fn test_into_result() {
        let ok = ApiResponse::success("hello".to_string(), 200);
        assert_eq!(ok.into_result().unwrap(), "hello");

        let err: ApiResponse<String> = ApiResponse::from_error(&ApiError::Timeout);
        let err = err.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Request timeout");
        assert_eq!(err.status(), 408);
    }

    #[test]
    fn test_raw_envelope_detection() {
        let envelope = RawEnvelope::from_body(json!({
            "isError": false,
            "data": [{"id": 1}],
            "meta": {"current_page": 2, "last_page": 5, "per_page": 10, "total": 48}
        }));
        assert!(!envelope.is_error);
        assert_eq!(envelope.data, json!([{"id": 1}]));
        let meta = envelope.pagination().unwrap();
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.last_page, 5);

        let bare = RawEnvelope::from_body(json!([{"id": 1}]));
        assert!(!bare.is_error);
        assert_eq!(bare.data, json!([{"id": 1}]));
        assert!(bare.pagination().is_none());
    }

    #[test]
    fn test_error_envelope_with_loose_field_shapes() {
        let envelope = RawEnvelope::from_body(json!({
            "isError": true,
            "message": "Slug already taken",
            "errors": {"slug": "taken", "title": ["required", 3]}
        }));
        assert!(envelope.is_error);
        assert_eq!(envelope.message.as_deref(), Some("Slug already taken"));
        assert_eq!(envelope.data, Value::Null);
        let errors = envelope.errors.unwrap();
        assert_eq!(errors["slug"], vec!["taken"]);
        assert_eq!(errors["title"], vec!["required"]);

        let envelope = RawEnvelope::from_body(json!({
            "isError": true,
            "message": {"text": "not a string"},
            "errors": "oops"
        }));
        assert!(envelope.is_error);
        assert!(envelope.message.is_none());
        assert!(envelope.errors.is_none());
    }

    #[test]
    fn test_pagination_defaults() {
        let meta: Pagination = serde_json::from_value(json!({"total": 3})).unwrap();
        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.last_page, 1);
        assert_eq!(meta.total, 3);
    }
}
