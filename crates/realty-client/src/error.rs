//! Error types for the API client
//!
//! Every variant maps onto the response envelope through `status()` and its
//! `Display` message, so callers see the same text whether they inspect the
//! envelope or convert it with `ApiResponse::into_result`.

use crate::model::FieldErrors;

/// Status reported for requests that hit the client-side timeout
pub const TIMEOUT_STATUS: u16 = 408;

/// Status reported for transport failures that never reached the server
pub const NETWORK_ERROR_STATUS: u16 = 500;

/// Errors that can occur while issuing a request
#[derive(Clone, Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request timeout")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Server {
        status: u16,
        message: String,
        errors: Option<FieldErrors>,
    },

    #[error("Failed to parse response: {detail}")]
    Decode { status: u16, detail: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Status code carried into the response envelope
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Timeout => TIMEOUT_STATUS,
            ApiError::Network(_) => NETWORK_ERROR_STATUS,
            ApiError::Server { status, .. } => *status,
            ApiError::Decode { status, .. } => *status,
            ApiError::InvalidRequest(_) => 400,
        }
    }

    /// Field-level validation errors reported by the server, if any
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Server { errors, .. } => errors.as_ref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == 401
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(value.to_string())
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(value: url::ParseError) -> Self {
        ApiError::InvalidRequest(value.to_string())
    }
}
