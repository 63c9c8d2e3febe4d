// Configuration for ApiClient

use std::time::Duration;

/// Environment variable holding the backend base URL
pub const API_URL_ENV: &str = "REALTY_API_URL";

/// Default base URL when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Default per-request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 10000;

/// Configuration for the HTTP client
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend base URL (e.g. "https://api.example.com/api")
    pub base_url: String,
    /// Request timeout in milliseconds, applied unless a call overrides it
    pub timeout_ms: u64,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Headers sent with every request, before language and auth headers
    pub default_headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            connect_timeout_ms: 5000,
            default_headers: Vec::new(),
        }
    }
}

impl ClientConfig {
    /// Create a config for the given base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    /// Create a config from `REALTY_API_URL`, falling back to the default base URL
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the connection timeout
    pub fn with_connect_timeout(mut self, connect_timeout_ms: u64) -> Self {
        self.connect_timeout_ms = connect_timeout_ms;
        self
    }

    /// Add a default header
    pub fn with_default_header(mut self, name: &str, value: &str) -> Self {
        self.default_headers
            .push((name.to_string(), value.to_string()));
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
