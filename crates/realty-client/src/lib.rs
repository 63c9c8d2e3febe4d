//! Realty Client - REST client for the marketplace backend
//!
//! This crate provides:
//! - `ApiClient`: one request per call, normalized into a single response envelope
//! - Session and notifier capabilities injected at construction
//! - Request, response and error interceptor chains
//! - `MarketplaceClient` with typed methods for listings, categories, users,
//!   sliders, reviews and dashboard analytics

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod model;
pub mod notify;
pub mod session;

pub use api::MarketplaceClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{ApiClient, ApiClientBuilder, RequestOptions};
pub use interceptor::{
    ErrorInterceptor, LoggingInterceptor, PreparedRequest, RawResponse, RequestInterceptor,
    ResponseInterceptor,
};
pub use model::{ApiResponse, FieldErrors, Pagination};
pub use notify::{Notifier, NoopNotifier, TracingNotifier};
pub use session::{MemorySession, SessionProvider, SessionUser};

// Re-exported so callers can name methods without a direct reqwest dependency
pub use reqwest::Method;
