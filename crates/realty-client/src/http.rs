//! HTTP client that normalizes every outcome into one response envelope
//!
//! `ApiClient::request` cannot fail at the call boundary. Timeouts, transport
//! failures, non-2xx statuses, `isError` bodies and decode failures all come
//! back as an `ApiResponse` with `is_error == true`.

use std::{sync::Arc, time::Duration};

use reqwest::{
    Client, Method, StatusCode,
    header::{
        ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue,
    },
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};
use url::Url;

use crate::{
    config::ClientConfig,
    error::ApiError,
    interceptor::{
        ErrorInterceptor, PreparedRequest, RawResponse, RequestInterceptor, ResponseInterceptor,
    },
    model::{
        ApiResponse,
        common::{RawEnvelope, parse_field_errors},
    },
    notify::{Notifier, NoopNotifier},
    session::{MemorySession, SessionProvider},
};

/// Supplies the `Accept-Language` value
pub type LangProvider = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Supplies query parameters attached to every request
pub type SearchParamsProvider = Arc<dyn Fn() -> Vec<(String, String)> + Send + Sync>;

/// Side effect run after the session is cleared on a 401
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// Per-call options
#[derive(Clone, Debug)]
pub struct RequestOptions {
    /// Query parameters, merged after the global search params
    pub params: Vec<(String, String)>,
    /// Custom headers, applied last so they override everything else
    pub headers: Vec<(String, String)>,
    /// Overrides the configured timeout
    pub timeout: Option<Duration>,
    /// Report error envelopes through the notifier
    pub notify_error: bool,
    /// Reported through the notifier when the call succeeds
    pub success_message: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            params: Vec::new(),
            headers: Vec::new(),
            timeout: None,
            notify_error: true,
            success_message: None,
        }
    }
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Do not report errors through the notifier
    pub fn silent(mut self) -> Self {
        self.notify_error = false;
        self
    }

    pub fn success_message(mut self, message: &str) -> Self {
        self.success_message = Some(message.to_string());
        self
    }
}

/// Builder for `ApiClient`
pub struct ApiClientBuilder {
    config: ClientConfig,
    session: Arc<dyn SessionProvider>,
    notifier: Arc<dyn Notifier>,
    lang: Option<LangProvider>,
    global_params: Option<SearchParamsProvider>,
    on_unauthorized: Option<UnauthorizedHook>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
    error_interceptors: Vec<Arc<dyn ErrorInterceptor>>,
}

impl ApiClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            session: Arc::new(MemorySession::new()),
            notifier: Arc::new(NoopNotifier),
            lang: None,
            global_params: None,
            on_unauthorized: None,
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
            error_interceptors: Vec::new(),
        }
    }

    pub fn session(mut self, session: Arc<dyn SessionProvider>) -> Self {
        self.session = session;
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn lang<F>(mut self, lang: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        self.lang = Some(Arc::new(lang));
        self
    }

    pub fn global_search_params<F>(mut self, params: F) -> Self
    where
        F: Fn() -> Vec<(String, String)> + Send + Sync + 'static,
    {
        self.global_params = Some(Arc::new(params));
        self
    }

    pub fn on_unauthorized<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    pub fn request_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.request_interceptors.push(interceptor);
        self
    }

    pub fn response_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.response_interceptors.push(interceptor);
        self
    }

    pub fn error_interceptor(mut self, interceptor: Arc<dyn ErrorInterceptor>) -> Self {
        self.error_interceptors.push(interceptor);
        self
    }

    pub fn build(self) -> anyhow::Result<ApiClient> {
        // Timeouts are enforced per request in `ApiClient::send`
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(self.config.connect_timeout_ms))
            .build()?;

        Ok(ApiClient {
            client,
            config: Arc::new(self.config),
            session: self.session,
            notifier: self.notifier,
            lang: self.lang,
            global_params: self.global_params,
            on_unauthorized: self.on_unauthorized,
            request_interceptors: Arc::new(self.request_interceptors),
            response_interceptors: Arc::new(self.response_interceptors),
            error_interceptors: Arc::new(self.error_interceptors),
        })
    }
}

/// HTTP client for the marketplace backend
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: Arc<ClientConfig>,
    session: Arc<dyn SessionProvider>,
    notifier: Arc<dyn Notifier>,
    lang: Option<LangProvider>,
    global_params: Option<SearchParamsProvider>,
    on_unauthorized: Option<UnauthorizedHook>,
    request_interceptors: Arc<Vec<Arc<dyn RequestInterceptor>>>,
    response_interceptors: Arc<Vec<Arc<dyn ResponseInterceptor>>>,
    error_interceptors: Arc<Vec<Arc<dyn ErrorInterceptor>>>,
}

impl ApiClient {
    pub fn builder(config: ClientConfig) -> ApiClientBuilder {
        ApiClientBuilder::new(config)
    }

    /// Create a client with the default session and no notifications
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        ApiClientBuilder::new(config).build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<dyn SessionProvider> {
        &self.session
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Build the full URL: base URL + endpoint, then global params, then call params.
    /// A call param replaces a global param with the same key.
    pub(crate) fn build_url(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<Url, ApiError> {
        let base = self.config.base_url.trim_end_matches('/');
        let url = if endpoint.is_empty() || endpoint.starts_with('/') {
            format!("{}{}", base, endpoint)
        } else {
            format!("{}/{}", base, endpoint)
        };
        let mut url = Url::parse(&url)?;

        let global = self
            .global_params
            .as_ref()
            .map(|provider| provider())
            .unwrap_or_default();

        let mut merged: Vec<(String, String)> = Vec::with_capacity(global.len() + params.len());
        for (key, value) in global.into_iter().chain(params.iter().cloned()) {
            match merged.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = value,
                None => merged.push((key, value)),
            }
        }

        if !merged.is_empty() {
            url.query_pairs_mut().extend_pairs(merged);
        }

        Ok(url)
    }

    /// Build headers in precedence order: defaults, language, auth, call headers.
    pub(crate) fn build_headers(
        &self,
        has_body: bool,
        custom: &[(String, String)],
    ) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if has_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        for (name, value) in &self.config.default_headers {
            insert_header(&mut headers, name, value)?;
        }

        if let Some(lang) = self.lang.as_ref().and_then(|provider| provider()) {
            headers.insert(ACCEPT_LANGUAGE, header_value(&lang)?);
        }

        if let Some(token) = self.session.token().filter(|t| !t.is_empty()) {
            headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", token))?);
        }

        for (name, value) in custom {
            insert_header(&mut headers, name, value)?;
        }

        Ok(headers)
    }

    /// Issue one request and normalize the outcome into an envelope
    pub async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let notify_error = options.notify_error;
        let success_message = options.success_message.clone();

        let response = match self.execute(method, endpoint, body, options).await {
            Ok(response) => response,
            Err(mut err) => {
                for interceptor in self.error_interceptors.iter() {
                    interceptor.intercept(&mut err).await;
                }
                warn!("Request to {} failed: {}", endpoint, err);
                ApiResponse::from_error(&err)
            }
        };

        if response.is_error {
            if notify_error {
                self.notifier.notify_error(response.message_or_default());
            }
        } else if let Some(message) = success_message {
            self.notifier.notify_success(&message);
        }

        response
    }

    async fn execute<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        let mut prepared = PreparedRequest {
            method,
            url: self.build_url(endpoint, &options.params)?,
            headers: self.build_headers(body.is_some(), &options.headers)?,
            body,
            timeout: options.timeout.unwrap_or_else(|| self.config.timeout()),
        };

        for interceptor in self.request_interceptors.iter() {
            interceptor.intercept(&mut prepared).await;
        }

        debug!("{} {}", prepared.method, prepared.url);

        let timeout = prepared.timeout;
        let mut raw = match tokio::time::timeout(timeout, self.send(prepared)).await {
            Ok(result) => result?,
            Err(_) => return Err(ApiError::Timeout),
        };

        for interceptor in self.response_interceptors.iter() {
            interceptor.intercept(&mut raw).await;
        }

        if raw.status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
        }

        decode_response(raw)
    }

    async fn send(&self, prepared: PreparedRequest) -> Result<RawResponse, ApiError> {
        let mut builder = self
            .client
            .request(prepared.method, prepared.url)
            .headers(prepared.headers);
        if let Some(body) = &prepared.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;

        Ok(RawResponse::from_bytes(status, headers, &bytes))
    }

    fn handle_unauthorized(&self) {
        warn!("Received 401 Unauthorized, clearing session");
        self.session.clear_session();
        if let Some(hook) = &self.on_unauthorized {
            hook();
        }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResponse<T> {
        self.request::<T, ()>(Method::GET, endpoint, None, RequestOptions::default())
            .await
    }

    /// Make a GET request with options (query params, headers, timeout)
    pub async fn get_with<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResponse<T> {
        self.request::<T, ()>(Method::GET, endpoint, None, options)
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post<T, B>(
        &self,
        endpoint: &str,
        body: &B,
        options: RequestOptions,
    ) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, endpoint, Some(body), options).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T, B>(
        &self,
        endpoint: &str,
        body: &B,
        options: RequestOptions,
    ) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, endpoint, Some(body), options).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T, B>(
        &self,
        endpoint: &str,
        body: &B,
        options: RequestOptions,
    ) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, endpoint, Some(body), options).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResponse<T> {
        self.request::<T, ()>(Method::DELETE, endpoint, None, options)
            .await
    }
}

fn header_value(value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value).map_err(|e| ApiError::InvalidRequest(e.to_string()))
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<(), ApiError> {
    let name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
    headers.insert(name, header_value(value)?);
    Ok(())
}

/// Turn a raw response into a typed envelope
fn decode_response<T: DeserializeOwned>(raw: RawResponse) -> Result<ApiResponse<T>, ApiError> {
    let status = raw.status.as_u16();

    if !raw.status.is_success() {
        let message = raw
            .body
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        let errors = raw.body.get("errors").and_then(parse_field_errors);
        return Err(ApiError::Server {
            status,
            message,
            errors,
        });
    }

    let envelope = RawEnvelope::from_body(raw.body);
    let meta = envelope.pagination();

    if envelope.is_error {
        return Err(ApiError::Server {
            status,
            message: envelope
                .message
                .unwrap_or_else(|| "Request failed".to_string()),
            errors: envelope.errors,
        });
    }

    let data: T = serde_json::from_value(envelope.data).map_err(|e| ApiError::Decode {
        status,
        detail: e.to_string(),
    })?;

    Ok(ApiResponse {
        is_error: false,
        data: Some(data),
        message: envelope.message,
        meta,
        errors: None,
        status,
    })
}
