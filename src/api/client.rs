//
//  refdesk
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Transport for the Referee Service API
//!
//! This module provides the single HTTP client every facade dispatches through.
//! It owns the base endpoint, the default headers and timeout, and the
//! interceptor pipeline.
//!
//! ## Features
//!
//! - One configured `reqwest::Client` shared by all facades
//! - JSON `Content-Type`/`Accept` default headers and a custom User-Agent
//! - Per-call timeout overriding the instance default
//! - Outbound/inbound interceptors (credential injection, session teardown,
//!   error normalization)
//! - Failure bodies decoded once; non-JSON bodies are kept as strings
//!
//! No request is ever retried.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::api::common::{ApiError, Filters, ListEnvelope, QueryValue};
use crate::api::interceptor::{
    RequestInterceptor, ResponseInterceptor, SessionExpiredHook, SessionGuard, TokenAuth,
};
use crate::auth::SessionStore;
use crate::config::Config;

/// Timeout applied when neither the builder nor the request sets one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A request descriptor, built fresh for every call.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use refdesk::api::ApiRequest;
///
/// let request = ApiRequest::get("/matches/12/")
///     .query("expand", "teams")
///     .timeout(Duration::from_secs(5));
///
/// assert_eq!(request.path, "/matches/12/");
/// assert_eq!(request.query.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base endpoint, e.g. `/appointments/`.
    pub path: String,
    pub query: Vec<(String, QueryValue)>,
    pub body: Option<Value>,
    /// Overrides the client's default timeout for this call.
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends the defined, non-empty entries of `filters`.
    pub fn filters(mut self, filters: &Filters) -> Self {
        self.query.extend(filters.to_query());
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A successful response with its decoded body.
///
/// An empty body decodes to `null`; a body that is not JSON is kept as a
/// JSON string.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    /// Decodes the body into the collection envelope.
    pub fn into_list(self) -> ListEnvelope {
        ListEnvelope::from_body(self.body)
    }

    /// Deserializes the body into `T`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        serde_json::from_value(self.body).map_err(|e| ApiError::decode(e.to_string()))
    }
}

/// Builder for [`ApiClient`].
///
/// ```rust
/// use std::sync::Arc;
/// use std::time::Duration;
/// use refdesk::api::ApiClient;
/// use refdesk::auth::MemorySessionStore;
///
/// let client = ApiClient::builder("http://localhost:8000/api")
///     .timeout(Duration::from_secs(5))
///     .with_session(Arc::new(MemorySessionStore::new()), None)
///     .build()?;
///
/// assert_eq!(client.base_url(), "http://localhost:8000/api");
/// # Ok::<(), refdesk::api::ApiError>(())
/// ```
pub struct ApiClientBuilder {
    base_url: String,
    timeout: Duration,
    headers: Vec<(String, String)>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl ApiClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a header sent with every request.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
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

    /// Installs the standard pipeline: [`TokenAuth`] outbound and
    /// [`SessionGuard`] inbound, both backed by `store`.
    pub fn with_session(
        self,
        store: Arc<dyn SessionStore>,
        on_expired: Option<SessionExpiredHook>,
    ) -> Self {
        let mut guard = SessionGuard::new(Arc::clone(&store));
        if let Some(hook) = on_expired {
            guard = guard.on_expired(hook);
        }
        self.request_interceptor(Arc::new(TokenAuth::new(store)))
            .response_interceptor(Arc::new(guard))
    }

    pub fn build(self) -> Result<ApiClient, ApiError> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::config(format!("invalid base URL '{}': {e}", self.base_url)))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::config(format!("invalid header name '{name}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::config(format!("invalid header value: {e}")))?;
            headers.insert(name, value);
        }

        let http = Client::builder()
            .user_agent(format!("refdesk/{}", crate::VERSION))
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .map_err(|e| ApiError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(ApiClient {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            timeout: self.timeout,
            request_interceptors: self.request_interceptors,
            response_interceptors: self.response_interceptors,
        })
    }
}

/// The transport: a single configured HTTP client that every facade
/// dispatches through.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use refdesk::api::ApiClient;
/// use refdesk::auth::KeyringSessionStore;
/// use refdesk::config::Config;
///
/// let config = Config::load()?;
/// let store = Arc::new(KeyringSessionStore::new());
/// let client = ApiClient::from_config(&config, store, None)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Making Requests
///
/// ```rust,no_run
/// use refdesk::api::{ApiClient, ApiRequest};
/// use refdesk::api::common::Filters;
///
/// # async fn example(client: &ApiClient) -> Result<(), refdesk::api::ApiError> {
/// let venues = client.venues().list(&Filters::new().with("city", "Harare")).await?;
/// println!("{} venues", venues.data.len());
///
/// let raw = client.request(ApiRequest::get("/teams/4/")).await?;
/// println!("{}", raw.body);
/// # Ok(())
/// # }
/// ```
pub struct ApiClient {
    /// The underlying HTTP client
    http: Client,
    /// Base endpoint without a trailing slash
    base_url: String,
    /// Default per-request timeout
    timeout: Duration,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl ApiClient {
    pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            headers: Vec::new(),
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
        }
    }

    /// Creates a client from configuration with the standard session pipeline.
    pub fn from_config(
        config: &Config,
        store: Arc<dyn SessionStore>,
        on_expired: Option<SessionExpiredHook>,
    ) -> Result<Self, ApiError> {
        Self::builder(config.api.base_url.clone())
            .timeout(Duration::from_millis(config.api.timeout_ms))
            .with_session(store, on_expired)
            .build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL for a path relative to the base endpoint.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Dispatches a request through the interceptor pipeline.
    ///
    /// On success every inbound interceptor observes the response, which is
    /// returned unchanged. On failure every inbound interceptor may annotate
    /// the error, which is then returned.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Timeout`](crate::api::common::ErrorKind::Timeout) when no
    ///   response arrives in time
    /// - [`ErrorKind::Network`](crate::api::common::ErrorKind::Network) for
    ///   other transport failures
    /// - A status-derived kind for non-2xx responses
    /// - [`ErrorKind::Session`](crate::api::common::ErrorKind::Session) when
    ///   the session store fails
    ///
    /// An outbound rejection is returned as is; the inbound stage only sees
    /// requests that were dispatched.
    pub async fn request(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let headers = self.outbound_headers()?;
        match self.dispatch(request, headers).await {
            Ok(response) => {
                for interceptor in &self.response_interceptors {
                    interceptor.on_response(&response);
                }
                Ok(response)
            }
            Err(mut error) => {
                for interceptor in &self.response_interceptors {
                    interceptor.on_error(&mut error);
                }
                Err(error)
            }
        }
    }

    /// Dispatches a collection request and decodes the envelope.
    pub async fn request_list(&self, request: ApiRequest) -> Result<ListEnvelope, ApiError> {
        Ok(self.request(request).await?.into_list())
    }

    fn outbound_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        for interceptor in &self.request_interceptors {
            interceptor.on_request(&mut headers)?;
        }
        Ok(headers)
    }

    async fn dispatch(
        &self,
        request: ApiRequest,
        headers: HeaderMap,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.url(&request.path);
        let timeout = request.timeout.unwrap_or(self.timeout);
        debug!(method = %request.method, %url, "dispatching request");

        let mut builder = self
            .http
            .request(request.method, &url)
            .headers(headers)
            .timeout(timeout);

        if !request.query.is_empty() {
            let query: Vec<(String, String)> = request
                .query
                .iter()
                .map(|(key, value)| (key.clone(), value.to_string()))
                .collect();
            builder = builder.query(&query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::transport(&e, timeout))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::transport(&e, timeout))?;
        debug!(%status, %url, "received response");

        let body = decode_body(&text);
        if !status.is_success() {
            return Err(ApiError::http(status.as_u16(), body));
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Decodes a response body: empty → `null`, JSON → value, anything else → string.
fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Percent-encodes a path segment such as a record identifier.
pub(crate) fn segment(id: &str) -> String {
    url::form_urlencoded::byte_serialize(id.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::ErrorKind;
    use crate::auth::SessionError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct PoisonedStore;

    impl SessionStore for PoisonedStore {
        fn get(&self) -> Result<Option<String>, SessionError> {
            Err(SessionError::Poisoned)
        }

        fn set(&self, _token: &str) -> Result<(), SessionError> {
            Err(SessionError::Poisoned)
        }

        fn clear(&self) -> Result<(), SessionError> {
            Err(SessionError::Poisoned)
        }
    }

    #[tokio::test]
    async fn test_store_failure_skips_inbound_stage() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let client = ApiClient::builder("http://127.0.0.1:9/api")
            .with_session(
                Arc::new(PoisonedStore),
                Some(Arc::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                })),
            )
            .build()
            .unwrap();

        let err = client.request(ApiRequest::get("/venues/")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Session);
        assert!(err.user_message().is_none());
        assert_eq!(err.transport_message(), Some("Session store lock poisoned"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body(""), Value::Null);
        assert_eq!(decode_body("  \n"), Value::Null);
        assert_eq!(decode_body(r#"{"id": 1}"#), json!({"id": 1}));
        assert_eq!(decode_body("<h1>Bad Gateway</h1>"), json!("<h1>Bad Gateway</h1>"));
    }

    #[test]
    fn test_url_joining() {
        let client = ApiClient::builder("http://localhost:8000/api/").build().unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(client.url("/venues/"), "http://localhost:8000/api/venues/");
        assert_eq!(client.url("venues/"), "http://localhost:8000/api/venues/");
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let err = ApiClient::builder("not a url").build().err().unwrap();
        assert_eq!(err.kind(), crate::api::common::ErrorKind::Config);
    }

    #[test]
    fn test_request_builder() {
        let request = ApiRequest::get("/referee/")
            .filters(&Filters::new().with("level", "national").with("region", ""))
            .query("page", 2_u32);

        assert_eq!(request.method, Method::GET);
        assert_eq!(
            request.query,
            vec![
                ("level".to_string(), QueryValue::from("national")),
                ("page".to_string(), QueryValue::from(2_u32)),
            ]
        );
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("42"), "42");
        assert_eq!(segment("a b/c"), "a%20b%2Fc");
    }
}
