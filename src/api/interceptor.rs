//
//  refdesk
//  api/interceptor.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Interceptor Pipeline
//!
//! Cross-cutting behaviour that applies to every request the [`ApiClient`]
//! dispatches, whichever facade issued it.
//!
//! ## Stages
//!
//! - **Outbound** ([`RequestInterceptor`]): runs before dispatch and may add
//!   headers. [`TokenAuth`] injects `Authorization: Token <value>` from the
//!   session store.
//! - **Inbound** ([`ResponseInterceptor`]): runs on every outcome.
//!   [`SessionGuard`] tears the session down on 401 and attaches the
//!   normalized user message to every failure.
//!
//! Interceptors run in registration order. An outbound rejection stops the
//! request and reaches the caller unchanged, without passing the inbound
//! stage.
//!
//! [`ApiClient`]: super::ApiClient

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tracing::{debug, warn};

use crate::api::client::ApiResponse;
use crate::api::common::ApiError;
use crate::auth::SessionStore;

/// Callback invoked when the service rejects the session (HTTP 401).
///
/// The consumer decides what "go to the login view" means: a desktop app
/// navigates, the CLI prints a hint.
pub type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;

/// Outbound stage: may modify the headers of a request before dispatch.
pub trait RequestInterceptor: Send + Sync {
    fn on_request(&self, headers: &mut HeaderMap) -> Result<(), ApiError>;
}

/// Inbound stage: observes every response and every dispatch failure.
///
/// `on_error` may annotate the failure but cannot swallow it; the transport
/// always returns it to the caller afterwards.
pub trait ResponseInterceptor: Send + Sync {
    fn on_response(&self, _response: &ApiResponse) {}

    fn on_error(&self, error: &mut ApiError);
}

/// Injects the stored Session Credential as `Authorization: Token <value>`.
///
/// Requests go out unauthenticated when no token is stored. Only a failing
/// store rejects the request.
pub struct TokenAuth {
    store: Arc<dyn SessionStore>,
}

impl TokenAuth {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }
}

impl RequestInterceptor for TokenAuth {
    fn on_request(&self, headers: &mut HeaderMap) -> Result<(), ApiError> {
        let Some(token) = self.store.get()?.filter(|t| !t.is_empty()) else {
            return Ok(());
        };
        let value = HeaderValue::from_str(&format!("Token {token}"))
            .map_err(|_| ApiError::config("stored session token is not a valid header value"))?;
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

/// Handles session expiry and normalizes failure messages.
///
/// On a 401 the stored credential is erased and the session-expired hook is
/// called once. Every failure, whatever its status, gets a user message.
pub struct SessionGuard {
    store: Arc<dyn SessionStore>,
    on_expired: Option<SessionExpiredHook>,
}

impl SessionGuard {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            on_expired: None,
        }
    }

    pub fn on_expired(mut self, hook: SessionExpiredHook) -> Self {
        self.on_expired = Some(hook);
        self
    }
}

impl ResponseInterceptor for SessionGuard {
    fn on_error(&self, error: &mut ApiError) {
        if error.is_unauthorized() {
            warn!("session rejected by server, clearing stored credential");
            if let Err(e) = self.store.clear() {
                warn!(error = %e, "failed to clear stored credential");
            }
            if let Some(hook) = &self.on_expired {
                hook();
            }
        }
        error.attach_user_message();
        debug!(kind = ?error.kind(), message = error.message(), "request failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::ErrorKind;
    use crate::auth::MemorySessionStore;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_token_header_injected() {
        let store = Arc::new(MemorySessionStore::with_token("abc123"));
        let mut headers = HeaderMap::new();

        TokenAuth::new(store).on_request(&mut headers).unwrap();
        assert_eq!(headers[AUTHORIZATION], "Token abc123");
    }

    #[test]
    fn test_no_token_leaves_headers_alone() {
        let store = Arc::new(MemorySessionStore::new());
        let mut headers = HeaderMap::new();

        TokenAuth::new(store).on_request(&mut headers).unwrap();
        assert!(headers.is_empty());
    }

    #[test]
    fn test_unauthorized_clears_session_once() {
        let store = Arc::new(MemorySessionStore::with_token("stale"));
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let guard = SessionGuard::new(store.clone()).on_expired(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let mut err = ApiError::http(401, json!({"detail": "Invalid token."}));
        guard.on_error(&mut err);

        assert!(store.get().unwrap().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(err.message(), "Invalid token.");
    }

    #[test]
    fn test_other_failures_keep_session() {
        let store = Arc::new(MemorySessionStore::with_token("valid"));
        let guard = SessionGuard::new(store.clone());

        let mut err = ApiError::http(500, json!("Internal Server Error"));
        guard.on_error(&mut err);

        assert_eq!(store.get().unwrap().as_deref(), Some("valid"));
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.message(), "Internal Server Error");
    }
}
