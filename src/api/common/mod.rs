//
//  refdesk
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types shared by every resource facade
//!
//! This module provides the types every facade speaks: the failure value
//! ([`ApiError`]), the opaque [`Record`] mapping, query/filter serialization
//! and the list envelope that hides the server's pagination differences.
//!
//! # Overview
//!
//! - [`ApiError`] - Typed failure carrying an [`ErrorKind`] and a user message
//! - [`Record`] - A domain record, treated as a field → value mapping
//! - [`Filters`] / [`QueryValue`] - Query-string construction
//! - [`ListEnvelope`] / [`ListResult`] - List coercion (re-exported from [`pagination`])
//!
//! # Example
//!
//! ```rust
//! use refdesk::api::common::{ApiError, ErrorKind};
//!
//! fn describe(result: Result<(), ApiError>) -> String {
//!     match result {
//!         Ok(()) => "ok".to_string(),
//!         Err(e) if e.kind() == ErrorKind::Timeout => "slow network".to_string(),
//!         Err(e) => e.message().to_string(),
//!     }
//! }
//! ```

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::auth::SessionError;

mod filters;
mod pagination;

pub use filters::*;
pub use pagination::*;

/// A single domain record as returned by the remote service.
///
/// The service owns the shape of referees, appointments, venues and so on;
/// this layer never interprets them beyond the payload rules of each facade.
pub type Record = serde_json::Map<String, Value>;

/// Message used when nothing better can be derived from a failure.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Message shown to the user when a request exceeds its timeout.
pub const TIMEOUT_MESSAGE: &str = "Request timed out — please try again";

/// Body fields inspected, in priority order, when deriving a failure message.
const MESSAGE_FIELDS: [&str; 3] = ["error", "detail", "message"];

/// Classification of an [`ApiError`].
///
/// | Kind | Cause |
/// |------|-------|
/// | `Network` | No response received (connection refused, DNS, reset) |
/// | `Timeout` | No response within the request timeout |
/// | `Unauthorized` | HTTP 401 |
/// | `Forbidden` | HTTP 403 |
/// | `NotFound` | HTTP 404 |
/// | `Validation` | Any other 4xx |
/// | `Server` | HTTP 5xx |
/// | `Decode` | A success body did not match the expected type |
/// | `Session` | The session store could not be read or written |
/// | `Config` | The client was configured with invalid settings |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Timeout,
    Unauthorized,
    Forbidden,
    NotFound,
    Validation,
    Server,
    Decode,
    Session,
    Config,
}

impl ErrorKind {
    /// Maps a non-success HTTP status to its error kind.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            500..=599 => Self::Server,
            _ => Self::Validation,
        }
    }
}

/// Failure value returned by the transport and every facade operation.
///
/// `ApiError` replaces an exception carrying both a message and transport
/// metadata: it records what went wrong ([`ErrorKind`], optional HTTP status),
/// what the transport reported, and the human-readable message that consumers
/// display. The raw failure body is kept private to the crate so facades can
/// re-derive messages, but it is not part of the public contract.
///
/// # Example
///
/// ```rust
/// use refdesk::api::common::{ApiError, ErrorKind};
/// use serde_json::json;
///
/// let mut err = ApiError::http(400, json!({"detail": "Venue is required."}));
/// err.attach_user_message();
///
/// assert_eq!(err.kind(), ErrorKind::Validation);
/// assert_eq!(err.message(), "Venue is required.");
/// ```
#[derive(Debug, Clone, Error)]
#[error("{}", message_or_generic(.user_message))]
pub struct ApiError {
    kind: ErrorKind,
    status: Option<u16>,
    body: Option<Value>,
    transport_message: Option<String>,
    user_message: Option<String>,
}

fn message_or_generic(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or(GENERIC_ERROR_MESSAGE)
}

impl ApiError {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            status: None,
            body: None,
            transport_message: None,
            user_message: None,
        }
    }

    /// A non-success HTTP response with its decoded body.
    pub fn http(status: u16, body: Value) -> Self {
        Self {
            status: Some(status),
            body: Some(body),
            ..Self::new(ErrorKind::from_status(status))
        }
    }

    /// A request that received no response within `timeout`.
    pub fn timeout(timeout: Duration) -> Self {
        Self {
            transport_message: Some(format!("timeout of {}ms exceeded", timeout.as_millis())),
            ..Self::new(ErrorKind::Timeout)
        }
    }

    /// A transport failure reported by `reqwest`.
    ///
    /// Timeouts are classified as [`ErrorKind::Timeout`] so callers can tell
    /// them apart from other network failures.
    pub fn transport(err: &reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            return Self::timeout(timeout);
        }
        Self {
            status: err.status().map(|s| s.as_u16()),
            transport_message: Some(err.to_string()),
            ..Self::new(ErrorKind::Network)
        }
    }

    /// A success body that could not be decoded into the requested type.
    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            transport_message: Some(message.into()),
            ..Self::new(ErrorKind::Decode)
        }
    }

    /// Invalid client configuration (bad base URL, unusable header value).
    pub fn config(message: impl Into<String>) -> Self {
        Self {
            transport_message: Some(message.into()),
            ..Self::new(ErrorKind::Config)
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::Unauthorized
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == ErrorKind::Timeout
    }

    /// What the transport itself reported, if anything.
    pub fn transport_message(&self) -> Option<&str> {
        self.transport_message.as_deref()
    }

    /// The message attached by the interceptor pipeline or a facade.
    pub fn user_message(&self) -> Option<&str> {
        self.user_message.as_deref()
    }

    /// The message to show a user. Never empty.
    pub fn message(&self) -> &str {
        message_or_generic(&self.user_message)
    }

    pub(crate) fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Derives the best-effort message and attaches it as the user message.
    ///
    /// Priority: body `error`, body `detail`, body `message`, the body itself
    /// when it is a string, the transport message, then
    /// [`GENERIC_ERROR_MESSAGE`].
    pub fn attach_user_message(&mut self) {
        let message = self
            .body
            .as_ref()
            .and_then(message_from_body)
            .or_else(|| self.transport_message.clone())
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        self.user_message = Some(message);
    }

    /// Re-derives the user message from the body, falling back to
    /// operation-specific text instead of the transport message.
    pub fn with_fallback(mut self, fallback: &str) -> Self {
        let message = self
            .body
            .as_ref()
            .and_then(message_from_body)
            .unwrap_or_else(|| fallback.to_string());
        self.user_message = Some(message);
        self
    }

    /// Replaces the user message outright.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.user_message = Some(message.into());
        self
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        Self {
            transport_message: Some(err.to_string()),
            ..Self::new(ErrorKind::Session)
        }
    }
}

/// Extracts a message from a failure body using the `error` → `detail` →
/// `message` → string-body priority.
pub fn message_from_body(body: &Value) -> Option<String> {
    match body {
        Value::String(_) => text_of(body),
        Value::Object(map) => MESSAGE_FIELDS
            .iter()
            .find_map(|field| map.get(*field).and_then(text_of)),
        _ => None,
    }
}

/// Renders a scalar or a list of scalars as display text.
///
/// Blank strings, nulls and nested objects yield `None`.
pub(crate) fn text_of(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(text_of)
            .collect::<Vec<_>>()
            .join(" "),
        Value::Null | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}
