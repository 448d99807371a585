//
//  refdesk
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the data-access layer for the referee service: one
//! transport, an interceptor pipeline, and a facade per resource kind.
//!
//! ## Architecture
//!
//! - [`client`]: Core HTTP transport with default headers, timeouts and dispatch
//! - [`interceptor`]: Credential injection, session teardown, error normalization
//! - [`resources`]: Per-resource facades (auth, referees, appointments, ...)
//! - [`common`]: Shared types (errors, filters, list envelopes)
//!
//! ## Data Flow
//!
//! ```text
//! facade → ApiClient ─(TokenAuth)→ service ─(SessionGuard)→ facade → caller
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use refdesk::api::ApiClient;
//! use refdesk::api::common::Filters;
//! use refdesk::auth::MemorySessionStore;
//!
//! # async fn example() -> Result<(), refdesk::api::ApiError> {
//! let store = Arc::new(MemorySessionStore::with_token("abc123"));
//! let client = ApiClient::builder("http://localhost:8000/api")
//!     .with_session(store, Some(Arc::new(|| eprintln!("please log in again"))))
//!     .build()?;
//!
//! let teams = client.teams().list(&Filters::new()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every failure is an [`ApiError`] carrying an [`ErrorKind`](common::ErrorKind):
//!
//! - `Unauthorized`: 401, the stored session has been cleared
//! - `Forbidden`: 403
//! - `NotFound`: 404
//! - `Validation`: other 4xx
//! - `Server`: 5xx
//! - `Timeout` / `Network`: no response received

pub mod client;
pub mod common;
pub mod interceptor;
pub mod resources;

pub use client::{ApiClient, ApiClientBuilder, ApiRequest, ApiResponse};
pub use common::{ApiError, ErrorKind, ListResult};
pub use interceptor::{RequestInterceptor, ResponseInterceptor, SessionExpiredHook};
