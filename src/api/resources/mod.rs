//
//  refdesk
//  api/resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Resource service facades.
//!
//! One facade per resource kind, each borrowing the shared [`ApiClient`]:
//!
//! - [`auth`] - login, registration, logout and the current session
//! - [`referees`] - referee profiles
//! - [`appointments`] - appointments, with pagination metadata and payload shaping
//! - [`availability`] - referee availability slots
//! - [`venues`], [`teams`], [`matches`] - read-only reference data
//!
//! Every list operation returns a [`ListResult`]; every other operation returns
//! the decoded body or an [`ApiError`] whose message was re-derived with the
//! facade's own fallback text.
//!
//! # Example
//!
//! ```rust,no_run
//! use refdesk::api::ApiClient;
//! use refdesk::api::common::Filters;
//!
//! # async fn example(client: &ApiClient) -> Result<(), refdesk::api::ApiError> {
//! let referees = client.referees().list(&Filters::new().with("level", "national")).await?;
//! let venue = client.venues().get("7").await?;
//! # Ok(())
//! # }
//! ```

pub mod appointments;
pub mod auth;
pub mod availability;
pub mod matches;
pub mod referees;
pub mod teams;
pub mod venues;

pub use appointments::{AppointmentFields, AppointmentPayload, Appointments, ListParams};
pub use auth::{Auth, Credentials};
pub use availability::Availability;
pub use matches::{Matches, DEFAULT_MATCH_TIMEOUT};
pub use referees::Referees;
pub use teams::Teams;
pub use venues::Venues;

use serde_json::Value;

use super::client::{segment, ApiClient, ApiRequest};
use super::common::{ApiError, Filters, ListResult};

impl ApiClient {
    pub fn auth(&self) -> Auth<'_> {
        Auth::new(self)
    }

    pub fn referees(&self) -> Referees<'_> {
        Referees::new(self)
    }

    pub fn appointments(&self) -> Appointments<'_> {
        Appointments::new(self)
    }

    pub fn availability(&self) -> Availability<'_> {
        Availability::new(self)
    }

    pub fn venues(&self) -> Venues<'_> {
        Venues::new(self)
    }

    pub fn teams(&self) -> Teams<'_> {
        Teams::new(self)
    }

    pub fn matches(&self) -> Matches<'_> {
        Matches::new(self)
    }
}

/// `{collection}{id}/` with the identifier percent-encoded.
pub(crate) fn item_path(collection: &str, id: &str) -> String {
    format!("{collection}{}/", segment(id))
}

/// GETs a collection and applies list coercion.
pub(crate) async fn fetch_list(
    client: &ApiClient,
    collection: &str,
    filters: &Filters,
    fallback: &str,
) -> Result<ListResult, ApiError> {
    client
        .request_list(ApiRequest::get(collection).filters(filters))
        .await
        .map(ListResult::from)
        .map_err(|e| e.with_fallback(fallback))
}

/// Dispatches `request` and returns the decoded body.
pub(crate) async fn fetch_body(
    client: &ApiClient,
    request: ApiRequest,
    fallback: &str,
) -> Result<Value, ApiError> {
    client
        .request(request)
        .await
        .map(|response| response.body)
        .map_err(|e| e.with_fallback(fallback))
}

/// Dispatches `request` and discards the body.
pub(crate) async fn discard_body(
    client: &ApiClient,
    request: ApiRequest,
    fallback: &str,
) -> Result<(), ApiError> {
    fetch_body(client, request, fallback).await.map(|_| ())
}
