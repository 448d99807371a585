//
//  refdesk
//  api/resources/matches.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Match facade: `/matches/`.
//!
//! Fetching a single match uses its own, shorter timeout. When it elapses the
//! caller sees [`TIMEOUT_MESSAGE`] rather than the generic fallback.

use std::time::Duration;

use serde_json::Value;

use super::{fetch_list, item_path};
use crate::api::client::{ApiClient, ApiRequest};
use crate::api::common::{ApiError, Filters, ListResult, TIMEOUT_MESSAGE};

const COLLECTION: &str = "/matches/";

/// Timeout for a single-match fetch unless overridden.
pub const DEFAULT_MATCH_TIMEOUT: Duration = Duration::from_secs(8);

pub struct Matches<'a> {
    client: &'a ApiClient,
    timeout: Duration,
}

impl<'a> Matches<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            timeout: DEFAULT_MATCH_TIMEOUT,
        }
    }

    /// Overrides the single-match timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn list(&self, filters: &Filters) -> Result<ListResult, ApiError> {
        fetch_list(self.client, COLLECTION, filters, "Failed to fetch matches").await
    }

    pub async fn get(&self, id: &str) -> Result<Value, ApiError> {
        let request = ApiRequest::get(item_path(COLLECTION, id)).timeout(self.timeout);
        match self.client.request(request).await {
            Ok(response) => Ok(response.body),
            Err(e) if e.is_timeout() => Err(e.with_message(TIMEOUT_MESSAGE)),
            Err(e) => Err(e.with_fallback("Failed to fetch match")),
        }
    }
}
