//
//  refdesk
//  api/resources/availability.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Availability facade: `/availability/`.
//!
//! Availability slots declare when a referee can be appointed. The payload is
//! owned by the service and forwarded as given.

use serde_json::Value;

use super::{discard_body, fetch_body, fetch_list, item_path};
use crate::api::client::{ApiClient, ApiRequest};
use crate::api::common::{ApiError, Filters, ListResult};

const COLLECTION: &str = "/availability/";

pub struct Availability<'a> {
    client: &'a ApiClient,
}

impl<'a> Availability<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &Filters) -> Result<ListResult, ApiError> {
        fetch_list(self.client, COLLECTION, filters, "Failed to fetch availability").await
    }

    pub async fn create(&self, fields: Value) -> Result<Value, ApiError> {
        fetch_body(
            self.client,
            ApiRequest::post(COLLECTION).json(fields),
            "Failed to create availability",
        )
        .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        discard_body(
            self.client,
            ApiRequest::delete(item_path(COLLECTION, id)),
            "Failed to delete availability",
        )
        .await
    }
}
