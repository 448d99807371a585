//
//  refdesk
//  api/resources/referees.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Referee facade: `/referee/`.

use serde_json::Value;

use super::{fetch_body, fetch_list, item_path};
use crate::api::client::{ApiClient, ApiRequest};
use crate::api::common::{ApiError, Filters, ListResult};

const COLLECTION: &str = "/referee/";

pub struct Referees<'a> {
    client: &'a ApiClient,
}

impl<'a> Referees<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &Filters) -> Result<ListResult, ApiError> {
        fetch_list(self.client, COLLECTION, filters, "Failed to fetch referees").await
    }

    pub async fn get(&self, id: &str) -> Result<Value, ApiError> {
        fetch_body(
            self.client,
            ApiRequest::get(item_path(COLLECTION, id)),
            "Failed to fetch referee",
        )
        .await
    }

    /// Partially updates a referee profile with `fields`.
    pub async fn update(&self, id: &str, fields: Value) -> Result<Value, ApiError> {
        fetch_body(
            self.client,
            ApiRequest::patch(item_path(COLLECTION, id)).json(fields),
            "Failed to update referee",
        )
        .await
    }
}
