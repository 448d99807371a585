//
//  refdesk
//  api/resources/teams.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use serde_json::Value;

use super::{fetch_body, fetch_list, item_path};
use crate::api::client::{ApiClient, ApiRequest};
use crate::api::common::{ApiError, Filters, ListResult};

const COLLECTION: &str = "/teams/";

/// Team facade: `/teams/`.
pub struct Teams<'a> {
    client: &'a ApiClient,
}

impl<'a> Teams<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &Filters) -> Result<ListResult, ApiError> {
        fetch_list(self.client, COLLECTION, filters, "Failed to fetch teams").await
    }

    pub async fn get(&self, id: &str) -> Result<Value, ApiError> {
        fetch_body(
            self.client,
            ApiRequest::get(item_path(COLLECTION, id)),
            "Failed to fetch team",
        )
        .await
    }
}
