//
//  refdesk
//  api/resources/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication facade.
//!
//! Thin pass-throughs: the bodies are returned exactly as decoded. Storing the
//! issued token after a login is the caller's job (see
//! [`token_from_login_response`](crate::auth::token_from_login_response)).

use serde_json::{json, Value};

use super::fetch_body;
use crate::api::client::{ApiClient, ApiRequest};
use crate::api::common::ApiError;

/// Username/password pair accepted by `/auth/login/`.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

pub struct Auth<'a> {
    client: &'a ApiClient,
}

impl<'a> Auth<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Value, ApiError> {
        let body = json!({
            "username": credentials.username,
            "password": credentials.password,
        });
        fetch_body(
            self.client,
            ApiRequest::post("/auth/login/").json(body),
            "Failed to log in",
        )
        .await
    }

    /// Registers a new user. The payload is forwarded as given.
    pub async fn register(&self, payload: Value) -> Result<Value, ApiError> {
        fetch_body(
            self.client,
            ApiRequest::post("/auth/register/").json(payload),
            "Failed to register",
        )
        .await
    }

    pub async fn logout(&self) -> Result<Value, ApiError> {
        fetch_body(self.client, ApiRequest::post("/auth/logout/"), "Failed to log out").await
    }

    pub async fn current_user(&self) -> Result<Value, ApiError> {
        fetch_body(
            self.client,
            ApiRequest::get("/auth/user/"),
            "Failed to fetch current user",
        )
        .await
    }
}
