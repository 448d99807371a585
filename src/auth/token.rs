//
//  refdesk
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Token Helpers
//!
//! The referee service issues an opaque token on login and expects it back as
//! `Authorization: Token <value>`. This module covers the consumer side of that
//! exchange: pulling the token out of a login response, checking its format,
//! and reading one from standard input for scripted logins.
//!
//! ## Example
//!
//! ```rust
//! use refdesk::auth::{token_from_login_response, validate_token};
//! use serde_json::json;
//!
//! let body = json!({"token": "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b", "user": {"id": 3}});
//! let token = token_from_login_response(&body).unwrap();
//! assert!(validate_token(&token));
//! ```

use anyhow::Result;
use serde_json::Value;

/// Response fields that may carry the issued token, in lookup order.
const TOKEN_FIELDS: [&str; 3] = ["token", "key", "auth_token"];

/// Reads a token from standard input.
///
/// Only the first line is read; surrounding whitespace is trimmed. Works with
/// piped input: `echo "$TOKEN" | refdesk auth login --with-token`.
pub fn read_token_from_stdin() -> Result<String> {
    use std::io::{self, BufRead};

    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;

    Ok(line.trim().to_string())
}

/// Format check only: non-empty and free of whitespace.
///
/// ```rust
/// use refdesk::auth::validate_token;
///
/// assert!(validate_token("abc123"));
/// assert!(!validate_token(""));
/// assert!(!validate_token("has space"));
/// ```
pub fn validate_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

/// Extracts the issued token from a login response body.
///
/// Looks at `token`, then `key`, then `auth_token`, at the top level and
/// then inside a `data` wrapper.
pub fn token_from_login_response(body: &Value) -> Option<String> {
    let lookup = |value: &Value| {
        TOKEN_FIELDS
            .iter()
            .find_map(|field| {
                value
                    .get(*field)
                    .and_then(Value::as_str)
                    .filter(|token| !token.is_empty())
            })
            .map(str::to_string)
    };
    lookup(body).or_else(|| body.get("data").and_then(lookup))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_field_lookup_order() {
        assert_eq!(
            token_from_login_response(&json!({"key": "k", "token": "t"})).as_deref(),
            Some("t")
        );
        assert_eq!(token_from_login_response(&json!({"key": "k"})).as_deref(), Some("k"));
        assert_eq!(
            token_from_login_response(&json!({"data": {"auth_token": "a"}})).as_deref(),
            Some("a")
        );
    }

    #[test]
    fn test_missing_or_blank_token() {
        assert!(token_from_login_response(&json!({"token": ""})).is_none());
        assert_eq!(
            token_from_login_response(&json!({"token": "", "key": "k"})).as_deref(),
            Some("k")
        );
        assert!(token_from_login_response(&json!({"user": {"id": 1}})).is_none());
        assert!(token_from_login_response(&json!("token")).is_none());
    }
}
