//
//  refdesk
//  auth/keychain.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Keyring Session Store
//!
//! Stores the Session Credential in the system's native keyring:
//!
//! - **macOS**: Keychain Services
//! - **Linux**: kernel keyutils
//! - **Windows**: Windows Credential Manager
//!
//! The entry is addressed by service [`SERVICE_NAME`] and account
//! [`AUTH_TOKEN_KEY`](super::AUTH_TOKEN_KEY).
//!
//! When no keyring is available (headless servers, containers), use
//! [`FileSessionStore`](super::FileSessionStore) instead.

use keyring::Entry;
use tracing::debug;

use super::{SessionError, SessionStore, AUTH_TOKEN_KEY};

/// Keyring service name under which the token is stored.
pub const SERVICE_NAME: &str = "refdesk";

pub struct KeyringSessionStore {
    service: String,
}

impl Default for KeyringSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringSessionStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    fn entry(&self) -> Result<Entry, SessionError> {
        Ok(Entry::new(&self.service, AUTH_TOKEN_KEY)?)
    }
}

impl SessionStore for KeyringSessionStore {
    fn get(&self) -> Result<Option<String>, SessionError> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, token: &str) -> Result<(), SessionError> {
        debug!(service = %self.service, "storing session token in keyring");
        self.entry()?.set_password(token)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        debug!(service = %self.service, "removing session token from keyring");
        match self.entry()?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already cleared
            Err(e) => Err(e.into()),
        }
    }
}
