//
//  refdesk
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Session Module
//!
//! This module owns the Session Credential: the single authorization token that
//! identifies the current user to the referee service. The token lives in a
//! [`SessionStore`], which is injected into the API client rather than read from
//! ambient global state, so tests can substitute an in-memory store.
//!
//! ## Stores
//!
//! - [`KeyringSessionStore`]: the system keyring (macOS Keychain, Linux keyutils,
//!   Windows Credential Manager)
//! - [`FileSessionStore`]: a JSON file, for headless machines and containers
//! - [`MemorySessionStore`]: process-local, for tests and one-shot tools
//!
//! Every store keeps the token under the same key, [`AUTH_TOKEN_KEY`].
//!
//! ## Lifecycle
//!
//! | Event | Store operation |
//! |-------|-----------------|
//! | Successful login (consumer) | [`SessionStore::set`] |
//! | Every outbound request | [`SessionStore::get`] |
//! | 401 response | [`SessionStore::clear`] |
//!
//! ## Example
//!
//! ```rust
//! use refdesk::auth::{MemorySessionStore, SessionStore};
//!
//! let store = MemorySessionStore::new();
//! store.set("abc123").unwrap();
//! assert_eq!(store.get().unwrap().as_deref(), Some("abc123"));
//!
//! store.clear().unwrap();
//! assert!(store.get().unwrap().is_none());
//! ```

mod file;
mod keychain;
mod memory;
mod token;

pub use file::*;
pub use keychain::*;
pub use memory::*;
pub use token::*;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{SessionBackend, SessionConfig};

/// Storage key of the Session Credential.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Persisted storage for the Session Credential.
///
/// Implementations must be safe to share between tasks; each operation is
/// atomic with respect to the single key it touches.
pub trait SessionStore: Send + Sync {
    /// Reads the stored token, `None` when no session exists.
    fn get(&self) -> Result<Option<String>, SessionError>;

    /// Stores `token`, replacing any previous one.
    fn set(&self, token: &str) -> Result<(), SessionError>;

    /// Erases the stored token. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), SessionError>;
}

/// Failures raised by a [`SessionStore`].
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Keyring error: {0}")]
    Keyring(#[from] ::keyring::Error),

    #[error("Failed to access token file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Token file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Session store lock poisoned")]
    Poisoned,
}

/// Opens the store selected by the session configuration.
///
/// The file backend uses `config.path` when set, otherwise the default token
/// file in the data directory.
pub fn open_store(config: &SessionConfig) -> anyhow::Result<Arc<dyn SessionStore>> {
    let store: Arc<dyn SessionStore> = match config.backend {
        SessionBackend::Keyring => Arc::new(KeyringSessionStore::new()),
        SessionBackend::File => {
            let path = match &config.path {
                Some(path) => path.clone(),
                None => FileSessionStore::default_path()?,
            };
            Arc::new(FileSessionStore::new(path))
        }
    };
    Ok(store)
}
