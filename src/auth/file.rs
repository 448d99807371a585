//
//  refdesk
//  auth/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # File Session Store
//!
//! Keeps the Session Credential in a small JSON document:
//!
//! ```json
//! { "authToken": "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b" }
//! ```
//!
//! Other keys in the document are preserved, so the file can be shared with
//! tools that keep their own entries next to the token. A missing or empty
//! file reads as "no session". On Unix the file is written with mode `0600`.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use super::{SessionError, SessionStore, AUTH_TOKEN_KEY};
use crate::config::Config;

/// File name of the default token file inside the data directory.
pub const TOKEN_FILE_NAME: &str = "session.json";

#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/session.json`
    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(Config::data_dir()?.join(TOKEN_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_document(&self) -> Result<Map<String, Value>, SessionError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&content).map_err(|source| SessionError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let content = serde_json::to_string_pretty(document).map_err(|source| {
            SessionError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, content).map_err(|e| self.io_error(e))?;
        restrict_permissions(&self.path).map_err(|e| self.io_error(e))
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<String>, SessionError> {
        let document = self.read_document()?;
        Ok(document
            .get(AUTH_TOKEN_KEY)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn set(&self, token: &str) -> Result<(), SessionError> {
        debug!(path = %self.path.display(), "storing session token");
        let mut document = self.read_document()?;
        document.insert(AUTH_TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_document(&document)
    }

    fn clear(&self) -> Result<(), SessionError> {
        if !self.path.exists() {
            return Ok(());
        }
        debug!(path = %self.path.display(), "removing session token");
        let mut document = self.read_document()?;
        if document.remove(AUTH_TOKEN_KEY).is_some() {
            self.write_document(&document)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_has_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("absent.json"));

        assert!(store.get().unwrap().is_none());
        assert!(store.clear().is_ok());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_round_trip_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/dir/session.json"));

        store.set("abc123").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("abc123"));

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"authToken\""));
    }

    #[test]
    fn test_clear_keeps_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"authToken": "abc", "theme": "dark"}"#).unwrap();

        let store = FileSessionStore::new(&path);
        store.clear().unwrap();

        assert!(store.get().unwrap().is_none());
        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileSessionStore::new(&path).get().unwrap_err();
        assert!(matches!(err, SessionError::Corrupt { .. }));
    }
}
