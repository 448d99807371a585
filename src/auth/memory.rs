//
//  refdesk
//  auth/memory.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Process-local session store.

use std::sync::Mutex;

use super::{SessionError, SessionStore};

/// Keeps the token in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<String>, SessionError> {
        let token = self.token.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(token.clone())
    }

    fn set(&self, token: &str) -> Result<(), SessionError> {
        let mut slot = self.token.lock().map_err(|_| SessionError::Poisoned)?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut slot = self.token.lock().map_err(|_| SessionError::Poisoned)?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_clear() {
        let store = MemorySessionStore::new();
        assert!(store.get().unwrap().is_none());

        store.set("first").unwrap();
        store.set("second").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("second"));

        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
    }
}
