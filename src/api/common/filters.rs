//
//  refdesk
//  api/common/filters.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Query-string values and filter serialization.
//!
//! List operations accept a [`Filters`] mapping. A filter only reaches the
//! query string when it carries a value that is not the empty string, so a
//! form can hand over every field it has without pruning unset ones first.
//!
//! ```rust
//! use refdesk::api::common::Filters;
//!
//! let filters = Filters::new()
//!     .with("team", "A")
//!     .with("venue", "")
//!     .with_opt("date", None::<&str>);
//!
//! let query = filters.to_query();
//! assert_eq!(query.len(), 1);
//! assert_eq!(query[0].0, "team");
//! ```

use std::fmt;

/// A single query-string value: text, number or boolean.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl QueryValue {
    /// Returns `true` for the empty string, which filters treat as "unset".
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Insertion-ordered filter mapping for list operations.
///
/// Setting a key twice replaces the earlier value in place, keeping its
/// original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    entries: Vec<(String, Option<QueryValue>)>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to a defined value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, Some(value.into()));
        self
    }

    /// Sets `key` to a value that may be missing.
    pub fn with_opt<V: Into<QueryValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.insert(key, value.map(Into::into));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Option<QueryValue>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }

    /// The query parameters this mapping contributes, in insertion order.
    ///
    /// Missing values and empty strings are skipped.
    pub fn to_query(&self) -> Vec<(String, QueryValue)> {
        self.entries
            .iter()
            .filter_map(|(key, value)| match value {
                Some(v) if !v.is_blank() => Some((key.clone(), v.clone())),
                _ => None,
            })
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Filters
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = Self::new();
        for (key, value) in iter {
            filters.insert(key, Some(value.into()));
        }
        filters
    }
}
