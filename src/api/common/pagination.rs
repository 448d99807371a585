//
//  refdesk
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! List Envelopes and the Normalized List Result
//!
//! The remote service answers collection requests in more than one shape.
//! This module decodes those shapes once, into [`ListEnvelope`], and converts
//! them into the single contract consumers rely on, [`ListResult`].
//!
//! # Overview
//!
//! | Body | Variant | `data` |
//! |------|---------|--------|
//! | `[ {...}, {...} ]` | [`ListEnvelope::Bare`] | the sequence |
//! | `{"results": [...], "count": 45, ...}` | [`ListEnvelope::Paginated`] | `results` |
//! | `{"data": [...], "meta": {...}}` | [`ListEnvelope::Normalized`] | `data` (unchanged) |
//! | anything else | [`ListEnvelope::Unrecognized`] | empty |
//!
//! # Example
//!
//! ```rust
//! use refdesk::api::common::coerce_list;
//! use serde_json::json;
//!
//! let wrapped = coerce_list(json!({"results": [{"id": 1}], "count": 1}));
//! let bare = coerce_list(json!([{"id": 1}]));
//! let junk = coerce_list(json!({"unexpected": true}));
//!
//! assert_eq!(wrapped.data, bare.data);
//! assert!(junk.data.is_empty());
//! ```
//!
//! # Notes
//!
//! - A malformed success body is not an error; it yields an empty list
//! - Coercion is idempotent: coercing a serialized [`ListResult`] returns it unchanged
//! - Page counts use the server's `count`; the local data length is only a fallback
//! - Loosely typed metadata never discards records: a numeric cursor is kept
//!   as text, an unreadable `count` is treated as absent, and non-object
//!   elements are skipped

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Record;

/// Page size assumed when computing `total_pages`.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// The server's pagination wrapper.
///
/// `next` and `previous` are whatever cursor or URL the server returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Records on this page.
    #[serde(deserialize_with = "lenient_records")]
    pub results: Vec<Record>,

    /// Total number of records across all pages.
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: Option<u64>,

    /// Cursor or URL of the next page, `None` on the last page.
    #[serde(default, deserialize_with = "lenient_cursor")]
    pub next: Option<String>,

    /// Cursor or URL of the previous page, `None` on the first page.
    #[serde(default, deserialize_with = "lenient_cursor")]
    pub previous: Option<String>,
}

/// Every body shape a collection endpoint may answer with.
///
/// Decoding never fails: anything that matches none of the known shapes
/// lands in [`ListEnvelope::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope {
    /// A bare JSON array of records.
    #[serde(deserialize_with = "lenient_records")]
    Bare(Vec<Record>),

    /// A `{results, count, next, previous}` wrapper.
    Paginated(Page),

    /// A value that has already been normalized.
    Normalized(ListResult),

    /// Any other body (object without a list, scalar, null).
    Unrecognized(Value),
}

impl ListEnvelope {
    /// Decodes a response body into an envelope.
    pub fn from_body(body: Value) -> Self {
        serde_json::from_value(body).unwrap_or(Self::Unrecognized(Value::Null))
    }

    /// Number of records the server says exist, if it said anything.
    pub fn count(&self) -> Option<u64> {
        match self {
            Self::Paginated(page) => page.count,
            Self::Normalized(result) => result.meta.as_ref().map(|m| m.count),
            Self::Bare(_) | Self::Unrecognized(_) => None,
        }
    }

    pub fn next(&self) -> Option<&str> {
        match self {
            Self::Paginated(page) => page.next.as_deref(),
            Self::Normalized(result) => result.meta.as_ref().and_then(|m| m.next.as_deref()),
            Self::Bare(_) | Self::Unrecognized(_) => None,
        }
    }

    pub fn previous(&self) -> Option<&str> {
        match self {
            Self::Paginated(page) => page.previous.as_deref(),
            Self::Normalized(result) => result.meta.as_ref().and_then(|m| m.previous.as_deref()),
            Self::Bare(_) | Self::Unrecognized(_) => None,
        }
    }

    /// The records, whatever the shape. Unrecognized bodies yield none.
    pub fn into_records(self) -> Vec<Record> {
        match self {
            Self::Bare(records) => records,
            Self::Paginated(page) => page.results,
            Self::Normalized(result) => result.data,
            Self::Unrecognized(_) => Vec::new(),
        }
    }

    /// Converts into a [`ListResult`] carrying pagination metadata for the
    /// requested `page`.
    ///
    /// `count` falls back to the number of records when the server sent none.
    pub fn into_paged(self, page: u32, page_size: u32) -> ListResult {
        let next = self.next().map(str::to_string);
        let previous = self.previous().map(str::to_string);
        let count = self.count();
        let data = self.into_records();
        let count = count.unwrap_or(data.len() as u64);

        ListResult {
            data,
            meta: Some(ListMeta {
                count,
                next,
                previous,
                current_page: page,
                total_pages: total_pages(count, page_size),
            }),
        }
    }
}

impl From<ListEnvelope> for ListResult {
    fn from(envelope: ListEnvelope) -> Self {
        match envelope {
            ListEnvelope::Normalized(result) => result,
            other => Self {
                data: other.into_records(),
                meta: None,
            },
        }
    }
}

/// Pagination metadata attached to appointment listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMeta {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub current_page: u32,
    pub total_pages: u64,
}

/// The list contract every facade list operation returns.
///
/// `data` is always a sequence, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListResult {
    #[serde(deserialize_with = "lenient_records")]
    pub data: Vec<Record>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ListMeta>,
}

impl ListResult {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Applies list coercion to a raw body.
pub fn coerce_list(body: Value) -> ListResult {
    ListEnvelope::from_body(body).into()
}

/// Keeps the object elements of a sequence; anything else is skipped.
fn lenient_records<'de, D>(deserializer: D) -> Result<Vec<Record>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Vec::<Value>::deserialize(deserializer)?;
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(record) => Some(record),
            _ => None,
        })
        .collect())
}

/// Reads `count` from an integer, a non-negative float or a numeric string.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f as u64)
        }),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Reads a page cursor that may be a URL, an opaque string or a page number.
fn lenient_cursor<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Number of pages needed for `count` records, `ceil(count / page_size)`.
///
/// A zero page size yields zero pages rather than dividing by zero.
pub fn total_pages(count: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(u64::from(page_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(result: &ListResult) -> Vec<i64> {
        result
            .data
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_i64))
            .collect()
    }

    #[test]
    fn test_bare_sequence() {
        let result = coerce_list(json!([{"id": 1}, {"id": 2}]));
        assert_eq!(ids(&result), [1, 2]);
        assert!(result.meta.is_none());
    }

    #[test]
    fn test_results_wrapper() {
        let result = coerce_list(json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [{"id": 3}, {"id": 4}]
        }));
        assert_eq!(ids(&result), [3, 4]);
    }

    #[test]
    fn test_unrecognized_shapes_become_empty() {
        for body in [
            json!({"id": 9, "name": "single object"}),
            json!({"results": "not a list"}),
            json!("plain text"),
            json!(null),
            json!(42),
        ] {
            assert!(coerce_list(body).data.is_empty());
        }
    }

    #[test]
    fn test_coercion_is_idempotent() {
        let once = coerce_list(json!({"results": [{"id": 1}], "count": 1}));
        let twice = coerce_list(serde_json::to_value(&once).unwrap());
        assert_eq!(once, twice);

        let paged = ListEnvelope::from_body(json!({"results": [{"id": 1}], "count": 41}))
            .into_paged(2, DEFAULT_PAGE_SIZE);
        let again = coerce_list(serde_json::to_value(&paged).unwrap());
        assert_eq!(paged, again);
    }

    #[test]
    fn test_loose_metadata_keeps_results() {
        let envelope = ListEnvelope::from_body(json!({"results": [{"id": 1}], "next": 2}));
        assert_eq!(envelope.next(), Some("2"));
        assert_eq!(ids(&envelope.into()), [1]);

        for body in [
            json!({"results": [{"id": 1}], "count": "1"}),
            json!({"results": [{"id": 1}], "count": 1.0}),
            json!({"results": [{"id": 1}], "count": "many", "previous": false}),
            json!({"results": [{"id": 1}, null, 7]}),
            json!([{"id": 1}, null]),
            json!({"data": [{"id": 1}, "stray"]}),
        ] {
            assert_eq!(ids(&coerce_list(body.clone())), [1], "body: {body}");
        }
    }

    #[test]
    fn test_loose_count_feeds_page_totals() {
        let meta = ListEnvelope::from_body(json!({"results": [{"id": 1}], "count": "45"}))
            .into_paged(1, DEFAULT_PAGE_SIZE)
            .meta
            .unwrap();
        assert_eq!(meta.count, 45);
        assert_eq!(meta.total_pages, 3);

        let meta = ListEnvelope::from_body(json!({"results": [{"id": 1}, {"id": 2}], "count": null}))
            .into_paged(1, DEFAULT_PAGE_SIZE)
            .meta
            .unwrap();
        assert_eq!(meta.count, 2);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(45, 20), 3);
        assert_eq!(total_pages(40, 20), 2);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(10, 0), 0);
    }

    #[test]
    fn test_paged_meta_from_wrapper() {
        let envelope = ListEnvelope::from_body(json!({
            "count": 45,
            "next": "http://svc/appointments/?page=3",
            "previous": "http://svc/appointments/?page=1",
            "results": [{"id": 21}]
        }));
        let result = envelope.into_paged(2, DEFAULT_PAGE_SIZE);
        let meta = result.meta.unwrap();

        assert_eq!(meta.count, 45);
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.next.as_deref(), Some("http://svc/appointments/?page=3"));
        assert_eq!(meta.previous.as_deref(), Some("http://svc/appointments/?page=1"));
    }

    #[test]
    fn test_paged_meta_counts_bare_sequence() {
        let envelope = ListEnvelope::from_body(json!([{"id": 1}, {"id": 2}, {"id": 3}]));
        let meta = envelope.into_paged(1, DEFAULT_PAGE_SIZE).meta.unwrap();

        assert_eq!(meta.count, 3);
        assert_eq!(meta.total_pages, 1);
        assert!(meta.next.is_none());
    }
}
