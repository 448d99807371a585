//
//  refdesk
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Argument parsing helpers shared by the command-line tool.
//!
//! - **Filters**: [`parse_filter`], [`parse_filters`] turn `key=value` pairs into [`Filters`]
//! - **Dates**: [`parse_date`] validates `YYYY-MM-DD`
//! - **Identifiers**: [`id_value`] keeps numeric ids numeric in JSON payloads
//!
//! ## Example
//!
//! ```rust
//! use refdesk::util::{parse_filters, parse_date};
//!
//! let filters = parse_filters(&["status=upcoming".to_string(), "venue=4".to_string()])?;
//! assert_eq!(filters.to_query().len(), 2);
//!
//! assert!(parse_date("2026-03-14").is_ok());
//! assert!(parse_date("14/03/2026").is_err());
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde_json::Value;

use crate::api::common::Filters;

/// Date format the service expects for `appointment_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Splits a `key=value` filter argument.
///
/// The value may be empty (`venue=`), in which case the filter is dropped
/// when the query string is built.
pub fn parse_filter(arg: &str) -> Result<(String, String)> {
    let Some((key, value)) = arg.split_once('=') else {
        bail!("Invalid filter '{}': expected KEY=VALUE", arg);
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("Invalid filter '{}': key is empty", arg);
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Parses every `key=value` argument into [`Filters`], in order.
pub fn parse_filters(args: &[String]) -> Result<Filters> {
    let mut filters = Filters::new();
    for arg in args {
        let (key, value) = parse_filter(arg)?;
        filters.insert(key, Some(value.into()));
    }
    Ok(filters)
}

/// Validates a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .with_context(|| format!("Invalid date '{}': expected YYYY-MM-DD", s))
}

/// Converts an identifier argument into JSON: digits become a number,
/// anything else stays a string.
pub fn id_value(s: &str) -> Value {
    match s.trim().parse::<u64>() {
        Ok(n) => Value::from(n),
        Err(_) => Value::String(s.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::QueryValue;

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("team=Dynamos").unwrap(),
            ("team".to_string(), "Dynamos".to_string())
        );
        assert_eq!(
            parse_filter("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
        assert!(parse_filter("team").is_err());
        assert!(parse_filter("=x").is_err());
    }

    #[test]
    fn test_empty_filter_values_are_dropped_from_query() {
        let filters = parse_filters(&["team=A".to_string(), "venue=".to_string()]).unwrap();
        assert_eq!(
            filters.to_query(),
            vec![("team".to_string(), QueryValue::from("A"))]
        );
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-03-14").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
        );
        assert!(parse_date("2026-02-30").is_err());
        assert!(parse_date("tomorrow").is_err());
    }

    #[test]
    fn test_id_value() {
        assert_eq!(id_value("42"), Value::from(42_u64));
        assert_eq!(id_value("ref-7"), Value::from("ref-7"));
    }
}
