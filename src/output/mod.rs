//
//  refdesk
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Rendering for command results. Records are opaque field → value mappings,
//! so output is driven by column lists rather than per-type impls.
//!
//! - **Table format**: `comfy_table` tables for interactive terminal use
//! - **JSON format**: pretty JSON for scripting and automation (`--json`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use refdesk::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Table);
//! writer.write_list(&venues, &["id", "name", "city"])?;
//! writer.write_success("Appointment created");
//! ```

mod json;
mod table;

pub use json::*;
pub use table::*;

use console::style;
use serde_json::Value;

use crate::api::common::{ListResult, Record};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    pub fn json() -> Self {
        Self::new(OutputFormat::Json)
    }

    pub fn table() -> Self {
        Self::new(OutputFormat::Table)
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes a single decoded body.
    ///
    /// Objects render as a two-column field/value table.
    pub fn write_record(&self, value: &Value) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            return write_json(value);
        }
        match value {
            Value::Object(record) => {
                let rows = record.iter().map(|(field, value)| {
                    let text = if field == "status" {
                        format_status(&cell_text(value), self.color)
                    } else {
                        cell_text(value)
                    };
                    vec![field.clone(), text]
                });
                TableBuilder::new()
                    .color(self.color)
                    .headers(["FIELD", "VALUE"])
                    .rows(rows)
                    .print();
            }
            Value::Null => {}
            other => println!("{}", cell_text(other)),
        }
        Ok(())
    }

    /// Writes a list result, showing `preferred` columns when present.
    pub fn write_list(&self, list: &ListResult, preferred: &[&str]) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            return write_json(list);
        }
        if list.is_empty() {
            println!("No records found.");
            return Ok(());
        }

        let columns = resolve_columns(&list.data, preferred);
        let rows = list.data.iter().map(|record| {
            columns
                .iter()
                .map(|column| {
                    let text = record.get(column).map(cell_text).unwrap_or_else(|| "-".to_string());
                    let text = truncate(&text, MAX_CELL_WIDTH);
                    if column == "status" {
                        format_status(&text, self.color)
                    } else {
                        text
                    }
                })
                .collect::<Vec<_>>()
        });

        TableBuilder::new()
            .color(self.color)
            .headers(columns.iter().map(|c| c.to_uppercase()))
            .rows(rows)
            .print();

        match &list.meta {
            Some(meta) => println!(
                "Page {} of {} ({} total)",
                meta.current_page,
                meta.total_pages.max(1),
                meta.count
            ),
            None => println!("Showing {} record(s)", list.len()),
        }
        Ok(())
    }

    pub fn write_error(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    pub fn write_warning(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    pub fn write_info(&self, msg: &str) {
        println!("{}", msg);
    }

    pub fn write_success(&self, msg: &str) {
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Picks table columns: the `preferred` ones present in any record, otherwise
/// the fields of the first record.
pub fn resolve_columns(records: &[Record], preferred: &[&str]) -> Vec<String> {
    let present: Vec<String> = preferred
        .iter()
        .filter(|column| records.iter().any(|record| record.contains_key(**column)))
        .map(|column| column.to_string())
        .collect();
    if !present.is_empty() {
        return present;
    }
    records
        .first()
        .map(|record| record.keys().cloned().collect())
        .unwrap_or_default()
}

/// Prints a labelled field, dimming the label when color is enabled.
pub fn print_field(key: &str, value: &str, color: bool) {
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: Value) -> Vec<Record> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_preferred_columns_kept_in_order() {
        let data = records(json!([{"name": "Rufaro", "id": 1, "city": "Harare"}]));
        assert_eq!(resolve_columns(&data, &["id", "name", "capacity"]), vec!["id", "name"]);
    }

    #[test]
    fn test_falls_back_to_first_record_fields() {
        let data = records(json!([{"code": "ZIFA"}, {"code": "CAF", "extra": true}]));
        assert_eq!(resolve_columns(&data, &["id"]), vec!["code"]);
        assert!(resolve_columns(&[], &["id"]).is_empty());
    }

    #[test]
    fn test_format_from_flag() {
        assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::Table);
    }
}
