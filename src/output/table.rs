//
//  refdesk
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Output Formatting
//!
//! Utilities for rendering records in the terminal with `comfy_table`.
//!
//! ## Features
//!
//! - Builder pattern for constructing tables with headers and rows
//! - Automatic color detection and application
//! - Appointment status colouring
//! - Cell rendering for arbitrary JSON values
//!
//! ## Example
//!
//! ```rust,ignore
//! use refdesk::output::TableBuilder;
//!
//! TableBuilder::new()
//!     .headers(["ID", "Venue", "Status"])
//!     .row(["1", "National Sports Stadium", "upcoming"])
//!     .print();
//! ```

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use serde_json::Value;

/// Longest cell rendered before truncation.
pub const MAX_CELL_WIDTH: usize = 40;

pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// A builder for constructing formatted tables.
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Header cells are cyan when color is enabled.
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if self.color {
            let cells: Vec<Cell> = headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)).collect();
            self.table.set_header(cells);
        } else {
            self.table.set_header(headers);
        }
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();
        self.table.add_row(row);
        self
    }

    pub fn rows<I, R, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            let row: Vec<String> = row.into_iter().map(Into::into).collect();
            self.table.add_row(row);
        }
        self
    }

    pub fn print(self) {
        println!("{}", self.table);
    }

    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Colours an appointment status.
pub fn format_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }

    use console::style;
    match status.to_lowercase().as_str() {
        "upcoming" | "pending" => style(status).yellow().to_string(),
        "accepted" | "confirmed" => style(status).green().to_string(),
        "completed" => style(status).blue().to_string(),
        "declined" | "cancelled" => style(status).red().to_string(),
        _ => status.to_string(),
    }
}

/// Renders a JSON value as cell text.
///
/// Strings are shown without quotes, `null` as `-`. Nested objects show their
/// `name` or `id` when they have one.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) if s.is_empty() => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(cell_text).collect::<Vec<_>>().join(", "),
        Value::Object(map) => ["name", "id"]
            .iter()
            .find_map(|key| map.get(*key))
            .map(cell_text)
            .unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}

/// Truncates to `max_len` characters, ending in `...` when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&json!(null)), "-");
        assert_eq!(cell_text(&json!("Harare")), "Harare");
        assert_eq!(cell_text(&json!(12.5)), "12.5");
        assert_eq!(cell_text(&json!({"id": 3, "name": "Dynamos"})), "Dynamos");
        assert_eq!(cell_text(&json!({"id": 3})), "3");
        assert_eq!(cell_text(&json!(["a", "b"])), "a, b");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Rufaro Stadium, Mbare", 10), "Rufaro ...");
        assert_eq!(truncate("Zürich Zürich", 8), "Züric...");
    }

    #[test]
    fn test_status_without_color() {
        assert_eq!(format_status("upcoming", false), "upcoming");
    }
}
