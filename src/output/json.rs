//
//  refdesk
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON Output
//!
//! Pretty-printed JSON for `--json`, so command output can be piped into `jq`
//! or consumed by scripts.
//!
//! ```rust,ignore
//! use refdesk::output::write_json;
//! use serde_json::json;
//!
//! write_json(&json!({"id": 4, "status": "upcoming"}))?;
//! ```

use std::io::Write;

use serde::Serialize;

/// Writes `value` as pretty JSON to stdout.
pub fn write_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_json_to(&mut handle, value)
}

/// Writes `value` as pretty JSON followed by a newline to `writer`.
pub fn write_json_to<W: Write, T: Serialize>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_json_to_buffer() {
        let mut buffer = Vec::new();
        write_json_to(&mut buffer, &json!({"data": [], "meta": {"count": 0}})).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.ends_with("}\n"));
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["meta"]["count"], 0);
    }
}
