//
//  refdesk
//  cli/referee.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Referee commands

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde_json::{Map, Value};

use crate::util::{parse_filter, parse_filters};

use super::{connect, GlobalOptions};

const COLUMNS: &[&str] = &["id", "first_name", "last_name", "level", "region", "phone"];

/// Browse and update referees
#[derive(Args, Debug)]
pub struct RefereeCommand {
    #[command(subcommand)]
    pub command: RefereeSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RefereeSubcommand {
    /// List referees
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View a referee profile
    View(ViewArgs),

    /// Update fields of a referee profile
    Update(UpdateArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter as KEY=VALUE (repeatable); empty values are ignored
    #[arg(long, short = 'f', value_name = "KEY=VALUE")]
    pub filter: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Referee identifier
    pub id: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Referee identifier
    pub id: String,

    /// Field to change as KEY=VALUE (repeatable)
    #[arg(long = "set", short = 's', value_name = "KEY=VALUE", required = true)]
    pub fields: Vec<String>,
}

impl RefereeCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            RefereeSubcommand::List(args) => list(args, global).await,
            RefereeSubcommand::View(args) => view(args, global).await,
            RefereeSubcommand::Update(args) => update(args, global).await,
        }
    }
}

async fn list(args: &ListArgs, global: &GlobalOptions) -> Result<()> {
    let conn = connect(global)?;
    let referees = conn.client.referees().list(&parse_filters(&args.filter)?).await?;
    global.writer().write_list(&referees, COLUMNS)
}

async fn view(args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
    let conn = connect(global)?;
    let referee = conn.client.referees().get(&args.id).await?;
    global.writer().write_record(&referee)
}

async fn update(args: &UpdateArgs, global: &GlobalOptions) -> Result<()> {
    let fields = patch_fields(&args.fields)?;
    let conn = connect(global)?;
    let referee = conn.client.referees().update(&args.id, fields).await?;

    let writer = global.writer();
    if !global.json {
        writer.write_success(&format!("Updated referee {}", args.id));
    }
    writer.write_record(&referee)
}

/// Builds a PATCH body from `KEY=VALUE` pairs. Values that parse as JSON
/// scalars (numbers, booleans, null) keep their type.
fn patch_fields(pairs: &[String]) -> Result<Value> {
    let mut fields = Map::new();
    for pair in pairs {
        let (key, value) = parse_filter(pair)?;
        let value = match serde_json::from_str::<Value>(&value) {
            Ok(parsed) if !parsed.is_object() && !parsed.is_array() => parsed,
            _ => Value::String(value),
        };
        fields.insert(key, value);
    }
    if fields.is_empty() {
        bail!("Nothing to update: pass at least one --set KEY=VALUE");
    }
    Ok(Value::Object(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patch_fields_keep_scalar_types() {
        let fields = patch_fields(&[
            "level=national".to_string(),
            "active=true".to_string(),
            "years=12".to_string(),
        ])
        .unwrap();
        assert_eq!(fields, json!({"level": "national", "active": true, "years": 12}));
    }

    #[test]
    fn test_patch_fields_requires_pairs() {
        assert!(patch_fields(&[]).is_err());
        assert!(patch_fields(&["level".to_string()]).is_err());
    }
}
