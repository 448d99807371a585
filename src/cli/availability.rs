//
//  refdesk
//  cli/availability.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Availability commands

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::{json, Map, Value};

use crate::util::{id_value, parse_date, parse_filters};

use super::{connect, GlobalOptions};

const COLUMNS: &[&str] = &["id", "referee", "date", "start_time", "end_time", "available"];

/// Manage referee availability
#[derive(Args, Debug)]
pub struct AvailabilityCommand {
    #[command(subcommand)]
    pub command: AvailabilitySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AvailabilitySubcommand {
    /// List availability slots
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Declare an availability slot
    Add(AddArgs),

    /// Remove an availability slot
    #[command(visible_alias = "rm")]
    Remove(RemoveArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter as KEY=VALUE (repeatable); empty values are ignored
    #[arg(long, short = 'f', value_name = "KEY=VALUE")]
    pub filter: Vec<String>,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Date of the slot (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Referee identifier (defaults to the logged-in referee server-side)
    #[arg(long)]
    pub referee: Option<String>,

    /// Start of the slot (HH:MM)
    #[arg(long)]
    pub start: Option<String>,

    /// End of the slot (HH:MM)
    #[arg(long)]
    pub end: Option<String>,

    /// Mark the slot as unavailable instead
    #[arg(long)]
    pub unavailable: bool,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Availability slot identifier
    pub id: String,
}

impl AvailabilityCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AvailabilitySubcommand::List(args) => list(args, global).await,
            AvailabilitySubcommand::Add(args) => add(args, global).await,
            AvailabilitySubcommand::Remove(args) => remove(args, global).await,
        }
    }
}

impl AddArgs {
    fn to_payload(&self) -> Result<Value> {
        let mut payload = Map::new();
        payload.insert("date".into(), json!(parse_date(&self.date)?.to_string()));
        payload.insert("available".into(), json!(!self.unavailable));
        if let Some(referee) = &self.referee {
            payload.insert("referee".into(), id_value(referee));
        }
        if let Some(start) = &self.start {
            payload.insert("start_time".into(), json!(start));
        }
        if let Some(end) = &self.end {
            payload.insert("end_time".into(), json!(end));
        }
        Ok(Value::Object(payload))
    }
}

async fn list(args: &ListArgs, global: &GlobalOptions) -> Result<()> {
    let conn = connect(global)?;
    let slots = conn.client.availability().list(&parse_filters(&args.filter)?).await?;
    global.writer().write_list(&slots, COLUMNS)
}

async fn add(args: &AddArgs, global: &GlobalOptions) -> Result<()> {
    let payload = args.to_payload()?;
    let conn = connect(global)?;
    let created = conn.client.availability().create(payload).await?;

    let writer = global.writer();
    if !global.json {
        writer.write_success(&format!("Availability added for {}", args.date));
    }
    writer.write_record(&created)
}

async fn remove(args: &RemoveArgs, global: &GlobalOptions) -> Result<()> {
    let conn = connect(global)?;
    conn.client.availability().delete(&args.id).await?;
    global
        .writer()
        .write_success(&format!("Availability {} removed", args.id));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_payload() {
        let args = AddArgs {
            date: "2026-04-01".to_string(),
            referee: Some("9".to_string()),
            start: Some("08:00".to_string()),
            end: None,
            unavailable: false,
        };
        assert_eq!(
            args.to_payload().unwrap(),
            json!({"date": "2026-04-01", "available": true, "referee": 9, "start_time": "08:00"})
        );
    }
}
