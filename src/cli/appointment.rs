//
//  refdesk
//  cli/appointment.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Appointment commands
//!
//! Appointments put a referee on a match at a venue. Listing is paginated
//! server-side; create and update go through the facade's payload shaping, so
//! `--time 15` is sent as `15:00` and a missing `--distance` as `0`.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::Value;

use crate::api::resources::{AppointmentFields, ListParams};
use crate::interactive::prompt_confirm_with_default;
use crate::util::{id_value, parse_date, parse_filters};

use super::{connect, GlobalOptions};

const COLUMNS: &[&str] = &[
    "id",
    "appointment_date",
    "appointment_time",
    "referee",
    "venue",
    "match",
    "status",
];

/// Manage referee appointments
#[derive(Args, Debug)]
pub struct AppointmentCommand {
    #[command(subcommand)]
    pub command: AppointmentSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AppointmentSubcommand {
    /// List appointments, newest first
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View an appointment
    View(ViewArgs),

    /// Create an appointment
    Create(CreateArgs),

    /// Update an appointment
    #[command(visible_alias = "edit")]
    Update(UpdateArgs),

    /// Delete an appointment
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page to fetch
    #[arg(long, short = 'p', default_value = "1")]
    pub page: u32,

    /// Records per page (defaults to api.page_size)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Server-side ordering
    #[arg(long)]
    pub ordering: Option<String>,

    /// Filter as KEY=VALUE (repeatable); empty values are ignored
    #[arg(long, short = 'f', value_name = "KEY=VALUE")]
    pub filter: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Appointment identifier
    pub id: String,
}

/// Fields shared by create and update.
#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    /// Referee identifier
    #[arg(long)]
    pub referee: Option<String>,

    /// Venue identifier
    #[arg(long)]
    pub venue: Option<String>,

    /// Match identifier
    #[arg(long = "match", value_name = "MATCH")]
    pub match_id: Option<String>,

    /// Appointment date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Appointment time: HH, HH:MM or HH:MM:SS
    #[arg(long)]
    pub time: Option<String>,

    /// Travel distance in kilometres
    #[arg(long)]
    pub distance: Option<f64>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Appointment identifier
    pub id: String,

    #[command(flatten)]
    pub fields: FieldArgs,

    /// New status
    #[arg(long, value_parser = ["upcoming", "accepted", "declined", "completed", "cancelled"])]
    pub status: Option<String>,

    /// Reason given when declining
    #[arg(long)]
    pub decline_reason: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Appointment identifier
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl AppointmentCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AppointmentSubcommand::List(args) => list(args, global).await,
            AppointmentSubcommand::View(args) => view(args, global).await,
            AppointmentSubcommand::Create(args) => create(args, global).await,
            AppointmentSubcommand::Update(args) => update(args, global).await,
            AppointmentSubcommand::Delete(args) => delete(args, global).await,
        }
    }
}

impl FieldArgs {
    /// Converts flags into facade fields, validating the date.
    fn to_fields(&self) -> Result<AppointmentFields> {
        let appointment_date = match &self.date {
            Some(date) => Some(Value::String(parse_date(date)?.to_string())),
            None => None,
        };
        Ok(AppointmentFields {
            referee: self.referee.as_deref().map(id_value),
            venue: self.venue.as_deref().map(id_value),
            match_id: self.match_id.as_deref().map(id_value),
            appointment_date,
            appointment_time: self.time.clone().map(Value::String),
            distance: self.distance.map(Value::from),
            ..AppointmentFields::default()
        })
    }
}

async fn list(args: &ListArgs, global: &GlobalOptions) -> Result<()> {
    let conn = connect(global)?;

    let mut params = ListParams::page(args.page)
        .page_size(args.page_size.unwrap_or(conn.config.api.page_size))
        .filters(parse_filters(&args.filter)?);
    if let Some(ordering) = &args.ordering {
        params = params.ordering(ordering.clone());
    }

    let appointments = conn.client.appointments().list(&params).await?;
    global.writer().write_list(&appointments, COLUMNS)
}

async fn view(args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
    let conn = connect(global)?;
    let appointment = conn.client.appointments().get(&args.id).await?;
    global.writer().write_record(&appointment)
}

async fn create(args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
    let fields = args.fields.to_fields()?;
    let conn = connect(global)?;
    let created = conn.client.appointments().create(fields).await?;

    let writer = global.writer();
    if !global.json {
        writer.write_success("Appointment created");
    }
    writer.write_record(&created)
}

async fn update(args: &UpdateArgs, global: &GlobalOptions) -> Result<()> {
    let mut fields = args.fields.to_fields()?;
    fields.appointment_id = Some(id_value(&args.id));
    fields.status = args.status.clone();
    fields.decline_reason = args.decline_reason.clone();

    let conn = connect(global)?;
    let updated = conn.client.appointments().update(&args.id, fields).await?;

    let writer = global.writer();
    if !global.json {
        writer.write_success(&format!("Appointment {} updated", args.id));
    }
    writer.write_record(&updated)
}

async fn delete(args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
    if !args.yes
        && !prompt_confirm_with_default(&format!("Delete appointment {}?", args.id), false)?
    {
        println!("Cancelled.");
        return Ok(());
    }

    let conn = connect(global)?;
    conn.client.appointments().delete(&args.id).await?;
    global
        .writer()
        .write_success(&format!("Appointment {} deleted", args.id));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_args_conversion() {
        let args = FieldArgs {
            referee: Some("4".to_string()),
            venue: Some("rufaro".to_string()),
            match_id: None,
            date: Some("2026-03-14".to_string()),
            time: Some("15".to_string()),
            distance: Some(12.5),
        };
        let fields = args.to_fields().unwrap();

        assert_eq!(fields.referee, Some(json!(4)));
        assert_eq!(fields.venue, Some(json!("rufaro")));
        assert_eq!(fields.match_id, None);
        assert_eq!(fields.appointment_date, Some(json!("2026-03-14")));
        assert_eq!(fields.appointment_time, Some(json!("15")));
        assert_eq!(fields.distance, Some(json!(12.5)));
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let args = FieldArgs {
            date: Some("14-03-2026".to_string()),
            ..FieldArgs::default()
        };
        assert!(args.to_fields().is_err());
    }
}
