//
//  refdesk
//  cli/resource.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Read-only reference data: venues, teams and matches.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::common::ListResult;
use crate::util::parse_filters;

use super::{connect, GlobalOptions};

/// Which reference collection a [`ResourceCommand`] works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Venues,
    Teams,
    Matches,
}

impl Resource {
    /// Columns shown in list tables when the records have them.
    fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Venues => &["id", "name", "city", "address", "capacity"],
            Self::Teams => &["id", "name", "short_name", "league", "home_venue"],
            Self::Matches => &["id", "home_team", "away_team", "venue", "match_date", "kickoff_time"],
        }
    }
}

#[derive(Args, Debug)]
pub struct ResourceCommand {
    #[command(subcommand)]
    pub command: ResourceSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ResourceSubcommand {
    /// List records
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View a single record
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter as KEY=VALUE (repeatable); empty values are ignored
    #[arg(long, short = 'f', value_name = "KEY=VALUE")]
    pub filter: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Record identifier
    pub id: String,
}

impl ResourceCommand {
    pub async fn run(&self, resource: Resource, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ResourceSubcommand::List(args) => list(resource, args, global).await,
            ResourceSubcommand::View(args) => view(resource, args, global).await,
        }
    }
}

async fn list(resource: Resource, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
    let conn = connect(global)?;
    let filters = parse_filters(&args.filter)?;

    let result: ListResult = match resource {
        Resource::Venues => conn.client.venues().list(&filters).await?,
        Resource::Teams => conn.client.teams().list(&filters).await?,
        Resource::Matches => conn.client.matches().list(&filters).await?,
    };

    global.writer().write_list(&result, resource.columns())
}

async fn view(resource: Resource, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
    let conn = connect(global)?;

    let record = match resource {
        Resource::Venues => conn.client.venues().get(&args.id).await?,
        Resource::Teams => conn.client.teams().get(&args.id).await?,
        Resource::Matches => {
            conn.client
                .matches()
                .timeout(conn.config.api.match_timeout())
                .get(&args.id)
                .await?
        }
    };

    global.writer().write_record(&record)
}
