//
//  refdesk
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod appointment;
mod auth;
mod availability;
mod completion;
mod config;
mod referee;
mod resource;

pub use appointment::AppointmentCommand;
pub use auth::AuthCommand;
pub use availability::AvailabilityCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use referee::RefereeCommand;
pub use resource::{Resource, ResourceCommand};

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;

use crate::api::{ApiClient, SessionExpiredHook};
use crate::auth::{open_store, SessionStore};
use crate::config::{Config, SessionBackend};
use crate::output::{OutputFormat, OutputWriter};

/// refdesk - Manage referee appointments from the command line
#[derive(Parser, Debug)]
#[command(
    name = "refdesk",
    version,
    about = "Manage referee appointments from the command line",
    long_about = "refdesk talks to the referee service API.\n\n\
                  It lists and edits appointments, availability, referees, venues, teams and matches.",
    propagate_version = true,
    after_help = "Use 'refdesk <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Base URL of the referee service API
    #[arg(long, global = true, env = "REFDESK_BASE_URL")]
    pub base_url: Option<String>,

    /// Keep the session token in this file instead of the keyring
    #[arg(long, global = true, env = "REFDESK_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in, log out and inspect the current session
    Auth(AuthCommand),

    /// Manage referee appointments
    #[command(visible_alias = "appt")]
    Appointments(AppointmentCommand),

    /// Manage referee availability
    #[command(visible_alias = "avail")]
    Availability(AvailabilityCommand),

    /// Browse and update referees
    Referees(RefereeCommand),

    /// Browse venues
    Venues(ResourceCommand),

    /// Browse teams
    Teams(ResourceCommand),

    /// Browse matches
    Matches(ResourceCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}

/// Printed when the service rejects the stored session.
pub const SESSION_EXPIRED_HINT: &str = "Session expired — run 'refdesk auth login'";

impl GlobalOptions {
    pub fn format(&self) -> OutputFormat {
        OutputFormat::from_json_flag(self.json)
    }

    pub fn writer(&self) -> OutputWriter {
        OutputWriter::new(self.format())
    }

    /// Loads the config file and applies command-line overrides.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load()?;
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(path) = &self.token_file {
            config.session.backend = SessionBackend::File;
            config.session.path = Some(path.clone());
        }
        Ok(config)
    }
}

/// Everything a command needs to talk to the service.
pub(crate) struct Connection {
    pub config: Config,
    pub store: Arc<dyn SessionStore>,
    pub client: ApiClient,
}

/// Opens the configured session store and builds the client around it.
///
/// The session-expired hook prints [`SESSION_EXPIRED_HINT`].
pub(crate) fn connect(global: &GlobalOptions) -> Result<Connection> {
    let config = global.load_config()?;
    let store = open_store(&config.session)?;
    let hook: SessionExpiredHook = Arc::new(|| {
        eprintln!("{}", style(SESSION_EXPIRED_HINT).yellow());
    });
    let client = ApiClient::from_config(&config, Arc::clone(&store), Some(hook))?;
    Ok(Connection {
        config,
        store,
        client,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_parse_anywhere() {
        let cli = Cli::try_parse_from([
            "refdesk",
            "venues",
            "list",
            "--json",
            "--base-url",
            "http://127.0.0.1:9000/api",
        ])
        .unwrap();
        assert!(cli.global.json);
        assert_eq!(cli.global.base_url.as_deref(), Some("http://127.0.0.1:9000/api"));
    }
}
