//
//  refdesk
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use refdesk::api::{ApiError, ErrorKind};
use refdesk::cli::{Cli, Commands, Resource};
use refdesk::exit_codes;

#[tokio::main]
async fn main() {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("REFDESK_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Maps API failures to distinct exit codes.
fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<ApiError>().map(ApiError::kind) {
        Some(ErrorKind::Unauthorized) => exit_codes::AUTH_ERROR,
        Some(ErrorKind::NotFound) => exit_codes::NOT_FOUND,
        Some(ErrorKind::Timeout) => exit_codes::TIMEOUT,
        _ => exit_codes::ERROR,
    }
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Appointments(cmd) => cmd.run(&cli.global).await,
        Commands::Availability(cmd) => cmd.run(&cli.global).await,
        Commands::Referees(cmd) => cmd.run(&cli.global).await,
        Commands::Venues(cmd) => cmd.run(Resource::Venues, &cli.global).await,
        Commands::Teams(cmd) => cmd.run(Resource::Teams, &cli.global).await,
        Commands::Matches(cmd) => cmd.run(Resource::Matches, &cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("refdesk version {}", refdesk::VERSION);
            Ok(())
        }
    }
}
