//
//  refdesk
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Reads and writes `config.toml` using dotted keys such as `api.base_url`.
//! Command-line overrides (`--base-url`, `--token-file`) are never persisted.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::{Config, CONFIG_KEYS};

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key, e.g. api.base_url
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key, e.g. api.timeout_ms
    pub key: String,

    /// Configuration value
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => get(args),
            ConfigSubcommand::Set(args) => set(args),
            ConfigSubcommand::List => list(global),
            ConfigSubcommand::Path => {
                println!("{}", Config::config_path()?.display());
                Ok(())
            }
        }
    }
}

fn get(args: &GetArgs) -> Result<()> {
    if !CONFIG_KEYS.contains(&args.key.as_str()) {
        bail!(
            "Unknown config key '{}'. Valid keys: {}",
            args.key,
            CONFIG_KEYS.join(", ")
        );
    }
    let config = Config::load()?;
    match config.get(&args.key) {
        Some(value) => println!("{}", value),
        None => println!("{}", style("(not set)").dim()),
    }
    Ok(())
}

fn set(args: &SetArgs) -> Result<()> {
    let mut config = Config::load()?;
    config.set(&args.key, &args.value)?;
    config.save()?;
    println!("{} Set {} to {}", style("✓").green(), args.key, args.value);
    Ok(())
}

fn list(global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;
    if global.json {
        return crate::output::write_json(&config);
    }
    for key in CONFIG_KEYS {
        let value = config.get(key).unwrap_or_else(|| "(not set)".to_string());
        println!("{} = {}", style(key).cyan(), value);
    }
    Ok(())
}
