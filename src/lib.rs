//
//  refdesk
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # refdesk
//!
//! Client-side data-access layer for the referee appointments service, plus
//! the `refdesk` command-line tool built on it.
//!
//! ## Overview
//!
//! The service manages referees, appointments, availability, venues, teams and
//! matches. This crate mediates every call to it through one configured
//! transport:
//!
//! - **Credential injection**: the stored session token is sent as
//!   `Authorization: Token <value>`
//! - **Session teardown**: a 401 clears the stored token and fires a
//!   session-expired hook
//! - **Error normalization**: every failure carries one human-readable message
//! - **List coercion**: bare, paginated and already-normalized list bodies all
//!   come back as `{ data, meta? }`
//!
//! ## Module Structure
//!
//! - [`api`]: Transport, interceptors and resource facades
//! - [`auth`]: Session stores (keyring, file, memory) and token helpers
//! - [`config`]: Configuration file management
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Output formatting (Table, JSON)
//! - [`interactive`]: Interactive prompts
//! - [`util`]: Argument parsing helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use refdesk::api::ApiClient;
//! use refdesk::api::resources::ListParams;
//! use refdesk::auth::MemorySessionStore;
//!
//! # async fn example() -> Result<(), refdesk::api::ApiError> {
//! let store = Arc::new(MemorySessionStore::with_token("9944b09199c62bcf"));
//! let client = ApiClient::builder("http://localhost:8000/api")
//!     .with_session(store, None)
//!     .build()?;
//!
//! let page = client.appointments().list(&ListParams::default()).await?;
//! for appointment in &page.data {
//!     println!("{:?}", appointment.get("appointment_date"));
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Each command module handles parsing and execution of its respective
/// functionality.
pub mod cli;

/// HTTP transport, interceptor pipeline and per-resource facades.
pub mod api;

/// Session Credential storage.
pub mod auth;

/// Configuration file management.
///
/// - Linux: `~/.config/refdesk/config.toml`
/// - macOS: `~/Library/Application Support/refdesk/config.toml`
/// - Windows: `%APPDATA%\refdesk\config\config.toml`
pub mod config;

/// Output formatting for table and JSON modes.
pub mod output;

/// Interactive terminal prompts.
pub mod interactive;

/// Utility functions and helpers.
pub mod util;

pub use cli::Cli;
pub use config::Config;

/// Application name, used for the binary and configuration paths.
pub const APP_NAME: &str = "refdesk";

/// The current version, from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Scripts can tell authentication and lookup failures apart from other
/// errors.
///
/// ```rust,no_run
/// use refdesk::exit_codes;
///
/// std::process::exit(exit_codes::AUTH_ERROR);
/// ```
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// Not logged in, or the session was rejected.
    ///
    /// Run `refdesk auth login` to authenticate.
    pub const AUTH_ERROR: i32 = 4;

    /// The requested record does not exist.
    pub const NOT_FOUND: i32 = 8;

    /// The service did not answer in time.
    pub const TIMEOUT: i32 = 32;
}
