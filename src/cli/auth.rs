//
//  refdesk
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands.
//!
//! Login exchanges a username and password for a token and stores it in the
//! configured session store; every later command sends it as
//! `Authorization: Token <value>`.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde_json::{Map, Value};

use crate::api::resources::Credentials;
use crate::auth::{read_token_from_stdin, token_from_login_response, validate_token};
use crate::interactive::{prompt_input, prompt_input_optional, prompt_password, prompt_password_confirm};
use crate::output::print_field;

use super::{connect, GlobalOptions};

/// Log in, log out and inspect the current session.
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in to the referee service
    Login(LoginArgs),

    /// Log out and forget the stored session
    Logout,

    /// Show the current user
    Status,

    /// Create a new account
    Register(RegisterArgs),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username (prompted when omitted)
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Read an existing token from standard input instead
    #[arg(long, conflicts_with = "username")]
    pub with_token: bool,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Username (prompted when omitted)
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Email address (prompted when omitted)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args, global).await,
            AuthSubcommand::Logout => logout(global).await,
            AuthSubcommand::Status => status(global).await,
            AuthSubcommand::Register(args) => register(args, global).await,
        }
    }
}

/// Best display name for a user record.
fn display_name(user: &Value) -> Option<String> {
    ["username", "email"]
        .iter()
        .find_map(|field| user.get(*field).and_then(Value::as_str))
        .map(str::to_string)
}

async fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let conn = connect(global)?;
    let writer = global.writer();

    if args.with_token {
        let token = read_token_from_stdin()?;
        if !validate_token(&token) {
            bail!("Invalid token format");
        }
        conn.store.set(&token).context("Failed to store session token")?;

        let user = conn.client.auth().current_user().await?;
        let name = display_name(&user).unwrap_or_else(|| "current user".to_string());
        writer.write_success(&format!("Logged in as {}", name));
        return Ok(());
    }

    let username = match &args.username {
        Some(username) => username.clone(),
        None => prompt_input("Username")?,
    };
    let password = prompt_password("Password")?;

    let response = conn
        .client
        .auth()
        .login(&Credentials::new(username.clone(), password))
        .await?;
    let token = token_from_login_response(&response)
        .context("Login succeeded but the response carried no token")?;
    conn.store.set(&token).context("Failed to store session token")?;

    writer.write_success(&format!("Logged in to {} as {}", conn.config.api.base_url, username));
    Ok(())
}

async fn logout(global: &GlobalOptions) -> Result<()> {
    let conn = connect(global)?;
    let writer = global.writer();

    if conn.store.get()?.is_none() {
        writer.write_info("Not logged in.");
        return Ok(());
    }

    if let Err(e) = conn.client.auth().logout().await {
        writer.write_warning(&format!("Server logout failed: {}", e.message()));
    }
    conn.store.clear().context("Failed to clear session token")?;

    writer.write_success("Logged out");
    Ok(())
}

async fn status(global: &GlobalOptions) -> Result<()> {
    let conn = connect(global)?;
    let writer = global.writer();

    if conn.store.get()?.is_none() {
        bail!("Not logged in. Run 'refdesk auth login' to authenticate.");
    }

    let user = conn.client.auth().current_user().await?;
    if global.json {
        return writer.write_record(&user);
    }

    let color = writer.color_enabled();
    print_field("Server", &conn.config.api.base_url, color);
    print_field("Session", &conn.config.session.backend.to_string(), color);
    if let Some(name) = display_name(&user) {
        print_field("User", &name, color);
    }
    for field in ["email", "role"] {
        if let Some(value) = user.get(field).and_then(Value::as_str) {
            print_field(field, value, color);
        }
    }
    Ok(())
}

async fn register(args: &RegisterArgs, global: &GlobalOptions) -> Result<()> {
    let username = match &args.username {
        Some(username) => username.clone(),
        None => prompt_input("Username")?,
    };
    let email = match &args.email {
        Some(email) => email.clone(),
        None => prompt_input("Email")?,
    };
    let first_name = match &args.first_name {
        Some(name) => Some(name.clone()),
        None => prompt_input_optional("First name (optional)")?,
    };
    let password = prompt_password_confirm("Password")?;

    let mut payload = Map::new();
    payload.insert("username".into(), Value::String(username.clone()));
    payload.insert("email".into(), Value::String(email));
    payload.insert("password".into(), Value::String(password));
    if let Some(first_name) = first_name {
        payload.insert("first_name".into(), Value::String(first_name));
    }
    if let Some(last_name) = &args.last_name {
        payload.insert("last_name".into(), Value::String(last_name.clone()));
    }

    let conn = connect(global)?;
    let response = conn.client.auth().register(Value::Object(payload)).await?;

    let writer = global.writer();
    match token_from_login_response(&response) {
        Some(token) => {
            conn.store.set(&token).context("Failed to store session token")?;
            writer.write_success(&format!("Registered and logged in as {}", username));
        }
        None => writer.write_success(&format!(
            "Registered {}. Run 'refdesk auth login' to sign in.",
            username
        )),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_name_prefers_username() {
        assert_eq!(
            display_name(&json!({"username": "tmoyo", "email": "t@example.org"})).as_deref(),
            Some("tmoyo")
        );
        assert_eq!(
            display_name(&json!({"email": "t@example.org"})).as_deref(),
            Some("t@example.org")
        );
        assert!(display_name(&json!({"id": 1})).is_none());
    }
}
