//
//  refdesk
//  interactive/prompt.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Prompts
//!
//! Thin wrappers over `dialoguer` used by `refdesk auth` and destructive
//! commands. Each returns `anyhow::Result` so a closed terminal surfaces as
//! an ordinary error.
//!
//! ```rust,no_run
//! use refdesk::interactive::{prompt_input, prompt_password};
//!
//! let username = prompt_input("Username")?;
//! let password = prompt_password("Password")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::Result;
use dialoguer::{Confirm, Input, Password};

pub fn prompt_input(message: &str) -> Result<String> {
    let input: String = Input::new().with_prompt(message).interact_text()?;
    Ok(input)
}

/// Prompts for optional text; an empty answer is `None`.
pub fn prompt_input_optional(message: &str) -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt(message)
        .allow_empty(true)
        .interact_text()?;
    Ok(Some(input).filter(|s| !s.trim().is_empty()))
}

/// Masked input.
pub fn prompt_password(message: &str) -> Result<String> {
    let password = Password::new().with_prompt(message).interact()?;
    Ok(password)
}

/// Masked input entered twice, for registration.
pub fn prompt_password_confirm(message: &str) -> Result<String> {
    let password = Password::new()
        .with_prompt(message)
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;
    Ok(password)
}

pub fn prompt_confirm_with_default(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}
