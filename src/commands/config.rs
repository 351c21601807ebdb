// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! The `config` command

use std::path::Path;

use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::{ConfigKey, Provider, Settings};
use crate::display;
use crate::error::Result;

/// Apply a config subcommand to the file at `path`
///
/// Loads leniently so a bad stored value can be overwritten.
pub fn execute(args: &ConfigArgs, path: &Path) -> Result<()> {
    let mut settings = Settings::load_lenient(path)?;

    match apply(&mut settings, &args.command)? {
        Some(message) => {
            settings.save_to(path)?;
            tracing::info!(path = %path.display(), "configuration saved");
            display::success(&message);
        }
        None => {
            for (key, value) in settings.describe() {
                println!("{}: {}", key, value);
            }
        }
    }

    Ok(())
}

/// Update `settings` and return the confirmation to show, or `None` for
/// read-only subcommands.
pub fn apply(settings: &mut Settings, command: &ConfigCommands) -> Result<Option<String>> {
    let message = match command {
        ConfigCommands::Key { key } => {
            settings.set(ConfigKey::ApiKey, key)?;
            "OpenAI API key saved successfully.".to_string()
        }
        ConfigCommands::Model { model } => {
            settings.set(ConfigKey::ModelName, model)?;
            format!("Model set to: {}", model)
        }
        ConfigCommands::Provider { provider } => {
            settings.set(ConfigKey::Provider, provider)?;
            match &settings.provider {
                Provider::OpenAi => "Switched to OpenAI.".to_string(),
                Provider::LmStudio => {
                    "Switched to LM Studio. Be sure to set the base_url.".to_string()
                }
                Provider::Unsupported(name) => format!("Switched to {}.", name),
            }
        }
        ConfigCommands::BaseUrl { url } => {
            settings.set(ConfigKey::BaseUrl, url)?;
            format!("Base URL set to: {}", settings.base_url)
        }
        ConfigCommands::Show => return Ok(None),
    };
    Ok(Some(message))
}
