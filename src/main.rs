// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! nlc - natural language commands for your terminal
//!
//! Entry point for the nlc CLI application.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use nlc::cli::{Cli, Commands};
use nlc::commands;
use nlc::config::Settings;
use nlc::display;
use nlc::error::{NlcError, Result};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        // Setup problems are reported without failing the process
        Err(e) if e.is_recoverable() => {
            display::error(&e.to_string());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            display::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    if verbose > 0 {
        if let Ok(directive) = "nlc=debug".parse() {
            env_filter = env_filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    // Resolve --config against the directory nlc was started in
    let settings_path = match cli.config {
        Some(path) if path.is_relative() => std::env::current_dir()?.join(path),
        Some(path) => path,
        None => Settings::default_path(),
    };

    let working_directory = enter_directory(cli.directory)?;

    match cli.command {
        Commands::Do(args) => {
            let settings = Settings::load_from(&settings_path)?;
            commands::run::execute(&args, &settings, &working_directory).await
        }
        Commands::Config(args) => commands::config::execute(&args, &settings_path),
    }
}

fn enter_directory(directory: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = directory {
        std::env::set_current_dir(&dir).map_err(|e| {
            NlcError::InvalidInput(format!("Cannot use directory {}: {}", dir.display(), e))
        })?;
    }
    Ok(std::env::current_dir()?)
}
