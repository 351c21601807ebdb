// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands for nlc.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// nlc - natural language commands for your terminal
#[derive(Parser, Debug)]
#[command(name = "nlc")]
#[command(
    version,
    about = "A lightweight, AI-powered terminal assistant for natural language commands"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Working directory (defaults to current)
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a natural language request using NLC
    Do(DoArgs),

    /// Manage configuration settings for NLC (OpenAI or LM Studio)
    Config(ConfigArgs),
}

/// Arguments for `do`
#[derive(Args, Debug)]
pub struct DoArgs {
    /// The action or query you want NLC to perform
    #[arg(required = true, num_args = 1..)]
    pub request: Vec<String>,

    /// Optional file to include with your request (e.g., for context or input data)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl DoArgs {
    /// The request words joined back into one prompt
    pub fn prompt(&self) -> String {
        self.request.join(" ")
    }
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Set your OpenAI API key (not required for LM Studio)
    Key {
        /// Your OpenAI API key
        key: String,
    },

    /// Set the model name (OpenAI or LM Studio)
    Model {
        /// Model name (e.g., gpt-4o, gpt-3.5-turbo, llama3:8b-instruct-q4)
        model: String,
    },

    /// Choose which provider to use: openai or lmstudio
    Provider {
        /// Either "openai" or "lmstudio"
        provider: String,
    },

    /// Set the endpoint used by LM Studio
    BaseUrl {
        /// Base URL, e.g. http://localhost:1234/v1
        url: String,
    },

    /// Show the current configuration
    Show,
}
