// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! nlc - a terminal assistant for natural-language commands.
//!
//! A request is sent to an OpenAI-protocol backend together with four tools.
//! Whatever the backend picks (a command, a new script, a modified script, or
//! a refusal) is shown to the user and only acted on after confirmation.
//!
//! - `llm`: provider abstraction, the OpenAI-compatible client, the factory
//! - `tools`: tool declarations, validated tool calls, shell execution
//! - `chat`: request context and the turn loop
//! - `gate`: confirm / modify / revise / cancel prompts
//! - `config`, `cli`, `commands`: settings file and command-line surface

pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod gate;
pub mod llm;
pub mod tools;

pub use error::{NlcError, Result};
