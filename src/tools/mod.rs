// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Tool system for nlc
//!
//! The backend can answer a request with exactly one of four actions. Each
//! action is a [`ToolKind`] with a fixed declaration sent on every turn, and a
//! selected action arrives back as a validated [`ToolCall`].
//!
//! The set is closed: adding or removing a tool means touching [`ToolKind`],
//! and every `match` on it will point at the places that need updating.

pub mod definition;
pub mod files;
pub mod shell;

pub use definition::*;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{NlcError, Result};
use crate::llm::provider::ToolDefinition;

/// The four actions the backend may choose from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    SuggestCommand,
    WriteScript,
    ModifyScript,
    Error,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::SuggestCommand,
        ToolKind::WriteScript,
        ToolKind::ModifyScript,
        ToolKind::Error,
    ];

    /// Name the backend uses to select this tool
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::SuggestCommand => "suggestCommand",
            ToolKind::WriteScript => "writeScript",
            ToolKind::ModifyScript => "modifyScript",
            ToolKind::Error => "error",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Declaration sent to the backend
    pub fn definition(&self) -> ToolDefinition {
        let (description, input_schema) = match self {
            ToolKind::SuggestCommand => (
                "Suggest a command based on the user's natural language input — only when a command is clearly implied or requested.",
                SchemaBuilder::new()
                    .string(
                        "command",
                        "A suggested shell command based on the user's request",
                        true,
                    )
                    .build(),
            ),
            ToolKind::WriteScript => (
                "Generates and saves a shell or Bash script based on the user's explicit request. Only create scripts written in shell or Bash—do **not** generate scripts in any other programming language.",
                SchemaBuilder::new()
                    .string(
                        "script",
                        "The complete shell script, with clear and thorough inline comments for readability and explanation.",
                        true,
                    )
                    .string(
                        "suggestedName",
                        "A recommended filename under which the script can be saved.",
                        true,
                    )
                    .build(),
            ),
            ToolKind::ModifyScript => (
                "Use this tool when the user requests a modification or bug fix for a **shell** or **Bash** script **and** has provided the original script. This tool should only be used for shell/Bash scripts—**not** for scripts in other programming languages.",
                SchemaBuilder::new()
                    .string(
                        "modifiedScript",
                        "The updated shell script with clear and well-documented inline comments explaining the changes.",
                        true,
                    )
                    .build(),
            ),
            ToolKind::Error => (
                "Use this as a fallback when no other tool is appropriate—specifically when the user's request falls outside the defined scope or capabilities of this project.",
                SchemaBuilder::new()
                    .string(
                        "errorMessage",
                        "A clear and informative message explaining why the request cannot be fulfilled.",
                        true,
                    )
                    .build(),
            ),
        };

        ToolDefinition {
            name: self.name().to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Declarations for every tool, in a stable order
pub fn registry() -> Vec<ToolDefinition> {
    ToolKind::ALL.iter().map(ToolKind::definition).collect()
}

/// A tool invocation whose arguments matched the tool's schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    SuggestCommand { command: String },
    WriteScript { script: String, suggested_name: String },
    ModifyScript { modified_script: String },
    Error { error_message: String },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SuggestCommandArgs {
    command: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct WriteScriptArgs {
    script: String,
    suggested_name: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct ModifyScriptArgs {
    modified_script: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct ErrorArgs {
    error_message: String,
}

impl ToolCall {
    /// Validate a tool use from the backend.
    ///
    /// Unknown tool names and arguments that do not match the declared schema
    /// are rejected before any handler runs.
    pub fn parse(name: &str, input: &Value) -> Result<Self> {
        let kind = ToolKind::from_name(name).ok_or_else(|| NlcError::InvalidToolCall {
            tool: name.to_string(),
            reason: format!(
                "unknown tool; expected one of: {}",
                ToolKind::ALL.map(|k| k.name()).join(", ")
            ),
        })?;

        let call = match kind {
            ToolKind::SuggestCommand => {
                let args: SuggestCommandArgs = parse_args(kind, input)?;
                ToolCall::SuggestCommand {
                    command: args.command,
                }
            }
            ToolKind::WriteScript => {
                let args: WriteScriptArgs = parse_args(kind, input)?;
                ToolCall::WriteScript {
                    script: args.script,
                    suggested_name: args.suggested_name,
                }
            }
            ToolKind::ModifyScript => {
                let args: ModifyScriptArgs = parse_args(kind, input)?;
                ToolCall::ModifyScript {
                    modified_script: args.modified_script,
                }
            }
            ToolKind::Error => {
                let args: ErrorArgs = parse_args(kind, input)?;
                ToolCall::Error {
                    error_message: args.error_message,
                }
            }
        };

        Ok(call)
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            ToolCall::SuggestCommand { .. } => ToolKind::SuggestCommand,
            ToolCall::WriteScript { .. } => ToolKind::WriteScript,
            ToolCall::ModifyScript { .. } => ToolKind::ModifyScript,
            ToolCall::Error { .. } => ToolKind::Error,
        }
    }
}

fn parse_args<T: DeserializeOwned>(kind: ToolKind, input: &Value) -> Result<T> {
    T::deserialize(input).map_err(|e| NlcError::InvalidToolCall {
        tool: kind.name().to_string(),
        reason: e.to_string(),
    })
}
