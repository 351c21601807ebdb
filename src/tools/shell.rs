// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Shell command execution
//!
//! Runs a command string through `sh -c` in a working directory and captures
//! what it printed. Nothing here fails: a command that cannot be launched is
//! reported through [`CommandOutput::launch_error`] so the caller can render it
//! alongside ordinary output.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Everything a finished (or unlaunchable) command produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit status, `None` when the process was killed by a signal or never started
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// Why the shell could not be spawned or awaited
    pub launch_error: Option<String>,
}

impl CommandOutput {
    pub fn launch_failure(message: impl Into<String>) -> Self {
        Self {
            launch_error: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn success(&self) -> bool {
        self.launch_error.is_none() && self.exit_code == Some(0)
    }
}

/// Runs shell commands on behalf of the tool handlers
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &str, working_directory: &Path) -> CommandOutput;
}

/// Runner backed by the system `sh`
#[derive(Debug, Clone, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str, working_directory: &Path) -> CommandOutput {
        tracing::debug!(command, cwd = %working_directory.display(), "running command");

        // stdin stays attached so commands that read from the terminal still work
        let result = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(working_directory)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        match result {
            Ok(output) => {
                let exit_code = output.status.code();
                tracing::debug!(?exit_code, "command finished");
                CommandOutput {
                    exit_code,
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    launch_error: None,
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "command failed to launch");
                CommandOutput::launch_failure(format!("Failed to spawn command: {}", e))
            }
        }
    }
}

/// Quote a single argument for `sh`.
///
/// Plain names pass through untouched so the rendered command stays readable.
pub fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ',' | ':' | '@' | '+' | '=')
        });
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
