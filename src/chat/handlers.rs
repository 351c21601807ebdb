// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Side effects for each selected tool

use std::path::Path;

use super::context::RequestContext;
use super::engine::{Orchestrator, TurnOutcome};
use crate::display;
use crate::error::{NlcError, Result};
use crate::gate::{decide_command, InteractionDecision};
use crate::tools::shell::shell_quote;

impl Orchestrator {
    pub(super) async fn suggest_command(
        &self,
        context: &RequestContext,
        command: &str,
    ) -> Result<TurnOutcome> {
        display::print_command(command);

        match decide_command(self.prompter.as_ref(), command)? {
            InteractionDecision::Run => {
                self.execute(command).await;
                Ok(TurnOutcome::Done)
            }
            InteractionDecision::Modify(edited) => {
                self.execute(&edited).await;
                Ok(TurnOutcome::Done)
            }
            InteractionDecision::Revise(revision) => {
                Ok(TurnOutcome::Revise(context.amend(&revision)))
            }
            InteractionDecision::Cancel => Ok(TurnOutcome::Done),
        }
    }

    /// Show a script, save it where the user says, and optionally run it.
    pub(super) async fn save_script(
        &self,
        script: &str,
        default_name: Option<&str>,
    ) -> Result<TurnOutcome> {
        display::print_script(script);

        let filename = self.prompter.script_destination(default_name)?;
        let filename = filename.trim();
        if filename.is_empty() {
            return Err(NlcError::Handler(
                "No file name given; the script was not saved.".to_string(),
            ));
        }

        let path = self.working_directory.join(filename);
        write_script(&path, script).await?;
        tracing::debug!(path = %path.display(), "script saved");

        if self.prompter.confirm_run_script()? {
            self.execute(&format!("bash {}", shell_quote(filename))).await;
        }

        Ok(TurnOutcome::Done)
    }

    pub(super) fn report_error(&self, message: &str) -> TurnOutcome {
        display::error(message);
        TurnOutcome::Done
    }

    async fn execute(&self, command: &str) {
        println!();
        let output = self.runner.run(command, &self.working_directory).await;
        display::print_command_output(&output);
    }
}

async fn write_script(path: &Path, script: &str) -> Result<()> {
    tokio::fs::write(path, script).await.map_err(|e| {
        NlcError::Handler(format!(
            "Could not save the script to {}: {}",
            path.display(),
            e
        ))
    })
}
