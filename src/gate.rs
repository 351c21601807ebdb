// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Interaction gate
//!
//! Every proposed command and script passes through here before it touches
//! the shell. The [`Prompter`] trait is the seam: the terminal uses
//! [`DialoguerPrompter`], tests script the answers.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::error::{NlcError, Result};

/// Choices offered for a proposed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    Run,
    Modify,
    Revise,
    Cancel,
}

impl CommandAction {
    pub const ALL: [CommandAction; 4] = [
        CommandAction::Run,
        CommandAction::Modify,
        CommandAction::Revise,
        CommandAction::Cancel,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CommandAction::Run => "Run the command",
            CommandAction::Modify => "Modify the command",
            CommandAction::Revise => "Revise the original request",
            CommandAction::Cancel => "Cancel",
        }
    }
}

/// What the user decided to do with a proposed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionDecision {
    Run,
    /// Run this edited command instead
    Modify(String),
    /// Append this text to the request and ask again
    Revise(String),
    Cancel,
}

/// Source of user answers at the gate
pub trait Prompter: Send + Sync {
    fn select_command_action(&self) -> Result<CommandAction>;

    /// Edit a command, starting from `command`
    fn edit_command(&self, command: &str) -> Result<String>;

    fn revision(&self) -> Result<String>;

    /// Ask where to save a script; `default` pre-fills the answer
    fn script_destination(&self, default: Option<&str>) -> Result<String>;

    fn confirm_run_script(&self) -> Result<bool>;
}

/// Run the command gate to a decision
pub fn decide_command(prompter: &dyn Prompter, command: &str) -> Result<InteractionDecision> {
    let decision = match prompter.select_command_action()? {
        CommandAction::Run => InteractionDecision::Run,
        CommandAction::Modify => InteractionDecision::Modify(prompter.edit_command(command)?),
        CommandAction::Revise => InteractionDecision::Revise(prompter.revision()?),
        CommandAction::Cancel => InteractionDecision::Cancel,
    };
    tracing::debug!(?decision, "gate decision");
    Ok(decision)
}

/// Terminal prompts
#[derive(Default)]
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self::default()
    }
}

fn prompt_error(e: dialoguer::Error) -> NlcError {
    NlcError::Prompt(e.to_string())
}

impl Prompter for DialoguerPrompter {
    fn select_command_action(&self) -> Result<CommandAction> {
        let labels: Vec<&str> = CommandAction::ALL.iter().map(|a| a.label()).collect();
        let selection = Select::with_theme(&self.theme)
            .with_prompt("What would you like to do with this command?")
            .items(&labels[..])
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        CommandAction::ALL
            .get(selection)
            .copied()
            .ok_or_else(|| NlcError::Prompt(format!("unexpected selection {}", selection)))
    }

    fn edit_command(&self, command: &str) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt("Edit the command:")
            .with_initial_text(command)
            .interact_text()
            .map_err(prompt_error)
    }

    fn revision(&self) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt("Add to or revise your original request:")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)
    }

    fn script_destination(&self, default: Option<&str>) -> Result<String> {
        let mut input =
            Input::<String>::with_theme(&self.theme).with_prompt("Where should I save it?");
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(prompt_error)
    }

    fn confirm_run_script(&self) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt("Should I run the script?")
            .default(true)
            .interact()
            .map_err(prompt_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Scripted {
        action: CommandAction,
        edited: String,
        revision: String,
        edit_seed: Mutex<Option<String>>,
    }

    impl Scripted {
        fn new(action: CommandAction) -> Self {
            Self {
                action,
                edited: "ls -l".to_string(),
                revision: "use curl instead".to_string(),
                edit_seed: Mutex::new(None),
            }
        }
    }

    impl Prompter for Scripted {
        fn select_command_action(&self) -> Result<CommandAction> {
            Ok(self.action)
        }

        fn edit_command(&self, command: &str) -> Result<String> {
            *self.edit_seed.lock().unwrap() = Some(command.to_string());
            Ok(self.edited.clone())
        }

        fn revision(&self) -> Result<String> {
            Ok(self.revision.clone())
        }

        fn script_destination(&self, default: Option<&str>) -> Result<String> {
            Ok(default.unwrap_or("script.sh").to_string())
        }

        fn confirm_run_script(&self) -> Result<bool> {
            Ok(false)
        }
    }

    #[test]
    fn test_decide_run_and_cancel() {
        let run = decide_command(&Scripted::new(CommandAction::Run), "ls -la").unwrap();
        assert_eq!(run, InteractionDecision::Run);

        let cancel = decide_command(&Scripted::new(CommandAction::Cancel), "ls -la").unwrap();
        assert_eq!(cancel, InteractionDecision::Cancel);
    }

    #[test]
    fn test_decide_modify_seeds_editor_with_command() {
        let prompter = Scripted::new(CommandAction::Modify);
        let decision = decide_command(&prompter, "ls -la").unwrap();

        assert_eq!(decision, InteractionDecision::Modify("ls -l".to_string()));
        assert_eq!(prompter.edit_seed.lock().unwrap().as_deref(), Some("ls -la"));
    }

    #[test]
    fn test_decide_revise_collects_text() {
        let decision = decide_command(&Scripted::new(CommandAction::Revise), "wget x").unwrap();
        assert_eq!(
            decision,
            InteractionDecision::Revise("use curl instead".to_string())
        );
    }

    #[test]
    fn test_action_labels_in_menu_order() {
        let labels: Vec<&str> = CommandAction::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Run the command",
                "Modify the command",
                "Revise the original request",
                "Cancel"
            ]
        );
    }
}
