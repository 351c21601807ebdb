// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Request orchestration loop.
//!
//! One turn sends the three-message context with every tool attached, then
//! either prints the reply text or dispatches the selected tool. A revision at
//! the gate yields an amended context and the loop runs another turn with it.
//! There is no depth limit: each extra turn waits on the user.

use std::path::PathBuf;
use std::sync::Arc;

use crate::display;
use crate::error::{NlcError, Result};
use crate::gate::Prompter;
use crate::llm::factory::ModelHandle;
use crate::llm::provider::CompletionRequest;
use crate::tools::shell::CommandRunner;
use crate::tools::{registry, ToolCall};

use super::context::RequestContext;

/// How a turn ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Done,
    /// Run another turn with this context
    Revise(RequestContext),
}

/// Drives a request from the first backend call to its final decision
pub struct Orchestrator {
    pub(super) handle: ModelHandle,
    pub(super) runner: Arc<dyn CommandRunner>,
    pub(super) prompter: Arc<dyn Prompter>,
    pub(super) working_directory: PathBuf,
}

impl Orchestrator {
    pub fn new(
        handle: ModelHandle,
        runner: Arc<dyn CommandRunner>,
        prompter: Arc<dyn Prompter>,
        working_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            handle,
            runner,
            prompter,
            working_directory: working_directory.into(),
        }
    }

    /// Run turns until one finishes without a revision.
    ///
    /// Returns the number of backend calls made. Backend failures and invalid
    /// tool calls stop the loop with an error; handler failures are reported
    /// and end the request.
    pub async fn run(&self, context: RequestContext) -> Result<usize> {
        let mut context = context;
        let mut turns = 0;

        loop {
            turns += 1;
            match self.run_turn(&context).await? {
                TurnOutcome::Done => return Ok(turns),
                TurnOutcome::Revise(amended) => {
                    tracing::debug!(revision = turns, prompt = amended.prompt(), "revising request");
                    context = amended;
                }
            }
        }
    }

    /// One backend call and whatever it selects
    pub async fn run_turn(&self, context: &RequestContext) -> Result<TurnOutcome> {
        let request = CompletionRequest::new(self.handle.model(), context.messages())
            .with_tools(registry());

        tracing::debug!(
            provider = self.handle.provider_name(),
            model = self.handle.model(),
            has_file = context.file_content().is_some(),
            "sending request"
        );
        let response = self.handle.complete(request).await?;

        let tool_uses = response.tool_uses();
        let Some(&(_, name, input)) = tool_uses.first() else {
            if let Some(text) = response.text() {
                println!("{}", text);
            }
            return Ok(TurnOutcome::Done);
        };

        if tool_uses.len() > 1 {
            tracing::warn!(
                selected = name,
                ignored = tool_uses.len() - 1,
                "backend selected several tools; acting on the first"
            );
        }

        let call = ToolCall::parse(name, input)?;
        tracing::debug!(tool = name, "tool selected");

        match self.dispatch(context, call).await {
            Err(NlcError::Handler(message)) => {
                display::error(&message);
                Ok(TurnOutcome::Done)
            }
            outcome => outcome,
        }
    }

    async fn dispatch(&self, context: &RequestContext, call: ToolCall) -> Result<TurnOutcome> {
        match call {
            ToolCall::SuggestCommand { command } => self.suggest_command(context, &command).await,
            ToolCall::WriteScript {
                script,
                suggested_name,
            } => self.save_script(&script, Some(&suggested_name)).await,
            ToolCall::ModifyScript { modified_script } => {
                self.save_script(&modified_script, context.file_path()).await
            }
            ToolCall::Error { error_message } => Ok(self.report_error(&error_message)),
        }
    }
}
