// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Per-turn request context and message assembly

use std::path::Path;

use crate::error::{NlcError, Result};
use crate::llm::message::Message;
use crate::tools::files::load_with_line_numbers;

/// System instruction sent at the start of every turn
pub const SYSTEM_PROMPT: &str = "
You are NLC, an intelligent and efficient command-line assistant running in a terminal environment.
Interpret natural language requests and respond with shell commands, scripts, or succinct CLI outputs.
Stay concise and pragmatic. Avoid small talk unless explicitly requested.
";

/// Fixed assistant turn placed before the user's request
pub const GREETING: &str = "NLC is ready. What would you like to do?";

const REVISION_SEPARATOR: &str = " // Revision: ";

/// What one turn sends to the backend.
///
/// A context is never mutated; revising a request produces a new one through
/// [`RequestContext::amend`]. File content is present exactly when a path was
/// given and the file existed when the context was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    prompt: String,
    file_path: Option<String>,
    file_content: Option<String>,
}

impl RequestContext {
    /// A request without an attached file
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            file_path: None,
            file_content: None,
        }
    }

    /// Build a context, reading and numbering `file` when one is given.
    ///
    /// A missing file is an error; nothing is sent to the backend in that case.
    pub fn load(prompt: impl Into<String>, file: Option<&Path>) -> Result<Self> {
        let prompt = prompt.into();
        let Some(path) = file else {
            return Ok(Self::new(prompt));
        };

        let shown = path.display().to_string();
        let content =
            load_with_line_numbers(path)?.ok_or_else(|| NlcError::FileNotFound(shown.clone()))?;

        Ok(Self {
            prompt,
            file_path: Some(shown),
            file_content: Some(content),
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }

    /// Line-numbered content of the attached file
    pub fn file_content(&self) -> Option<&str> {
        self.file_content.as_deref()
    }

    /// The context for the next turn after a revision
    pub fn amend(&self, revision: &str) -> Self {
        Self {
            prompt: format!("{}{}{}", self.prompt, REVISION_SEPARATOR, revision),
            file_path: self.file_path.clone(),
            file_content: self.file_content.clone(),
        }
    }

    pub fn user_message(&self) -> String {
        match (&self.file_path, &self.file_content) {
            (Some(path), Some(content)) => format!(
                "Here is the script `{}`:\n\n{}\n\n---\n\nTask: {}",
                path, content, self.prompt
            ),
            _ => format!("Task: {}", self.prompt),
        }
    }

    /// System instruction, greeting, then the user turn
    pub fn messages(&self) -> Vec<Message> {
        vec![
            Message::system(SYSTEM_PROMPT),
            Message::assistant(GREETING),
            Message::user(self.user_message()),
        ]
    }
}
