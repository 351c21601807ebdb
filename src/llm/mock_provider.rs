// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Mock LLM provider for testing
//!
//! Provides a configurable mock implementation of the LlmProvider trait
//! that can be used in tests without making real API calls.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{ApiError, NlcError, Result};
use crate::llm::provider::{
    CompletionRequest, CompletionResponse, ContentBlockResponse, LlmProvider,
};

/// A mock LLM provider for testing
#[derive(Clone)]
pub struct MockProvider {
    /// Provider name
    name: String,
    /// Configured responses, returned in order (the last one repeats)
    responses: Arc<Mutex<Vec<MockResponse>>>,
    /// Call counter
    call_count: Arc<AtomicUsize>,
    /// Recorded requests
    recorded_requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A pre-configured response for the mock provider
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// A successful completion
    Reply {
        /// Text content to return
        text: String,
        /// Tool calls to return
        tool_calls: Vec<MockToolCall>,
    },
    /// The backend call fails
    Failure(String),
}

/// A mock tool call
#[derive(Clone, Debug)]
pub struct MockToolCall {
    /// Tool name
    pub name: String,
    /// Tool input (JSON)
    pub input: serde_json::Value,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("Mock provider lock was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

impl MockProvider {
    /// Create a new mock provider with no queued responses
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            responses: Arc::new(Mutex::new(vec![])),
            call_count: Arc::new(AtomicUsize::new(0)),
            recorded_requests: Arc::new(Mutex::new(vec![])),
        }
    }

    fn push(self, response: MockResponse) -> Self {
        lock(&self.responses).push(response);
        self
    }

    /// Queue a plain text response
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.push(MockResponse::Reply {
            text: text.into(),
            tool_calls: vec![],
        })
    }

    /// Queue a response selecting a single tool
    pub fn with_tool_call(self, name: impl Into<String>, input: serde_json::Value) -> Self {
        self.with_reply(
            "",
            vec![MockToolCall {
                name: name.into(),
                input,
            }],
        )
    }

    /// Queue a response with arbitrary text and tool calls
    pub fn with_reply(self, text: impl Into<String>, tool_calls: Vec<MockToolCall>) -> Self {
        self.push(MockResponse::Reply {
            text: text.into(),
            tool_calls,
        })
    }

    /// Queue a failing backend call
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(MockResponse::Failure(message.into()))
    }

    /// Get the number of times complete() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Get all recorded requests
    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        lock(&self.recorded_requests).clone()
    }

    /// Get the last request made
    pub fn last_request(&self) -> Option<CompletionRequest> {
        lock(&self.recorded_requests).last().cloned()
    }

    /// Get the next response
    fn next_response(&self) -> MockResponse {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst);
        let responses = lock(&self.responses);
        match responses.len() {
            0 => MockResponse::Reply {
                text: "Mock response".to_string(),
                tool_calls: vec![],
            },
            len => responses[count.min(len - 1)].clone(),
        }
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        lock(&self.recorded_requests).push(request);

        let (text, tool_calls) = match self.next_response() {
            MockResponse::Reply { text, tool_calls } => (text, tool_calls),
            MockResponse::Failure(message) => {
                return Err(NlcError::Api(ApiError::Network(message)));
            }
        };

        let mut content = vec![];

        if !text.is_empty() {
            content.push(ContentBlockResponse::Text { text });
        }

        for tool_call in tool_calls {
            content.push(ContentBlockResponse::ToolUse {
                id: format!("call_{}", uuid::Uuid::new_v4().simple()),
                name: tool_call.name,
                input: tool_call.input,
            });
        }

        Ok(CompletionResponse { content })
    }
}
