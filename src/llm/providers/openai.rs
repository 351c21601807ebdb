// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! OpenAI-protocol chat completions provider
//!
//! Implements the LlmProvider trait for the hosted OpenAI API and for any
//! server speaking the same protocol (LM Studio, llama.cpp server, vLLM).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, NlcError, Result};
use crate::llm::message::Message;
use crate::llm::provider::{
    CompletionRequest, CompletionResponse, ContentBlockResponse, LlmProvider, ToolDefinition,
};

/// Provider for OpenAI and OpenAI-compatible endpoints
pub struct OpenAiProvider {
    client: Client,
    name: String,
    api_key: Option<String>,
    base_url: String,
}

impl OpenAiProvider {
    /// Create a provider for the hosted OpenAI API
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            name: "openai".to_string(),
            api_key: Some(api_key.into()),
            base_url: crate::config::OPENAI_BASE_URL.to_string(),
        }
    }

    /// Create a provider for an OpenAI-compatible server. No key is sent.
    pub fn compatible(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            name: name.into(),
            api_key: None,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Convert internal messages to OpenAI format
    fn convert_messages(&self, messages: &[Message]) -> Vec<OpenAiMessage> {
        messages
            .iter()
            .map(|m| OpenAiMessage {
                role: m.role.as_str().to_string(),
                content: m.content.clone(),
            })
            .collect()
    }

    /// Convert tools to OpenAI format
    fn convert_tools(&self, tools: &[ToolDefinition]) -> Vec<OpenAiTool> {
        tools
            .iter()
            .map(|t| OpenAiTool {
                r#type: "function".to_string(),
                function: OpenAiFunction {
                    name: t.name.clone(),
                    description: t.description.clone(),
                    parameters: serde_json::json!({
                        "type": t.input_schema.schema_type,
                        "properties": t.input_schema.properties,
                        "required": t.input_schema.required,
                        "additionalProperties": false,
                    }),
                },
            })
            .collect()
    }

    /// Build the request body. `tool_choice` is only sent alongside tools.
    fn build_request(&self, request: &CompletionRequest) -> OpenAiRequest {
        let has_tools = !request.tools.is_empty();

        OpenAiRequest {
            model: request.model.clone(),
            messages: self.convert_messages(&request.messages),
            tools: has_tools.then(|| self.convert_tools(&request.tools)),
            tool_choice: has_tools.then(|| "auto".to_string()),
        }
    }

    /// Parse an error response
    fn parse_error(&self, status: u16, body: &str) -> NlcError {
        if let Ok(error_response) = serde_json::from_str::<OpenAiError>(body) {
            let message = error_response.error.message;
            let code = error_response.error.code.as_deref().unwrap_or("");

            match code {
                "invalid_api_key" | "authentication_error" => {
                    NlcError::Api(ApiError::AuthenticationFailed)
                }
                "rate_limit_exceeded" => NlcError::Api(ApiError::RateLimited(message)),
                "model_not_found" => NlcError::Api(ApiError::ModelNotFound(message)),
                _ if status == 401 => NlcError::Api(ApiError::AuthenticationFailed),
                _ => NlcError::Api(ApiError::ServerError { status, message }),
            }
        } else {
            NlcError::Api(ApiError::ServerError {
                status,
                message: body.to_string(),
            })
        }
    }

    /// Convert an API response into our format
    fn convert_response(&self, api_response: OpenAiResponse) -> Result<CompletionResponse> {
        let choice = api_response.choices.into_iter().next().ok_or_else(|| {
            NlcError::Api(ApiError::InvalidResponse(
                "No choices in response".to_string(),
            ))
        })?;

        let mut content = Vec::new();

        if let Some(text) = choice.message.content {
            if !text.is_empty() {
                content.push(ContentBlockResponse::Text { text });
            }
        }

        for tc in choice.message.tool_calls.unwrap_or_default() {
            let input: serde_json::Value =
                serde_json::from_str(&tc.function.arguments).map_err(|e| {
                    NlcError::Api(ApiError::InvalidResponse(format!(
                        "Tool call '{}' has malformed arguments: {}",
                        tc.function.name, e
                    )))
                })?;
            content.push(ContentBlockResponse::ToolUse {
                id: tc.id,
                name: tc.function.name,
                input,
            });
        }

        Ok(CompletionResponse { content })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body = self.build_request(&request);

        tracing::debug!(
            provider = %self.name,
            model = %body.model,
            messages = body.messages.len(),
            tools = body.tools.as_ref().map_or(0, Vec::len),
            "sending completion request"
        );

        let mut req = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json");

        if let Some(ref api_key) = self.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req.json(&body).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                NlcError::Api(ApiError::Network(e.to_string()))
            } else {
                NlcError::Http(e)
            }
        })?;

        let status = response.status().as_u16();

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.parse_error(status, &body));
        }

        let text = response.text().await?;
        let api_response: OpenAiResponse = serde_json::from_str(&text).map_err(|e| {
            NlcError::Api(ApiError::InvalidResponse(format!(
                "Could not decode completion: {}",
                e
            )))
        })?;

        self.convert_response(api_response)
    }
}

// OpenAI chat completions wire types

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<OpenAiTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<String>,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiToolCall {
    id: String,
    #[serde(rename = "type", default)]
    r#type: String,
    function: OpenAiFunctionCall,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Serialize)]
struct OpenAiTool {
    #[serde(rename = "type")]
    r#type: String,
    function: OpenAiFunction,
}

#[derive(Debug, Serialize)]
struct OpenAiFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<OpenAiToolCall>>,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    code: Option<String>,
}
