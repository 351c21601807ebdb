// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Provider factory for creating LLM providers
//!
//! Turns the configured provider, credential and base URL into a model handle.
//! Validation is local presence-checking only; nothing here touches the network.

use std::sync::Arc;

use crate::config::{Provider, Settings};
use crate::error::{NlcError, Result};
use crate::llm::provider::{CompletionRequest, CompletionResponse, LlmProvider};
use crate::llm::providers::OpenAiProvider;

/// A provider bound to a resolved model identifier.
///
/// Stateless and cheap to clone; reused across every turn of one command.
#[derive(Clone)]
pub struct ModelHandle {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("provider", &self.provider.name())
            .field("model", &self.model)
            .finish()
    }
}

impl ModelHandle {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// The resolved model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Send a request, filling in the bound model.
    pub async fn complete(&self, mut request: CompletionRequest) -> Result<CompletionResponse> {
        request.model = self.model.clone();
        self.provider.complete(request).await
    }
}

/// Factory for creating LLM providers
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a model handle from settings
    ///
    /// Fails with a configuration error when the stored provider is not
    /// supported, when the provider is `openai` and no API key is available,
    /// or when no model is configured.
    pub fn create(settings: &Settings) -> Result<ModelHandle> {
        let provider = match &settings.provider {
            Provider::OpenAi => Self::create_openai(settings)?,
            Provider::LmStudio => Self::create_compatible(settings),
            Provider::Unsupported(name) => {
                tracing::debug!(provider = %name, "unsupported provider in configuration");
                return Err(NlcError::Config(Provider::unsupported_message()));
            }
        };
        let model = Self::resolve_model(settings)?;

        tracing::debug!(provider = %settings.provider, %model, "created model handle");

        Ok(ModelHandle::new(provider, model))
    }

    /// Create a provider for the hosted OpenAI API
    pub fn create_openai(settings: &Settings) -> Result<Arc<dyn LlmProvider>> {
        let api_key = settings.get_api_key().ok_or_else(|| {
            NlcError::Config(
                "OpenAI API key not found. Please set it using: nlc config key <your-api-key>"
                    .to_string(),
            )
        })?;

        Ok(Arc::new(OpenAiProvider::new(api_key)))
    }

    /// Create a provider for an OpenAI-compatible local endpoint
    pub fn create_compatible(settings: &Settings) -> Arc<dyn LlmProvider> {
        Arc::new(OpenAiProvider::compatible(
            settings.provider.as_str(),
            settings.base_url.clone(),
        ))
    }

    /// Resolve the model identifier
    pub fn resolve_model(settings: &Settings) -> Result<String> {
        settings.get_model_name().ok_or_else(|| {
            NlcError::Config(
                "No model configured. Set one using: nlc config model <model-name>".to_string(),
            )
        })
    }
}
