// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management for nlc
//!
//! A flat key/value store kept in ~/.nlc/config.json. Keys use the same
//! names everywhere: `OPENAI_API_KEY`, `MODEL_NAME`, `PROVIDER`, `BASE_URL`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NlcError;

mod io;

/// Default model when none has been configured
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default base URL for the local OpenAI-compatible endpoint (LM Studio)
pub const DEFAULT_BASE_URL: &str = "http://localhost:1234/v1";

/// Base URL of the hosted OpenAI API
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Main settings structure, stored in ~/.nlc/config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Which backend to talk to
    #[serde(rename = "PROVIDER", default)]
    pub provider: Provider,

    /// OpenAI API key (optional for LM Studio)
    #[serde(
        rename = "OPENAI_API_KEY",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub api_key: Option<String>,

    /// Environment variable consulted before the stored key
    #[serde(skip, default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model identifier sent with every request
    #[serde(rename = "MODEL_NAME", default = "default_model")]
    pub model_name: String,

    /// Base URL, only used when the provider is not `openai`
    #[serde(rename = "BASE_URL", default = "default_base_url")]
    pub base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            api_key: None,
            api_key_env: default_api_key_env(),
            model_name: default_model(),
            base_url: default_base_url(),
        }
    }
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Backend named by the `PROVIDER` key
///
/// The store may hold a name nlc does not support (a hand edit, an older
/// release). It loads as [`Provider::Unsupported`] so the `config` commands
/// can still overwrite it; creating a client from it is a configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Provider {
    /// Hosted OpenAI API
    #[default]
    OpenAi,
    /// LM Studio or any other OpenAI-protocol-compatible server
    LmStudio,
    /// Any other name found in the store
    Unsupported(String),
}

impl Provider {
    /// Name as stored in the config file and accepted on the command line
    pub fn as_str(&self) -> &str {
        match self {
            Provider::OpenAi => "openai",
            Provider::LmStudio => "lmstudio",
            Provider::Unsupported(name) => name.as_str(),
        }
    }

    /// All supported provider names
    pub fn supported() -> &'static [&'static str] {
        &["openai", "lmstudio"]
    }

    pub fn unsupported_message() -> String {
        format!("Invalid provider. Supported: {}", Provider::supported().join(", "))
    }
}

impl From<String> for Provider {
    fn from(name: String) -> Self {
        name.parse().unwrap_or(Provider::Unsupported(name))
    }
}

impl From<Provider> for String {
    fn from(provider: Provider) -> Self {
        provider.as_str().to_string()
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = NlcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "openai" => Ok(Provider::OpenAi),
            "lmstudio" => Ok(Provider::LmStudio),
            _ => Err(NlcError::InvalidInput(Provider::unsupported_message())),
        }
    }
}

/// The keys of the configuration store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ApiKey,
    ModelName,
    Provider,
    BaseUrl,
}

impl ConfigKey {
    /// Name of the key inside the store
    pub fn store_key(&self) -> &'static str {
        match self {
            ConfigKey::ApiKey => "OPENAI_API_KEY",
            ConfigKey::ModelName => "MODEL_NAME",
            ConfigKey::Provider => "PROVIDER",
            ConfigKey::BaseUrl => "BASE_URL",
        }
    }

    pub fn all() -> [ConfigKey; 4] {
        [
            ConfigKey::Provider,
            ConfigKey::ModelName,
            ConfigKey::ApiKey,
            ConfigKey::BaseUrl,
        ]
    }
}

impl Settings {
    /// Get the API key, checking the environment variable first.
    pub fn get_api_key(&self) -> Option<String> {
        // Priority: env var > config file.
        std::env::var(&self.api_key_env)
            .ok()
            .or_else(|| self.api_key.clone())
            .filter(|key| !key.trim().is_empty())
    }

    /// The configured model, or `None` if it was set to a blank value.
    pub fn get_model_name(&self) -> Option<String> {
        let model = self.model_name.trim();
        (!model.is_empty()).then(|| model.to_string())
    }

    /// Read a value from the store by key.
    pub fn get(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::ApiKey => self.api_key.clone(),
            ConfigKey::ModelName => Some(self.model_name.clone()),
            ConfigKey::Provider => Some(self.provider.to_string()),
            ConfigKey::BaseUrl => Some(self.base_url.clone()),
        }
    }

    /// Write a value into the store, validating it first.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> crate::error::Result<()> {
        match key {
            ConfigKey::ApiKey => {
                if value.trim().is_empty() {
                    return Err(NlcError::InvalidInput(
                        "API key cannot be empty.".to_string(),
                    ));
                }
                self.api_key = Some(value.to_string());
            }
            ConfigKey::ModelName => {
                if value.trim().is_empty() {
                    return Err(NlcError::InvalidInput(
                        "Model name cannot be empty.".to_string(),
                    ));
                }
                self.model_name = value.to_string();
            }
            ConfigKey::Provider => {
                self.provider = value.parse()?;
            }
            ConfigKey::BaseUrl => {
                let url = value.trim();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(NlcError::InvalidInput(format!(
                        "Invalid base URL '{}'. Expected an http:// or https:// address.",
                        value
                    )));
                }
                self.base_url = url.trim_end_matches('/').to_string();
            }
        }
        Ok(())
    }

    /// Render the configuration for display, masking the API key.
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        ConfigKey::all()
            .into_iter()
            .map(|key| {
                let value = match key {
                    ConfigKey::ApiKey => match self.get_api_key() {
                        Some(api_key) => mask_secret(&api_key),
                        None => "(not set)".to_string(),
                    },
                    _ => self.get(key).unwrap_or_default(),
                };
                (key.store_key(), value)
            })
            .collect()
    }
}

fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", chars[..3].iter().collect::<String>(), tail)
}
