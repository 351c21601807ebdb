// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for nlc
//!
//! This module defines all error types used throughout the application.

use thiserror::Error;

/// Main error type for nlc operations
#[derive(Error, Debug)]
pub enum NlcError {
    /// Required setting absent or invalid (missing key, model, provider)
    #[error("{0}")]
    Config(String),

    /// The `--file` path supplied with a request does not exist
    #[error("File not found: \"{0}\". Please check the path and try again.")]
    FileNotFound(String),

    /// Backend (text-generation) errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The backend selected a tool with arguments that violate its schema
    #[error("Invalid arguments for tool '{tool}': {reason}")]
    InvalidToolCall { tool: String, reason: String },

    /// A tool handler could not complete its side effect
    #[error("{0}")]
    Handler(String),

    /// Invalid user input (bad config value, empty key)
    #[error("{0}")]
    InvalidInput(String),

    /// An interactive prompt could not be shown or read
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// API-specific error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Authentication failed (invalid API key)
    #[error("Authentication failed: invalid API key")]
    AuthenticationFailed,

    /// Rate limited by the API, with the server's message
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Requested model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Network connectivity error
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid response from API
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// API returned an error
    #[error("API error ({status}): {message}")]
    ServerError { status: u16, message: String },
}

impl NlcError {
    /// Whether the CLI should print this error and return normally instead of
    /// failing the process. Covers everything detectable before a backend call.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            NlcError::Config(_) | NlcError::FileNotFound(_) | NlcError::InvalidInput(_)
        )
    }
}

/// Result type alias for nlc operations
pub type Result<T> = std::result::Result<T, NlcError>;
