// ABOUTME: LLM provider abstraction layer for plan generation
// ABOUTME: Defines the provider contract, chat message types, and capability flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Interface
//!
//! This module defines the contract that completion providers implement so
//! the generation pipeline can request plans without knowing which backend
//! (Azure `OpenAI`, `OpenAI`, a local server) answers.
//!
//! ## Key Concepts
//!
//! - **`LlmCapabilities`**: Bitflags describing provider features (JSON mode, system messages)
//! - **`LlmProvider`**: Async trait for a single non-streaming chat completion
//! - **`ChatRequest`**: Messages plus sampling settings and the JSON-mode flag
//! - **`CompletionClient`**: Single-shot wrapper used by the generation pipeline
//!
//! ## Example: Using a Provider
//!
//! ```rust,no_run
//! use fitplan_server::llm::{ChatMessage, ChatRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = ChatRequest::new(vec![
//!         ChatMessage::system("You are a certified nutritionist."),
//!         ChatMessage::user("Create a vegetarian breakfast."),
//!     ])
//!     .with_json_mode();
//!     let response = provider.complete(&request).await;
//! }
//! ```

mod completion;
mod openai_compatible;
mod unavailable;

pub use completion::CompletionClient;
pub use openai_compatible::{ApiStyle, OpenAiCompatibleConfig, OpenAiCompatibleProvider};
pub use unavailable::UnavailableProvider;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{LlmConfig, LlmProviderKind};
use crate::errors::AppError;

// ============================================================================
// Capability Flags
// ============================================================================

bitflags::bitflags! {
    /// LLM provider capability flags
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LlmCapabilities: u8 {
        /// Provider supports JSON mode output
        const JSON_MODE = 0b0000_0001;
        /// Provider supports system messages
        const SYSTEM_MESSAGES = 0b0000_0010;
    }
}

impl LlmCapabilities {
    /// Capabilities of a hosted OpenAI-style chat model
    #[must_use]
    pub const fn chat_json() -> Self {
        Self::JSON_MODE.union(Self::SYSTEM_MESSAGES)
    }

    /// Check if JSON mode is supported
    #[must_use]
    pub const fn supports_json_mode(&self) -> bool {
        self.contains(Self::JSON_MODE)
    }
}

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
    /// Assistant response message
    Assistant,
}

impl MessageRole {
    /// Convert to string representation for API calls
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single message in a chat conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Configuration for a chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Temperature for response randomness (0.0 - 1.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Ask the service to return a single JSON object
    pub json_mode: bool,
}

impl ChatRequest {
    /// Create a new chat request with messages
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
            json_mode: false,
        }
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum tokens
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Request JSON response mode
    #[must_use]
    pub const fn with_json_mode(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

/// Response from a chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated message content (may be empty)
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason (stop, length, etc.)
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// LLM provider trait for chat completion
///
/// Implementations perform exactly one outbound call per `complete`
/// invocation; retry and fallback policy belong to the caller.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g., "azure", "openai", "local")
    fn name(&self) -> &'static str;

    /// Human-readable display name for the provider
    fn display_name(&self) -> &'static str;

    /// Provider capabilities
    fn capabilities(&self) -> LlmCapabilities;

    /// Default model (or deployment) used when the request does not name one
    fn default_model(&self) -> &str;

    /// Perform a chat completion
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;
}

/// Build the provider selected by configuration
///
/// A hosted provider with missing credentials degrades to
/// [`UnavailableProvider`] so generation still answers from the fallback path.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created
pub fn provider_from_config(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, AppError> {
    let missing = config.missing_settings();
    if !missing.is_empty() {
        warn!(
            provider = %config.kind,
            missing = %missing.join(", "),
            "LLM provider is not fully configured; using unavailable provider"
        );
        return Ok(Arc::new(UnavailableProvider::new(format!(
            "{} provider is missing {}",
            config.kind,
            missing.join(", ")
        ))));
    }

    let provider: Arc<dyn LlmProvider> = match config.kind {
        LlmProviderKind::Mock => Arc::new(UnavailableProvider::default()),
        LlmProviderKind::Azure | LlmProviderKind::OpenAi | LlmProviderKind::Local => Arc::new(
            OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::from_llm_config(config)?)?,
        ),
    };
    Ok(provider)
}
