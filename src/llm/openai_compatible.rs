// ABOUTME: OpenAI-compatible chat completion provider for Azure OpenAI, OpenAI, and local servers
// ABOUTME: Handles URL/auth style selection, JSON response mode, and error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI`-Compatible Provider
//!
//! One implementation serves every chat-completions endpoint the server
//! talks to. Two URL/auth styles are supported:
//!
//! - **Azure**: `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version=V`
//!   with an `api-key` header
//! - **`OpenAI`**: `{base_url}/chat/completions` with a bearer token (optional
//!   for local servers such as Ollama, vLLM, or `LocalAI`)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, TokenUsage};
use crate::config::{LlmConfig, LlmProviderKind};
use crate::errors::{AppError, ErrorCode};

// ============================================================================
// Configuration Constants
// ============================================================================

/// Connection timeout
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Request timeout (meal option prompts can produce long completions)
const REQUEST_TIMEOUT_SECS: u64 = 120;

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Chat completions request body
#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

/// `response_format` object for JSON mode
#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Message structure for the chat completions API
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

/// Chat completions response body
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    #[serde(default)]
    model: Option<String>,
}

/// Choice in response
#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

/// Message in response
#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

/// Usage statistics in response
#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

/// Error response structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type", default)]
    error_type: Option<String>,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// How URLs and credentials are formed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStyle {
    /// Azure `OpenAI` deployment routing with `api-key` header
    Azure {
        /// REST API version query parameter
        api_version: String,
    },
    /// `/chat/completions` under a base URL with bearer auth
    OpenAi,
}

/// Configuration for the `OpenAI`-compatible provider
#[derive(Clone)]
pub struct OpenAiCompatibleConfig {
    /// Azure resource endpoint or base URL (e.g., <http://localhost:11434/v1>)
    pub base_url: String,
    /// API key (optional for local servers)
    pub api_key: Option<String>,
    /// Default model, or Azure deployment name
    pub default_model: String,
    /// URL and auth style
    pub style: ApiStyle,
    /// Provider name for logging
    pub provider_name: &'static str,
    /// Provider display name
    pub display_name: &'static str,
    /// Capabilities of this provider
    pub capabilities: LlmCapabilities,
}

impl std::fmt::Debug for OpenAiCompatibleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("default_model", &self.default_model)
            .field("style", &self.style)
            .field("provider_name", &self.provider_name)
            .finish_non_exhaustive()
    }
}

impl OpenAiCompatibleConfig {
    /// Create configuration for an Azure `OpenAI` deployment
    #[must_use]
    pub fn azure(endpoint: &str, api_key: &str, deployment: &str, api_version: &str) -> Self {
        Self {
            base_url: endpoint.to_owned(),
            api_key: Some(api_key.to_owned()),
            default_model: deployment.to_owned(),
            style: ApiStyle::Azure {
                api_version: api_version.to_owned(),
            },
            provider_name: "azure",
            display_name: "Azure OpenAI",
            capabilities: LlmCapabilities::chat_json(),
        }
    }

    /// Create configuration for `OpenAI` (or any hosted OpenAI-style API)
    #[must_use]
    pub fn openai(base_url: &str, api_key: Option<&str>, model: &str) -> Self {
        Self {
            base_url: base_url.to_owned(),
            api_key: api_key.map(str::to_owned),
            default_model: model.to_owned(),
            style: ApiStyle::OpenAi,
            provider_name: "openai",
            display_name: "OpenAI",
            capabilities: LlmCapabilities::chat_json(),
        }
    }

    /// Create configuration for a local OpenAI-compatible server
    #[must_use]
    pub fn local(base_url: &str, api_key: Option<&str>, model: &str) -> Self {
        Self {
            provider_name: "local",
            display_name: "Local LLM",
            ..Self::openai(base_url, api_key, model)
        }
    }

    /// Derive provider configuration from server configuration
    ///
    /// # Errors
    ///
    /// Returns a config error if required settings are absent or the kind is `mock`
    pub fn from_llm_config(config: &LlmConfig) -> Result<Self, AppError> {
        let endpoint = config.endpoint.as_deref().ok_or_else(|| {
            AppError::new(
                ErrorCode::ConfigMissing,
                format!("{} provider requires an endpoint", config.kind),
            )
        })?;

        match config.kind {
            LlmProviderKind::Azure => {
                let api_key = config.api_key.as_deref().ok_or_else(|| {
                    AppError::new(ErrorCode::ConfigMissing, "AZURE_OPENAI_KEY is required")
                })?;
                Ok(Self::azure(
                    endpoint,
                    api_key,
                    &config.model,
                    &config.api_version,
                ))
            }
            LlmProviderKind::OpenAi => Ok(Self::openai(
                endpoint,
                config.api_key.as_deref(),
                &config.model,
            )),
            LlmProviderKind::Local => Ok(Self::local(
                endpoint,
                config.api_key.as_deref(),
                &config.model,
            )),
            LlmProviderKind::Mock => Err(AppError::config(
                "The mock provider has no HTTP configuration",
            )),
        }
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Chat completions provider for Azure `OpenAI`, `OpenAI`, and local servers
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        info!(
            "Initializing {} provider: base_url={}, model={}",
            config.display_name, config.base_url, config.default_model
        );

        Ok(Self { client, config })
    }

    /// Chat completions URL for a model/deployment
    fn completions_url(&self, model: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        match &self.config.style {
            ApiStyle::Azure { api_version } => format!(
                "{base}/openai/deployments/{model}/chat/completions?api-version={api_version}"
            ),
            ApiStyle::OpenAi => format!("{base}/chat/completions"),
        }
    }

    /// Add the credential header for the configured style
    fn add_auth_header(&self, request: RequestBuilder) -> RequestBuilder {
        match (&self.config.style, &self.config.api_key) {
            (ApiStyle::Azure { .. }, Some(key)) => request.header("api-key", key),
            (ApiStyle::OpenAi, Some(key)) => request.header("Authorization", format!("Bearer {key}")),
            (_, None) => request,
        }
    }

    /// Map a transport failure to an application error
    fn send_error(&self, e: &reqwest::Error) -> AppError {
        error!("Failed to send request to {}: {}", self.config.provider_name, e);
        if e.is_connect() {
            AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!(
                    "Cannot connect to {} at {}",
                    self.config.display_name, self.config.base_url
                ),
            )
        } else if e.is_timeout() {
            AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("{} request timed out", self.config.display_name),
            )
        } else {
            AppError::external_service(self.config.display_name, format!("Failed to connect: {e}"))
        }
    }

    /// Parse error response from API
    fn parse_error_response(&self, status: StatusCode, body: &str) -> AppError {
        let service = self.config.display_name;
        let detail = serde_json::from_str::<OpenAiErrorResponse>(body).map_or_else(
            |_| body.chars().take(200).collect::<String>(),
            |parsed| match parsed.error.error_type {
                Some(error_type) => format!("{error_type} - {}", parsed.error.message),
                None => parsed.error.message,
            },
        );

        match status.as_u16() {
            401 | 403 => AppError::auth_invalid(format!("{service} authentication failed: {detail}")),
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                format!("{service} rate limit reached: {detail}"),
            ),
            404 => AppError::external_service(service, format!("Model or deployment not found: {detail}")),
            502..=504 => AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("{service} is not responding ({status}): {detail}"),
            ),
            _ => AppError::external_service(service, format!("API error ({status}): {detail}")),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        self.config.provider_name
    }

    fn display_name(&self) -> &'static str {
        self.config.display_name
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.config.capabilities
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(provider = self.config.provider_name, model = %self.config.default_model))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = self.config.default_model.as_str();

        let response_format = (request.json_mode && self.config.capabilities.supports_json_mode())
            .then_some(ResponseFormat {
                format_type: "json_object",
            });

        let openai_request = OpenAiRequest {
            model: model.to_owned(),
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format,
        };

        debug!(
            "Sending chat completion request to {} with {} messages (json_mode={})",
            self.config.provider_name,
            openai_request.messages.len(),
            request.json_mode
        );

        let http_request = self
            .client
            .post(self.completions_url(model))
            .header("Content-Type", "application/json")
            .json(&openai_request);

        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| self.send_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read API response: {}", e);
            AppError::external_service(self.config.display_name, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(self.parse_error_response(status, &body));
        }

        let openai_response: OpenAiResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse API response: {}", e);
            AppError::external_service(self.config.display_name, format!("Failed to parse response: {e}"))
        })?;

        let choice = openai_response.choices.into_iter().next().ok_or_else(|| {
            AppError::external_service(self.config.display_name, "API returned no choices")
        })?;

        let content = choice.message.content.unwrap_or_default();
        debug!(
            "Received response from {}: {} chars, finish_reason: {:?}",
            self.config.provider_name,
            content.len(),
            choice.finish_reason
        );

        Ok(ChatResponse {
            content,
            model: openai_response.model.unwrap_or_else(|| model.to_owned()),
            usage: openai_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt,
                completion_tokens: u.completion,
                total_tokens: u.total,
            }),
            finish_reason: choice.finish_reason,
        })
    }
}
