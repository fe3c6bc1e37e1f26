// ABOUTME: Completion service configuration for Azure OpenAI, OpenAI, local, and mock providers
// ABOUTME: Reads LLM_PROVIDER and provider-specific environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Default Azure deployment name
pub const DEFAULT_AZURE_DEPLOYMENT: &str = "gpt-4";
/// Default Azure REST API version
pub const DEFAULT_AZURE_API_VERSION: &str = "2024-08-01-preview";
/// Default `OpenAI` base URL
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
/// Default `OpenAI` model
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
/// Default local server base URL (Ollama)
pub const DEFAULT_LOCAL_BASE_URL: &str = "http://localhost:11434/v1";
/// Default local model
pub const DEFAULT_LOCAL_MODEL: &str = "qwen2.5:14b-instruct";

/// Which completion backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderKind {
    /// Azure `OpenAI` deployment
    Azure,
    /// `OpenAI` or any hosted OpenAI-style endpoint
    OpenAi,
    /// Local OpenAI-compatible server (Ollama, vLLM, `LocalAI`)
    Local,
    /// No completion service; every request takes the fallback path
    Mock,
}

impl LlmProviderKind {
    /// Parse from string
    ///
    /// # Errors
    ///
    /// Returns a config error for unknown provider names
    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "azure" | "azure-openai" | "azure_openai" => Ok(Self::Azure),
            "openai" => Ok(Self::OpenAi),
            "local" | "ollama" | "vllm" | "localai" => Ok(Self::Local),
            "mock" | "none" | "offline" => Ok(Self::Mock),
            other => Err(AppError::config(format!(
                "Unknown LLM_PROVIDER '{other}' (expected azure, openai, local, or mock)"
            ))),
        }
    }

    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Azure => "azure",
            Self::OpenAi => "openai",
            Self::Local => "local",
            Self::Mock => "mock",
        }
    }
}

impl fmt::Display for LlmProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completion provider configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Backend kind
    pub kind: LlmProviderKind,
    /// Azure resource endpoint or OpenAI-style base URL
    pub endpoint: Option<String>,
    /// API key
    pub api_key: Option<String>,
    /// Azure deployment name or model id
    pub model: String,
    /// Azure REST API version
    pub api_version: String,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("kind", &self.kind)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::mock()
    }
}

impl LlmConfig {
    /// Configuration that always uses the fallback generator
    #[must_use]
    pub fn mock() -> Self {
        Self {
            kind: LlmProviderKind::Mock,
            endpoint: None,
            api_key: None,
            model: String::new(),
            api_version: DEFAULT_AZURE_API_VERSION.to_owned(),
        }
    }

    /// Load from environment
    ///
    /// `LLM_PROVIDER` selects the backend. When unset, Azure is chosen if
    /// `AZURE_OPENAI_ENDPOINT` is present, otherwise the mock backend.
    ///
    /// # Errors
    ///
    /// Returns an error if `LLM_PROVIDER` names an unknown backend
    pub fn from_env() -> AppResult<Self> {
        let kind = match non_empty_var("LLM_PROVIDER") {
            Some(name) => LlmProviderKind::parse(&name)?,
            None if non_empty_var("AZURE_OPENAI_ENDPOINT").is_some() => LlmProviderKind::Azure,
            None => LlmProviderKind::Mock,
        };

        let api_version = non_empty_var("AZURE_OPENAI_API_VERSION")
            .unwrap_or_else(|| DEFAULT_AZURE_API_VERSION.to_owned());

        let config = match kind {
            LlmProviderKind::Azure => Self {
                kind,
                endpoint: non_empty_var("AZURE_OPENAI_ENDPOINT"),
                api_key: non_empty_var("AZURE_OPENAI_KEY"),
                model: non_empty_var("AZURE_OPENAI_DEPLOYMENT_NAME")
                    .unwrap_or_else(|| DEFAULT_AZURE_DEPLOYMENT.to_owned()),
                api_version,
            },
            LlmProviderKind::OpenAi => Self {
                kind,
                endpoint: Some(
                    non_empty_var("OPENAI_BASE_URL")
                        .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_owned()),
                ),
                api_key: non_empty_var("OPENAI_API_KEY"),
                model: non_empty_var("OPENAI_MODEL")
                    .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_owned()),
                api_version,
            },
            LlmProviderKind::Local => Self {
                kind,
                endpoint: Some(
                    non_empty_var("LOCAL_LLM_BASE_URL")
                        .unwrap_or_else(|| DEFAULT_LOCAL_BASE_URL.to_owned()),
                ),
                api_key: non_empty_var("LOCAL_LLM_API_KEY"),
                model: non_empty_var("LOCAL_LLM_MODEL")
                    .unwrap_or_else(|| DEFAULT_LOCAL_MODEL.to_owned()),
                api_version,
            },
            LlmProviderKind::Mock => Self::mock(),
        };

        Ok(config)
    }

    /// Names of required settings that are missing for the chosen backend
    #[must_use]
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match self.kind {
            LlmProviderKind::Azure => {
                if self.endpoint.is_none() {
                    missing.push("AZURE_OPENAI_ENDPOINT");
                }
                if self.api_key.is_none() {
                    missing.push("AZURE_OPENAI_KEY");
                }
            }
            LlmProviderKind::OpenAi => {
                if self.api_key.is_none() {
                    missing.push("OPENAI_API_KEY");
                }
            }
            LlmProviderKind::Local | LlmProviderKind::Mock => {}
        }
        missing
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_kind() {
        assert_eq!(LlmProviderKind::parse("Azure").unwrap(), LlmProviderKind::Azure);
        assert_eq!(LlmProviderKind::parse("ollama").unwrap(), LlmProviderKind::Local);
        assert_eq!(LlmProviderKind::parse("mock").unwrap(), LlmProviderKind::Mock);
        assert!(LlmProviderKind::parse("gemini").is_err());
    }

    #[test]
    fn test_missing_settings_for_azure() {
        let config = LlmConfig {
            kind: LlmProviderKind::Azure,
            endpoint: None,
            api_key: Some("k".to_owned()),
            model: DEFAULT_AZURE_DEPLOYMENT.to_owned(),
            api_version: DEFAULT_AZURE_API_VERSION.to_owned(),
        };
        assert_eq!(config.missing_settings(), vec!["AZURE_OPENAI_ENDPOINT"]);
        assert!(LlmConfig::mock().missing_settings().is_empty());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = LlmConfig {
            api_key: Some("super-secret".to_owned()),
            ..LlmConfig::mock()
        };
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
