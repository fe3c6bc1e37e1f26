// ABOUTME: Provider that never produces a completion
// ABOUTME: Backs the mock LLM configuration so every generation takes the fallback path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;

use super::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider};
use crate::errors::{AppError, ErrorCode};

/// Provider used when no completion service is configured
#[derive(Debug, Clone)]
pub struct UnavailableProvider {
    reason: String,
}

impl UnavailableProvider {
    /// Create a provider that fails with the given reason
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for UnavailableProvider {
    fn default() -> Self {
        Self::new("No completion service configured (LLM_PROVIDER=mock)")
    }
}

#[async_trait]
impl LlmProvider for UnavailableProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn display_name(&self) -> &'static str {
        "Unavailable (fallback only)"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::empty()
    }

    fn default_model(&self) -> &str {
        "none"
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        Err(AppError::new(
            ErrorCode::ExternalServiceUnavailable,
            self.reason.clone(),
        ))
    }
}
