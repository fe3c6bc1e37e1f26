// ABOUTME: Single-shot completion client used by the generation pipeline
// ABOUTME: Turns provider errors and empty content into a completion failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use tracing::debug;

use super::{ChatMessage, ChatRequest, LlmProvider};
use crate::config::CompletionSettings;
use crate::generation::GenerationError;

/// Thin wrapper around one configured provider
///
/// Exactly one provider call is made per [`CompletionClient::complete`];
/// there are no retries and no fallback here.
#[derive(Clone)]
pub struct CompletionClient {
    provider: Arc<dyn LlmProvider>,
}

impl CompletionClient {
    /// Wrap a provider
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Send the messages and return the raw completion text
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Completion`] if the provider call fails or
    /// the response has no non-whitespace content
    pub async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        settings: CompletionSettings,
    ) -> Result<String, GenerationError> {
        let mut request = ChatRequest::new(messages)
            .with_temperature(settings.temperature)
            .with_max_tokens(settings.max_tokens);
        if settings.json_mode && self.provider.capabilities().supports_json_mode() {
            request = request.with_json_mode();
        }

        let response = self
            .provider
            .complete(&request)
            .await
            .map_err(|e| GenerationError::Completion(e.to_string()))?;

        if response.content.trim().is_empty() {
            return Err(GenerationError::Completion(format!(
                "{} returned no content",
                self.provider.display_name()
            )));
        }

        debug!(
            provider = self.provider.name(),
            model = %response.model,
            chars = response.content.len(),
            "Completion received"
        );
        Ok(response.content)
    }
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient")
            .field("provider", &self.provider.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::errors::AppError;
    use crate::llm::{ChatResponse, LlmCapabilities};

    /// Echoes a fixed reply and records whether JSON mode was requested
    struct PlainTextProvider {
        capabilities: LlmCapabilities,
        reply: &'static str,
        json_mode_seen: Mutex<Vec<bool>>,
    }

    impl PlainTextProvider {
        fn new(capabilities: LlmCapabilities, reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                capabilities,
                reply,
                json_mode_seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for PlainTextProvider {
        fn name(&self) -> &'static str {
            "plain"
        }

        fn display_name(&self) -> &'static str {
            "Plain"
        }

        fn capabilities(&self) -> LlmCapabilities {
            self.capabilities
        }

        fn default_model(&self) -> &str {
            "plain-model"
        }

        async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
            self.json_mode_seen.lock().unwrap().push(request.json_mode);
            Ok(ChatResponse {
                content: self.reply.to_owned(),
                model: "plain-model".to_owned(),
                usage: None,
                finish_reason: None,
            })
        }
    }

    #[tokio::test]
    async fn test_json_mode_only_when_supported() {
        let settings = CompletionSettings::json(0.7, 500);

        let without = PlainTextProvider::new(LlmCapabilities::empty(), "{}");
        CompletionClient::new(without.clone())
            .complete(vec![ChatMessage::user("hi")], settings)
            .await
            .unwrap();
        assert_eq!(*without.json_mode_seen.lock().unwrap(), vec![false]);

        let with = PlainTextProvider::new(LlmCapabilities::chat_json(), "{}");
        CompletionClient::new(with.clone())
            .complete(vec![ChatMessage::user("hi")], settings)
            .await
            .unwrap();
        assert_eq!(*with.json_mode_seen.lock().unwrap(), vec![true]);
    }

    #[tokio::test]
    async fn test_blank_content_is_a_failure() {
        let provider = PlainTextProvider::new(LlmCapabilities::chat_json(), "  \n ");
        let err = CompletionClient::new(provider)
            .complete(vec![ChatMessage::user("hi")], CompletionSettings::json(0.7, 500))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Completion(_)));
    }
}
