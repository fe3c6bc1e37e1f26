// ABOUTME: Completion provider that replays scripted replies for pipeline tests
// ABOUTME: Records every request so tests can assert on prompts and settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use fitplan_server::errors::{AppError, ErrorCode};
use fitplan_server::llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider};

/// Replies with queued texts in order, then fails once the queue is empty
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, AppError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    /// Provider answering each call with the next text
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Provider whose first call fails with an upstream error
    #[allow(dead_code)]
    pub fn failing(message: &str) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from([Err(AppError::external_service(
                "scripted", message,
            ))])),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far
    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of completion calls made
    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted (tests)"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::chat_json()
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(content)) => Ok(ChatResponse {
                content,
                model: "scripted-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            Some(Err(e)) => Err(e),
            None => Err(AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                "script exhausted",
            )),
        }
    }
}
