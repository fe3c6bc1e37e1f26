// ABOUTME: HTTP-level tests for the OpenAI-compatible completion provider
// ABOUTME: Uses a wiremock server to check URL, auth, JSON mode, and error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::Arc;

use fitplan_server::config::CompletionSettings;
use fitplan_server::errors::ErrorCode;
use fitplan_server::generation::GenerationError;
use fitplan_server::llm::{
    ChatMessage, ChatRequest, CompletionClient, LlmProvider, OpenAiCompatibleConfig,
    OpenAiCompatibleProvider,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion_body(content: serde_json::Value) -> serde_json::Value {
    json!({
        "model": "gpt-4",
        "choices": [
            { "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }
        ],
        "usage": { "prompt_tokens": 12, "completion_tokens": 34, "total_tokens": 46 }
    })
}

fn azure_provider(server: &MockServer) -> OpenAiCompatibleProvider {
    OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::azure(
        &server.uri(),
        "secret-key",
        "gpt-4",
        "2024-08-01-preview",
    ))
    .unwrap()
}

fn messages() -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("You are an expert fitness trainer."),
        ChatMessage::user("Create a beginner workout for legs."),
    ]
}

#[tokio::test]
async fn test_azure_request_shape_and_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/deployments/gpt-4/chat/completions"))
        .and(query_param("api-version", "2024-08-01-preview"))
        .and(header("api-key", "secret-key"))
        .and(body_partial_json(json!({
            "response_format": { "type": "json_object" },
            "max_tokens": 1000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(json!("{\"ok\":true}"))))
        .expect(1)
        .mount(&server)
        .await;

    let provider = azure_provider(&server);
    let request = ChatRequest::new(messages())
        .with_temperature(0.8)
        .with_max_tokens(1000)
        .with_json_mode();
    let response = provider.complete(&request).await.unwrap();

    assert_eq!(response.content, "{\"ok\":true}");
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    assert_eq!(response.usage.unwrap().total_tokens, 46);
}

#[tokio::test]
async fn test_openai_style_uses_bearer_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({ "model": "gpt-4o-mini" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(json!("hello"))))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::openai(
        &server.uri(),
        Some("sk-test"),
        "gpt-4o-mini",
    ))
    .unwrap();
    let response = provider
        .complete(&ChatRequest::new(messages()))
        .await
        .unwrap();
    assert_eq!(response.content, "hello");
    assert_eq!(provider.name(), "openai");
}

#[tokio::test]
async fn test_server_error_becomes_completion_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "message": "internal failure", "type": "server_error" }
        })))
        .mount(&server)
        .await;

    let provider = azure_provider(&server);
    let direct = provider
        .complete(&ChatRequest::new(messages()))
        .await
        .unwrap_err();
    assert_eq!(direct.code, ErrorCode::ExternalServiceError);

    let client = CompletionClient::new(Arc::new(provider));
    let err = client
        .complete(messages(), CompletionSettings::json(0.8, 1000))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Completion(_)));
}

#[tokio::test]
async fn test_null_content_becomes_completion_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(json!(null))))
        .mount(&server)
        .await;

    let client = CompletionClient::new(Arc::new(azure_provider(&server)));
    let err = client
        .complete(messages(), CompletionSettings::json(0.8, 1000))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Completion(_)));
}

#[tokio::test]
async fn test_rate_limit_is_mapped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let err = azure_provider(&server)
        .complete(&ChatRequest::new(messages()))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalRateLimited);
}
