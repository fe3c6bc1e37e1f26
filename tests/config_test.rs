// ABOUTME: Tests for environment-driven server configuration
// ABOUTME: Covers provider selection, port parsing, boolean flags, and database URL parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;

use fitplan_server::config::{
    DatabaseUrl, Environment, LlmConfig, LlmProviderKind, ServerConfig,
};
use fitplan_server::errors::ErrorCode;
use serial_test::serial;

const MANAGED_VARS: &[&str] = &[
    "ENVIRONMENT",
    "NODE_ENV",
    "HTTP_PORT",
    "PORT",
    "DATABASE_URL",
    "LLM_PROVIDER",
    "AZURE_OPENAI_ENDPOINT",
    "AZURE_OPENAI_KEY",
    "AZURE_OPENAI_DEPLOYMENT_NAME",
    "OPENAI_API_KEY",
    "OPENAI_MODEL",
    "RECOMPUTE_PLAN_AGGREGATES",
    "CORS_ORIGIN",
    "FRONTEND_URL",
];

fn clear_env() {
    for key in MANAGED_VARS {
        env::remove_var(key);
    }
}

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("PROD"),
        Environment::Production
    );
    assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
    assert_eq!(
        Environment::from_str_or_default("staging"),
        Environment::Development
    );
}

#[test]
fn test_database_url_parsing() {
    assert_eq!(
        DatabaseUrl::parse_url("sqlite::memory:"),
        DatabaseUrl::SQLiteMemory
    );
    assert_eq!(DatabaseUrl::parse_url("memory"), DatabaseUrl::InProcess);
    assert_eq!(
        DatabaseUrl::parse_url("sqlite:./data/plans.db"),
        DatabaseUrl::SQLite {
            path: PathBuf::from("./data/plans.db")
        }
    );
    assert_eq!(
        DatabaseUrl::parse_url("/var/lib/fitplan.db"),
        DatabaseUrl::SQLite {
            path: PathBuf::from("/var/lib/fitplan.db")
        }
    );
    assert!(DatabaseUrl::InProcess.to_connection_string().is_none());
    assert!(DatabaseUrl::SQLiteMemory.is_ephemeral());
}

#[test]
fn test_provider_kind_aliases() {
    assert_eq!(
        LlmProviderKind::parse("Azure-OpenAI").unwrap(),
        LlmProviderKind::Azure
    );
    assert_eq!(
        LlmProviderKind::parse("ollama").unwrap(),
        LlmProviderKind::Local
    );
    let err = LlmProviderKind::parse("bard").unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigError);
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.http_port, 3000);
    assert_eq!(config.llm.kind, LlmProviderKind::Mock);
    assert!(!config.generation.recompute_aggregates);
    assert!(config.cors_origin.is_none());
    config.validate().unwrap();
}

#[test]
#[serial]
fn test_azure_inferred_from_endpoint() {
    clear_env();
    env::set_var("AZURE_OPENAI_ENDPOINT", "https://example.openai.azure.com");
    env::set_var("AZURE_OPENAI_KEY", "k");
    env::set_var("AZURE_OPENAI_DEPLOYMENT_NAME", "gpt-4o");

    let llm = LlmConfig::from_env().unwrap();
    assert_eq!(llm.kind, LlmProviderKind::Azure);
    assert_eq!(llm.model, "gpt-4o");
    assert!(llm.missing_settings().is_empty());
    assert!(!format!("{llm:?}").contains("\"k\""));

    clear_env();
}

#[test]
#[serial]
fn test_missing_credentials_only_fatal_in_production() {
    clear_env();
    env::set_var("LLM_PROVIDER", "openai");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.llm.missing_settings(), vec!["OPENAI_API_KEY"]);
    config.validate().unwrap();

    env::set_var("ENVIRONMENT", "production");
    let config = ServerConfig::from_env().unwrap();
    let err = config.validate().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigMissing);

    clear_env();
}

#[test]
#[serial]
fn test_malformed_values_are_rejected() {
    clear_env();
    env::set_var("HTTP_PORT", "eighty");
    assert_eq!(
        ServerConfig::from_env().unwrap_err().code,
        ErrorCode::ConfigInvalid
    );

    clear_env();
    env::set_var("RECOMPUTE_PLAN_AGGREGATES", "maybe");
    assert_eq!(
        ServerConfig::from_env().unwrap_err().code,
        ErrorCode::ConfigInvalid
    );

    clear_env();
    env::set_var("LLM_PROVIDER", "bard");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_overrides_are_applied() {
    clear_env();
    env::set_var("PORT", "8088");
    env::set_var("RECOMPUTE_PLAN_AGGREGATES", "yes");
    env::set_var("FRONTEND_URL", "http://localhost:5173");
    env::set_var("DATABASE_URL", "memory");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 8088);
    assert!(config.generation.recompute_aggregates);
    assert_eq!(config.cors_origin.as_deref(), Some("http://localhost:5173"));
    assert_eq!(config.database.url, DatabaseUrl::InProcess);
    assert!(config.summary().contains("Recompute Plan Aggregates: true"));

    clear_env();
}
