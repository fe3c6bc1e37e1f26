// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment, document store, completion provider, and generation settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the FitPlan API
//!
//! - **Environment**: server configuration from environment variables
//! - **Database**: document store location
//! - **LLM**: completion provider selection and credentials

/// Document store configuration
pub mod database;
/// Environment and server configuration
pub mod environment;
/// Completion provider configuration
pub mod llm;

pub use database::{DatabaseConfig, DatabaseUrl};
pub use environment::{CompletionSettings, Environment, GenerationConfig, ServerConfig};
pub use llm::{LlmConfig, LlmProviderKind};
