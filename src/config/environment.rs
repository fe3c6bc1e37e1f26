// ABOUTME: Environment-based server configuration loaded once at startup
// ABOUTME: ServerConfig, Environment, and per-plan-kind generation settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! All settings come from process environment variables; there are no config
//! files. The binary loads a [`ServerConfig`] once, validates it, and hands the
//! pieces to the components that need them.

use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::database::DatabaseConfig;
use super::llm::{LlmConfig, LlmProviderKind};
use crate::constants::ports::DEFAULT_HTTP_PORT;
use crate::errors::{AppError, AppResult, ErrorCode};

/// Deployment environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (placeholder auth injects a fixed user)
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Read `ENVIRONMENT` (falling back to `NODE_ENV`)
    #[must_use]
    pub fn from_env() -> Self {
        env::var("ENVIRONMENT")
            .or_else(|_| env::var("NODE_ENV"))
            .map(|value| Self::from_str_or_default(&value))
            .unwrap_or_default()
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a development environment
    #[must_use]
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a testing environment
    #[must_use]
    pub const fn is_testing(&self) -> bool {
        matches!(self, Self::Testing)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Sampling settings for one kind of completion request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionSettings {
    /// Sampling temperature (0.0 - 1.0)
    pub temperature: f32,
    /// Maximum output tokens
    pub max_tokens: u32,
    /// Whether to request JSON response mode
    pub json_mode: bool,
}

impl CompletionSettings {
    /// JSON-mode settings
    #[must_use]
    pub const fn json(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
            json_mode: true,
        }
    }
}

/// Generation pipeline settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Workout completion settings
    pub workout: CompletionSettings,
    /// Daily meal plan completion settings
    pub meal_plan: CompletionSettings,
    /// Meal options completion settings
    pub meal_options: CompletionSettings,
    /// Replace model-declared plan totals with sums of the meals
    pub recompute_aggregates: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            workout: CompletionSettings::json(0.8, 1000),
            meal_plan: CompletionSettings::json(0.7, 1000),
            meal_options: CompletionSettings::json(0.8, 2500),
            recompute_aggregates: false,
        }
    }
}

impl GenerationConfig {
    /// Load from environment (`RECOMPUTE_PLAN_AGGREGATES`)
    ///
    /// # Errors
    ///
    /// Returns an error if `RECOMPUTE_PLAN_AGGREGATES` is not a boolean
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            recompute_aggregates: parse_bool_var("RECOMPUTE_PLAN_AGGREGATES", false)?,
            ..Self::default()
        })
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Bind address
    pub host: String,
    /// HTTP port
    pub http_port: u16,
    /// Document store settings
    pub database: DatabaseConfig,
    /// Completion provider settings
    pub llm: LlmConfig,
    /// Generation pipeline settings
    pub generation: GenerationConfig,
    /// Allowed CORS origin (any origin when unset)
    pub cors_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            host: "0.0.0.0".to_owned(),
            http_port: DEFAULT_HTTP_PORT,
            database: DatabaseConfig::default(),
            llm: LlmConfig::default(),
            generation: GenerationConfig::default(),
            cors_origin: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let http_port = match env::var("HTTP_PORT").or_else(|_| env::var("PORT")) {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|e| {
                AppError::new(
                    ErrorCode::ConfigInvalid,
                    format!("Invalid HTTP_PORT '{raw}': {e}"),
                )
            })?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        Ok(Self {
            environment: Environment::from_env(),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_owned()),
            http_port,
            database: DatabaseConfig::from_env(),
            llm: LlmConfig::from_env()?,
            generation: GenerationConfig::from_env()?,
            cors_origin: env::var("CORS_ORIGIN")
                .or_else(|_| env::var("FRONTEND_URL"))
                .ok()
                .filter(|origin| !origin.trim().is_empty()),
        })
    }

    /// Validate cross-field constraints
    ///
    /// A hosted completion provider with missing credentials is fatal in
    /// production; elsewhere it only warns, and requests take the fallback path.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero port or, in production, missing provider credentials
    pub fn validate(&self) -> AppResult<()> {
        if self.http_port == 0 {
            return Err(AppError::new(
                ErrorCode::ConfigInvalid,
                "HTTP_PORT must be non-zero",
            ));
        }

        let missing = self.llm.missing_settings();
        if !missing.is_empty() {
            let message = format!(
                "LLM provider '{}' is missing required settings: {}",
                self.llm.kind,
                missing.join(", ")
            );
            if self.environment.is_production() {
                return Err(AppError::new(ErrorCode::ConfigMissing, message));
            }
            warn!("{message}; generation will use the fallback generator");
        }

        if self.environment.is_production() && self.llm.kind == LlmProviderKind::Mock {
            warn!("Running in production with the mock LLM provider");
        }

        Ok(())
    }

    /// One-line-per-setting summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "FitPlan API Configuration:\n\
             - Environment: {}\n\
             - HTTP: {}:{}\n\
             - Database: {}\n\
             - LLM Provider: {} ({})\n\
             - Recompute Plan Aggregates: {}\n\
             - CORS Origin: {}",
            self.environment,
            self.host,
            self.http_port,
            self.database.url,
            self.llm.kind,
            if self.llm.model.is_empty() {
                "n/a"
            } else {
                self.llm.model.as_str()
            },
            self.generation.recompute_aggregates,
            self.cors_origin.as_deref().unwrap_or("*"),
        )
    }
}

fn parse_bool_var(key: &str, default: bool) -> AppResult<bool> {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            other => Err(AppError::new(
                ErrorCode::ConfigInvalid,
                format!("Invalid {key} value '{other}': expected a boolean"),
            )),
        },
        Err(_) => Ok(default),
    }
}
