// ABOUTME: Main library entry point for the FitPlan API server
// ABOUTME: AI-generated workouts and meal plans with a deterministic fallback generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitPlan API
//!
//! Generates personalized workouts, daily meal plans, and meal options with
//! a large language model, and falls back to a deterministic generator
//! whenever the model is unavailable or answers with something unusable.
//! Callers always receive a plan; only request validation and storage
//! errors surface.
//!
//! ## Architecture
//!
//! - **Generation**: prompt builder, response normalizer, schema validator,
//!   mock generator, enrichment, and the orchestrator tying them together
//! - **LLM**: provider trait with an `OpenAI`-compatible HTTP client
//!   (Azure `OpenAI`, `OpenAI`, local servers)
//! - **Database**: owner-partitioned document store (`SQLite` or in-memory)
//! - **Services**: workout, meal plan, meal log, progress, and profile rules
//! - **Routes**: axum HTTP surface over the services
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use fitplan_server::database::memory::InMemoryDocumentStore;
//! use fitplan_server::generation::{PlanGenerator, WorkoutRequest};
//! use fitplan_server::config::GenerationConfig;
//! use fitplan_server::llm::{CompletionClient, UnavailableProvider};
//! use fitplan_server::models::{BodyArea, Difficulty, FitnessGoal};
//!
//! # async fn example() -> fitplan_server::errors::AppResult<()> {
//! let generator = PlanGenerator::new(
//!     CompletionClient::new(Arc::new(UnavailableProvider::default())),
//!     Arc::new(InMemoryDocumentStore::new()),
//!     GenerationConfig::default(),
//! );
//! let request = WorkoutRequest {
//!     body_area: BodyArea::Legs,
//!     fitness_goal: FitnessGoal::Strength,
//!     difficulty: Difficulty::Beginner,
//! };
//! let workout = generator.generate_workout(&request, "user-1").await?;
//! assert!(!workout.is_ai_generated);
//! # Ok(())
//! # }
//! ```

/// Placeholder request authentication
pub mod auth;

/// Environment-driven configuration
pub mod config;

/// Owner-partitioned document storage
pub mod database;

/// Plan generation pipeline
pub mod generation;

/// Completion provider abstraction and HTTP client
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Shared resources injected into route handlers
pub mod resources;

/// HTTP routes
pub mod routes;

/// Domain services over the document store
pub mod services;

pub use fitplan_core::{constants, errors, models};
