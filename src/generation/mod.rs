// ABOUTME: AI plan generation pipeline with deterministic fallback
// ABOUTME: Prompt building, normalization, validation, mock generation, enrichment, orchestration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Generation
//!
//! A request flows through these stages:
//!
//! ```text
//! BuildingPrompt -> AwaitingCompletion -> Normalizing -> Validating -> Enriching -> Done
//!                         |                   |             |
//!                         +-------------------+-------------+--> MockFallback -> Enriching -> Done
//! ```
//!
//! Exactly one completion attempt is made. Any [`GenerationError`] diverts to
//! the deterministic [`mock`] generator, so callers always receive a
//! schema-valid plan. Only persistence failures reach the caller.

/// Identifier, default, and timestamp assignment for finished drafts
pub mod enrichment;
/// Deterministic fallback plans derived from request parameters
pub mod mock;
/// Raw completion text to JSON value
pub mod normalizer;
/// The stage machine tying the pipeline together
pub mod orchestrator;
/// System/user prompt construction
pub mod prompts;
/// Generation request types and validation
pub mod requests;
/// JSON value to typed draft
pub mod validator;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use enrichment::{Clock, FixedClock, SystemClock};
pub use orchestrator::{MealOptionsResponse, PlanGenerator};
pub use requests::{GenerationRequest, MealOptionsRequest, MealPlanRequest, WorkoutRequest};

/// Stage of the generation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenerationStage {
    /// Rendering the prompt pair
    BuildingPrompt,
    /// Waiting on the completion service
    AwaitingCompletion,
    /// Extracting JSON from raw text
    Normalizing,
    /// Checking the JSON against the plan shape
    Validating,
    /// Producing a deterministic plan after a failure
    MockFallback,
    /// Assigning identifiers and timestamps
    Enriching,
    /// Plan ready
    Done,
}

impl GenerationStage {
    /// Stable name for logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BuildingPrompt => "BUILDING_PROMPT",
            Self::AwaitingCompletion => "AWAITING_COMPLETION",
            Self::Normalizing => "NORMALIZING",
            Self::Validating => "VALIDATING",
            Self::MockFallback => "MOCK_FALLBACK",
            Self::Enriching => "ENRICHING",
            Self::Done => "DONE",
        }
    }
}

/// Recoverable failure on the AI path
///
/// These never leave the orchestrator; each one triggers the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Completion service unreachable, errored, or returned no content
    #[error("completion failed: {0}")]
    Completion(String),
    /// No JSON value could be extracted from the completion text
    #[error("normalization failed: {0}")]
    Normalization(String),
    /// JSON was well formed but did not match the expected plan shape
    #[error("validation failed: {0}")]
    Validation(String),
}

impl GenerationError {
    /// Stage the error was raised in
    #[must_use]
    pub const fn stage(&self) -> GenerationStage {
        match self {
            Self::Completion(_) => GenerationStage::AwaitingCompletion,
            Self::Normalization(_) => GenerationStage::Normalizing,
            Self::Validation(_) => GenerationStage::Validating,
        }
    }
}

/// Which path produced a plan's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Language model output that passed validation
    Ai,
    /// Deterministic fallback
    Mock,
}

impl Provenance {
    /// Value of the persisted `isAiGenerated` flag
    #[must_use]
    pub const fn is_ai_generated(&self) -> bool {
        matches!(self, Self::Ai)
    }
}

/// Kind of plan being generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanKind {
    /// Single workout
    #[serde(rename = "workout")]
    Workout,
    /// Daily meal plan
    #[serde(rename = "meal")]
    Meal,
    /// Three alternative meals for one slot
    #[serde(rename = "mealOption")]
    MealOption,
}

impl PlanKind {
    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Workout => "workout",
            Self::Meal => "meal",
            Self::MealOption => "mealOption",
        }
    }
}

/// Upper-case the first character (`chicken` -> `Chicken`)
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
