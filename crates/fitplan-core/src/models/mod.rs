// ABOUTME: Core data models for workouts, meals, and user tracking
// ABOUTME: Re-exports enums, workout, meal, and progress model types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Persisted and API-facing types. Every entity carries a server-assigned
//! string identifier; JSON field names are camelCase.

/// Classification enums (goal, body area, diet, meal type, difficulty)
pub mod enums;
/// Meals, ingredients, substitutions, and meal plans
pub mod meal;
/// Meal log entries, weight check-ins, profiles, and summaries
pub mod progress;
/// Workouts and exercises
pub mod workout;

pub use enums::{BodyArea, DietaryPreference, Difficulty, FitnessGoal, MealDifficulty, MealType};
pub use meal::{
    Ingredient, InstructionStep, Instructions, Macros, Meal, MealPlan, Substitution,
    SubstitutionAlternative,
};
pub use progress::{DailyMealLog, MealLogEntry, ProgressSummary, UserProfile, WeightCheckIn};
pub use workout::{Exercise, Workout};
