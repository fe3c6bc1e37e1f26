// ABOUTME: Core types and constants for the FitPlan workout and meal planning API
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitPlan Core
//!
//! Foundation crate providing shared types and constants for the FitPlan API.
//! This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Calorie tiers, macro ratios, and enrichment defaults
//! - **models**: Workouts, meal plans, meal log entries, check-ins, and profiles

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Workout, `MealPlan`, `UserProfile`, etc.)
pub mod models;
