// ABOUTME: Tracking models for logged meals, weight check-ins, profiles, and summaries
// ABOUTME: MealLogEntry, DailyMealLog, WeightCheckIn, UserProfile, and ProgressSummary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{BodyArea, DietaryPreference, FitnessGoal, MealType};
use super::meal::{Macros, Meal};
use super::workout::Workout;

/// A meal the user reported eating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealLogEntry {
    /// Unique identifier
    pub id: String,
    /// Owner
    pub user_id: String,
    /// Identifier of the logged meal
    pub meal_id: String,
    /// Snapshot of the meal at log time
    pub meal: Meal,
    /// Slot the meal was eaten in
    pub meal_type: MealType,
    /// When the meal was logged
    pub logged_at: DateTime<Utc>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// All meals logged on one calendar day with totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMealLog {
    /// Day (UTC)
    pub date: NaiveDate,
    /// Entries, oldest first
    pub meals: Vec<MealLogEntry>,
    /// Sum of calories
    pub total_calories: f64,
    /// Sum of macros
    pub total_macros: Macros,
}

impl DailyMealLog {
    /// Build the day view and its totals from the entries
    #[must_use]
    pub fn from_entries(date: NaiveDate, meals: Vec<MealLogEntry>) -> Self {
        let total_calories = meals.iter().map(|entry| entry.meal.calories).sum();
        let total_macros = meals
            .iter()
            .fold(Macros::default(), |acc, entry| acc + entry.meal.macros);
        Self {
            date,
            meals,
            total_calories,
            total_macros,
        }
    }
}

/// A body weight measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightCheckIn {
    /// Unique identifier
    pub id: String,
    /// Owner
    pub user_id: String,
    /// Body weight (user's unit)
    pub weight: f64,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the measurement was taken
    pub recorded_at: DateTime<Utc>,
}

/// User profile and preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User identifier (also the partition key)
    pub id: String,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Height (user's unit)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Current weight (user's unit)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Target weight (user's unit)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<f64>,
    /// Primary goal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<FitnessGoal>,
    /// Diet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_preference: Option<DietaryPreference>,
    /// Proteins the user likes
    #[serde(default)]
    pub preferred_proteins: Vec<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Empty profile for a user seen for the first time
    #[must_use]
    pub fn new_default(user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: user_id.into(),
            email: String::new(),
            name: None,
            picture: None,
            age: None,
            height: None,
            weight: None,
            target_weight: None,
            fitness_goal: None,
            dietary_preference: None,
            preferred_proteins: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Aggregated workout statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    /// Number of completed workouts
    pub total_workouts: u32,
    /// Calories burned across completed workouts
    pub total_calories_burned: f64,
    /// Mean estimated duration of completed workouts (minutes)
    pub average_duration: f64,
    /// Completed workouts per goal
    pub workouts_by_goal: BTreeMap<FitnessGoal, u32>,
    /// Completed workouts per body area
    pub workouts_by_area: BTreeMap<BodyArea, u32>,
    /// Most recently completed workouts, newest first
    pub recent_workouts: Vec<Workout>,
}
