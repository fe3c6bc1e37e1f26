// ABOUTME: Workout models as persisted and returned by the API
// ABOUTME: Workout and Exercise definitions with completion tracking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{BodyArea, Difficulty, FitnessGoal};

/// Single exercise within a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Unique identifier
    pub id: String,
    /// Exercise name
    pub name: String,
    /// Number of sets
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Duration per set in seconds, for timed movements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// How to perform the movement
    #[serde(default)]
    pub description: String,
    /// Form cues
    #[serde(default)]
    pub form_tips: Vec<String>,
    /// Whether the user checked this exercise off
    pub completed: bool,
}

/// A generated workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    /// Unique identifier
    pub id: String,
    /// Owner
    pub user_id: String,
    /// Workout name
    pub name: String,
    /// Short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Targeted body area
    pub body_area: BodyArea,
    /// Training goal
    pub fitness_goal: FitnessGoal,
    /// Difficulty
    pub difficulty: Difficulty,
    /// Exercises in order
    pub exercises: Vec<Exercise>,
    /// Estimated duration in minutes
    pub estimated_duration: f64,
    /// Estimated calories burned
    pub calories_burned: f64,
    /// Whether the workout was completed
    pub completed: bool,
    /// When the workout was completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
    /// Whether the content came from the language model
    pub is_ai_generated: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Workout {
    /// Look up an exercise by id
    #[must_use]
    pub fn exercise_mut(&mut self, exercise_id: &str) -> Option<&mut Exercise> {
        self.exercises.iter_mut().find(|e| e.id == exercise_id)
    }
}
