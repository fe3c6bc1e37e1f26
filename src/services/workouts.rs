// ABOUTME: Workout service for listing, updating, completing, and deleting stored workouts
// ABOUTME: Updates are unconditional overwrites of the stored document
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::database::{Collection, Document, DocumentStore};
use crate::errors::{AppError, AppResult};
use crate::generation::Clock;
use crate::models::{Exercise, Workout};

/// Partial workout update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutUpdate {
    /// Replacement exercise list
    #[serde(default)]
    pub exercises: Option<Vec<Exercise>>,
    /// New completion state
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Stored workout operations
#[derive(Clone)]
pub struct WorkoutService {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
}

impl WorkoutService {
    /// Create the service
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// All of a user's workouts, newest first
    ///
    /// # Errors
    ///
    /// Returns a database or serialization error
    pub async fn list(&self, user_id: &str) -> AppResult<Vec<Workout>> {
        super::load_all(self.store.as_ref(), Collection::Workouts, user_id, None).await
    }

    /// One workout
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user has no such workout
    pub async fn get(&self, user_id: &str, workout_id: &str) -> AppResult<Workout> {
        super::load(self.store.as_ref(), Collection::Workouts, workout_id, user_id).await
    }

    /// Apply a partial update
    ///
    /// Marking a workout completed stamps `completedDate` unless it already
    /// has one; marking it incomplete clears it.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user has no such workout
    pub async fn update(
        &self,
        user_id: &str,
        workout_id: &str,
        update: WorkoutUpdate,
    ) -> AppResult<Workout> {
        let mut workout = self.get(user_id, workout_id).await?;
        let now = self.clock.now();

        if let Some(exercises) = update.exercises {
            workout.exercises = exercises;
        }
        match update.completed {
            Some(true) => {
                workout.completed = true;
                workout.completed_date.get_or_insert(now);
            }
            Some(false) => {
                workout.completed = false;
                workout.completed_date = None;
            }
            None => {}
        }

        self.save(workout).await
    }

    /// Flip one exercise's completion flag
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the workout or exercise does not exist
    pub async fn toggle_exercise(
        &self,
        user_id: &str,
        workout_id: &str,
        exercise_id: &str,
    ) -> AppResult<Workout> {
        let mut workout = self.get(user_id, workout_id).await?;
        let exercise = workout
            .exercise_mut(exercise_id)
            .ok_or_else(|| AppError::not_found("Exercise"))?;
        exercise.completed = !exercise.completed;
        self.save(workout).await
    }

    /// Mark a workout completed now
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user has no such workout
    pub async fn complete(&self, user_id: &str, workout_id: &str) -> AppResult<Workout> {
        let mut workout = self.get(user_id, workout_id).await?;
        workout.completed = true;
        workout.completed_date = Some(self.clock.now());
        let workout = self.save(workout).await?;
        info!(workout_id, user_id, "Workout completed");
        Ok(workout)
    }

    /// Delete a workout
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user has no such workout
    pub async fn delete(&self, user_id: &str, workout_id: &str) -> AppResult<()> {
        super::remove(self.store.as_ref(), Collection::Workouts, workout_id, user_id).await
    }

    async fn save(&self, mut workout: Workout) -> AppResult<Workout> {
        workout.updated_at = self.clock.now();
        let document = Document::from_entity(
            Collection::Workouts,
            &workout.id,
            &workout.user_id,
            workout.created_at,
            &workout,
        )?;
        self.store.upsert(document).await?;
        Ok(workout)
    }
}
