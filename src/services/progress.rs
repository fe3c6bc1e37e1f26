// ABOUTME: Progress service for weight check-ins, weight history, and workout statistics
// ABOUTME: Summaries are computed from completed workouts on every request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::constants::progress;
use crate::database::{Collection, Document, DocumentStore, TimeRange};
use crate::errors::{AppError, AppResult};
use crate::generation::Clock;
use crate::models::{ProgressSummary, WeightCheckIn, Workout};

/// Body of a weight check-in request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightCheckInRequest {
    /// Body weight
    pub weight: f64,
    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Progress tracking operations
#[derive(Clone)]
pub struct ProgressService {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
}

impl ProgressService {
    /// Create the service
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Record a weight measurement taken now
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` unless the weight is a positive number
    pub async fn check_in(
        &self,
        user_id: &str,
        request: WeightCheckInRequest,
    ) -> AppResult<WeightCheckIn> {
        if !request.weight.is_finite() || request.weight <= 0.0 {
            return Err(AppError::invalid_input("weight must be a positive number")
                .with_details(serde_json::json!({ "field": "weight" })));
        }

        let check_in = WeightCheckIn {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_owned(),
            weight: request.weight,
            notes: request.notes,
            recorded_at: self.clock.now(),
        };
        let document = Document::from_entity(
            Collection::Progress,
            &check_in.id,
            user_id,
            check_in.recorded_at,
            &check_in,
        )?;
        self.store.create(document).await?;

        info!(user_id, weight = check_in.weight, "Weight check-in recorded");
        Ok(check_in)
    }

    /// Check-ins from the last `days` days (default 30), newest first
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `days` exceeds the accepted window, or a
    /// database or serialization error
    pub async fn weight_history(
        &self,
        user_id: &str,
        days: Option<u32>,
    ) -> AppResult<Vec<WeightCheckIn>> {
        let days = days.unwrap_or(progress::DEFAULT_WEIGHT_HISTORY_DAYS);
        let cutoff = (days <= progress::MAX_WEIGHT_HISTORY_DAYS)
            .then(|| {
                self.clock
                    .now()
                    .checked_sub_signed(Duration::days(i64::from(days)))
            })
            .flatten()
            .ok_or_else(|| {
                AppError::invalid_input(format!(
                    "days must be at most {}",
                    progress::MAX_WEIGHT_HISTORY_DAYS
                ))
                .with_details(serde_json::json!({ "field": "days" }))
            })?;
        super::load_all(
            self.store.as_ref(),
            Collection::Progress,
            user_id,
            Some(TimeRange::since(cutoff)),
        )
        .await
    }

    /// Statistics over the user's completed workouts
    ///
    /// # Errors
    ///
    /// Returns a database or serialization error
    pub async fn summary(&self, user_id: &str) -> AppResult<ProgressSummary> {
        let workouts: Vec<Workout> =
            super::load_all(self.store.as_ref(), Collection::Workouts, user_id, None).await?;
        Ok(summarize(workouts))
    }
}

/// Aggregate completed workouts
#[must_use]
pub fn summarize(workouts: Vec<Workout>) -> ProgressSummary {
    let mut completed: Vec<Workout> = workouts.into_iter().filter(|w| w.completed).collect();
    completed.sort_by(|a, b| {
        let a_at = a.completed_date.unwrap_or(a.created_at);
        let b_at = b.completed_date.unwrap_or(b.created_at);
        b_at.cmp(&a_at)
    });

    let mut workouts_by_goal = BTreeMap::new();
    let mut workouts_by_area = BTreeMap::new();
    for workout in &completed {
        *workouts_by_goal.entry(workout.fitness_goal).or_insert(0) += 1;
        *workouts_by_area.entry(workout.body_area).or_insert(0) += 1;
    }

    let total_workouts = u32::try_from(completed.len()).unwrap_or(u32::MAX);
    let total_calories_burned = completed.iter().map(|w| w.calories_burned).sum();
    let average_duration = if total_workouts == 0 {
        0.0
    } else {
        completed.iter().map(|w| w.estimated_duration).sum::<f64>() / f64::from(total_workouts)
    };

    ProgressSummary {
        total_workouts,
        total_calories_burned,
        average_duration,
        workouts_by_goal,
        workouts_by_area,
        recent_workouts: completed
            .into_iter()
            .take(progress::RECENT_WORKOUTS_LIMIT)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::{BodyArea, Difficulty, FitnessGoal};

    fn workout(id: &str, completed_day: Option<u32>, goal: FitnessGoal) -> Workout {
        let created = Utc.with_ymd_and_hms(2025, 4, 1, 7, 0, 0).unwrap();
        Workout {
            id: id.to_owned(),
            user_id: "u".to_owned(),
            name: id.to_owned(),
            description: None,
            body_area: BodyArea::Legs,
            fitness_goal: goal,
            difficulty: Difficulty::Intermediate,
            exercises: Vec::new(),
            estimated_duration: 40.0,
            calories_burned: 300.0,
            completed: completed_day.is_some(),
            completed_date: completed_day
                .map(|day| Utc.with_ymd_and_hms(2025, 4, day, 7, 0, 0).unwrap()),
            is_ai_generated: false,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_summary_counts_completed_only() {
        let summary = summarize(vec![
            workout("a", Some(2), FitnessGoal::Strength),
            workout("b", None, FitnessGoal::Strength),
            workout("c", Some(5), FitnessGoal::Cardio),
        ]);
        assert_eq!(summary.total_workouts, 2);
        assert!((summary.total_calories_burned - 600.0).abs() < f64::EPSILON);
        assert!((summary.average_duration - 40.0).abs() < f64::EPSILON);
        assert_eq!(summary.workouts_by_goal[&FitnessGoal::Cardio], 1);
        assert_eq!(summary.workouts_by_area[&BodyArea::Legs], 2);
        assert_eq!(summary.recent_workouts[0].id, "c");
    }

    #[test]
    fn test_summary_empty() {
        let summary = summarize(Vec::new());
        assert_eq!(summary.total_workouts, 0);
        assert!(summary.average_duration.abs() < f64::EPSILON);
        assert!(summary.recent_workouts.is_empty());
    }
}
