// ABOUTME: Meal log service recording eaten meals and building per-day totals
// ABOUTME: Days are UTC calendar dates given as YYYY-MM-DD
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::database::{Collection, Document, DocumentStore, TimeRange};
use crate::errors::{AppError, AppResult};
use crate::generation::Clock;
use crate::models::{DailyMealLog, Meal, MealLogEntry, MealType};

/// Body of a log-meal request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogMealRequest {
    /// Owner; defaults to the authenticated user
    #[serde(default)]
    pub user_id: Option<String>,
    /// Slot the meal was eaten in
    pub meal_type: MealType,
    /// The meal as shown to the user
    pub meal: Meal,
    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Meal logging operations
#[derive(Clone)]
pub struct MealLogService {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
}

impl MealLogService {
    /// Create the service
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Record a meal as eaten now
    ///
    /// # Errors
    ///
    /// Returns a database or serialization error
    pub async fn log_meal(
        &self,
        authenticated_user: &str,
        request: LogMealRequest,
    ) -> AppResult<MealLogEntry> {
        let user_id = request
            .user_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| authenticated_user.to_owned());

        let entry = MealLogEntry {
            id: Uuid::new_v4().to_string(),
            user_id,
            meal_id: request.meal.id.clone(),
            meal: request.meal,
            meal_type: request.meal_type,
            logged_at: self.clock.now(),
            notes: request.notes,
        };

        let document = Document::from_entity(
            Collection::MealLogs,
            &entry.id,
            &entry.user_id,
            entry.logged_at,
            &entry,
        )?;
        self.store.create(document).await?;

        info!(
            user_id = %entry.user_id,
            meal_type = %entry.meal_type,
            calories = entry.meal.calories,
            "Meal logged"
        );
        Ok(entry)
    }

    /// Meals logged on one day, oldest first, with totals
    ///
    /// `date` is `YYYY-MM-DD`; today (UTC) when absent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed date, or a database error
    pub async fn daily_log(&self, user_id: &str, date: Option<&str>) -> AppResult<DailyMealLog> {
        let date = match date.map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => parse_date(raw)?,
            None => self.clock.now().date_naive(),
        };

        let start = date.and_time(NaiveTime::MIN).and_utc();
        let end = start + Duration::days(1) - Duration::microseconds(1);

        let mut entries: Vec<MealLogEntry> = super::load_all(
            self.store.as_ref(),
            Collection::MealLogs,
            user_id,
            Some(TimeRange::between(start, end)),
        )
        .await?;
        entries.reverse();

        Ok(DailyMealLog::from_entries(date, entries))
    }
}

/// Parse a `YYYY-MM-DD` date
///
/// # Errors
///
/// Returns `InvalidInput` if the text is not a valid calendar date
pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::invalid_input(format!("date must be YYYY-MM-DD, got {raw}"))
            .with_details(serde_json::json!({ "field": "date" }))
    })
}
