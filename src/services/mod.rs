// ABOUTME: Domain service layer over the document store
// ABOUTME: Workouts, meal plans, meal log, progress tracking, and user profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Business rules for everything outside generation. Route handlers stay thin
//! and delegate here; every service reads and writes through the injected
//! [`DocumentStore`] and takes time from the injected
//! [`Clock`](crate::generation::Clock).

/// Logged meals and daily totals
pub mod meal_log;
/// Stored meal plans and protein swaps
pub mod meal_plans;
/// User profile get-or-create and partial update
pub mod profile;
/// Weight check-ins and workout statistics
pub mod progress;
/// Stored workouts and completion tracking
pub mod workouts;

use serde::de::DeserializeOwned;

pub use meal_log::{LogMealRequest, MealLogService};
pub use meal_plans::{ChangeProteinRequest, MealPlanService};
pub use profile::{ProfileService, ProfileUpdate};
pub use progress::{ProgressService, WeightCheckInRequest};
pub use workouts::{WorkoutService, WorkoutUpdate};

use crate::database::{Collection, DocumentStore, TimeRange};
use crate::errors::{AppError, AppResult};

/// Read one entity or fail with `ResourceNotFound`
pub(crate) async fn load<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    id: &str,
    owner: &str,
) -> AppResult<T> {
    store
        .read(collection, id, owner)
        .await?
        .ok_or_else(|| AppError::not_found(collection.entity_name()))?
        .into_entity()
}

/// All of an owner's entities in a collection, newest first
pub(crate) async fn load_all<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    owner: &str,
    range: Option<TimeRange>,
) -> AppResult<Vec<T>> {
    store
        .list_by_owner(collection, owner, range)
        .await?
        .into_iter()
        .map(crate::database::Document::into_entity)
        .collect()
}

/// Delete one entity or fail with `ResourceNotFound`
pub(crate) async fn remove(
    store: &dyn DocumentStore,
    collection: Collection,
    id: &str,
    owner: &str,
) -> AppResult<()> {
    if store.delete(collection, id, owner).await? {
        Ok(())
    } else {
        Err(AppError::not_found(collection.entity_name()))
    }
}
