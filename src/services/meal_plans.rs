// ABOUTME: Meal plan service for listing, reading, deleting, and protein swaps
// ABOUTME: Protein swaps rewrite the meal's main ingredient and its substitution entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::limits;
use crate::database::{Collection, Document, DocumentStore};
use crate::errors::{AppError, AppResult};
use crate::generation::Clock;
use crate::models::MealPlan;

/// New protein for one meal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeProteinRequest {
    /// Protein to use instead (e.g. `salmon`)
    pub protein: String,
}

/// Stored meal plan operations
#[derive(Clone)]
pub struct MealPlanService {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
}

impl MealPlanService {
    /// Create the service
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// All of a user's meal plans, newest first
    ///
    /// # Errors
    ///
    /// Returns a database or serialization error
    pub async fn list(&self, user_id: &str) -> AppResult<Vec<MealPlan>> {
        super::load_all(self.store.as_ref(), Collection::Meals, user_id, None).await
    }

    /// One meal plan
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user has no such plan
    pub async fn get(&self, user_id: &str, plan_id: &str) -> AppResult<MealPlan> {
        super::load(self.store.as_ref(), Collection::Meals, plan_id, user_id).await
    }

    /// Delete a meal plan
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user has no such plan
    pub async fn delete(&self, user_id: &str, plan_id: &str) -> AppResult<()> {
        super::remove(self.store.as_ref(), Collection::Meals, plan_id, user_id).await
    }

    /// Swap the protein source of one meal in a plan
    ///
    /// Replaces the name of the meal's first ingredient and the ingredient
    /// named by its first substitution entry. Calories are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty or overlong protein, or
    /// `ResourceNotFound` if the plan or meal does not exist
    pub async fn change_protein(
        &self,
        user_id: &str,
        plan_id: &str,
        meal_id: &str,
        protein: &str,
    ) -> AppResult<MealPlan> {
        let protein = protein.trim();
        if protein.is_empty() || protein.chars().count() > limits::PROTEIN_PREFERENCE_MAX_LEN {
            return Err(AppError::invalid_input(format!(
                "protein must be 1 to {} characters",
                limits::PROTEIN_PREFERENCE_MAX_LEN
            ))
            .with_details(serde_json::json!({ "field": "protein" })));
        }
        let protein = crate::generation::capitalize(protein);

        let mut plan = self.get(user_id, plan_id).await?;
        let meal = plan
            .meals
            .iter_mut()
            .find(|meal| meal.id == meal_id)
            .ok_or_else(|| AppError::not_found("Meal"))?;

        let previous = meal.ingredients.first().map(|i| i.name.clone());
        if let Some(ingredient) = meal.ingredients.first_mut() {
            ingredient.name.clone_from(&protein);
        }
        if let Some(substitution) = meal.substitutions.first_mut() {
            substitution.ingredient.clone_from(&protein);
        }
        if let Some(previous) = previous.filter(|p| !p.is_empty()) {
            meal.name = meal.name.replace(&previous, &protein);
        }

        plan.updated_at = self.clock.now();
        let document =
            Document::from_entity(Collection::Meals, &plan.id, user_id, plan.created_at, &plan)?;
        self.store.upsert(document).await?;

        info!(plan_id, meal_id, protein = %protein, "Meal protein changed");
        Ok(plan)
    }
}
