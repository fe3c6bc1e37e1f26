// ABOUTME: Generation request types accepted by the pipeline and the HTTP layer
// ABOUTME: Workout, meal plan, and meal options requests with range validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::PlanKind;
use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use crate::models::{BodyArea, DietaryPreference, Difficulty, FitnessGoal, MealType};

/// Parameters for a single workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRequest {
    /// Targeted body area
    pub body_area: BodyArea,
    /// Training goal
    pub fitness_goal: FitnessGoal,
    /// Difficulty
    pub difficulty: Difficulty,
}

/// Parameters for a daily meal plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRequest {
    /// Training goal
    pub fitness_goal: FitnessGoal,
    /// Diet
    pub dietary_preference: DietaryPreference,
    /// Daily calorie target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_calories: Option<u32>,
}

/// Parameters for three alternative meals in one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealOptionsRequest {
    /// Meal slot
    pub meal_type: MealType,
    /// Training goal
    pub fitness_goal: FitnessGoal,
    /// Diet
    pub dietary_preference: DietaryPreference,
    /// Protein every option must feature (e.g. `chicken`)
    pub protein_preference: String,
    /// Daily calorie target
    pub daily_calorie_target: u32,
}

/// Any request the pipeline can serve
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    /// Single workout
    Workout(WorkoutRequest),
    /// Daily meal plan
    MealPlan(MealPlanRequest),
    /// Meal options
    MealOptions(MealOptionsRequest),
}

impl GenerationRequest {
    /// Plan kind produced by this request
    #[must_use]
    pub const fn kind(&self) -> PlanKind {
        match self {
            Self::Workout(_) => PlanKind::Workout,
            Self::MealPlan(_) => PlanKind::Meal,
            Self::MealOptions(_) => PlanKind::MealOption,
        }
    }

    /// Reject requests the pipeline must never see
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for out-of-range calorie targets or an empty or
    /// overlong protein preference
    pub fn validate(&self) -> AppResult<()> {
        match self {
            Self::Workout(_) => Ok(()),
            Self::MealPlan(request) => request.validate(),
            Self::MealOptions(request) => request.validate(),
        }
    }
}

impl MealPlanRequest {
    /// Check the optional calorie target
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the target is outside the accepted range
    pub fn validate(&self) -> AppResult<()> {
        if let Some(target) = self.target_calories {
            let range = limits::MEAL_PLAN_MIN_CALORIES..=limits::MEAL_PLAN_MAX_CALORIES;
            if !range.contains(&target) {
                return Err(AppError::invalid_input(format!(
                    "targetCalories must be between {} and {}, got {target}",
                    range.start(),
                    range.end()
                ))
                .with_details(serde_json::json!({ "field": "targetCalories" })));
            }
        }
        Ok(())
    }
}

impl MealOptionsRequest {
    /// Protein preference with surrounding whitespace removed
    #[must_use]
    pub fn protein(&self) -> &str {
        self.protein_preference.trim()
    }

    /// Check the calorie target and protein preference
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` describing the first offending field
    pub fn validate(&self) -> AppResult<()> {
        let range =
            limits::MEAL_OPTIONS_MIN_DAILY_CALORIES..=limits::MEAL_OPTIONS_MAX_DAILY_CALORIES;
        if !range.contains(&self.daily_calorie_target) {
            return Err(AppError::invalid_input(format!(
                "dailyCalorieTarget must be between {} and {}, got {}",
                range.start(),
                range.end(),
                self.daily_calorie_target
            ))
            .with_details(serde_json::json!({ "field": "dailyCalorieTarget" })));
        }

        let protein = self.protein();
        if protein.is_empty() {
            return Err(AppError::invalid_input("proteinPreference must not be empty")
                .with_details(serde_json::json!({ "field": "proteinPreference" })));
        }
        if protein.chars().count() > limits::PROTEIN_PREFERENCE_MAX_LEN {
            return Err(AppError::invalid_input(format!(
                "proteinPreference must be at most {} characters",
                limits::PROTEIN_PREFERENCE_MAX_LEN
            ))
            .with_details(serde_json::json!({ "field": "proteinPreference" })));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(target: u32, protein: &str) -> MealOptionsRequest {
        MealOptionsRequest {
            meal_type: MealType::Snack,
            fitness_goal: FitnessGoal::Muscle,
            dietary_preference: DietaryPreference::Standard,
            protein_preference: protein.to_owned(),
            daily_calorie_target: target,
        }
    }

    #[test]
    fn test_meal_options_range() {
        assert!(options(1200, "chicken").validate().is_ok());
        assert!(options(5000, "chicken").validate().is_ok());
        assert!(options(1199, "chicken").validate().is_err());
        assert!(options(5001, "chicken").validate().is_err());
    }

    #[test]
    fn test_meal_options_protein() {
        assert!(options(2000, "   ").validate().is_err());
        assert!(options(2000, &"x".repeat(51)).validate().is_err());
        assert_eq!(options(2000, "  tofu ").protein(), "tofu");
    }

    #[test]
    fn test_meal_plan_target() {
        let mut request = MealPlanRequest {
            fitness_goal: FitnessGoal::Toning,
            dietary_preference: DietaryPreference::Keto,
            target_calories: None,
        };
        assert!(request.validate().is_ok());
        request.target_calories = Some(999);
        assert!(GenerationRequest::MealPlan(request).validate().is_err());
    }

    #[test]
    fn test_request_deserializes_from_camel_case() {
        let request: MealOptionsRequest = serde_json::from_str(
            r#"{"userId":"u","mealType":"snack","fitnessGoal":"weightloss",
                "dietaryPreference":"standard","proteinPreference":"chicken",
                "dailyCalorieTarget":2000}"#,
        )
        .unwrap();
        assert_eq!(request.fitness_goal, FitnessGoal::WeightLoss);
        assert_eq!(
            GenerationRequest::MealOptions(request).kind(),
            PlanKind::MealOption
        );
    }
}
