// ABOUTME: Validates normalized JSON against the expected plan shape
// ABOUTME: Produces identifier-free draft types consumed by enrichment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Schema Validator
//!
//! Model output is never deserialized into persisted entity types. It goes
//! into the draft types below, which have no identifier fields, so any `id`
//! the model supplies is dropped. Field types are not coerced: a string where
//! a number belongs is a validation failure.
//!
//! Meal lists are accepted either as a bare array or as an object carrying
//! the array under `meals`, since models switch between the two freely.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{GenerationError, PlanKind};
use crate::models::{Macros, MealDifficulty, MealType};

/// Expected top-level shape of a completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanShape {
    /// Object with an `exercises` array
    Workout,
    /// Object with a `meals` array and optional totals, or a bare meal array
    MealPlan,
    /// Bare meal array, or an object with a `meals` array
    MealOptions,
}

impl From<PlanKind> for PlanShape {
    fn from(kind: PlanKind) -> Self {
        match kind {
            PlanKind::Workout => Self::Workout,
            PlanKind::Meal => Self::MealPlan,
            PlanKind::MealOption => Self::MealOptions,
        }
    }
}

impl fmt::Display for PlanShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Workout => "workout",
            Self::MealPlan => "meal plan",
            Self::MealOptions => "meal options",
        })
    }
}

/// Exercise as described by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDraft {
    /// Display name
    pub name: String,
    /// Number of sets
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Hold or interval length in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// How to perform it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Coaching cues
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_tips: Option<Vec<String>>,
}

/// Workout as described by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDraft {
    /// Display name; enrichment supplies one when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Short summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Exercises in order
    pub exercises: Vec<ExerciseDraft>,
    /// Minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<f64>,
    /// Estimated kcal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<f64>,
}

/// Ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientDraft {
    /// Display name
    pub name: String,
    /// Quantity with unit
    #[serde(default)]
    pub amount: String,
    /// Calories (kcal)
    pub calories: f64,
}

/// One numbered cooking step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDraft {
    /// 1-based position; filled from list order when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<u32>,
    /// What to do
    pub description: String,
}

/// Instructions as numbered steps or one block of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstructionsDraft {
    /// Numbered steps
    Steps(Vec<StepDraft>),
    /// Free text
    Text(String),
}

/// Alternative for a substituted ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeDraft {
    /// Display name
    pub name: String,
    /// Quantity with unit
    #[serde(default)]
    pub amount: String,
    /// Calories (kcal)
    #[serde(default)]
    pub calories: f64,
    /// Why the swap works
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Substitution suggestions for one ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionDraft {
    /// Ingredient being replaced
    pub ingredient: String,
    /// Replacement options
    #[serde(default)]
    pub alternatives: Vec<AlternativeDraft>,
}

/// Meal as described by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealDraft {
    /// Display name
    pub name: String,
    /// Meal slot
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,
    /// Calories (kcal)
    pub calories: f64,
    /// Macro breakdown
    pub macros: Macros,
    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Vec<IngredientDraft>,
    /// Cooking instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<InstructionsDraft>,
    /// Preparation minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<f64>,
    /// Cooking minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<f64>,
    /// Total minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<f64>,
    /// Cooking difficulty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<MealDifficulty>,
    /// Ingredient swaps
    #[serde(default)]
    pub substitutions: Vec<SubstitutionDraft>,
}

/// Daily meal plan as described by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanDraft {
    /// Display name; enrichment supplies one when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Meals of the day
    pub meals: Vec<MealDraft>,
    /// Declared daily calories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_calories: Option<f64>,
    /// Declared daily macros
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macros: Option<Macros>,
}

/// Validate a workout object
///
/// # Errors
///
/// Returns [`GenerationError::Validation`] for a non-object, missing or
/// mistyped fields, an empty exercise list, or negative figures
pub fn validate_workout(value: Value) -> Result<WorkoutDraft, GenerationError> {
    let shape = PlanShape::Workout;
    if !value.is_object() {
        return Err(invalid(shape, "expected a JSON object"));
    }
    let draft: WorkoutDraft = decode(shape, value)?;

    if draft.exercises.is_empty() {
        return Err(invalid(shape, "exercise list is empty"));
    }
    for (idx, exercise) in draft.exercises.iter().enumerate() {
        require_text(shape, &format!("exercises[{idx}].name"), &exercise.name)?;
    }
    if let Some(minutes) = draft.estimated_duration {
        require_non_negative(shape, "estimatedDuration", minutes)?;
    }
    if let Some(calories) = draft.calories_burned {
        require_non_negative(shape, "caloriesBurned", calories)?;
    }
    Ok(draft)
}

/// Validate a daily meal plan
///
/// A bare meal array is wrapped into a plan with no declared totals.
///
/// # Errors
///
/// Returns [`GenerationError::Validation`] for a wrong top-level type, an
/// empty meal list, a meal without a type, or any invalid meal
pub fn validate_meal_plan(value: Value) -> Result<MealPlanDraft, GenerationError> {
    let shape = PlanShape::MealPlan;
    let draft: MealPlanDraft = match value {
        Value::Object(_) => decode(shape, value)?,
        Value::Array(_) => MealPlanDraft {
            name: None,
            meals: decode(shape, value)?,
            total_calories: None,
            macros: None,
        },
        _ => return Err(invalid(shape, "expected a JSON object or array")),
    };

    check_meals(shape, &draft.meals)?;
    if let Some(idx) = draft.meals.iter().position(|m| m.meal_type.is_none()) {
        return Err(invalid(shape, &format!("meals[{idx}].type is missing")));
    }
    if let Some(total) = draft.total_calories {
        require_non_negative(shape, "totalCalories", total)?;
    }
    if let Some(macros) = &draft.macros {
        check_macros(shape, "macros", macros)?;
    }
    Ok(draft)
}

/// Validate a set of meal options
///
/// # Errors
///
/// Returns [`GenerationError::Validation`] for a wrong top-level type, an
/// object without `meals`, an empty list, or any invalid meal
pub fn validate_meal_options(value: Value) -> Result<Vec<MealDraft>, GenerationError> {
    let shape = PlanShape::MealOptions;
    let items = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => map
            .remove("meals")
            .ok_or_else(|| invalid(shape, "object has no meals array"))?,
        _ => return Err(invalid(shape, "expected a JSON array or object")),
    };
    if !items.is_array() {
        return Err(invalid(shape, "meals is not an array"));
    }

    let meals: Vec<MealDraft> = decode(shape, items)?;
    check_meals(shape, &meals)?;
    Ok(meals)
}

fn check_meals(shape: PlanShape, meals: &[MealDraft]) -> Result<(), GenerationError> {
    if meals.is_empty() {
        return Err(invalid(shape, "meal list is empty"));
    }
    for (idx, meal) in meals.iter().enumerate() {
        require_text(shape, &format!("meals[{idx}].name"), &meal.name)?;
        require_non_negative(shape, &format!("meals[{idx}].calories"), meal.calories)?;
        check_macros(shape, &format!("meals[{idx}].macros"), &meal.macros)?;
        for (i, ingredient) in meal.ingredients.iter().enumerate() {
            let field = format!("meals[{idx}].ingredients[{i}]");
            require_text(shape, &format!("{field}.name"), &ingredient.name)?;
            require_non_negative(shape, &format!("{field}.calories"), ingredient.calories)?;
        }
        for (field, minutes) in [
            ("prepTime", meal.prep_time),
            ("cookTime", meal.cook_time),
            ("totalTime", meal.total_time),
        ] {
            if let Some(minutes) = minutes {
                require_non_negative(shape, &format!("meals[{idx}].{field}"), minutes)?;
            }
        }
    }
    Ok(())
}

fn check_macros(shape: PlanShape, field: &str, macros: &Macros) -> Result<(), GenerationError> {
    require_non_negative(shape, &format!("{field}.protein"), macros.protein)?;
    require_non_negative(shape, &format!("{field}.carbs"), macros.carbs)?;
    require_non_negative(shape, &format!("{field}.fats"), macros.fats)
}

fn decode<T: DeserializeOwned>(shape: PlanShape, value: Value) -> Result<T, GenerationError> {
    serde_json::from_value(value).map_err(|e| invalid(shape, &e.to_string()))
}

fn require_text(shape: PlanShape, field: &str, text: &str) -> Result<(), GenerationError> {
    if text.trim().is_empty() {
        return Err(invalid(shape, &format!("{field} is empty")));
    }
    Ok(())
}

fn require_non_negative(shape: PlanShape, field: &str, value: f64) -> Result<(), GenerationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(
            shape,
            &format!("{field} must be a non-negative number, got {value}"),
        ));
    }
    Ok(())
}

fn invalid(shape: PlanShape, reason: &str) -> GenerationError {
    GenerationError::Validation(format!("{shape}: {reason}"))
}
