// ABOUTME: Meal and meal plan models as persisted and returned by the API
// ABOUTME: Macros, Ingredient, InstructionStep, Substitution, Meal, and MealPlan definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::ops::{Add, AddAssign};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{DietaryPreference, FitnessGoal, MealDifficulty, MealType};
use crate::constants::macros;

/// Macro-nutrient breakdown in grams
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    /// Protein (g)
    pub protein: f64,
    /// Carbohydrates (g)
    pub carbs: f64,
    /// Fat (g)
    pub fats: f64,
}

impl Macros {
    /// Derive a rounded 30/40/30 split from a calorie figure
    #[must_use]
    pub fn from_calories(calories: f64) -> Self {
        Self {
            protein: (calories * macros::PROTEIN_CALORIE_SHARE / macros::KCAL_PER_GRAM_PROTEIN)
                .round(),
            carbs: (calories * macros::CARBS_CALORIE_SHARE / macros::KCAL_PER_GRAM_CARBS).round(),
            fats: (calories * macros::FATS_CALORIE_SHARE / macros::KCAL_PER_GRAM_FAT).round(),
        }
    }
}

impl Add for Macros {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fats: self.fats + rhs.fats,
        }
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Ingredient line of a meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique identifier
    pub id: String,
    /// Ingredient name
    pub name: String,
    /// Amount with unit, e.g. `6 oz`
    pub amount: String,
    /// Calories contributed
    pub calories: f64,
}

/// One numbered cooking step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionStep {
    /// Unique identifier
    pub id: String,
    /// 1-based step number
    pub step: u32,
    /// What to do
    pub description: String,
}

/// Cooking instructions: numbered steps, or a single block of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Instructions {
    /// Numbered steps
    Steps(Vec<InstructionStep>),
    /// Free text
    Text(String),
}

impl Default for Instructions {
    fn default() -> Self {
        Self::Steps(Vec::new())
    }
}

/// Alternative for a substitutable ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionAlternative {
    /// Unique identifier
    pub id: String,
    /// Alternative ingredient name
    pub name: String,
    /// Amount with unit
    pub amount: String,
    /// Estimated calories
    pub calories: f64,
    /// Why the alternative works
    #[serde(default)]
    pub notes: String,
}

/// Substitution options for one ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substitution {
    /// Unique identifier
    pub id: String,
    /// Name of the ingredient being replaced
    pub ingredient: String,
    /// Candidate replacements
    pub alternatives: Vec<SubstitutionAlternative>,
}

/// A single meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Unique identifier
    pub id: String,
    /// Meal name
    pub name: String,
    /// Meal slot
    #[serde(rename = "type")]
    pub meal_type: MealType,
    /// Total calories
    pub calories: f64,
    /// Macro breakdown
    pub macros: Macros,
    /// Ingredient lines
    pub ingredients: Vec<Ingredient>,
    /// Cooking instructions
    #[serde(default)]
    pub instructions: Instructions,
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
    /// Ingredient substitutions
    #[serde(default)]
    pub substitutions: Vec<Substitution>,
    /// Provenance, set on standalone meal options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_ai_generated: Option<bool>,
}

/// A daily meal plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    /// Unique identifier
    pub id: String,
    /// Owner
    pub user_id: String,
    /// Plan name
    pub name: String,
    /// Goal the plan targets
    pub fitness_goal: FitnessGoal,
    /// Diet the plan follows
    pub dietary_preference: DietaryPreference,
    /// Meals across the day
    pub meals: Vec<Meal>,
    /// Declared (or computed) daily calories
    pub total_calories: f64,
    /// Declared (or computed) daily macros
    pub macros: Macros,
    /// Whether the content came from the language model
    pub is_ai_generated: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl MealPlan {
    /// Sum of the meals' calories
    #[must_use]
    pub fn computed_calories(&self) -> f64 {
        self.meals.iter().map(|meal| meal.calories).sum()
    }

    /// Sum of the meals' macros
    #[must_use]
    pub fn computed_macros(&self) -> Macros {
        self.meals
            .iter()
            .fold(Macros::default(), |acc, meal| acc + meal.macros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros_from_calories() {
        let m = Macros::from_calories(2000.0);
        assert!((m.protein - 150.0).abs() < f64::EPSILON);
        assert!((m.carbs - 200.0).abs() < f64::EPSILON);
        assert!((m.fats - 67.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_instructions_accept_text_or_steps() {
        let text: Instructions = serde_json::from_str("\"Mix and serve\"").unwrap();
        assert_eq!(text, Instructions::Text("Mix and serve".to_owned()));

        let steps: Instructions =
            serde_json::from_str(r#"[{"id":"a","step":1,"description":"Mix"}]"#).unwrap();
        assert!(matches!(steps, Instructions::Steps(ref s) if s.len() == 1));
    }

    #[test]
    fn test_meal_wire_field_names() {
        let meal = Meal {
            id: "m1".to_owned(),
            name: "Oats".to_owned(),
            meal_type: MealType::Breakfast,
            calories: 350.0,
            macros: Macros::from_calories(350.0),
            ingredients: vec![],
            instructions: Instructions::Text("Cook".to_owned()),
            prep_time: Some(5.0),
            cook_time: None,
            total_time: None,
            difficulty: Some(MealDifficulty::Easy),
            substitutions: vec![],
            is_ai_generated: None,
        };
        let json = serde_json::to_value(&meal).unwrap();
        assert_eq!(json["type"], "breakfast");
        assert_eq!(json["prepTime"], 5.0);
        assert!(json.get("cookTime").is_none());
        assert!(json.get("isAiGenerated").is_none());
    }
}
