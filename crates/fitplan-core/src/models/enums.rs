// ABOUTME: Classification enums shared by requests, prompts, and persisted plans
// ABOUTME: FitnessGoal, BodyArea, Difficulty, DietaryPreference, MealType, and MealDifficulty
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::calorie_tiers;
use crate::errors::AppError;

/// Implements `as_str`, `Display`, and strict `FromStr` for a lowercase wire enum
macro_rules! wire_enum {
    ($ty:ident, $label:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $ty {
            /// All variants in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire representation
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(AppError::invalid_input(format!(
                        "Unknown {}: {other}",
                        $label
                    ))),
                }
            }
        }
    };
}

/// Training goal chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessGoal {
    /// Muscle tone and definition
    Toning,
    /// Hypertrophy
    Muscle,
    /// Cardiovascular endurance
    Cardio,
    /// Fat loss
    WeightLoss,
    /// Maximal strength
    Strength,
}

wire_enum!(FitnessGoal, "fitness goal", {
    Toning => "toning",
    Muscle => "muscle",
    Cardio => "cardio",
    WeightLoss => "weightloss",
    Strength => "strength",
});

impl FitnessGoal {
    /// Whether workouts for this goal end with a conditioning finisher
    #[must_use]
    pub const fn wants_cardio_finisher(&self) -> bool {
        matches!(self, Self::Cardio | Self::WeightLoss)
    }
}

/// Body area targeted by a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyArea {
    /// Chest
    Chest,
    /// Back
    Back,
    /// Shoulders
    Shoulders,
    /// Arms
    Arms,
    /// Legs
    Legs,
    /// Core
    Core,
    /// Whole body
    FullBody,
}

wire_enum!(BodyArea, "body area", {
    Chest => "chest",
    Back => "back",
    Shoulders => "shoulders",
    Arms => "arms",
    Legs => "legs",
    Core => "core",
    FullBody => "fullbody",
});

/// Workout difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// New to training
    Beginner,
    /// Some training history
    Intermediate,
    /// Experienced
    Advanced,
}

wire_enum!(Difficulty, "difficulty", {
    Beginner => "beginner",
    Intermediate => "intermediate",
    Advanced => "advanced",
});

/// Dietary preference for meal generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietaryPreference {
    /// No restriction
    Standard,
    /// No meat or fish
    Vegetarian,
    /// Very low carbohydrate
    Keto,
    /// Protein-forward
    HighProtein,
    /// No gluten
    GlutenFree,
    /// No dairy
    DairyFree,
}

wire_enum!(DietaryPreference, "dietary preference", {
    Standard => "standard",
    Vegetarian => "vegetarian",
    Keto => "keto",
    HighProtein => "highprotein",
    GlutenFree => "glutenfree",
    DairyFree => "dairyfree",
});

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
}

wire_enum!(MealType, "meal type", {
    Breakfast => "breakfast",
    Lunch => "lunch",
    Dinner => "dinner",
    Snack => "snack",
});

impl MealType {
    /// Low, mid, and high calorie targets for one meal of this type
    #[must_use]
    pub const fn calorie_tiers(&self) -> [u32; 3] {
        match self {
            Self::Breakfast => calorie_tiers::BREAKFAST,
            Self::Lunch => calorie_tiers::LUNCH,
            Self::Dinner => calorie_tiers::DINNER,
            Self::Snack => calorie_tiers::SNACK,
        }
    }

    /// Human-readable range, e.g. `350-500 cal`
    #[must_use]
    pub fn calorie_range_label(&self) -> String {
        let [low, _, high] = self.calorie_tiers();
        format!("{low}-{high} cal")
    }

    /// Capitalized label used in generated names
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snack => "Snack",
        }
    }
}

/// Cooking difficulty of a single meal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealDifficulty {
    /// Few steps, common equipment
    Easy,
    /// Some technique required
    Moderate,
    /// Involved preparation
    Advanced,
}

wire_enum!(MealDifficulty, "meal difficulty", {
    Easy => "easy",
    Moderate => "moderate",
    Advanced => "advanced",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_serde() {
        for goal in FitnessGoal::ALL {
            let json = serde_json::to_string(goal).unwrap();
            assert_eq!(json, format!("\"{}\"", goal.as_str()));
        }
        for area in BodyArea::ALL {
            let json = serde_json::to_string(area).unwrap();
            assert_eq!(json, format!("\"{}\"", area.as_str()));
        }
        for diet in DietaryPreference::ALL {
            let json = serde_json::to_string(diet).unwrap();
            assert_eq!(json, format!("\"{}\"", diet.as_str()));
        }
    }

    #[test]
    fn test_from_str_is_strict() {
        assert_eq!("weightloss".parse::<FitnessGoal>().unwrap(), FitnessGoal::WeightLoss);
        assert!("WeightLoss".parse::<FitnessGoal>().is_err());
        assert!("brunch".parse::<MealType>().is_err());
    }

    #[test]
    fn test_calorie_tiers() {
        assert_eq!(MealType::Breakfast.calorie_tiers(), [350, 420, 500]);
        assert_eq!(MealType::Lunch.calorie_tiers(), [500, 600, 700]);
        assert_eq!(MealType::Dinner.calorie_tiers(), [500, 600, 700]);
        assert_eq!(MealType::Snack.calorie_tiers(), [150, 200, 250]);
        assert_eq!(MealType::Snack.calorie_range_label(), "150-250 cal");
    }
}
