// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Calorie tiers, macro ratios, mock ingredient shares, limits, and enrichment defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat list. Values here are part of the API contract (calorie tiers, request
//! limits) or of the deterministic fallback generator, so changing them changes
//! observable output.

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 3000;
}

/// Macro-nutrient split used to derive grams from a calorie figure
pub mod macros {
    /// Share of calories coming from protein
    pub const PROTEIN_CALORIE_SHARE: f64 = 0.3;
    /// Share of calories coming from carbohydrates
    pub const CARBS_CALORIE_SHARE: f64 = 0.4;
    /// Share of calories coming from fat
    pub const FATS_CALORIE_SHARE: f64 = 0.3;
    /// Kilocalories per gram of protein
    pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
    /// Kilocalories per gram of carbohydrate
    pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
    /// Kilocalories per gram of fat
    pub const KCAL_PER_GRAM_FAT: f64 = 9.0;
}

/// Low/mid/high calorie tiers per meal type
pub mod calorie_tiers {
    /// Breakfast tier (low, mid, high)
    pub const BREAKFAST: [u32; 3] = [350, 420, 500];
    /// Lunch tier (low, mid, high)
    pub const LUNCH: [u32; 3] = [500, 600, 700];
    /// Dinner tier (low, mid, high)
    pub const DINNER: [u32; 3] = [500, 600, 700];
    /// Snack tier (low, mid, high)
    pub const SNACK: [u32; 3] = [150, 200, 250];
}

/// Daily meal plan split across meal types
pub mod meal_plan {
    /// Daily target used when the request does not specify one
    pub const DEFAULT_DAILY_CALORIES: u32 = 2000;
    /// Breakfast share of the daily target
    pub const BREAKFAST_SHARE: f64 = 0.25;
    /// Lunch share of the daily target
    pub const LUNCH_SHARE: f64 = 0.35;
    /// Dinner share of the daily target
    pub const DINNER_SHARE: f64 = 0.30;
    /// Snack share of the daily target
    pub const SNACK_SHARE: f64 = 0.10;
}

/// Ingredient calorie shares used by the fallback meal generator
pub mod mock_meal {
    /// Calorie share of the primary protein
    pub const PROTEIN_INGREDIENT_SHARE: f64 = 0.5;
    /// Calorie share of the vegetable side
    pub const VEGETABLE_INGREDIENT_SHARE: f64 = 0.2;
    /// Calorie share of the grain side
    pub const GRAIN_INGREDIENT_SHARE: f64 = 0.3;
    /// Calorie share of the tofu substitution
    pub const TOFU_ALTERNATIVE_SHARE: f64 = 0.4;
    /// Calorie share of the tempeh substitution
    pub const TEMPEH_ALTERNATIVE_SHARE: f64 = 0.45;
    /// Preparation minutes
    pub const PREP_TIME_MINUTES: f64 = 10.0;
    /// Cooking minutes
    pub const COOK_TIME_MINUTES: f64 = 20.0;
}

/// Defaults applied by the enrichment step when the payload omits a value
pub mod enrichment {
    /// Estimated workout duration (minutes)
    pub const DEFAULT_ESTIMATED_DURATION_MINUTES: f64 = 45.0;
    /// Estimated calories burned by a workout
    pub const DEFAULT_CALORIES_BURNED: f64 = 300.0;
    /// Relative divergence between declared and computed totals that gets logged
    pub const AGGREGATE_DIVERGENCE_TOLERANCE: f64 = 0.10;
}

/// Request validation limits
pub mod limits {
    /// Lowest daily calorie target accepted for meal options
    pub const MEAL_OPTIONS_MIN_DAILY_CALORIES: u32 = 1200;
    /// Highest daily calorie target accepted for meal options
    pub const MEAL_OPTIONS_MAX_DAILY_CALORIES: u32 = 5000;
    /// Lowest target accepted for a daily meal plan
    pub const MEAL_PLAN_MIN_CALORIES: u32 = 1000;
    /// Highest target accepted for a daily meal plan
    pub const MEAL_PLAN_MAX_CALORIES: u32 = 6000;
    /// Maximum length of a protein preference
    pub const PROTEIN_PREFERENCE_MAX_LEN: usize = 50;
}

/// Progress and history windows
pub mod progress {
    /// Weight history window when none is requested
    pub const DEFAULT_WEIGHT_HISTORY_DAYS: u32 = 30;
    /// Longest weight history window accepted
    pub const MAX_WEIGHT_HISTORY_DAYS: u32 = 3650;
    /// Completed workouts listed in the progress summary
    pub const RECENT_WORKOUTS_LIMIT: usize = 10;
}

/// Placeholder identity injected by the development auth extractor
pub mod dev_user {
    /// Fixed user id
    pub const ID: &str = "dev-user-123";
    /// Fixed email
    pub const EMAIL: &str = "dev@example.com";
    /// Fixed display name
    pub const NAME: &str = "Development User";
}
