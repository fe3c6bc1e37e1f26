// ABOUTME: System/user prompt construction for workout, meal plan, and meal option requests
// ABOUTME: Pure templating with shared JSON formatting rules loaded at compile time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Generation Prompts
//!
//! Prompts are deterministic functions of the request. Static blocks (the
//! JSON formatting rules and the meal object structure) are loaded at compile
//! time from markdown files for easy maintenance.
//!
//! The formatting rules exist because the normalizer and validator rely on
//! approximate compliance: no embedded double quotes, no markdown fences,
//! exact field names, numbers as numbers.

use super::requests::{GenerationRequest, MealOptionsRequest, MealPlanRequest, WorkoutRequest};
use crate::llm::ChatMessage;
use crate::models::MealType;

/// JSON formatting rules embedded in every system prompt
pub const JSON_FORMATTING_RULES: &str = include_str!("json_rules.md");

/// Structure of one meal object; `{meal_type}` is substituted per request
pub const MEAL_SCHEMA_TEMPLATE: &str = include_str!("meal_schema.md");

/// Structure of a workout object
const WORKOUT_SCHEMA: &str = r#"{
  "name": "Workout name",
  "description": "Brief description",
  "estimatedDuration": 45,
  "caloriesBurned": 300,
  "exercises": [
    {
      "name": "Exercise name",
      "sets": 3,
      "reps": 12,
      "duration": 30,
      "description": "How to perform",
      "formTips": ["tip1", "tip2"]
    }
  ]
}"#;

/// Number of distinct dishes requested for meal options
pub const MEAL_OPTION_COUNT: usize = 3;

/// System and user prompt for one completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    /// Persona and formatting rules
    pub system: String,
    /// Task description and output structure
    pub user: String,
}

impl PromptPair {
    /// Convert into the message list sent to the completion service
    #[must_use]
    pub fn into_messages(self) -> Vec<ChatMessage> {
        vec![ChatMessage::system(self.system), ChatMessage::user(self.user)]
    }
}

/// Low/mid/high calorie targets for one meal slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalorieTier {
    /// Lowest option
    pub low: u32,
    /// Middle option
    pub mid: u32,
    /// Highest option
    pub high: u32,
}

impl CalorieTier {
    /// Tier for a meal type
    #[must_use]
    pub const fn for_meal_type(meal_type: MealType) -> Self {
        let [low, mid, high] = meal_type.calorie_tiers();
        Self { low, mid, high }
    }

    /// Targets in ascending order
    #[must_use]
    pub const fn as_array(&self) -> [u32; 3] {
        [self.low, self.mid, self.high]
    }
}

/// Build the prompt pair for any generation request
#[must_use]
pub fn build_prompt(request: &GenerationRequest) -> PromptPair {
    match request {
        GenerationRequest::Workout(r) => workout_prompt(r),
        GenerationRequest::MealPlan(r) => meal_plan_prompt(r),
        GenerationRequest::MealOptions(r) => meal_options_prompt(r),
    }
}

/// Trainer persona plus workout structure
#[must_use]
pub fn workout_prompt(request: &WorkoutRequest) -> PromptPair {
    let system = format!(
        "You are an expert fitness trainer creating personalized workout plans. \
         Generate detailed, safe, and effective workouts in VALID JSON format.\n\n\
         {JSON_FORMATTING_RULES}"
    );

    let user = format!(
        "Create a {difficulty} workout plan for {area} focused on {goal}.\n\n\
         Include 4-6 exercises appropriate for the {difficulty} level. Use \"duration\" \
         (seconds) only for timed movements such as planks or intervals.\n\n\
         Return a JSON object with this EXACT structure:\n{WORKOUT_SCHEMA}",
        difficulty = request.difficulty,
        area = request.body_area,
        goal = request.fitness_goal,
    );

    PromptPair { system, user }
}

/// Nutritionist persona plus daily plan structure
#[must_use]
pub fn meal_plan_prompt(request: &MealPlanRequest) -> PromptPair {
    let system = format!(
        "You are a certified nutritionist creating personalized meal plans. \
         Generate balanced, nutritious meal plans in VALID JSON format.\n\n\
         {JSON_FORMATTING_RULES}"
    );

    let target_line = request
        .target_calories
        .map(|target| format!("Target calories: {target}\n"))
        .unwrap_or_default();
    let meal_schema = MEAL_SCHEMA_TEMPLATE
        .trim_end()
        .replace("{meal_type}", "breakfast|lunch|dinner|snack");

    let user = format!(
        "Create a daily meal plan for {goal} following a {diet} diet.\n\n\
         {target_line}\
         Include one breakfast, one lunch, one dinner, and one snack. \
         \"totalCalories\" and \"macros\" must equal the sums across the meals.\n\n\
         Return a JSON object with this structure:\n\
         {{\n  \"name\": \"Plan name\",\n  \"totalCalories\": <number>,\n  \
         \"macros\": {{ \"protein\": <grams>, \"carbs\": <grams>, \"fats\": <grams> }},\n  \
         \"meals\": [<meal>, <meal>, <meal>, <meal>]\n}}\n\n\
         where each <meal> has this EXACT structure:\n{meal_schema}",
        goal = request.fitness_goal,
        diet = request.dietary_preference,
    );

    PromptPair { system, user }
}

/// Nutritionist persona plus three-option structure around the slot's tier
#[must_use]
pub fn meal_options_prompt(request: &MealOptionsRequest) -> PromptPair {
    let tier = CalorieTier::for_meal_type(request.meal_type);
    let protein = request.protein();

    let system = format!(
        "You are a certified nutritionist creating personalized meal plans. \
         Generate balanced, nutritious meals in VALID JSON format.\n\n\
         {JSON_FORMATTING_RULES}\n\
         Each meal should include detailed step-by-step cooking instructions and ingredient \
         substitution suggestions. Meals should vary in calorie content (low, medium, high) \
         to give users options."
    );

    let meal_schema = MEAL_SCHEMA_TEMPLATE
        .trim_end()
        .replace("{meal_type}", request.meal_type.as_str());

    let user = format!(
        "Create {count} DIFFERENT {meal_type} meal options for someone with a {goal} fitness \
         goal following a {diet} diet.\n\n\
         CONSTRAINTS:\n\
         - Daily calorie target: {daily} calories\n\
         - Meal type calorie range: {low}-{high} calories\n\
         - Generate {count} meals with varying calories: {low}, {mid}, {high}\n\
         - All meals MUST feature {protein} as the primary protein\n\
         - Meals must be DIFFERENT (different dishes, not variations of same meal)\n\
         - Each meal must be realistic and achievable for home cooking\n\n\
         For EACH meal, return a JSON object with this EXACT structure:\n{meal_schema}\n\n\
         RETURN as JSON array with {count} meal objects: [meal1, meal2, meal3]\n\n\
         CRITICAL - OUTPUT FORMAT:\n\
         - Response must be ONLY the JSON array - no extra text before or after\n\
         - NO markdown code blocks, NO explanations, ONLY valid JSON\n\
         - Use apostrophes (') not quotes (\") inside text values\n\
         - Numbers must be numbers, never strings\n\
         - No trailing commas\n\
         - Instructions must be 4-8 steps, detailed but simple language\n\
         - Each meal needs 2-3 substitution options",
        count = MEAL_OPTION_COUNT,
        meal_type = request.meal_type,
        goal = request.fitness_goal,
        diet = request.dietary_preference,
        daily = request.daily_calorie_target,
        low = tier.low,
        mid = tier.mid,
        high = tier.high,
    );

    PromptPair { system, user }
}
