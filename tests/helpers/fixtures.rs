// ABOUTME: Resource builders and canned model replies shared by integration tests
// ABOUTME: Builds in-memory server resources with a fixed clock and any completion provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use fitplan_server::config::{Environment, LlmConfig, ServerConfig};
use fitplan_server::database::{DocumentStore, InMemoryDocumentStore};
use fitplan_server::generation::FixedClock;
use fitplan_server::llm::{LlmProvider, UnavailableProvider};
use fitplan_server::resources::ServerResources;
use serde_json::{json, Value};

/// Instant every fixture clock reports
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
}

/// Configuration with the mock provider for the given environment
pub fn test_config(environment: Environment) -> ServerConfig {
    ServerConfig {
        environment,
        llm: LlmConfig::mock(),
        ..ServerConfig::default()
    }
}

/// Resources over a fresh in-memory store, fixed clock, and the given provider
pub fn resources_with(
    provider: Arc<dyn LlmProvider>,
    environment: Environment,
) -> (Arc<ServerResources>, Arc<dyn DocumentStore>) {
    let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());
    let resources = ServerResources::with_clock(
        test_config(environment),
        Arc::clone(&store),
        provider,
        Arc::new(FixedClock(fixed_now())),
    );
    (Arc::new(resources), store)
}

/// Resources whose provider always fails, so generation uses the fallback
pub fn fallback_resources(environment: Environment) -> Arc<ServerResources> {
    resources_with(Arc::new(UnavailableProvider::default()), environment).0
}

/// Model reply describing a valid workout, including ids the server must replace
pub fn workout_reply() -> String {
    json!({
        "id": "model-chosen-id",
        "name": "Leg Day Power",
        "description": "Heavy compound lifts",
        "exercises": [
            {
                "id": "model-exercise-id",
                "name": "Back Squat",
                "sets": 5,
                "reps": 5,
                "description": "Bar on upper back",
                "formTips": ["Brace core", "Knees track toes"]
            },
            {
                "name": "Romanian Deadlift",
                "sets": 3,
                "reps": 8
            }
        ],
        "estimatedDuration": 50,
        "caloriesBurned": 380
    })
    .to_string()
}

/// A single meal as the model describes it
pub fn meal_json(name: &str, meal_type: &str, calories: f64) -> Value {
    json!({
        "name": name,
        "type": meal_type,
        "calories": calories,
        "macros": { "protein": 30, "carbs": 40, "fats": 12 },
        "ingredients": [
            { "name": "Chicken Breast", "amount": "6 oz", "calories": calories / 2.0 },
            { "name": "Brown Rice", "amount": "1 cup", "calories": calories / 2.0 }
        ],
        "instructions": [
            { "step": 1, "description": "Cook the rice" },
            { "step": 2, "description": "Grill the chicken" }
        ],
        "prepTime": 10,
        "cookTime": 20,
        "difficulty": "easy",
        "substitutions": [
            {
                "ingredient": "Chicken Breast",
                "alternatives": [
                    { "name": "Tofu", "amount": "8 oz", "calories": 180, "notes": "Press first" }
                ]
            }
        ]
    })
}

/// Model reply describing a four-meal plan wrapped in a markdown fence
pub fn meal_plan_reply() -> String {
    let plan = json!({
        "name": "Lean Week",
        "meals": [
            meal_json("Oat Bowl", "breakfast", 450.0),
            meal_json("Chicken Rice Bowl", "lunch", 650.0),
            meal_json("Salmon Plate", "dinner", 600.0),
            meal_json("Greek Yogurt", "snack", 200.0)
        ],
        "totalCalories": 1900,
        "macros": { "protein": 120, "carbs": 160, "fats": 48 }
    });
    format!("Here is your plan:\n```json\n{plan}\n```")
}

/// Model reply with three lunch options as a bare array
pub fn meal_options_reply() -> String {
    json!([
        meal_json("Chicken Burrito Bowl", "lunch", 520.0),
        meal_json("Chicken Caesar Wrap", "lunch", 600.0),
        meal_json("Chicken Stir Fry", "lunch", 680.0)
    ])
    .to_string()
}
