// ABOUTME: End-to-end HTTP tests for the FitPlan router using tower oneshot
// ABOUTME: Exercises generation, tracking, meal logging, progress, profile, and auth behavior
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use chrono::Duration;
use fitplan_server::config::Environment;
use fitplan_server::database::{Collection, Document, DocumentStore};
use fitplan_server::models::WeightCheckIn;
use fitplan_server::routes;
use serde_json::{json, Value};

use helpers::axum_test::AxumTestRequest;
use helpers::fixtures::{fallback_resources, fixed_now, resources_with};
use helpers::scripted_provider::ScriptedProvider;

fn app(environment: Environment) -> Router {
    routes::router(fallback_resources(environment))
}

async fn generate_workout(app: &Router) -> Value {
    AxumTestRequest::post("/api/workouts/generate")
        .json(&json!({
            "bodyArea": "chest",
            "fitnessGoal": "muscle",
            "difficulty": "beginner"
        }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json()
}

async fn generate_meal_plan(app: &Router) -> Value {
    AxumTestRequest::post("/api/meals/generate")
        .json(&json!({
            "fitnessGoal": "toning",
            "dietaryPreference": "standard",
            "targetCalories": 2000
        }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json()
}

#[tokio::test]
async fn test_health() {
    let body: Value = AxumTestRequest::get("/api/health")
        .send(app(Environment::Testing))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_production_requires_authorization() {
    let app = app(Environment::Production);

    let response = AxumTestRequest::get("/api/workouts")
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 401);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");

    AxumTestRequest::get("/api/workouts")
        .header("authorization", "Bearer any-token")
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK);

    AxumTestRequest::get("/api/workouts")
        .header("authorization", "Token nope")
        .send(app)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_workout_lifecycle() {
    let app = app(Environment::Testing);

    let workout = generate_workout(&app).await;
    assert_eq!(workout["isAiGenerated"], false);
    assert_eq!(workout["userId"], "dev-user-123");
    assert_eq!(workout["completed"], false);
    let id = workout["id"].as_str().unwrap().to_owned();
    let exercise_id = workout["exercises"][0]["id"].as_str().unwrap().to_owned();

    let list: Vec<Value> = AxumTestRequest::get("/api/workouts")
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(list.len(), 1);

    let toggled: Value = AxumTestRequest::post(&format!(
        "/api/workouts/{id}/exercises/{exercise_id}/toggle"
    ))
    .send(app.clone())
    .await
    .assert_status(StatusCode::OK)
    .json();
    assert_eq!(toggled["exercises"][0]["completed"], true);

    let completed: Value = AxumTestRequest::post(&format!("/api/workouts/{id}/complete"))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(completed["completed"], true);
    assert!(completed["completedDate"].is_string());

    let summary: Value = AxumTestRequest::get("/api/users/dev-user-123/progress")
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(summary["totalWorkouts"], 1);
    assert_eq!(summary["workoutsByGoal"]["muscle"], 1);
    assert_eq!(summary["recentWorkouts"][0]["id"], id.as_str());

    let reopened: Value = AxumTestRequest::patch(&format!("/api/workouts/{id}"))
        .json(&json!({ "completed": false }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(reopened["completed"], false);
    assert!(reopened.get("completedDate").is_none() || reopened["completedDate"].is_null());

    AxumTestRequest::delete(&format!("/api/workouts/{id}"))
        .send(app.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);
    AxumTestRequest::get(&format!("/api/workouts/{id}"))
        .send(app)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_generation_rejects_bad_enum_and_range() {
    let app = app(Environment::Testing);

    let response = AxumTestRequest::post("/api/workouts/generate")
        .json(&json!({
            "bodyArea": "tail",
            "fitnessGoal": "muscle",
            "difficulty": "beginner"
        }))
        .send(app.clone())
        .await;
    assert!(response.status() >= 400 && response.status() < 500);

    AxumTestRequest::post("/api/meals/generate")
        .json(&json!({
            "fitnessGoal": "toning",
            "dietaryPreference": "standard",
            "targetCalories": 200
        }))
        .send(app)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_meal_plan_and_protein_change() {
    let app = app(Environment::Testing);

    let plan = generate_meal_plan(&app).await;
    assert_eq!(plan["meals"].as_array().unwrap().len(), 4);
    assert_eq!(plan["totalCalories"], 2000.0);
    let plan_id = plan["id"].as_str().unwrap().to_owned();
    let meal_id = plan["meals"][1]["id"].as_str().unwrap().to_owned();

    let changed: Value = AxumTestRequest::patch(&format!(
        "/api/meals/{plan_id}/meals/{meal_id}/protein"
    ))
    .json(&json!({ "protein": "salmon" }))
    .send(app.clone())
    .await
    .assert_status(StatusCode::OK)
    .json();
    assert_eq!(changed["meals"][1]["ingredients"][0]["name"], "Salmon");
    assert_eq!(changed["meals"][1]["substitutions"][0]["ingredient"], "Salmon");

    let fetched: Value = AxumTestRequest::get(&format!("/api/meals/{plan_id}"))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(fetched["meals"][1]["ingredients"][0]["name"], "Salmon");

    AxumTestRequest::patch(&format!("/api/meals/{plan_id}/meals/missing/protein"))
        .json(&json!({ "protein": "salmon" }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::NOT_FOUND);

    AxumTestRequest::delete(&format!("/api/meals/{plan_id}"))
        .send(app.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);
    let remaining: Vec<Value> = AxumTestRequest::get("/api/meals")
        .send(app)
        .await
        .json();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn test_meal_options_and_daily_log() {
    let app = app(Environment::Testing);

    let options: Value = AxumTestRequest::post("/api/meals/options")
        .json(&json!({
            "mealType": "breakfast",
            "fitnessGoal": "muscle",
            "dietaryPreference": "standard",
            "proteinPreference": "eggs",
            "dailyCalorieTarget": 2400
        }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(options["isAiGenerated"], false);
    assert_eq!(options["dailyCalorieTarget"], 2400);
    assert_eq!(options["mealTypeCalorieRange"]["breakfast"], "350-500 cal");
    let meals = options["meals"].as_array().unwrap().clone();
    assert_eq!(meals.len(), 3);

    for meal in &meals[..2] {
        AxumTestRequest::post("/api/meals/log")
            .json(&json!({ "mealType": "breakfast", "meal": meal, "notes": "tasty" }))
            .send(app.clone())
            .await
            .assert_status(StatusCode::CREATED);
    }

    let today = fixed_now().format("%Y-%m-%d").to_string();
    let log: Value = AxumTestRequest::get(&format!("/api/meals/log/dev-user-123?date={today}"))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(log["meals"].as_array().unwrap().len(), 2);
    let expected = meals[0]["calories"].as_f64().unwrap() + meals[1]["calories"].as_f64().unwrap();
    assert!((log["totalCalories"].as_f64().unwrap() - expected).abs() < 1e-9);

    let other_day: Value = AxumTestRequest::get("/api/meals/log/dev-user-123?date=2025-03-13")
        .send(app.clone())
        .await
        .json();
    assert!(other_day["meals"].as_array().unwrap().is_empty());
    assert_eq!(other_day["totalCalories"], 0.0);

    AxumTestRequest::get("/api/meals/log/dev-user-123?date=March-14")
        .send(app)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_weight_tracking_window() {
    let provider = Arc::new(ScriptedProvider::with_replies(Vec::<String>::new()));
    let (resources, store) = resources_with(provider, Environment::Testing);
    let app = routes::router(resources);

    let old = WeightCheckIn {
        id: "old".to_owned(),
        user_id: "frank".to_owned(),
        weight: 90.0,
        notes: None,
        recorded_at: fixed_now() - Duration::days(45),
    };
    store
        .create(
            Document::from_entity(Collection::Progress, "old", "frank", old.recorded_at, &old)
                .unwrap(),
        )
        .await
        .unwrap();

    let created: Value = AxumTestRequest::post("/api/users/frank/weight-checkin")
        .json(&json!({ "weight": 84.5, "notes": "morning" }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(created["weight"], 84.5);

    let recent: Vec<Value> = AxumTestRequest::get("/api/users/frank/weight-history")
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(recent.len(), 1);

    let all: Vec<Value> = AxumTestRequest::get("/api/users/frank/weight-history?days=60")
        .send(app.clone())
        .await
        .json();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["weight"], 84.5);

    let response = AxumTestRequest::get("/api/users/frank/weight-history?days=4294967295")
        .send(app.clone())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["details"]["field"], "days");

    AxumTestRequest::post("/api/users/frank/weight-checkin")
        .json(&json!({ "weight": 0 }))
        .send(app)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_get_or_create_and_update() {
    let app = app(Environment::Testing);

    let profile: Value = AxumTestRequest::get("/api/users/gina/profile")
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(profile["id"], "gina");
    assert!(profile["preferredProteins"].as_array().unwrap().is_empty());

    let patched: Value = AxumTestRequest::patch("/api/users/gina/profile")
        .json(&json!({ "name": "Gina", "weight": 61.0, "fitnessGoal": "cardio" }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(patched["name"], "Gina");
    assert_eq!(patched["fitnessGoal"], "cardio");

    let put: Value = AxumTestRequest::put("/api/users/gina/profile")
        .json(&json!({ "preferredProteins": ["tofu", "eggs"] }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(put["name"], "Gina");
    assert_eq!(put["preferredProteins"][1], "eggs");

    AxumTestRequest::patch("/api/users/gina/profile")
        .json(&json!({ "email": "not-an-email" }))
        .send(app)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
