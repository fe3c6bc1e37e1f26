// ABOUTME: Route handlers for workout generation and tracking
// ABOUTME: Generate, list, read, update, complete, toggle exercises, and delete workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::{owner_or_caller, OwnerQuery};
use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::generation::WorkoutRequest;
use crate::resources::ServerResources;
use crate::services::WorkoutUpdate;

/// Body of `POST /api/workouts/generate`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateWorkoutBody {
    /// Owner of the new workout; the caller when absent
    #[serde(default)]
    pub user_id: Option<String>,
    /// Generation parameters
    #[serde(flatten)]
    pub request: WorkoutRequest,
}

/// Workout routes handler
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workouts/generate", post(Self::handle_generate))
            .route("/api/workouts", get(Self::handle_list))
            .route(
                "/api/workouts/:id",
                get(Self::handle_get)
                    .patch(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route("/api/workouts/:id/complete", post(Self::handle_complete))
            .route(
                "/api/workouts/:id/exercises/:exercise_id/toggle",
                post(Self::handle_toggle_exercise),
            )
            .with_state(resources)
    }

    /// Handle POST /api/workouts/generate
    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        Json(body): Json<GenerateWorkoutBody>,
    ) -> Result<Response, AppError> {
        let owner = owner_or_caller(body.user_id.as_deref(), &auth);
        let workout = resources
            .generator
            .generate_workout(&body.request, &owner)
            .await?;
        Ok((StatusCode::CREATED, Json(workout)).into_response())
    }

    /// Handle GET /api/workouts
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        Query(query): Query<OwnerQuery>,
    ) -> Result<Response, AppError> {
        let workouts = resources.workouts.list(&query.owner(&auth)).await?;
        Ok((StatusCode::OK, Json(workouts)).into_response())
    }

    /// Handle GET /api/workouts/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        Path(id): Path<String>,
        Query(query): Query<OwnerQuery>,
    ) -> Result<Response, AppError> {
        let workout = resources.workouts.get(&query.owner(&auth), &id).await?;
        Ok((StatusCode::OK, Json(workout)).into_response())
    }

    /// Handle PATCH /api/workouts/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        Path(id): Path<String>,
        Query(query): Query<OwnerQuery>,
        Json(update): Json<WorkoutUpdate>,
    ) -> Result<Response, AppError> {
        let workout = resources
            .workouts
            .update(&query.owner(&auth), &id, update)
            .await?;
        Ok((StatusCode::OK, Json(workout)).into_response())
    }

    /// Handle DELETE /api/workouts/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        Path(id): Path<String>,
        Query(query): Query<OwnerQuery>,
    ) -> Result<Response, AppError> {
        resources.workouts.delete(&query.owner(&auth), &id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle POST /api/workouts/:id/complete
    async fn handle_complete(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        Path(id): Path<String>,
        Query(query): Query<OwnerQuery>,
    ) -> Result<Response, AppError> {
        let workout = resources.workouts.complete(&query.owner(&auth), &id).await?;
        Ok((StatusCode::OK, Json(workout)).into_response())
    }

    /// Handle POST /api/workouts/:id/exercises/:exercise_id/toggle
    async fn handle_toggle_exercise(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        Path((id, exercise_id)): Path<(String, String)>,
        Query(query): Query<OwnerQuery>,
    ) -> Result<Response, AppError> {
        let workout = resources
            .workouts
            .toggle_exercise(&query.owner(&auth), &id, &exercise_id)
            .await?;
        Ok((StatusCode::OK, Json(workout)).into_response())
    }
}
