// ABOUTME: Route handlers for per-user weight tracking, progress, and profile
// ABOUTME: All paths are scoped by the user id in the URL
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

use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::{ProfileUpdate, WeightCheckInRequest};

/// Query of `GET /api/users/:user_id/weight-history`
#[derive(Debug, Default, Deserialize)]
pub struct WeightHistoryQuery {
    /// Window length in days; 30 when absent
    #[serde(default)]
    pub days: Option<u32>,
}

/// User routes handler
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/users/:user_id/weight-checkin",
                post(Self::handle_weight_check_in),
            )
            .route(
                "/api/users/:user_id/weight-history",
                get(Self::handle_weight_history),
            )
            .route("/api/users/:user_id/progress", get(Self::handle_progress))
            .route(
                "/api/users/:user_id/profile",
                get(Self::handle_get_profile)
                    .put(Self::handle_update_profile)
                    .patch(Self::handle_update_profile),
            )
            .with_state(resources)
    }

    /// Handle POST /api/users/:user_id/weight-checkin
    async fn handle_weight_check_in(
        State(resources): State<Arc<ServerResources>>,
        _auth: AuthenticatedUser,
        Path(user_id): Path<String>,
        Json(body): Json<WeightCheckInRequest>,
    ) -> Result<Response, AppError> {
        let check_in = resources.progress.check_in(&user_id, body).await?;
        Ok((StatusCode::CREATED, Json(check_in)).into_response())
    }

    /// Handle GET /api/users/:user_id/weight-history
    async fn handle_weight_history(
        State(resources): State<Arc<ServerResources>>,
        _auth: AuthenticatedUser,
        Path(user_id): Path<String>,
        Query(query): Query<WeightHistoryQuery>,
    ) -> Result<Response, AppError> {
        let history = resources
            .progress
            .weight_history(&user_id, query.days)
            .await?;
        Ok((StatusCode::OK, Json(history)).into_response())
    }

    /// Handle GET /api/users/:user_id/progress
    async fn handle_progress(
        State(resources): State<Arc<ServerResources>>,
        _auth: AuthenticatedUser,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let summary = resources.progress.summary(&user_id).await?;
        Ok((StatusCode::OK, Json(summary)).into_response())
    }

    /// Handle GET /api/users/:user_id/profile
    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        _auth: AuthenticatedUser,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let profile = resources.profiles.get_or_create(&user_id).await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle PUT and PATCH /api/users/:user_id/profile
    async fn handle_update_profile(
        State(resources): State<Arc<ServerResources>>,
        _auth: AuthenticatedUser,
        Path(user_id): Path<String>,
        Json(update): Json<ProfileUpdate>,
    ) -> Result<Response, AppError> {
        let profile = resources.profiles.update(&user_id, update).await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }
}
