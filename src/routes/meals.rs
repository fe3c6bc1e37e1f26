// ABOUTME: Route handlers for meal plans, meal options, protein swaps, and the meal log
// ABOUTME: Generated plans are persisted; meal options are returned without being stored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;

use super::{owner_or_caller, OwnerQuery};
use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::generation::{MealOptionsRequest, MealPlanRequest};
use crate::resources::ServerResources;
use crate::services::{ChangeProteinRequest, LogMealRequest};

/// Body of `POST /api/meals/generate`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMealPlanBody {
    /// Owner of the new plan; the caller when absent
    #[serde(default)]
    pub user_id: Option<String>,
    /// Generation parameters
    #[serde(flatten)]
    pub request: MealPlanRequest,
}

/// Query of `GET /api/meals/log/:user_id`
#[derive(Debug, Default, Deserialize)]
pub struct DailyLogQuery {
    /// Day as `YYYY-MM-DD`; today when absent
    #[serde(default)]
    pub date: Option<String>,
}

/// Meal routes handler
pub struct MealRoutes;

impl MealRoutes {
    /// Create all meal routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/meals/generate", post(Self::handle_generate))
            .route("/api/meals/options", post(Self::handle_options))
            .route("/api/meals", get(Self::handle_list))
            .route(
                "/api/meals/:id",
                get(Self::handle_get).delete(Self::handle_delete),
            )
            .route(
                "/api/meals/:id/meals/:meal_id/protein",
                patch(Self::handle_change_protein),
            )
            .route("/api/meals/log", post(Self::handle_log_meal))
            .route("/api/meals/log/:user_id", get(Self::handle_daily_log))
            .with_state(resources)
    }

    /// Handle POST /api/meals/generate
    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        Json(body): Json<GenerateMealPlanBody>,
    ) -> Result<Response, AppError> {
        let owner = owner_or_caller(body.user_id.as_deref(), &auth);
        let plan = resources
            .generator
            .generate_meal_plan(&body.request, &owner)
            .await?;
        Ok((StatusCode::CREATED, Json(plan)).into_response())
    }

    /// Handle POST /api/meals/options
    async fn handle_options(
        State(resources): State<Arc<ServerResources>>,
        _auth: AuthenticatedUser,
        Json(request): Json<MealOptionsRequest>,
    ) -> Result<Response, AppError> {
        let options = resources.generator.generate_meal_options(&request).await?;
        Ok((StatusCode::OK, Json(options)).into_response())
    }

    /// Handle GET /api/meals
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        Query(query): Query<OwnerQuery>,
    ) -> Result<Response, AppError> {
        let plans = resources.meal_plans.list(&query.owner(&auth)).await?;
        Ok((StatusCode::OK, Json(plans)).into_response())
    }

    /// Handle GET /api/meals/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        Path(id): Path<String>,
        Query(query): Query<OwnerQuery>,
    ) -> Result<Response, AppError> {
        let plan = resources.meal_plans.get(&query.owner(&auth), &id).await?;
        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    /// Handle DELETE /api/meals/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        Path(id): Path<String>,
        Query(query): Query<OwnerQuery>,
    ) -> Result<Response, AppError> {
        resources.meal_plans.delete(&query.owner(&auth), &id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle PATCH /api/meals/:id/meals/:meal_id/protein
    async fn handle_change_protein(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        Path((id, meal_id)): Path<(String, String)>,
        Query(query): Query<OwnerQuery>,
        Json(body): Json<ChangeProteinRequest>,
    ) -> Result<Response, AppError> {
        let plan = resources
            .meal_plans
            .change_protein(&query.owner(&auth), &id, &meal_id, &body.protein)
            .await?;
        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    /// Handle POST /api/meals/log
    async fn handle_log_meal(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        Json(body): Json<LogMealRequest>,
    ) -> Result<Response, AppError> {
        let entry = resources.meal_log.log_meal(&auth.user_id, body).await?;
        Ok((StatusCode::CREATED, Json(entry)).into_response())
    }

    /// Handle GET /api/meals/log/:user_id
    async fn handle_daily_log(
        State(resources): State<Arc<ServerResources>>,
        _auth: AuthenticatedUser,
        Path(user_id): Path<String>,
        Query(query): Query<DailyLogQuery>,
    ) -> Result<Response, AppError> {
        let log = resources
            .meal_log
            .daily_log(&user_id, query.date.as_deref())
            .await?;
        Ok((StatusCode::OK, Json(log)).into_response())
    }
}
