// ABOUTME: HTTP route assembly for the FitPlan API
// ABOUTME: Merges health, workout, meal, and user routes under one traced, CORS-enabled router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route modules for the FitPlan API
//!
//! Each domain has a `*Routes` type whose `routes()` returns a stateful
//! router; [`router`] merges them and adds request tracing and CORS.
//!
//! Collections are partitioned by user id. Handlers take the owner from the
//! path or body (`userId`) when given, and from the authenticated caller
//! otherwise.

/// Liveness endpoint
pub mod health;
/// Meal plan generation, options, protein swaps, and meal logging
pub mod meals;
/// Weight tracking, progress summary, and profile
pub mod users;
/// Workout generation and tracking
pub mod workouts;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use health::HealthRoutes;
pub use meals::MealRoutes;
pub use users::UserRoutes;
pub use workouts::WorkoutRoutes;

use crate::auth::AuthenticatedUser;
use crate::resources::ServerResources;

/// Build the complete application router
pub fn router(resources: Arc<ServerResources>) -> Router {
    let cors = cors_layer(resources.config.cors_origin.as_deref());

    Router::new()
        .merge(HealthRoutes::routes())
        .merge(WorkoutRoutes::routes(Arc::clone(&resources)))
        .merge(MealRoutes::routes(Arc::clone(&resources)))
        .merge(UserRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => layer.allow_origin(origin),
        Some(Err(e)) => {
            warn!(error = %e, "Invalid CORS origin; allowing any origin");
            layer.allow_origin(Any)
        }
        None => layer.allow_origin(Any),
    }
}

/// Optional `?userId=` selecting whose documents to read
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    /// Owner of the documents; the caller when absent
    #[serde(default)]
    pub user_id: Option<String>,
}

impl OwnerQuery {
    /// Owner id, defaulting to the authenticated caller
    #[must_use]
    pub fn owner(&self, auth: &AuthenticatedUser) -> String {
        owner_or_caller(self.user_id.as_deref(), auth)
    }
}

/// A non-blank explicit owner, or the authenticated caller
pub(crate) fn owner_or_caller(explicit: Option<&str>, auth: &AuthenticatedUser) -> String {
    explicit
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map_or_else(|| auth.user_id.clone(), str::to_owned)
}
