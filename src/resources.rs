// ABOUTME: Shared server resources injected into every route handler
// ABOUTME: Holds configuration, the document store, the plan generator, and domain services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::database::DocumentStore;
use crate::generation::{Clock, PlanGenerator, SystemClock};
use crate::llm::{CompletionClient, LlmProvider};
use crate::services::{
    MealLogService, MealPlanService, ProfileService, ProgressService, WorkoutService,
};

/// Everything a request handler may need, built once at startup
///
/// Clients are constructed by the caller and injected; nothing here is
/// created lazily.
#[derive(Clone)]
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Document store shared by the generator and all services
    pub store: Arc<dyn DocumentStore>,
    /// Generation pipeline
    pub generator: PlanGenerator,
    /// Stored workouts
    pub workouts: WorkoutService,
    /// Stored meal plans
    pub meal_plans: MealPlanService,
    /// Meal log
    pub meal_log: MealLogService,
    /// Weight and workout progress
    pub progress: ProgressService,
    /// User profiles
    pub profiles: ProfileService,
}

impl ServerResources {
    /// Wire services together using the system clock
    #[must_use]
    pub fn new(
        config: ServerConfig,
        store: Arc<dyn DocumentStore>,
        provider: Arc<dyn LlmProvider>,
    ) -> Self {
        Self::with_clock(config, store, provider, Arc::new(SystemClock))
    }

    /// Wire services together with an explicit clock
    #[must_use]
    pub fn with_clock(
        config: ServerConfig,
        store: Arc<dyn DocumentStore>,
        provider: Arc<dyn LlmProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let generator = PlanGenerator::new(
            CompletionClient::new(provider),
            Arc::clone(&store),
            config.generation,
        )
        .with_clock(Arc::clone(&clock));

        Self {
            workouts: WorkoutService::new(Arc::clone(&store), Arc::clone(&clock)),
            meal_plans: MealPlanService::new(Arc::clone(&store), Arc::clone(&clock)),
            meal_log: MealLogService::new(Arc::clone(&store), Arc::clone(&clock)),
            progress: ProgressService::new(Arc::clone(&store), Arc::clone(&clock)),
            profiles: ProfileService::new(Arc::clone(&store), clock),
            config: Arc::new(config),
            store,
            generator,
        }
    }
}

impl fmt::Debug for ServerResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerResources")
            .field("environment", &self.config.environment)
            .field("store", &self.store.backend_name())
            .finish_non_exhaustive()
    }
}
