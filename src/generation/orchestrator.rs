// ABOUTME: Generation orchestrator running prompt, completion, normalization, and validation
// ABOUTME: Diverts any pipeline failure to the mock generator, then enriches and persists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::enrichment::{self, Clock, SystemClock};
use super::requests::{GenerationRequest, MealOptionsRequest, MealPlanRequest, WorkoutRequest};
use super::{mock, normalizer, prompts, validator};
use super::{GenerationError, GenerationStage, PlanKind, Provenance};
use crate::config::{CompletionSettings, GenerationConfig};
use crate::database::{Collection, Document, DocumentStore};
use crate::errors::AppResult;
use crate::llm::CompletionClient;
use crate::models::{Meal, MealPlan, MealType, Workout};

/// Meal options returned to the caller; not persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealOptionsResponse {
    /// Alternative meals for the requested slot
    pub meals: Vec<Meal>,
    /// Daily calorie target echoed from the request
    pub daily_calorie_target: u32,
    /// Calorie range label for every meal type
    pub meal_type_calorie_range: BTreeMap<MealType, String>,
    /// Whether the meals came from the language model
    pub is_ai_generated: bool,
}

/// Runs the generation pipeline for every plan kind
///
/// Exactly one completion attempt is made per request. Completion,
/// normalization, and validation failures are logged and replaced by mock
/// output; only request validation and persistence errors reach the caller.
#[derive(Clone)]
pub struct PlanGenerator {
    completion: CompletionClient,
    store: Arc<dyn DocumentStore>,
    config: GenerationConfig,
    clock: Arc<dyn Clock>,
}

impl PlanGenerator {
    /// Create a generator using the system clock
    #[must_use]
    pub fn new(
        completion: CompletionClient,
        store: Arc<dyn DocumentStore>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            completion,
            store,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for timestamps
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Pipeline settings
    #[must_use]
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate and persist a workout
    ///
    /// # Errors
    ///
    /// Returns an error if the document store rejects the new workout
    pub async fn generate_workout(
        &self,
        request: &WorkoutRequest,
        user_id: &str,
    ) -> AppResult<Workout> {
        let envelope = GenerationRequest::Workout(*request);
        envelope.validate()?;

        let outcome = self
            .attempt(&envelope, self.config.workout, validator::validate_workout)
            .await;
        let (draft, provenance) = resolve(envelope.kind(), outcome, || mock::workout(request));

        debug!(
            plan_kind = envelope.kind().as_str(),
            stage = GenerationStage::Enriching.as_str()
        );
        let workout =
            enrichment::enrich_workout(draft, request, user_id, provenance, self.clock.now());
        let document = Document::from_entity(
            Collection::Workouts,
            &workout.id,
            user_id,
            workout.created_at,
            &workout,
        )?;
        self.store.create(document).await?;

        info!(
            workout_id = %workout.id,
            user_id,
            exercises = workout.exercises.len(),
            ai_generated = workout.is_ai_generated,
            stage = GenerationStage::Done.as_str(),
            "Workout generated"
        );
        Ok(workout)
    }

    /// Generate and persist a daily meal plan
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an out-of-range calorie target, or an error
    /// if the document store rejects the new plan
    pub async fn generate_meal_plan(
        &self,
        request: &MealPlanRequest,
        user_id: &str,
    ) -> AppResult<MealPlan> {
        let envelope = GenerationRequest::MealPlan(*request);
        envelope.validate()?;

        let outcome = self
            .attempt(&envelope, self.config.meal_plan, validator::validate_meal_plan)
            .await;
        let (draft, provenance) = resolve(envelope.kind(), outcome, || mock::meal_plan(request));

        debug!(
            plan_kind = envelope.kind().as_str(),
            stage = GenerationStage::Enriching.as_str()
        );
        let plan = enrichment::enrich_meal_plan(
            draft,
            request,
            user_id,
            provenance,
            self.clock.now(),
            self.config.recompute_aggregates,
        );
        let document =
            Document::from_entity(Collection::Meals, &plan.id, user_id, plan.created_at, &plan)?;
        self.store.create(document).await?;

        info!(
            plan_id = %plan.id,
            user_id,
            meals = plan.meals.len(),
            total_calories = plan.total_calories,
            ai_generated = plan.is_ai_generated,
            stage = GenerationStage::Done.as_str(),
            "Meal plan generated"
        );
        Ok(plan)
    }

    /// Generate alternative meals for one slot
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an out-of-range calorie target or a bad
    /// protein preference
    pub async fn generate_meal_options(
        &self,
        request: &MealOptionsRequest,
    ) -> AppResult<MealOptionsResponse> {
        let envelope = GenerationRequest::MealOptions(request.clone());
        envelope.validate()?;

        let outcome = self
            .attempt(
                &envelope,
                self.config.meal_options,
                validator::validate_meal_options,
            )
            .await;
        let (drafts, provenance) =
            resolve(envelope.kind(), outcome, || mock::meal_options(request));

        debug!(
            plan_kind = envelope.kind().as_str(),
            stage = GenerationStage::Enriching.as_str()
        );
        let meals = enrichment::enrich_meal_options(drafts, request.meal_type, provenance);
        let meal_type_calorie_range = MealType::ALL
            .iter()
            .map(|meal_type| (*meal_type, meal_type.calorie_range_label()))
            .collect();

        info!(
            meal_type = %request.meal_type,
            count = meals.len(),
            ai_generated = provenance.is_ai_generated(),
            stage = GenerationStage::Done.as_str(),
            "Meal options generated"
        );
        Ok(MealOptionsResponse {
            meals,
            daily_calorie_target: request.daily_calorie_target,
            meal_type_calorie_range,
            is_ai_generated: provenance.is_ai_generated(),
        })
    }

    /// Prompt, complete, normalize, validate; stops at the first failure
    async fn attempt<T>(
        &self,
        request: &GenerationRequest,
        settings: CompletionSettings,
        validate: fn(Value) -> Result<T, GenerationError>,
    ) -> Result<T, GenerationError> {
        let kind = request.kind().as_str();

        debug!(plan_kind = kind, stage = GenerationStage::BuildingPrompt.as_str());
        let prompt = prompts::build_prompt(request);

        debug!(plan_kind = kind, stage = GenerationStage::AwaitingCompletion.as_str());
        let raw = self
            .completion
            .complete(prompt.into_messages(), settings)
            .await?;

        debug!(plan_kind = kind, stage = GenerationStage::Normalizing.as_str());
        let value = normalizer::normalize(&raw)?;

        debug!(plan_kind = kind, stage = GenerationStage::Validating.as_str());
        validate(value)
    }
}

/// Take the validated draft, or the mock draft if any stage failed
fn resolve<T>(
    kind: PlanKind,
    outcome: Result<T, GenerationError>,
    fallback: impl FnOnce() -> T,
) -> (T, Provenance) {
    match outcome {
        Ok(draft) => (draft, Provenance::Ai),
        Err(error) => {
            warn!(
                plan_kind = kind.as_str(),
                failed_stage = error.stage().as_str(),
                error = %error,
                stage = GenerationStage::MockFallback.as_str(),
                "AI generation failed, using mock data"
            );
            (fallback(), Provenance::Mock)
        }
    }
}

impl std::fmt::Debug for PlanGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanGenerator")
            .field("completion", &self.completion)
            .field("store", &self.store.backend_name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryDocumentStore;
    use crate::llm::UnavailableProvider;
    use crate::models::{DietaryPreference, FitnessGoal};

    fn offline_generator() -> PlanGenerator {
        PlanGenerator::new(
            CompletionClient::new(Arc::new(UnavailableProvider::default())),
            Arc::new(InMemoryDocumentStore::new()),
            GenerationConfig::default(),
        )
    }

    #[test]
    fn test_resolve_marks_provenance() {
        let (value, provenance) = resolve(PlanKind::Workout, Ok(1), || 2);
        assert_eq!((value, provenance), (1, Provenance::Ai));
        let (value, provenance) = resolve(
            PlanKind::Workout,
            Err(GenerationError::Validation("bad".into())),
            || 2,
        );
        assert_eq!((value, provenance), (2, Provenance::Mock));
    }

    #[tokio::test]
    async fn test_options_fall_back_offline() {
        let response = offline_generator()
            .generate_meal_options(&MealOptionsRequest {
                meal_type: MealType::Breakfast,
                fitness_goal: FitnessGoal::Toning,
                dietary_preference: DietaryPreference::Vegetarian,
                protein_preference: "eggs".to_owned(),
                daily_calorie_target: 1800,
            })
            .await
            .unwrap();
        assert!(!response.is_ai_generated);
        assert_eq!(response.meals.len(), 3);
        assert_eq!(response.meal_type_calorie_range[&MealType::Snack], "150-250 cal");
    }

    #[tokio::test]
    async fn test_invalid_request_rejected_before_pipeline() {
        let result = offline_generator()
            .generate_meal_plan(
                &MealPlanRequest {
                    fitness_goal: FitnessGoal::Muscle,
                    dietary_preference: DietaryPreference::Standard,
                    target_calories: Some(200),
                },
                "user-1",
            )
            .await;
        assert!(result.is_err());
    }
}
