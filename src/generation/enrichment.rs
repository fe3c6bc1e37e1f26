// ABOUTME: Converts validated or mock drafts into persisted plan models
// ABOUTME: Assigns fresh identifiers, defaults, provenance, ownership, and timestamps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Enrichment
//!
//! The only place persisted entities are constructed from generated content.
//! Every entity gets a new UUID v4; drafts carry no identifiers, so nothing
//! model-supplied survives. Call exactly once per generation.

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use super::capitalize;
use super::requests::{MealPlanRequest, WorkoutRequest};
use super::validator::{InstructionsDraft, MealDraft, MealPlanDraft, WorkoutDraft};
use super::Provenance;
use crate::constants::enrichment;
use crate::models::{
    Exercise, Ingredient, InstructionStep, Instructions, Macros, Meal, MealPlan, MealType,
    Substitution, SubstitutionAlternative, Workout,
};

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Current UTC time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant, for tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

/// Build a persisted workout from a draft
#[must_use]
pub fn enrich_workout(
    draft: WorkoutDraft,
    request: &WorkoutRequest,
    user_id: &str,
    provenance: Provenance,
    now: DateTime<Utc>,
) -> Workout {
    let name = non_blank(draft.name).unwrap_or_else(|| {
        format!(
            "{} {} Workout",
            capitalize(request.body_area.as_str()),
            capitalize(request.difficulty.as_str())
        )
    });

    let exercises = draft
        .exercises
        .into_iter()
        .map(|exercise| Exercise {
            id: new_id(),
            name: exercise.name,
            sets: exercise.sets,
            reps: exercise.reps,
            duration: exercise.duration,
            description: exercise.description.unwrap_or_default(),
            form_tips: exercise.form_tips.unwrap_or_default(),
            completed: false,
        })
        .collect();

    Workout {
        id: new_id(),
        user_id: user_id.to_owned(),
        name,
        description: non_blank(draft.description),
        body_area: request.body_area,
        fitness_goal: request.fitness_goal,
        difficulty: request.difficulty,
        exercises,
        estimated_duration: draft
            .estimated_duration
            .unwrap_or(enrichment::DEFAULT_ESTIMATED_DURATION_MINUTES),
        calories_burned: draft
            .calories_burned
            .unwrap_or(enrichment::DEFAULT_CALORIES_BURNED),
        completed: false,
        completed_date: None,
        is_ai_generated: provenance.is_ai_generated(),
        created_at: now,
        updated_at: now,
    }
}

/// Build a persisted meal plan from a draft
///
/// Declared totals are kept unless absent or `recompute_aggregates` is set.
/// A declared total that diverges from the meal sums by more than the
/// tolerance is logged either way.
#[must_use]
pub fn enrich_meal_plan(
    draft: MealPlanDraft,
    request: &MealPlanRequest,
    user_id: &str,
    provenance: Provenance,
    now: DateTime<Utc>,
    recompute_aggregates: bool,
) -> MealPlan {
    let name = non_blank(draft.name).unwrap_or_else(|| {
        format!(
            "{} {} Plan",
            capitalize(request.dietary_preference.as_str()),
            capitalize(request.fitness_goal.as_str())
        )
    });

    let meals: Vec<Meal> = draft
        .meals
        .into_iter()
        .map(|meal| enrich_meal(meal, MealType::Lunch, None))
        .collect();

    let computed_calories: f64 = meals.iter().map(|m| m.calories).sum();
    let computed_macros = meals
        .iter()
        .fold(Macros::default(), |acc, meal| acc + meal.macros);

    if let Some(declared) = draft.total_calories {
        let divergence = relative_divergence(declared, computed_calories);
        if divergence > enrichment::AGGREGATE_DIVERGENCE_TOLERANCE {
            warn!(
                declared,
                computed = computed_calories,
                recompute = recompute_aggregates,
                "Declared meal plan calories diverge from meal sum"
            );
        }
    }

    let (total_calories, macros) = if recompute_aggregates {
        (computed_calories, computed_macros)
    } else {
        (
            draft.total_calories.unwrap_or(computed_calories),
            draft.macros.unwrap_or(computed_macros),
        )
    };

    MealPlan {
        id: new_id(),
        user_id: user_id.to_owned(),
        name,
        fitness_goal: request.fitness_goal,
        dietary_preference: request.dietary_preference,
        meals,
        total_calories,
        macros,
        is_ai_generated: provenance.is_ai_generated(),
        created_at: now,
        updated_at: now,
    }
}

/// Build standalone meal options, each tagged with provenance
#[must_use]
pub fn enrich_meal_options(
    drafts: Vec<MealDraft>,
    meal_type: MealType,
    provenance: Provenance,
) -> Vec<Meal> {
    drafts
        .into_iter()
        .map(|draft| enrich_meal(draft, meal_type, Some(provenance)))
        .collect()
}

/// Build one meal; `fallback_type` applies when the draft has no type
#[must_use]
pub fn enrich_meal(
    draft: MealDraft,
    fallback_type: MealType,
    provenance: Option<Provenance>,
) -> Meal {
    let ingredients = draft
        .ingredients
        .into_iter()
        .map(|ingredient| Ingredient {
            id: new_id(),
            name: ingredient.name,
            amount: ingredient.amount,
            calories: ingredient.calories,
        })
        .collect();

    let instructions = match draft.instructions {
        None => Instructions::default(),
        Some(InstructionsDraft::Text(text)) => Instructions::Text(text),
        Some(InstructionsDraft::Steps(steps)) => Instructions::Steps(
            steps
                .into_iter()
                .zip(1..)
                .map(|(step, position)| InstructionStep {
                    id: new_id(),
                    step: step.step.unwrap_or(position),
                    description: step.description,
                })
                .collect(),
        ),
    };

    let substitutions = draft
        .substitutions
        .into_iter()
        .map(|substitution| Substitution {
            id: new_id(),
            ingredient: substitution.ingredient,
            alternatives: substitution
                .alternatives
                .into_iter()
                .map(|alt| SubstitutionAlternative {
                    id: new_id(),
                    name: alt.name,
                    amount: alt.amount,
                    calories: alt.calories,
                    notes: alt.notes.unwrap_or_default(),
                })
                .collect(),
        })
        .collect();

    let total_time = draft.total_time.or(match (draft.prep_time, draft.cook_time) {
        (Some(prep), Some(cook)) => Some(prep + cook),
        _ => None,
    });

    Meal {
        id: new_id(),
        name: draft.name,
        meal_type: draft.meal_type.unwrap_or(fallback_type),
        calories: draft.calories,
        macros: draft.macros,
        ingredients,
        instructions,
        prep_time: draft.prep_time,
        cook_time: draft.cook_time,
        total_time,
        difficulty: draft.difficulty,
        substitutions,
        is_ai_generated: provenance.map(|p| p.is_ai_generated()),
    }
}

fn relative_divergence(declared: f64, computed: f64) -> f64 {
    if computed.abs() < f64::EPSILON {
        if declared.abs() < f64::EPSILON {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        ((declared - computed) / computed).abs()
    }
}
