// ABOUTME: Deterministic fallback plans derived only from request parameters
// ABOUTME: Produces drafts that satisfy the same schema as validated model output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Mock Generator
//!
//! Used whenever the AI path fails. No external calls and no randomness:
//! identical requests produce identical drafts. Output goes through the same
//! enrichment as validated completions.

use super::capitalize;
use super::requests::{MealOptionsRequest, MealPlanRequest, WorkoutRequest};
use super::validator::{
    AlternativeDraft, ExerciseDraft, IngredientDraft, InstructionsDraft, MealDraft,
    MealPlanDraft, StepDraft, SubstitutionDraft, WorkoutDraft,
};
use crate::constants::{meal_plan, mock_meal};
use crate::models::{
    BodyArea, DietaryPreference, Difficulty, FitnessGoal, Macros, MealDifficulty, MealType,
};

const FORM_TIPS: [&str; 3] = [
    "Keep your core engaged throughout the movement",
    "Maintain proper breathing - exhale on exertion",
    "Focus on the mind-muscle connection",
];

/// Three meals at the slot's low/mid/high calorie tiers, all featuring the
/// requested protein
#[must_use]
pub fn meal_options(request: &MealOptionsRequest) -> Vec<MealDraft> {
    let protein = capitalize(request.protein());
    request
        .meal_type
        .calorie_tiers()
        .iter()
        .enumerate()
        .map(|(idx, &calories)| {
            let name = format!(
                "{protein} {} Option {}",
                request.meal_type.title(),
                idx + 1
            );
            build_meal(name, &protein, request.meal_type, f64::from(calories))
        })
        .collect()
}

/// Four meals splitting the daily target 25/35/30/10; totals are the sums
#[must_use]
pub fn meal_plan(request: &MealPlanRequest) -> MealPlanDraft {
    let daily = f64::from(
        request
            .target_calories
            .unwrap_or(meal_plan::DEFAULT_DAILY_CALORIES),
    );
    let protein = capitalize(default_protein(request.dietary_preference));

    let slots = [
        (MealType::Breakfast, meal_plan::BREAKFAST_SHARE),
        (MealType::Lunch, meal_plan::LUNCH_SHARE),
        (MealType::Dinner, meal_plan::DINNER_SHARE),
        (MealType::Snack, meal_plan::SNACK_SHARE),
    ];
    let meals: Vec<MealDraft> = slots
        .into_iter()
        .map(|(meal_type, share)| {
            let name = format!("{protein} {}", meal_type.title());
            build_meal(name, &protein, meal_type, (daily * share).round())
        })
        .collect();

    let total_calories = meals.iter().map(|m| m.calories).sum();
    let macros = meals
        .iter()
        .fold(Macros::default(), |acc, meal| acc + meal.macros);

    MealPlanDraft {
        name: Some(format!(
            "{} {} Plan",
            goal_label(request.fitness_goal),
            diet_label(request.dietary_preference)
        )),
        meals,
        total_calories: Some(total_calories),
        macros: Some(macros),
    }
}

/// Five catalog exercises for the area, scaled by difficulty, with a cardio
/// finisher for cardio and weight-loss goals
#[must_use]
pub fn workout(request: &WorkoutRequest) -> WorkoutDraft {
    let (sets, reps) = sets_and_reps(request.difficulty);

    let mut exercises: Vec<ExerciseDraft> = exercise_catalog(request.body_area)
        .iter()
        .map(|&name| ExerciseDraft {
            name: name.to_owned(),
            sets,
            reps,
            duration: (name.contains("Plank") || name.contains("Hold")).then_some(30),
            description: Some(format!(
                "Perform {name} with proper form, focusing on controlled movements."
            )),
            form_tips: Some(FORM_TIPS.iter().map(|&tip| tip.to_owned()).collect()),
        })
        .collect();

    if request.fitness_goal.wants_cardio_finisher() {
        exercises.push(ExerciseDraft {
            name: "High Knees Finisher".to_owned(),
            sets,
            reps: 20,
            duration: Some(30),
            description: Some(
                "Drive the knees up at a fast pace to finish with an elevated heart rate."
                    .to_owned(),
            ),
            form_tips: Some(vec![
                "Land softly on the balls of your feet".to_owned(),
                "Pump your arms in rhythm with your legs".to_owned(),
            ]),
        });
    }

    let minutes = duration_minutes(request.difficulty);
    WorkoutDraft {
        name: Some(format!(
            "{} {} Workout",
            area_label(request.body_area),
            goal_label(request.fitness_goal)
        )),
        description: Some(format!(
            "A {} {} session built from proven movements.",
            request.difficulty,
            area_label(request.body_area).to_lowercase()
        )),
        exercises,
        estimated_duration: Some(minutes),
        calories_burned: Some((base_calories(request.fitness_goal) * minutes / 45.0).round()),
    }
}

fn build_meal(name: String, protein: &str, meal_type: MealType, calories: f64) -> MealDraft {
    let lower = protein.to_lowercase();
    let share = |fraction: f64| (calories * fraction).round();

    MealDraft {
        name,
        meal_type: Some(meal_type),
        calories,
        macros: Macros::from_calories(calories),
        ingredients: vec![
            ingredient(protein, "6 oz", share(mock_meal::PROTEIN_INGREDIENT_SHARE)),
            ingredient(
                "Mixed Vegetables",
                "1 cup",
                share(mock_meal::VEGETABLE_INGREDIENT_SHARE),
            ),
            ingredient(
                "Whole Grains",
                "0.5 cup",
                share(mock_meal::GRAIN_INGREDIENT_SHARE),
            ),
        ],
        instructions: Some(InstructionsDraft::Steps(
            [
                "Preheat cooking surface to medium-high heat.".to_owned(),
                format!("Season {lower} with salt, pepper, and your favorite spices."),
                format!("Cook {lower} for 6-8 minutes per side until fully cooked."),
                "Prepare vegetables by steaming or sauteing for 5 minutes.".to_owned(),
                "Cook grains according to package instructions.".to_owned(),
                "Plate the meal and serve hot.".to_owned(),
            ]
            .into_iter()
            .zip(1..)
            .map(|(description, step)| StepDraft {
                step: Some(step),
                description,
            })
            .collect(),
        )),
        prep_time: Some(mock_meal::PREP_TIME_MINUTES),
        cook_time: Some(mock_meal::COOK_TIME_MINUTES),
        total_time: Some(mock_meal::PREP_TIME_MINUTES + mock_meal::COOK_TIME_MINUTES),
        difficulty: Some(MealDifficulty::Easy),
        substitutions: vec![SubstitutionDraft {
            ingredient: protein.to_owned(),
            alternatives: vec![
                AlternativeDraft {
                    name: "Tofu".to_owned(),
                    amount: "8 oz".to_owned(),
                    calories: share(mock_meal::TOFU_ALTERNATIVE_SHARE),
                    notes: Some("Plant-based alternative with similar protein content".to_owned()),
                },
                AlternativeDraft {
                    name: "Tempeh".to_owned(),
                    amount: "6 oz".to_owned(),
                    calories: share(mock_meal::TEMPEH_ALTERNATIVE_SHARE),
                    notes: Some("Fermented soy option with nutty flavor".to_owned()),
                },
            ],
        }],
    }
}

fn ingredient(name: &str, amount: &str, calories: f64) -> IngredientDraft {
    IngredientDraft {
        name: name.to_owned(),
        amount: amount.to_owned(),
        calories,
    }
}

const fn default_protein(diet: DietaryPreference) -> &'static str {
    match diet {
        DietaryPreference::Vegetarian => "tofu",
        DietaryPreference::Keto => "salmon",
        DietaryPreference::GlutenFree | DietaryPreference::DairyFree => "turkey",
        DietaryPreference::Standard | DietaryPreference::HighProtein => "chicken",
    }
}

const fn exercise_catalog(area: BodyArea) -> [&'static str; 5] {
    match area {
        BodyArea::Chest => [
            "Push-ups",
            "Bench Press",
            "Chest Fly",
            "Incline Press",
            "Cable Crossover",
        ],
        BodyArea::Back => [
            "Pull-ups",
            "Bent-over Rows",
            "Lat Pulldown",
            "Deadlift",
            "Face Pulls",
        ],
        BodyArea::Shoulders => [
            "Overhead Press",
            "Lateral Raises",
            "Front Raises",
            "Rear Delt Fly",
            "Shrugs",
        ],
        BodyArea::Arms => [
            "Bicep Curls",
            "Tricep Dips",
            "Hammer Curls",
            "Tricep Pushdown",
            "Skull Crushers",
        ],
        BodyArea::Legs => [
            "Squats",
            "Lunges",
            "Leg Press",
            "Romanian Deadlift",
            "Calf Raises",
        ],
        BodyArea::Core => [
            "Plank",
            "Crunches",
            "Russian Twists",
            "Leg Raises",
            "Mountain Climbers",
        ],
        BodyArea::FullBody => [
            "Burpees",
            "Jumping Jacks",
            "High Knees",
            "Jump Squats",
            "Push-ups",
        ],
    }
}

const fn sets_and_reps(difficulty: Difficulty) -> (u32, u32) {
    match difficulty {
        Difficulty::Beginner => (2, 10),
        Difficulty::Intermediate => (3, 12),
        Difficulty::Advanced => (4, 10),
    }
}

const fn duration_minutes(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Beginner => 30.0,
        Difficulty::Intermediate => 45.0,
        Difficulty::Advanced => 60.0,
    }
}

/// Calories for a 45 minute session
const fn base_calories(goal: FitnessGoal) -> f64 {
    match goal {
        FitnessGoal::Toning => 250.0,
        FitnessGoal::Muscle => 300.0,
        FitnessGoal::Cardio => 400.0,
        FitnessGoal::WeightLoss => 350.0,
        FitnessGoal::Strength => 280.0,
    }
}

const fn goal_label(goal: FitnessGoal) -> &'static str {
    match goal {
        FitnessGoal::Toning => "Toning & Sculpting",
        FitnessGoal::Muscle => "Muscle Building",
        FitnessGoal::Cardio => "Cardio & Endurance",
        FitnessGoal::WeightLoss => "Weight Loss",
        FitnessGoal::Strength => "Strength Building",
    }
}

const fn area_label(area: BodyArea) -> &'static str {
    match area {
        BodyArea::Chest => "Chest",
        BodyArea::Back => "Back",
        BodyArea::Shoulders => "Shoulders",
        BodyArea::Arms => "Arms",
        BodyArea::Legs => "Legs",
        BodyArea::Core => "Core",
        BodyArea::FullBody => "Full Body",
    }
}

const fn diet_label(diet: DietaryPreference) -> &'static str {
    match diet {
        DietaryPreference::Standard => "Balanced",
        DietaryPreference::Vegetarian => "Vegetarian",
        DietaryPreference::Keto => "Keto",
        DietaryPreference::HighProtein => "High Protein",
        DietaryPreference::GlutenFree => "Gluten Free",
        DietaryPreference::DairyFree => "Dairy Free",
    }
}
