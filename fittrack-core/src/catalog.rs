//! Sources of the static workout and food catalogs.

use thiserror::Error;

use crate::models::{Difficulty, Exercise, Food, WorkoutPlan};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Supplies the seed catalogs the stores serve.
///
/// A failing source makes the stores fall back to their cached copy.
pub trait CatalogSource {
    fn workout_plans(&self) -> Result<Vec<WorkoutPlan>, CatalogError>;
    fn foods(&self) -> Result<Vec<Food>, CatalogError>;
}

/// The catalog compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl CatalogSource for BuiltinCatalog {
    fn workout_plans(&self) -> Result<Vec<WorkoutPlan>, CatalogError> {
        Ok(builtin_workout_plans())
    }

    fn foods(&self) -> Result<Vec<Food>, CatalogError> {
        Ok(builtin_foods())
    }
}

fn bodyweight(id: &str, name: &str, category: &str, muscle: &str, steps: [&str; 4]) -> Exercise {
    Exercise::new(id, name)
        .with_category(category)
        .with_muscle(muscle)
        .with_equipment("Bodyweight")
        .with_instructions(steps)
}

pub fn builtin_workout_plans() -> Vec<WorkoutPlan> {
    vec![
        WorkoutPlan::new("1", "Full Body Strength", Difficulty::Intermediate)
            .with_description("Complete full body workout for strength building")
            .with_duration(45)
            .with_category("Strength")
            .with_exercises(vec![
                bodyweight(
                    "1",
                    "Push-ups",
                    "Strength",
                    "Chest",
                    [
                        "Start in a plank position with hands shoulder-width apart",
                        "Lower your body until chest nearly touches the floor",
                        "Push back up to starting position",
                        "Keep your body in a straight line throughout",
                    ],
                ),
                bodyweight(
                    "2",
                    "Squats",
                    "Strength",
                    "Legs",
                    [
                        "Stand with feet shoulder-width apart",
                        "Lower your body by bending knees and pushing hips back",
                        "Keep chest up and knees behind toes",
                        "Return to starting position",
                    ],
                ),
                bodyweight(
                    "3",
                    "Plank",
                    "Core",
                    "Core",
                    [
                        "Start in a push-up position",
                        "Lower down to forearms",
                        "Keep body in straight line from head to heels",
                        "Hold position while breathing normally",
                    ],
                ),
            ]),
        WorkoutPlan::new("2", "Cardio Blast", Difficulty::Beginner)
            .with_description("High-intensity cardio workout to burn calories")
            .with_duration(30)
            .with_category("Cardio")
            .with_exercises(vec![
                bodyweight(
                    "4",
                    "Jumping Jacks",
                    "Cardio",
                    "Full Body",
                    [
                        "Start with feet together and arms at sides",
                        "Jump feet apart while raising arms overhead",
                        "Jump back to starting position",
                        "Maintain steady rhythm",
                    ],
                ),
                bodyweight(
                    "5",
                    "High Knees",
                    "Cardio",
                    "Legs",
                    [
                        "Stand with feet hip-width apart",
                        "Run in place lifting knees to hip level",
                        "Pump arms naturally",
                        "Keep core engaged",
                    ],
                ),
            ]),
    ]
}

pub fn builtin_foods() -> Vec<Food> {
    vec![
        Food::new("1", "Chicken Breast", "100g").with_macros(165.0, 31.0, 0.0, 3.6),
        Food::new("2", "Brown Rice", "100g")
            .with_macros(111.0, 2.6, 23.0, 0.9)
            .with_fiber(1.8),
        Food::new("3", "Broccoli", "100g")
            .with_macros(34.0, 2.8, 7.0, 0.4)
            .with_fiber(2.6),
        Food::new("4", "Banana", "1 medium")
            .with_macros(89.0, 1.1, 23.0, 0.3)
            .with_fiber(2.6),
        Food::new("5", "Greek Yogurt", "100g").with_macros(59.0, 10.0, 3.6, 0.4),
    ]
}
