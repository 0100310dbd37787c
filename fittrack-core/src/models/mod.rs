mod exercise;
mod food;
mod meal_entry;
mod meal_type;
mod nutrition_goals;
mod reflection;
mod user;
mod water;
mod weekly_goal;
mod workout_plan;
mod workout_session;

pub use exercise::Exercise;
pub use food::{Food, MacroTotals};
pub use meal_entry::MealEntry;
pub use meal_type::MealType;
pub use nutrition_goals::NutritionGoals;
pub use reflection::Reflection;
pub use user::User;
pub use water::WaterIntake;
pub use weekly_goal::WeeklyGoal;
pub use workout_plan::{Difficulty, WorkoutPlan};
pub use workout_session::{ExerciseLog, SetLog, WorkoutSession};
