//! FitTrack Core Library
//!
//! Models, key-value backed stores and statistics shared by FitTrack front-ends.

pub mod catalog;
pub mod error;
pub mod models;
pub mod stats;
pub mod storage;
pub mod stores;

pub use catalog::{BuiltinCatalog, CatalogError, CatalogSource};
pub use error::{StorageError, StoreError};
pub use models::{
    Difficulty, Exercise, ExerciseLog, Food, MacroTotals, MealEntry, MealType, NutritionGoals,
    Reflection, SetLog, User, WaterIntake, WeeklyGoal, WorkoutPlan, WorkoutSession,
};
pub use storage::{keys, load_json, save_json, KeyValueStore, MemoryStore};
pub use stores::{AuthStore, NutritionStore, PlanFilter, ReflectionStore, WorkoutStore};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
