use serde::{Deserialize, Serialize};

/// Daily nutrition targets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionGoals {
    /// kcal
    pub calories: u32,
    /// grams
    pub protein: u32,
    /// grams
    pub carbs: u32,
    /// grams
    pub fat: u32,
    /// millilitres
    pub water: u32,
}

impl Default for NutritionGoals {
    fn default() -> Self {
        Self {
            calories: 2000,
            protein: 150,
            carbs: 250,
            fat: 67,
            water: 2000,
        }
    }
}

impl NutritionGoals {
    /// Checks that every target is positive.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
            ("water", self.water),
        ];
        match fields.iter().find(|(_, v)| *v == 0) {
            Some((name, _)) => Err(format!("Goal for {} must be greater than zero", name)),
            None => Ok(()),
        }
    }
}
