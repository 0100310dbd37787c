use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;

/// A food catalog entry. Nutrient values are per serving.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Food {
    pub id: String,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    pub serving: String,
}

impl Food {
    pub fn new(id: impl Into<String>, name: impl Into<String>, serving: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            fiber: 0.0,
            serving: serving.into(),
        }
    }

    pub fn with_macros(mut self, calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        self.calories = calories;
        self.protein = protein;
        self.carbs = carbs;
        self.fat = fat;
        self
    }

    pub fn with_fiber(mut self, fiber: f64) -> Self {
        self.fiber = fiber;
        self
    }

    /// Macros contributed by `quantity` servings of this food.
    pub fn macros_for(&self, quantity: f64) -> MacroTotals {
        MacroTotals {
            calories: self.calories * quantity,
            protein: self.protein * quantity,
            carbs: self.carbs * quantity,
            fat: self.fat * quantity,
        }
    }
}

impl fmt::Display for Food {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} kcal, P {}g, C {}g, F {}g",
            self.name, self.serving, self.calories, self.protein, self.carbs, self.fat
        )
    }
}

/// Summed calories and macronutrient grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl AddAssign for MacroTotals {
    fn add_assign(&mut self, other: Self) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.carbs += other.carbs;
        self.fat += other.fat;
    }
}
