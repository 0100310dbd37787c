use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::meal_type::MealType;

/// A logged consumption of a catalog food.
///
/// `food_id` is not checked against the catalog; an unknown id simply
/// contributes nothing to totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    pub id: Uuid,
    pub food_id: String,
    pub quantity: f64,
    pub meal_type: MealType,
    pub date: DateTime<Utc>,
}

impl MealEntry {
    pub fn new(
        food_id: impl Into<String>,
        quantity: f64,
        meal_type: MealType,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            food_id: food_id.into(),
            quantity,
            meal_type,
            date,
        }
    }

    /// Calendar day the entry falls on in local time.
    pub fn local_day(&self) -> NaiveDate {
        self.date.with_timezone(&Local).date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_entry_wire_format() {
        let entry = MealEntry::new("2", 1.5, MealType::Lunch, Utc::now());
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"foodId\":\"2\""));
        assert!(json.contains("\"mealType\":\"lunch\""));

        let parsed: MealEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }
}
