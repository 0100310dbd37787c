use chrono::{DateTime, NaiveDate, Utc};

use crate::catalog::CatalogSource;
use crate::error::StoreError;
use crate::models::{Food, MacroTotals, MealEntry, MealType, NutritionGoals, WaterIntake};
use crate::stats;
use crate::storage::{keys, save_json, KeyValueStore};

use super::{fetch_or_cached, load_or_warn};

/// Food catalog, meal log, daily water intake and nutrition goals.
pub struct NutritionStore<S, C> {
    storage: S,
    catalog: C,
    foods: Vec<Food>,
    entries: Vec<MealEntry>,
    water: Vec<WaterIntake>,
    goals: NutritionGoals,
}

impl<S: KeyValueStore, C: CatalogSource> NutritionStore<S, C> {
    pub fn new(storage: S, catalog: C) -> Self {
        Self {
            storage,
            catalog,
            foods: Vec::new(),
            entries: Vec::new(),
            water: Vec::new(),
            goals: NutritionGoals::default(),
        }
    }

    pub async fn load_all(&mut self) {
        self.load_foods().await;
        self.load_meal_entries().await;
        self.load_water_intake().await;
        self.load_nutrition_goals().await;
    }

    /// Fetches foods from the catalog, falling back to the cached copy.
    pub async fn load_foods(&mut self) {
        let fetched = self.catalog.foods();
        if let Some(foods) = fetch_or_cached(&self.storage, keys::FOODS, fetched).await {
            tracing::debug!("Loaded {} food(s)", foods.len());
            self.foods = foods;
        }
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn food(&self, id: &str) -> Option<&Food> {
        self.foods.iter().find(|f| f.id == id)
    }

    /// Finds a food by id, or by case-insensitive name.
    pub fn find_food(&self, id_or_name: &str) -> Option<&Food> {
        self.food(id_or_name).or_else(|| {
            self.foods
                .iter()
                .find(|f| f.name.eq_ignore_ascii_case(id_or_name))
        })
    }

    /// Case-insensitive substring search on food names.
    pub fn search_foods(&self, query: &str) -> Vec<&Food> {
        let query = query.to_lowercase();
        self.foods
            .iter()
            .filter(|f| f.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Logs `quantity` servings of a food. The food id is not checked against
    /// the catalog.
    pub async fn add_meal_entry(
        &mut self,
        food_id: &str,
        quantity: f64,
        meal_type: MealType,
        date: DateTime<Utc>,
    ) -> Result<&MealEntry, StoreError> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(StoreError::validation(format!(
                "Quantity must be a positive number, got {}",
                quantity
            )));
        }

        let mut entries = self.entries.clone();
        entries.push(MealEntry::new(food_id, quantity, meal_type, date));
        save_json(&self.storage, keys::MEAL_ENTRIES, &entries).await?;

        self.entries = entries;
        let last = self.entries.len() - 1;
        Ok(&self.entries[last])
    }

    pub async fn load_meal_entries(&mut self) {
        if let Some(entries) = load_or_warn(&self.storage, keys::MEAL_ENTRIES).await {
            self.entries = entries;
        }
    }

    pub fn entries(&self) -> &[MealEntry] {
        &self.entries
    }

    /// Entries whose timestamp falls on `day` in local time.
    pub fn entries_on(&self, day: NaiveDate) -> Vec<&MealEntry> {
        self.entries
            .iter()
            .filter(|e| e.local_day() == day)
            .collect()
    }

    pub fn entries_for(&self, day: NaiveDate, meal_type: MealType) -> Vec<&MealEntry> {
        self.entries_on(day)
            .into_iter()
            .filter(|e| e.meal_type == meal_type)
            .collect()
    }

    pub fn daily_totals(&self, day: NaiveDate) -> MacroTotals {
        stats::macro_totals(self.entries_on(day), &self.foods)
    }

    pub fn meal_calories(&self, day: NaiveDate, meal_type: MealType) -> f64 {
        stats::macro_totals(self.entries_for(day, meal_type), &self.foods).calories
    }

    /// Adds `amount` ml to the record for `day`, creating it if needed.
    /// Returns the new total for that day.
    pub async fn add_water_intake(
        &mut self,
        day: NaiveDate,
        amount: u32,
    ) -> Result<u32, StoreError> {
        if amount == 0 {
            return Err(StoreError::validation(
                "Water amount must be greater than zero",
            ));
        }

        let mut water = self.water.clone();
        let total = match water.iter_mut().find(|w| w.date == day) {
            Some(record) => {
                record.amount = record.amount.checked_add(amount).ok_or_else(|| {
                    StoreError::validation(format!(
                        "Water total for {} would exceed {} ml",
                        day,
                        u32::MAX
                    ))
                })?;
                record.amount
            }
            None => {
                water.push(WaterIntake::new(day, amount));
                amount
            }
        };

        save_json(&self.storage, keys::WATER_INTAKE, &water).await?;
        self.water = water;
        Ok(total)
    }

    pub async fn load_water_intake(&mut self) {
        if let Some(water) = load_or_warn(&self.storage, keys::WATER_INTAKE).await {
            self.water = water;
        }
    }

    /// Millilitres recorded for `day`; zero if nothing was logged.
    pub fn water_on(&self, day: NaiveDate) -> u32 {
        self.water
            .iter()
            .find(|w| w.date == day)
            .map(|w| w.amount)
            .unwrap_or(0)
    }

    pub async fn update_nutrition_goals(
        &mut self,
        goals: NutritionGoals,
    ) -> Result<&NutritionGoals, StoreError> {
        goals.validate().map_err(StoreError::Validation)?;
        save_json(&self.storage, keys::NUTRITION_GOALS, &goals).await?;
        self.goals = goals;
        Ok(&self.goals)
    }

    pub async fn load_nutrition_goals(&mut self) {
        if let Some(goals) = load_or_warn(&self.storage, keys::NUTRITION_GOALS).await {
            self.goals = goals;
        }
    }

    pub fn goals(&self) -> &NutritionGoals {
        &self.goals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BuiltinCatalog, CatalogError};
    use crate::models::WorkoutPlan;
    use crate::storage::MemoryStore;
    use chrono::{Local, TimeZone};

    struct OfflineCatalog;

    impl CatalogSource for OfflineCatalog {
        fn workout_plans(&self) -> Result<Vec<WorkoutPlan>, CatalogError> {
            Err(CatalogError::Unavailable("offline".into()))
        }

        fn foods(&self) -> Result<Vec<Food>, CatalogError> {
            Err(CatalogError::Unavailable("offline".into()))
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn noon(d: u32) -> DateTime<Utc> {
        Local
            .from_local_datetime(&day(d).and_hms_opt(12, 0, 0).unwrap())
            .unwrap()
            .with_timezone(&Utc)
    }

    async fn loaded_store() -> (NutritionStore<MemoryStore, BuiltinCatalog>, MemoryStore) {
        let storage = MemoryStore::new();
        let mut store = NutritionStore::new(storage.clone(), BuiltinCatalog);
        store.load_foods().await;
        (store, storage)
    }

    #[tokio::test]
    async fn test_foods_cache_fallback() {
        let (store, storage) = loaded_store().await;
        assert_eq!(store.foods().len(), 5);

        let mut offline = NutritionStore::new(storage, OfflineCatalog);
        offline.load_foods().await;
        assert_eq!(offline.foods(), store.foods());
    }

    #[tokio::test]
    async fn test_search_foods() {
        let (store, _) = loaded_store().await;
        let results = store.search_foods("RICE");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Brown Rice");
        assert_eq!(store.search_foods("").len(), 5);
        assert_eq!(store.find_food("banana").unwrap().id, "4");
        assert_eq!(store.find_food("3").unwrap().name, "Broccoli");
    }

    #[tokio::test]
    async fn test_daily_totals_by_day_and_meal() {
        let (mut store, _) = loaded_store().await;
        store
            .add_meal_entry("1", 2.0, MealType::Lunch, noon(10))
            .await
            .unwrap();
        store
            .add_meal_entry("4", 1.0, MealType::Breakfast, noon(10))
            .await
            .unwrap();
        store
            .add_meal_entry("unknown", 5.0, MealType::Dinner, noon(10))
            .await
            .unwrap();
        store
            .add_meal_entry("2", 1.0, MealType::Lunch, noon(11))
            .await
            .unwrap();

        assert_eq!(store.entries_on(day(10)).len(), 3);
        let totals = store.daily_totals(day(10));
        assert_eq!(totals.calories, 419.0);
        assert_eq!(totals.carbs, 23.0);

        assert_eq!(store.meal_calories(day(10), MealType::Lunch), 330.0);
        assert_eq!(store.meal_calories(day(10), MealType::Dinner), 0.0);
        assert_eq!(store.daily_totals(day(11)).calories, 111.0);
        assert_eq!(store.daily_totals(day(12)), MacroTotals::default());
    }

    #[tokio::test]
    async fn test_invalid_quantity_rejected() {
        let (mut store, _) = loaded_store().await;
        for quantity in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(store
                .add_meal_entry("1", quantity, MealType::Snack, noon(1))
                .await
                .is_err());
        }
        assert!(store.entries().is_empty());
    }

    #[tokio::test]
    async fn test_meal_entries_persist() {
        let (mut store, storage) = loaded_store().await;
        store
            .add_meal_entry("5", 1.5, MealType::Snack, noon(3))
            .await
            .unwrap();

        let mut reloaded = NutritionStore::new(storage, BuiltinCatalog);
        reloaded.load_meal_entries().await;
        assert_eq!(reloaded.entries(), store.entries());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_entries_unchanged() {
        let (mut store, storage) = loaded_store().await;
        storage.set_failing(true);
        assert!(store
            .add_meal_entry("1", 1.0, MealType::Lunch, noon(1))
            .await
            .is_err());
        assert!(store.entries().is_empty());

        // Loads swallow the failure
        store.load_meal_entries().await;
        store.load_foods().await;
        assert_eq!(store.foods().len(), 5);
    }

    #[tokio::test]
    async fn test_water_accumulates_per_day() {
        let (mut store, storage) = loaded_store().await;
        assert_eq!(store.add_water_intake(day(1), 250).await.unwrap(), 250);
        assert_eq!(store.add_water_intake(day(1), 500).await.unwrap(), 750);
        assert_eq!(store.add_water_intake(day(2), 750).await.unwrap(), 750);

        assert_eq!(store.water_on(day(1)), 750);
        assert_eq!(store.water_on(day(2)), 750);
        assert_eq!(store.water_on(day(3)), 0);
        assert!(store.add_water_intake(day(1), 0).await.is_err());

        let mut reloaded = NutritionStore::new(storage, BuiltinCatalog);
        reloaded.load_water_intake().await;
        assert_eq!(reloaded.water_on(day(1)), 750);
    }

    #[tokio::test]
    async fn test_water_overflow_rejected() {
        let (mut store, _) = loaded_store().await;
        store.add_water_intake(day(1), u32::MAX - 10).await.unwrap();

        let err = store.add_water_intake(day(1), 11).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(store.water_on(day(1)), u32::MAX - 10);

        assert_eq!(store.add_water_intake(day(1), 10).await.unwrap(), u32::MAX);
    }

    #[tokio::test]
    async fn test_nutrition_goals() {
        let (mut store, storage) = loaded_store().await;
        assert_eq!(store.goals().calories, 2000);

        let goals = NutritionGoals {
            calories: 2400,
            water: 3000,
            ..NutritionGoals::default()
        };
        store.update_nutrition_goals(goals.clone()).await.unwrap();

        let bad = NutritionGoals {
            protein: 0,
            ..NutritionGoals::default()
        };
        assert!(store.update_nutrition_goals(bad).await.is_err());
        assert_eq!(store.goals(), &goals);

        let mut reloaded = NutritionStore::new(storage, BuiltinCatalog);
        reloaded.load_nutrition_goals().await;
        assert_eq!(reloaded.goals(), &goals);
    }
}
