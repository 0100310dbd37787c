use chrono::{Duration, Local, Utc};
use fittrack_core::stats::WorkoutStats;
use fittrack_core::{
    keys, AuthStore, BuiltinCatalog, KeyValueStore, MealEntry, MealType, MemoryStore,
    NutritionStore, ReflectionStore, SetLog, WorkoutSession, WorkoutStore,
};

#[tokio::test]
async fn test_full_day_shares_one_storage() {
    let storage = MemoryStore::new();

    let mut auth = AuthStore::new(storage.clone());
    auth.login_as_guest().await.unwrap();

    let mut workouts = WorkoutStore::new(storage.clone(), BuiltinCatalog);
    workouts.load_all().await;
    let now = Utc::now();
    workouts
        .start_workout("1", now - Duration::minutes(30))
        .await
        .unwrap();
    workouts.log_set("3", SetLog::reps(1).with_duration(60)).await.unwrap();
    workouts.finish_current(None, now).await.unwrap();

    let mut nutrition = NutritionStore::new(storage.clone(), BuiltinCatalog);
    nutrition.load_all().await;
    nutrition
        .add_meal_entry("1", 1.0, MealType::Dinner, now)
        .await
        .unwrap();
    let today = Local::now().date_naive();
    nutrition.add_water_intake(today, 250).await.unwrap();
    nutrition.add_water_intake(today, 500).await.unwrap();

    let mut journal = ReflectionStore::new(storage.clone());
    journal.add("First day", "Planks are hard").await.unwrap();

    // A second "launch" sees everything
    let mut auth = AuthStore::new(storage.clone());
    auth.load_user().await;
    assert!(auth.user().unwrap().is_guest);

    let mut workouts = WorkoutStore::new(storage.clone(), BuiltinCatalog);
    workouts.load_all().await;
    let stats = WorkoutStats::compute(workouts.history(), now);
    assert_eq!(stats.total, 1);
    assert_eq!(stats.this_week, 1);
    assert_eq!(stats.streak, 1);
    assert_eq!(stats.average_duration, 30);
    assert!(workouts.current_workout().is_none());

    let mut nutrition = NutritionStore::new(storage.clone(), BuiltinCatalog);
    nutrition.load_all().await;
    assert_eq!(nutrition.water_on(today), 750);
    assert_eq!(nutrition.entries().len(), 1);

    let mut journal = ReflectionStore::new(storage);
    journal.load().await;
    assert_eq!(journal.list()[0].title, "First day");
}

#[tokio::test]
async fn test_persisted_lists_read_back_byte_identical() {
    let storage = MemoryStore::new();
    let mut nutrition = NutritionStore::new(storage.clone(), BuiltinCatalog);
    for (food, quantity) in [("1", 1.0), ("2", 0.5), ("9", 2.25)] {
        nutrition
            .add_meal_entry(food, quantity, MealType::Lunch, Utc::now())
            .await
            .unwrap();
    }
    let mut workouts = WorkoutStore::new(storage.clone(), BuiltinCatalog);
    workouts.load_workout_plans().await;
    workouts.start_workout("2", Utc::now()).await.unwrap();
    workouts.finish_current(Some(20), Utc::now()).await.unwrap();

    let raw_entries = storage.get(keys::MEAL_ENTRIES).await.unwrap().unwrap();
    let entries: Vec<MealEntry> = serde_json::from_str(&raw_entries).unwrap();
    assert_eq!(serde_json::to_string(&entries).unwrap(), raw_entries);

    let raw_history = storage.get(keys::WORKOUT_HISTORY).await.unwrap().unwrap();
    let history: Vec<WorkoutSession> = serde_json::from_str(&raw_history).unwrap();
    assert_eq!(serde_json::to_string(&history).unwrap(), raw_history);
}
