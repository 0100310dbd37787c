//! Key-value persistence.
//!
//! Every store persists its state as JSON text under a fixed key. Backends only
//! have to move strings around; typed access goes through [`load_json`] and
//! [`save_json`].

mod memory;

pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

/// Fixed keys under which store state is persisted.
pub mod keys {
    pub const USER: &str = "secure_user";
    pub const WORKOUT_PLANS: &str = "cached_workout_plans";
    pub const WORKOUT_HISTORY: &str = "workoutHistory";
    pub const CURRENT_WORKOUT: &str = "currentWorkout";
    pub const FAVORITE_PLANS: &str = "favoritePlans";
    pub const WEEKLY_GOAL: &str = "weeklyGoal";
    pub const FOODS: &str = "foods";
    pub const MEAL_ENTRIES: &str = "mealEntries";
    pub const WATER_INTAKE: &str = "waterIntake";
    pub const NUTRITION_GOALS: &str = "nutritionGoals";
    pub const REFLECTIONS: &str = "reflections";
}

/// An asynchronous string key-value store.
///
/// Writes to the same key are not serialized against each other: the last
/// write wins.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Reads and deserializes the JSON value stored under `key`.
///
/// Returns `Ok(None)` if the key doesn't exist.
pub async fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key).await? {
        Some(text) => serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StorageError::Deserialize {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Serializes `value` as compact JSON and stores it under `key`.
pub async fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let text = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &text).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Entry {
        food_id: String,
        quantity: f64,
    }

    #[tokio::test]
    async fn test_load_missing_key_is_none() {
        let store = MemoryStore::new();
        let value: Option<Vec<Entry>> = load_json(&store, "missing").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_saved_list_reads_back_byte_identical() {
        let store = MemoryStore::new();
        let entries = vec![
            Entry {
                food_id: "1".into(),
                quantity: 1.5,
            },
            Entry {
                food_id: "3".into(),
                quantity: 0.25,
            },
        ];

        save_json(&store, keys::MEAL_ENTRIES, &entries).await.unwrap();
        let written = store.get(keys::MEAL_ENTRIES).await.unwrap().unwrap();

        let read: Vec<Entry> = load_json(&store, keys::MEAL_ENTRIES)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(read, entries);
        assert_eq!(serde_json::to_string(&read).unwrap(), written);
        assert!(written.contains("\"foodId\":\"1\""));
    }

    #[tokio::test]
    async fn test_malformed_value_is_an_error() {
        let store = MemoryStore::new();
        store.set(keys::FOODS, "{not json").await.unwrap();

        let result: Result<Option<Vec<Entry>>, _> = load_json(&store, keys::FOODS).await;
        let err = result.unwrap_err();
        assert!(matches!(err, StorageError::Deserialize { .. }));
        assert!(err.to_string().contains("foods"));
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = MemoryStore::new();
        save_json(&store, keys::WEEKLY_GOAL, &3).await.unwrap();
        save_json(&store, keys::WEEKLY_GOAL, &7).await.unwrap();

        let goal: u8 = load_json(&store, keys::WEEKLY_GOAL).await.unwrap().unwrap();
        assert_eq!(goal, 7);
    }
}
