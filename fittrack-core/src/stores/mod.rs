//! State containers backed by a [`KeyValueStore`](crate::storage::KeyValueStore).
//!
//! Each store holds its state in memory and mirrors it to fixed storage keys.
//! Loads never fail: a storage error is logged and the in-memory state is kept.
//! Mutations persist first and only then update memory, so an error leaves the
//! store exactly as it was.

mod auth;
mod nutrition;
mod reflection;
mod workout;

pub use auth::AuthStore;
pub use nutrition::NutritionStore;
pub use reflection::ReflectionStore;
pub use workout::{PlanFilter, WorkoutStore};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::catalog::CatalogError;
use crate::storage::{load_json, save_json, KeyValueStore};

/// Resolves a catalog fetch against its cached copy.
///
/// A successful fetch is written through to `key` and returned. A failed fetch
/// falls back to whatever is cached. `None` means there is nothing usable and
/// the caller keeps its current list.
async fn fetch_or_cached<T, S>(
    storage: &S,
    key: &str,
    fetched: Result<Vec<T>, CatalogError>,
) -> Option<Vec<T>>
where
    T: Serialize + DeserializeOwned,
    S: KeyValueStore,
{
    match fetched {
        Ok(items) => {
            if let Err(e) = save_json(storage, key, &items).await {
                tracing::warn!("Failed to cache '{}': {}", key, e);
            }
            Some(items)
        }
        Err(e) => {
            tracing::warn!("{}, using cache '{}'", e, key);
            match load_json(storage, key).await {
                Ok(Some(items)) => Some(items),
                Ok(None) => {
                    tracing::warn!("No cached copy under '{}'", key);
                    None
                }
                Err(e) => {
                    tracing::warn!("Failed to read cache '{}': {}", key, e);
                    None
                }
            }
        }
    }
}

/// Reads `key`, logging instead of failing.
async fn load_or_warn<T, S>(storage: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore,
{
    match load_json(storage, key).await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Error loading '{}': {}", key, e);
            None
        }
    }
}
