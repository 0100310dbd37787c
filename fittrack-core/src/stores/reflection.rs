use crate::error::StoreError;
use crate::models::Reflection;
use crate::storage::{keys, load_json, save_json, KeyValueStore};

use super::load_or_warn;

/// Journal of free-text reflections, kept in insertion order and listed
/// newest first.
pub struct ReflectionStore<S> {
    storage: S,
    reflections: Vec<Reflection>,
}

impl<S: KeyValueStore> ReflectionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            reflections: Vec::new(),
        }
    }

    /// Appends a reflection to the persisted journal.
    ///
    /// The journal is re-read from storage before appending so entries written
    /// elsewhere since the last load are kept.
    pub async fn add(&mut self, title: &str, content: &str) -> Result<&Reflection, StoreError> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(StoreError::validation(
                "Fill in both the title and the content of the reflection.",
            ));
        }

        let mut reflections: Vec<Reflection> = load_json(&self.storage, keys::REFLECTIONS)
            .await?
            .unwrap_or_default();
        reflections.push(Reflection::new(title, content));
        save_json(&self.storage, keys::REFLECTIONS, &reflections).await?;

        self.reflections = reflections;
        let last = self.reflections.len() - 1;
        Ok(&self.reflections[last])
    }

    pub async fn load(&mut self) {
        if let Some(reflections) = load_or_warn(&self.storage, keys::REFLECTIONS).await {
            self.reflections = reflections;
        }
    }

    /// Reflections, newest first.
    pub fn list(&self) -> Vec<&Reflection> {
        self.reflections.iter().rev().collect()
    }

    /// The reflection at `index` in the newest-first listing.
    pub fn get(&self, index: usize) -> Option<&Reflection> {
        self.reflections.iter().rev().nth(index)
    }

    pub fn len(&self) -> usize {
        self.reflections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reflections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_add_and_list_newest_first() {
        let mut store = ReflectionStore::new(MemoryStore::new());
        store.add("Monday", "Legs were sore").await.unwrap();
        store.add("Tuesday", "Felt strong").await.unwrap();

        let listed = store.list();
        let titles: Vec<&str> = listed.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Tuesday", "Monday"]);
        assert_eq!(store.get(1).unwrap().content, "Legs were sore");
        assert!(store.get(2).is_none());
    }

    #[tokio::test]
    async fn test_blank_fields_rejected() {
        let mut store = ReflectionStore::new(MemoryStore::new());
        assert!(store.add("   ", "content").await.is_err());
        assert!(store.add("title", "\n").await.is_err());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_add_keeps_entries_written_elsewhere() {
        let storage = MemoryStore::new();
        let mut first = ReflectionStore::new(storage.clone());
        let mut second = ReflectionStore::new(storage.clone());

        first.add("One", "first").await.unwrap();
        second.add("Two", "second").await.unwrap();
        assert_eq!(second.len(), 2);

        first.load().await;
        assert_eq!(first.get(0).unwrap().title, "Two");
    }

    #[tokio::test]
    async fn test_save_failure_is_reported() {
        let storage = MemoryStore::new();
        let mut store = ReflectionStore::new(storage.clone());
        store.add("Kept", "still here").await.unwrap();

        storage.set_failing(true);
        let err = store.add("Lost", "never saved").await.unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_wire_format() {
        let storage = MemoryStore::new();
        let mut store = ReflectionStore::new(storage.clone());
        store.add("Title", "Body").await.unwrap();

        let raw = storage.get(keys::REFLECTIONS).await.unwrap().unwrap();
        assert_eq!(raw, r#"[{"title":"Title","content":"Body"}]"#);
    }
}
