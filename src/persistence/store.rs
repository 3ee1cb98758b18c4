//! Generic keyed-list CRUD over a [`KeyValueStore`]

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::platform::storage::KeyValueStore;

/// An item with a stable identity
pub trait Record: Clone + Serialize + DeserializeOwned {
    fn id(&self) -> u64;
}

/// In-memory copy of one stored collection
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    key: &'static str,
    items: Vec<T>,
}

impl<T: Record> RecordStore<T> {
    /// Load the collection stored under `key` (empty if absent or malformed)
    pub fn load(store: &dyn KeyValueStore, key: &'static str) -> Self {
        let items: Vec<T> = match store.get(key) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Dropping malformed {}: {}", key, e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Could not read {}: {}", key, e);
                Vec::new()
            }
        };
        Self { key, items }
    }

    pub fn list(&self) -> &[T] {
        &self.items
    }

    /// One past the largest id in use
    pub fn next_id(&self) -> u64 {
        self.items.iter().map(|item| item.id()).max().map_or(1, |id| id + 1)
    }

    /// Append an item
    pub fn add(&mut self, store: &mut dyn KeyValueStore, item: T) {
        self.items.push(item);
        self.persist(store);
    }

    /// Replace the item with `id` in place. Returns false if there is none.
    pub fn update(&mut self, store: &mut dyn KeyValueStore, id: u64, item: T) -> bool {
        let Some(slot) = self.items.iter_mut().find(|existing| existing.id() == id) else {
            return false;
        };
        *slot = item;
        self.persist(store);
        true
    }

    /// Remove the item with `id`. Returns false if there is none.
    pub fn delete(&mut self, store: &mut dyn KeyValueStore, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        if self.items.len() == before {
            return false;
        }
        self.persist(store);
        true
    }

    fn persist(&self, store: &mut dyn KeyValueStore) {
        let json = match serde_json::to_string(&self.items) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not encode {}: {}", self.key, e);
                return;
            }
        };
        if let Err(e) = store.set(self.key, &json) {
            log::warn!("Could not save {}: {}", self.key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{DESIGNS_KEY, Design, SESSIONS_KEY, SessionRecord};
    use crate::platform::storage::MemoryStore;
    use crate::sim::Color;

    fn session(id: u64, score: u64) -> SessionRecord {
        SessionRecord {
            id,
            score,
            level: 1,
            bricks_broken: 0,
            played_at: 0.0,
            note: String::new(),
        }
    }

    #[test]
    fn test_crud_round_trip() {
        let mut backend = MemoryStore::new();
        let mut sessions = RecordStore::<SessionRecord>::load(&backend, SESSIONS_KEY);
        assert!(sessions.list().is_empty());
        assert_eq!(sessions.next_id(), 1);

        sessions.add(&mut backend, session(1, 100));
        sessions.add(&mut backend, session(2, 50));
        sessions.add(&mut backend, session(3, 75));
        assert_eq!(sessions.next_id(), 4);

        let mut edited = session(2, 50);
        edited.note = "close one".to_string();
        assert!(sessions.update(&mut backend, 2, edited));
        assert!(!sessions.update(&mut backend, 9, session(9, 0)));

        assert!(sessions.delete(&mut backend, 1));
        assert!(!sessions.delete(&mut backend, 1));

        // Reload from the backend: order preserved, edits kept
        let reloaded = RecordStore::<SessionRecord>::load(&backend, SESSIONS_KEY);
        let ids: Vec<u64> = reloaded.list().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(reloaded.list()[0].note, "close one");
    }

    #[test]
    fn test_malformed_blob_is_empty() {
        let mut backend = MemoryStore::new();
        backend.set(DESIGNS_KEY, "[{\"id\": \"oops\"}]").unwrap();
        let designs = RecordStore::<Design>::load(&backend, DESIGNS_KEY);
        assert!(designs.list().is_empty());
    }

    #[test]
    fn test_collections_are_independent() {
        let mut backend = MemoryStore::new();
        let mut designs = RecordStore::<Design>::load(&backend, DESIGNS_KEY);
        designs.add(
            &mut backend,
            Design {
                id: 1,
                name: "Neon".to_string(),
                paddle_color: Color::rgb(1.0, 0.0, 1.0),
                ball_color: Color::WHITE,
                image: None,
            },
        );

        let sessions = RecordStore::<SessionRecord>::load(&backend, SESSIONS_KEY);
        assert!(sessions.list().is_empty());
        let designs = RecordStore::<Design>::load(&backend, DESIGNS_KEY);
        assert_eq!(designs.list()[0].name, "Neon");
    }
}
