//! High score persistence
//!
//! A single integer under one storage key. Read once at startup, written
//! every time the score passes it. Best-effort: failures are logged and
//! the game carries on.

use crate::platform::storage::{KeyValueStore, StorageError};

/// Storage key for the best score
pub const STORAGE_KEY: &str = "brick_blitz_high_score";

/// Load the high score (missing or corrupt data reads as 0)
pub fn load(store: &dyn KeyValueStore) -> u64 {
    match try_load(store) {
        Ok(Some(score)) => {
            log::info!("Loaded high score {}", score);
            score
        }
        Ok(None) => {
            log::info!("No high score found, starting fresh");
            0
        }
        Err(e) => {
            log::warn!("Discarding unreadable high score: {}", e);
            0
        }
    }
}

fn try_load(store: &dyn KeyValueStore) -> Result<Option<u64>, StorageError> {
    match store.get(STORAGE_KEY)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Save the high score (fire and forget)
pub fn save(store: &mut dyn KeyValueStore, score: u64) {
    match store.set(STORAGE_KEY, &score.to_string()) {
        Ok(()) => log::info!("High score saved ({})", score),
        Err(e) => log::warn!("Could not save high score: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStore;

    #[test]
    fn test_round_trip() {
        let mut store = MemoryStore::new();
        save(&mut store, 1234);
        save(&mut store, 5678);
        assert_eq!(load(&store), 5678);
    }

    #[test]
    fn test_absent_is_zero() {
        assert_eq!(load(&MemoryStore::new()), 0);
    }

    #[test]
    fn test_corrupt_is_zero() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "not a number").unwrap();
        assert_eq!(load(&store), 0);

        store.set(STORAGE_KEY, "-5").unwrap();
        assert_eq!(load(&store), 0);
    }

    /// Backend that always fails
    struct Broken;

    impl KeyValueStore for Broken {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn test_backend_failure_is_not_fatal() {
        let mut store = Broken;
        save(&mut store, 10);
        assert_eq!(load(&store), 0);
    }
}
