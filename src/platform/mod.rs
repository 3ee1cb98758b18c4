//! Platform abstraction layer
//!
//! Handles browser/native differences for storage: LocalStorage on web,
//! one file per key on native, an in-memory map for tests.

pub mod storage;

pub use storage::{KeyValueStore, MemoryStore, StorageError};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
