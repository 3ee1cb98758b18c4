//! Player-created records: finished sessions and cosmetic designs
//!
//! Each collection is a flat, order-preserving list stored as one JSON blob
//! under a fixed key. Every mutation rewrites the whole blob; a blob that no
//! longer parses is treated as an empty collection.

pub mod records;
pub mod store;

pub use records::{Design, SessionRecord};
pub use store::{Record, RecordStore};

/// Session history
pub type SessionStore = RecordStore<SessionRecord>;
/// Saved designs
pub type DesignStore = RecordStore<Design>;

/// Storage key for session history
pub const SESSIONS_KEY: &str = "brick_blitz_sessions";
/// Storage key for designs
pub const DESIGNS_KEY: &str = "brick_blitz_designs";
