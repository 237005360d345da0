//! Persistent key-value store
//!
//! The session serializes its aggregates to JSON strings under five keys.
//! Stores only move strings; they know nothing about the payloads.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::AppResult;

/// Storage keys
pub mod keys {
    pub const PROFILE: &str = "nutri_profile";
    pub const GOALS: &str = "nutri_goals";
    pub const FOOD_CATALOG: &str = "nutri_foods";
    pub const FOOD_LOGS: &str = "nutri_logs";
    pub const EXERCISE_LOGS: &str = "nutri_exercise";

    pub const ALL: [&str; 5] = [PROFILE, GOALS, FOOD_CATALOG, FOOD_LOGS, EXERCISE_LOGS];
}

/// Opaque get/set-by-key string store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;
}
