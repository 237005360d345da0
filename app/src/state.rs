//! Application state
//!
//! The five top-level aggregates owned by a session. The computation core
//! never sees this struct; it only receives the plain values inside it.

use nutritrack_shared::{
    builtin_catalog, goals_for_profile, ExerciseEntry, FoodItem, LogEntry, MacroGoal, Profile,
};
use serde::{Deserialize, Serialize};

/// Session-owned application state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub profile: Profile,
    pub goals: MacroGoal,
    pub catalog: Vec<FoodItem>,
    /// Newest first
    pub food_logs: Vec<LogEntry>,
    pub exercise_logs: Vec<ExerciseEntry>,
}

impl Default for AppState {
    /// First-run state: default profile, goals from its TDEE, built-in catalog
    fn default() -> Self {
        let profile = Profile::default();
        Self {
            goals: goals_for_profile(&profile),
            profile,
            catalog: builtin_catalog(),
            food_logs: Vec::new(),
            exercise_logs: Vec::new(),
        }
    }
}
