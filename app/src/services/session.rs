//! Session service - owns the application state and its persistence
//!
//! Every mutation runs the matching core operation and replaces the affected
//! aggregate. Persistence is explicit: nothing reaches the store until
//! [`Session::save`] is called.

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::services::advice::AdviceRequest;
use crate::services::dashboard::{DailyDashboard, DashboardService};
use crate::state::AppState;
use crate::store::{keys, KeyValueStore};
use chrono::{DateTime, TimeZone};
use nutritrack_shared::validation::{
    validate_burned_calories, validate_food_draft, validate_goal, validate_portion_grams,
    validate_profile,
};
use nutritrack_shared::{
    add_food, builtin_catalog, derive_goals_from_preset, find_food, goals_for_profile,
    prune_older_than, remove_food, repair_catalog, search_foods, DayTracker, ExerciseEntry,
    FoodDraft, FoodItem, LogEntry, Macro, MacroGoal, MacroPreset, Profile, RankedFood, TrendDay,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Application session over a key-value store
pub struct Session<S: KeyValueStore> {
    store: S,
    state: AppState,
    tracker: DayTracker,
    window_days: u32,
    top_n: usize,
}

impl<S: KeyValueStore> Session<S> {
    /// Load all aggregates, repair the catalog and prune expired logs
    pub fn load<Tz: TimeZone>(store: S, config: &AppConfig, now: &DateTime<Tz>) -> AppResult<Self> {
        let profile: Profile = read_or_default(&store, keys::PROFILE, Profile::default)?;
        let goals: MacroGoal =
            read_or_default(&store, keys::GOALS, || goals_for_profile(&profile))?;
        let stored_catalog: Vec<FoodItem> =
            read_or_default(&store, keys::FOOD_CATALOG, builtin_catalog)?;
        let food_logs: Vec<LogEntry> = read_or_default(&store, keys::FOOD_LOGS, Vec::new)?;
        let exercise_logs: Vec<ExerciseEntry> =
            read_or_default(&store, keys::EXERCISE_LOGS, Vec::new)?;

        let window_days = config.retention.window_days;
        let catalog = repair_catalog(stored_catalog, &builtin_catalog());
        let state = AppState {
            profile,
            goals,
            catalog,
            food_logs: prune_older_than(food_logs, window_days, now),
            exercise_logs: prune_older_than(exercise_logs, window_days, now),
        };

        info!(
            foods = state.catalog.len(),
            food_logs = state.food_logs.len(),
            exercise_logs = state.exercise_logs.len(),
            calorie_goal = state.goals.calories,
            "Session loaded"
        );

        Ok(Self {
            store,
            state,
            tracker: DayTracker::new(now),
            window_days,
            top_n: config.recommendations.top_n,
        })
    }

    /// Persist all five aggregates
    pub fn save(&mut self) -> AppResult<()> {
        write_json(&mut self.store, keys::PROFILE, &self.state.profile)?;
        write_json(&mut self.store, keys::GOALS, &self.state.goals)?;
        write_json(&mut self.store, keys::FOOD_CATALOG, &self.state.catalog)?;
        write_json(&mut self.store, keys::FOOD_LOGS, &self.state.food_logs)?;
        write_json(&mut self.store, keys::EXERCISE_LOGS, &self.state.exercise_logs)?;
        info!(
            food_logs = self.state.food_logs.len(),
            exercise_logs = self.state.exercise_logs.len(),
            "Session saved"
        );
        Ok(())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn profile(&self) -> &Profile {
        &self.state.profile
    }

    pub fn goals(&self) -> &MacroGoal {
        &self.state.goals
    }

    pub fn catalog(&self) -> &[FoodItem] {
        &self.state.catalog
    }

    /// Replace the profile and recompute goals from its TDEE
    pub fn update_profile(&mut self, profile: Profile) -> AppResult<MacroGoal> {
        validate_profile(&profile)?;
        self.state.goals = goals_for_profile(&profile);
        self.state.profile = profile;
        debug!(calories = self.state.goals.calories, "Profile updated, goals recomputed");
        Ok(self.state.goals)
    }

    /// Manual calories edit; macros stay as they are
    pub fn set_goal_calories(&mut self, calories: i32) -> AppResult<MacroGoal> {
        let goals = self.state.goals.with_calories(calories);
        validate_goal(&goals)?;
        self.state.goals = goals;
        debug!(calories, "Calorie goal set");
        Ok(goals)
    }

    /// Manual macro edit; calories are reconciled from grams
    pub fn set_goal_macro(&mut self, nutrient: Macro, grams: i32) -> AppResult<MacroGoal> {
        let goals = self.state.goals.with_macro(nutrient, grams);
        validate_goal(&goals)?;
        self.state.goals = goals;
        debug!(%nutrient, grams, calories = goals.calories, "Macro goal set");
        Ok(goals)
    }

    /// Redistribute the current calorie goal by a preset split
    pub fn apply_macro_preset(&mut self, preset: MacroPreset) -> MacroGoal {
        let split = preset.split();
        self.state.goals = derive_goals_from_preset(
            self.state.goals.calories as f64,
            split.protein,
            split.carbs,
            split.fat,
        );
        debug!(?preset, "Macro preset applied");
        self.state.goals
    }

    /// Add a custom food under a fresh id
    pub fn add_food(&mut self, draft: FoodDraft) -> AppResult<FoodItem> {
        validate_food_draft(&draft)?;
        let item = draft.into_food_item();
        self.state.catalog = add_food(&self.state.catalog, item.clone());
        debug!(id = %item.id, name = %item.name, "Food added");
        Ok(item)
    }

    /// Remove a food; existing log snapshots are unaffected
    pub fn delete_food(&mut self, id: &str) -> AppResult<()> {
        if find_food(&self.state.catalog, id).is_none() {
            return Err(AppError::NotFound(format!("Food {} not found", id)));
        }
        self.state.catalog = remove_food(&self.state.catalog, id);
        debug!(id, "Food deleted");
        Ok(())
    }

    /// Snapshot a portion of a catalog food into the log
    pub fn log_food<Tz: TimeZone>(
        &mut self,
        food_id: &str,
        weight_grams: f64,
        now: &DateTime<Tz>,
    ) -> AppResult<LogEntry> {
        validate_portion_grams(weight_grams)?;
        let food = find_food(&self.state.catalog, food_id)
            .ok_or_else(|| AppError::NotFound(format!("Food {} not found", food_id)))?;

        let entry = LogEntry::new(food, weight_grams, now);
        let mut logs = Vec::with_capacity(self.state.food_logs.len() + 1);
        logs.push(entry.clone());
        logs.append(&mut self.state.food_logs);
        self.state.food_logs = prune_older_than(logs, self.window_days, now);

        debug!(
            food = %entry.food_name,
            grams = weight_grams,
            calories = entry.nutrients.calories,
            "Food logged"
        );
        Ok(entry)
    }

    pub fn delete_log(&mut self, id: &str) -> AppResult<()> {
        let before = self.state.food_logs.len();
        self.state.food_logs.retain(|e| e.id != id);
        if self.state.food_logs.len() == before {
            return Err(AppError::NotFound(format!("Log entry {} not found", id)));
        }
        debug!(id, "Log entry deleted");
        Ok(())
    }

    /// Clear every food log entry, not just today's
    pub fn clear_logs(&mut self) {
        let cleared = self.state.food_logs.len();
        self.state.food_logs.clear();
        debug!(cleared, "Food logs cleared");
    }

    pub fn add_exercise<Tz: TimeZone>(
        &mut self,
        name: &str,
        calories_burned: f64,
        now: &DateTime<Tz>,
    ) -> AppResult<ExerciseEntry> {
        validate_burned_calories(calories_burned)?;
        let entry = ExerciseEntry::new(name, calories_burned, now);

        let mut logs = Vec::with_capacity(self.state.exercise_logs.len() + 1);
        logs.push(entry.clone());
        logs.append(&mut self.state.exercise_logs);
        self.state.exercise_logs = prune_older_than(logs, self.window_days, now);

        debug!(name = %entry.name, calories = entry.calories_burned, "Exercise logged");
        Ok(entry)
    }

    pub fn delete_exercise(&mut self, id: &str) -> AppResult<()> {
        let before = self.state.exercise_logs.len();
        self.state.exercise_logs.retain(|e| e.id != id);
        if self.state.exercise_logs.len() == before {
            return Err(AppError::NotFound(format!("Exercise entry {} not found", id)));
        }
        debug!(id, "Exercise entry deleted");
        Ok(())
    }

    /// Clock poll; re-prunes both collections when the local date advanced
    pub fn tick<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> bool {
        if !self.tracker.observe(now) {
            return false;
        }

        let food_before = self.state.food_logs.len();
        let exercise_before = self.state.exercise_logs.len();
        self.prune(now);

        info!(
            date = %self.tracker.last_seen(),
            food_pruned = food_before - self.state.food_logs.len(),
            exercise_pruned = exercise_before - self.state.exercise_logs.len(),
            "Day rolled over"
        );
        true
    }

    fn prune<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) {
        let food = std::mem::take(&mut self.state.food_logs);
        let exercise = std::mem::take(&mut self.state.exercise_logs);
        self.state.food_logs = prune_older_than(food, self.window_days, now);
        self.state.exercise_logs = prune_older_than(exercise, self.window_days, now);
    }

    pub fn today_logs<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<&LogEntry> {
        DashboardService::today_logs(&self.state, now)
    }

    pub fn today_exercise<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<&ExerciseEntry> {
        DashboardService::today_exercise(&self.state, now)
    }

    pub fn dashboard<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DailyDashboard {
        DashboardService::daily(&self.state, now, self.top_n)
    }

    pub fn weekly_trend<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<TrendDay> {
        DashboardService::weekly(&self.state, now)
    }

    pub fn recommendations<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<RankedFood> {
        DashboardService::recommendations(&self.state, now, self.top_n)
    }

    pub fn advice_request<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> AdviceRequest {
        DashboardService::advice_request(&self.state, now)
    }

    pub fn search_foods(&self, query: &str) -> Vec<&FoodItem> {
        search_foods(&self.state.catalog, query)
    }
}

/// Decode a stored value, falling back to `default` when missing or corrupt
fn read_or_default<S, T, F>(store: &S, key: &str, default: F) -> AppResult<T>
where
    S: KeyValueStore,
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match store.get(key)? {
        None => Ok(default()),
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(key, error = %e, "Stored value is corrupt, using default");
                Ok(default())
            }
        },
    }
}

fn write_json<S: KeyValueStore, T: Serialize + ?Sized>(
    store: &mut S,
    key: &str,
    value: &T,
) -> AppResult<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::{Duration, FixedOffset};
    use rstest::rstest;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
            .unwrap()
    }

    fn fresh() -> Session<MemoryStore> {
        Session::load(MemoryStore::new(), &AppConfig::default(), &now()).unwrap()
    }

    #[test]
    fn test_first_run_defaults() {
        let session = fresh();
        assert_eq!(session.goals().calories, 2594);
        assert_eq!(session.catalog().len(), 25);
        assert!(session.state().food_logs.is_empty());
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_corrupt_key_falls_back_to_default() {
        let mut store = MemoryStore::new();
        store.set(keys::GOALS, "{not json").unwrap();
        store.set(keys::FOOD_CATALOG, "[]").unwrap();

        let session = Session::load(store, &AppConfig::default(), &now()).unwrap();
        assert_eq!(session.goals().calories, 2594);
        // Empty stored catalog is repaired back to the built-ins
        assert_eq!(session.catalog().len(), 25);
    }

    #[test]
    fn test_log_food_prepends_snapshot() {
        let mut session = fresh();
        let first = session.log_food("1", 100.0, &now()).unwrap();
        let second = session.log_food("7", 200.0, &(now() + Duration::minutes(5))).unwrap();

        assert_eq!(session.state().food_logs[0].id, second.id);
        assert_eq!(session.state().food_logs[1].id, first.id);
        assert_eq!(first.nutrients.calories, 165);
        assert_eq!(second.nutrients.calories, 260);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-10.0)]
    #[case(f64::NAN)]
    fn test_log_food_rejects_bad_weight(#[case] grams: f64) {
        let mut session = fresh();
        let err = session.log_food("1", grams, &now()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(session.state().food_logs.is_empty());
    }

    #[test]
    fn test_log_unknown_food_is_not_found() {
        let mut session = fresh();
        let err = session.log_food("does-not-exist", 100.0, &now()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_deleting_food_keeps_log_snapshot() {
        let mut session = fresh();
        let entry = session.log_food("1", 100.0, &now()).unwrap();
        session.delete_food("1").unwrap();

        assert!(find_food(session.catalog(), "1").is_none());
        assert_eq!(session.state().food_logs[0].food_name, entry.food_name);
        assert_eq!(session.dashboard(&now()).progress.consumed.calories, 165);
    }

    #[test]
    fn test_set_goal_macro_reconciles_calories() {
        let mut session = fresh();
        let goals = session.set_goal_macro(Macro::Protein, 200).unwrap();
        assert_eq!(goals.protein, 200);
        assert_eq!(
            goals.calories,
            200 * 4 + goals.carbs * 4 + goals.fat * 9
        );
    }

    #[test]
    fn test_set_goal_calories_keeps_macros() {
        let mut session = fresh();
        let before = *session.goals();
        let goals = session.set_goal_calories(1800).unwrap();
        assert_eq!(goals.calories, 1800);
        assert_eq!(goals.protein, before.protein);
        assert!(session.set_goal_calories(-1).is_err());
    }

    #[test]
    fn test_preset_redistributes_current_calories() {
        let mut session = fresh();
        session.set_goal_calories(2000).unwrap();
        let goals = session.apply_macro_preset(MacroPreset::HighProtein);
        assert_eq!(goals.calories, 2000);
        assert_eq!(goals.protein, 200);
    }

    #[test]
    fn test_update_profile_recomputes_goals() {
        let mut session = fresh();
        let profile = Profile {
            weight_kg: 90.0,
            ..Profile::default()
        };
        let goals = session.update_profile(profile.clone()).unwrap();
        assert!(goals.calories > 2594);
        assert_eq!(session.profile(), &profile);

        let invalid = Profile {
            age: 0,
            ..Profile::default()
        };
        assert!(session.update_profile(invalid).is_err());
        assert_eq!(session.profile(), &profile);
    }

    #[test]
    fn test_tick_prunes_on_rollover() {
        let mut session = fresh();
        session.log_food("1", 100.0, &(now() - Duration::days(6))).unwrap();
        session.add_exercise("Run", 200.0, &(now() - Duration::days(6))).unwrap();

        assert!(!session.tick(&(now() + Duration::hours(1))));
        assert_eq!(session.state().food_logs.len(), 1);

        assert!(session.tick(&(now() + Duration::days(1))));
        assert!(session.state().food_logs.is_empty());
        assert!(session.state().exercise_logs.is_empty());
    }

    #[test]
    fn test_empty_exercise_name_defaults() {
        let mut session = fresh();
        let entry = session.add_exercise("   ", 150.0, &now()).unwrap();
        assert_eq!(entry.name, ExerciseEntry::UNNAMED);
        assert_eq!(session.today_exercise(&now()).len(), 1);
    }

    #[test]
    fn test_delete_missing_entries() {
        let mut session = fresh();
        assert!(matches!(session.delete_log("x"), Err(AppError::NotFound(_))));
        assert!(matches!(session.delete_exercise("x"), Err(AppError::NotFound(_))));
        assert!(matches!(session.delete_food("x"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_clear_logs_removes_all_days() {
        let mut session = fresh();
        session.log_food("1", 100.0, &(now() - Duration::days(2))).unwrap();
        session.log_food("1", 100.0, &now()).unwrap();
        session.clear_logs();
        assert!(session.state().food_logs.is_empty());
    }
}
