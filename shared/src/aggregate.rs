//! Nutrient aggregation
//!
//! Folds log snapshots into consumed totals and derives the day's progress
//! against the calorie budget.

use crate::goals::MacroGoal;
use crate::models::{ExerciseEntry, LogEntry, Nutrients, Timestamped};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Sum the frozen nutrient snapshots of a set of log entries
pub fn sum_nutrients<'a, I>(entries: I) -> Nutrients
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    entries
        .into_iter()
        .fold(Nutrients::default(), |acc, entry| Nutrients {
            calories: acc.calories.saturating_add(entry.nutrients.calories),
            protein: acc.protein + entry.nutrients.protein,
            fat: acc.fat + entry.nutrients.fat,
            carbs: acc.carbs + entry.nutrients.carbs,
        })
}

/// Total calories burned by a set of exercise entries
pub fn total_burned<'a, I>(entries: I) -> i32
where
    I: IntoIterator<Item = &'a ExerciseEntry>,
{
    entries
        .into_iter()
        .fold(0i32, |acc, e| acc.saturating_add(e.calories_burned))
}

/// Local calendar date of an epoch-millisecond timestamp in `tz`
pub fn local_date<Tz: TimeZone>(timestamp_millis: i64, tz: &Tz) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
        .map(|utc| utc.with_timezone(tz).date_naive())
}

/// Entries whose local calendar date equals `date`
pub fn entries_on_day<'a, T, Tz>(entries: &'a [T], date: NaiveDate, tz: &Tz) -> Vec<&'a T>
where
    T: Timestamped,
    Tz: TimeZone,
{
    entries
        .iter()
        .filter(|e| local_date(e.timestamp_millis(), tz) == Some(date))
        .collect()
}

/// Names of the `limit` most recent entries, newest first
pub fn recent_food_names<'a, I>(entries: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    let mut entries: Vec<&LogEntry> = entries.into_iter().collect();
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    entries
        .into_iter()
        .take(limit)
        .map(|e| e.food_name.clone())
        .collect()
}

/// Consumed-vs-target view of a single day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub consumed: Nutrients,
    pub burned: i32,
    /// goal.calories + burned
    pub calorie_budget: i32,
    /// Never negative
    pub remaining_calories: i32,
    pub calorie_percent: u8,
    pub protein_percent: u8,
    pub carbs_percent: u8,
    pub fat_percent: u8,
}

/// Percentage of `target` reached, capped to 0..=100
///
/// A zero target is treated as 1 so the result is always defined.
pub fn percent_of(current: f64, target: f64) -> u8 {
    let target = if target == 0.0 { 1.0 } else { target };
    let percent = (current / target * 100.0).round();
    if percent.is_nan() {
        return 0;
    }
    percent.clamp(0.0, 100.0) as u8
}

/// Progress against the goal, with exercise extending the calorie budget
pub fn daily_progress(consumed: &Nutrients, burned: i32, goal: &MacroGoal) -> DailyProgress {
    let calorie_budget = goal.calories.saturating_add(burned);
    DailyProgress {
        consumed: *consumed,
        burned,
        calorie_budget,
        remaining_calories: calorie_budget.saturating_sub(consumed.calories).max(0),
        calorie_percent: percent_of(consumed.calories as f64, calorie_budget as f64),
        protein_percent: percent_of(consumed.protein, goal.protein as f64),
        carbs_percent: percent_of(consumed.carbs, goal.carbs as f64),
        fat_percent: percent_of(consumed.fat, goal.fat as f64),
    }
}
