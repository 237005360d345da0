//! Data models for NutriTrack
//!
//! Log entries are frozen snapshots: name, icon and nutrients are copied from
//! the catalog at log time and never follow later catalog edits.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Placeholder glyph for foods without an icon
pub const PLACEHOLDER_ICON: &str = "🍱";

/// Anything that carries an epoch-millisecond timestamp
pub trait Timestamped {
    fn timestamp_millis(&self) -> i64;
}

/// Consumed nutrient amounts
///
/// Calories are whole kcal; macros keep fractional grams for display rounding.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Nutrients {
    pub calories: i32,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl Nutrients {
    /// Scale a food's per-100 g values to a portion
    pub fn for_portion(food: &FoodItem, weight_grams: f64) -> Nutrients {
        Nutrients {
            calories: (food.calories * weight_grams / 100.0).round() as i32,
            protein: food.protein * weight_grams / 100.0,
            fat: food.fat * weight_grams / 100.0,
            carbs: food.carbs * weight_grams / 100.0,
        }
    }
}

/// Catalog entry, all nutrient values per 100 g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FoodItem {
    pub id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[validate(range(min = 0.0, max = 900.0))]
    pub calories: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub protein: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub fat: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub carbs: f64,
}

impl FoodItem {
    /// Icon for display, falling back to the placeholder glyph
    pub fn display_icon(&self) -> &str {
        if self.icon.is_empty() {
            PLACEHOLDER_ICON
        } else {
            &self.icon
        }
    }
}

/// A food intake record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    /// Weak reference: the food may later be deleted from the catalog
    pub food_id: String,
    pub food_name: String,
    pub icon: String,
    pub weight_grams: f64,
    pub timestamp: i64,
    pub nutrients: Nutrients,
}

impl LogEntry {
    /// Log a portion of a food, snapshotting its name, icon and nutrients
    pub fn new<Tz: TimeZone>(food: &FoodItem, weight_grams: f64, at: &DateTime<Tz>) -> LogEntry {
        LogEntry {
            id: Uuid::new_v4().to_string(),
            food_id: food.id.clone(),
            food_name: food.name.clone(),
            icon: food.display_icon().to_string(),
            weight_grams,
            timestamp: at.timestamp_millis(),
            nutrients: Nutrients::for_portion(food, weight_grams),
        }
    }

    pub fn logged_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

impl Timestamped for LogEntry {
    fn timestamp_millis(&self) -> i64 {
        self.timestamp
    }
}

/// An exercise record; burned calories extend the day's budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub id: String,
    pub name: String,
    pub calories_burned: i32,
    pub timestamp: i64,
}

impl ExerciseEntry {
    pub const UNNAMED: &'static str = "Unnamed workout";

    pub fn new<Tz: TimeZone>(name: &str, calories_burned: f64, at: &DateTime<Tz>) -> ExerciseEntry {
        let name = name.trim();
        ExerciseEntry {
            id: Uuid::new_v4().to_string(),
            name: if name.is_empty() {
                Self::UNNAMED.to_string()
            } else {
                name.to_string()
            },
            calories_burned: calories_burned.round() as i32,
            timestamp: at.timestamp_millis(),
        }
    }
}

impl Timestamped for ExerciseEntry {
    fn timestamp_millis(&self) -> i64 {
        self.timestamp
    }
}
