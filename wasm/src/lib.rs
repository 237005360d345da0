//! NutriTrack WASM Module
//!
//! WebAssembly bindings exposing the nutrition core to the browser front end.
//! Structured values cross the boundary as JSON strings; malformed input is
//! reported as a string error.

use chrono::{DateTime, FixedOffset, Utc};
use nutritrack_shared::validation::validate_portion_grams;
use nutritrack_shared::{
    basal_metabolic_rate, build_weekly_trend, derive_goals_from_preset, rank_recommendations,
    reconcile_calories_from_macros, total_daily_energy_expenditure, FoodItem, LogEntry, MacroGoal,
    Nutrients, Profile,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn parse<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

/// Caller's wall clock from epoch millis and UTC offset in minutes
fn local_now(now_millis: f64, utc_offset_minutes: i32) -> Result<DateTime<FixedOffset>, String> {
    let offset = FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60))
        .ok_or_else(|| format!("Invalid UTC offset: {} minutes", utc_offset_minutes))?;
    if !now_millis.is_finite() {
        return Err("Timestamp must be finite".to_string());
    }
    DateTime::<Utc>::from_timestamp_millis(now_millis as i64)
        .map(|utc| utc.with_timezone(&offset))
        .ok_or_else(|| format!("Timestamp out of range: {}", now_millis))
}

fn bmr_from_json(profile_json: &str) -> Result<f64, String> {
    let profile: Profile = parse(profile_json, "profile")?;
    Ok(basal_metabolic_rate(&profile))
}

fn tdee_from_json(profile_json: &str) -> Result<i32, String> {
    let profile: Profile = parse(profile_json, "profile")?;
    Ok(total_daily_energy_expenditure(&profile))
}

fn goals_json(
    calories: f64,
    protein_ratio: f64,
    carb_ratio: f64,
    fat_ratio: f64,
) -> Result<String, String> {
    to_json(&derive_goals_from_preset(calories, protein_ratio, carb_ratio, fat_ratio))
}

fn portion_json(food_json: &str, weight_grams: f64) -> Result<String, String> {
    let food: FoodItem = parse(food_json, "food")?;
    validate_portion_grams(weight_grams).map_err(|e| e.to_string())?;
    to_json(&Nutrients::for_portion(&food, weight_grams))
}

fn trend_json(
    logs_json: &str,
    goal_json: &str,
    now_millis: f64,
    utc_offset_minutes: i32,
) -> Result<String, String> {
    let logs: Vec<LogEntry> = parse(logs_json, "logs")?;
    let goal: MacroGoal = parse(goal_json, "goal")?;
    let now = local_now(now_millis, utc_offset_minutes)?;
    to_json(&build_weekly_trend(&logs, &goal, &now))
}

fn recommendations_json(
    catalog_json: &str,
    consumed_json: &str,
    goal_json: &str,
    top_n: usize,
) -> Result<String, String> {
    let catalog: Vec<FoodItem> = parse(catalog_json, "catalog")?;
    let consumed: Nutrients = parse(consumed_json, "consumed")?;
    let goal: MacroGoal = parse(goal_json, "goal")?;
    to_json(&rank_recommendations(&catalog, &consumed, &goal, top_n))
}

/// Mifflin-St Jeor BMR for a profile
#[wasm_bindgen]
pub fn calculate_bmr(profile_json: &str) -> Result<f64, JsValue> {
    bmr_from_json(profile_json).map_err(|e| JsValue::from_str(&e))
}

/// TDEE rounded to whole kcal
#[wasm_bindgen]
pub fn calculate_tdee(profile_json: &str) -> Result<i32, JsValue> {
    tdee_from_json(profile_json).map_err(|e| JsValue::from_str(&e))
}

/// Goals JSON for a calorie target and macro ratios
#[wasm_bindgen]
pub fn derive_goals(
    calories: f64,
    protein_ratio: f64,
    carb_ratio: f64,
    fat_ratio: f64,
) -> Result<String, JsValue> {
    goals_json(calories, protein_ratio, carb_ratio, fat_ratio).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen]
pub fn reconcile_calories(protein: f64, carbs: f64, fat: f64) -> i32 {
    reconcile_calories_from_macros(protein, carbs, fat)
}

/// Nutrients JSON for `weight_grams` of a food
#[wasm_bindgen]
pub fn portion_nutrients(food_json: &str, weight_grams: f64) -> Result<String, JsValue> {
    portion_json(food_json, weight_grams).map_err(|e| JsValue::from_str(&e))
}

/// Seven-day trend JSON, oldest first
#[wasm_bindgen]
pub fn weekly_trend(
    logs_json: &str,
    goal_json: &str,
    now_millis: f64,
    utc_offset_minutes: i32,
) -> Result<String, JsValue> {
    trend_json(logs_json, goal_json, now_millis, utc_offset_minutes)
        .map_err(|e| JsValue::from_str(&e))
}

/// Ranked foods JSON for the remaining gap
#[wasm_bindgen]
pub fn recommendations(
    catalog_json: &str,
    consumed_json: &str,
    goal_json: &str,
    top_n: usize,
) -> Result<String, JsValue> {
    recommendations_json(catalog_json, consumed_json, goal_json, top_n)
        .map_err(|e| JsValue::from_str(&e))
}
