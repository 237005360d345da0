//! Energy model
//!
//! Converts a body profile into basal and total daily energy expenditure.
//!
//! Inputs are not validated here: negative or zero measurements yield
//! mathematically defined (possibly negative) results. Use
//! [`crate::validation::validate_profile`] at the boundary.

use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Profile Types
// ============================================================================

/// Gender used by the Mifflin-St Jeor equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    #[default]
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Athlete-level training or a physical job
    ExtraActive,
}

impl ActivityLevel {
    /// All levels, ordered by increasing multiplier
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise (x1.2)",
            ActivityLevel::LightlyActive => "Light activity (x1.375)",
            ActivityLevel::ModeratelyActive => "Moderate exercise (x1.55)",
            ActivityLevel::VeryActive => "Hard exercise (x1.725)",
            ActivityLevel::ExtraActive => "Athlete level (x1.9)",
        }
    }
}

/// Body profile snapshot
///
/// Replaced wholesale on edit; every replacement must trigger goal
/// recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Profile {
    pub gender: Gender,
    /// Age in years
    #[validate(range(min = 1, max = 150))]
    pub age: i32,
    /// Weight in kilograms
    #[validate(range(min = 20.0, max = 500.0))]
    pub weight_kg: f64,
    /// Height in centimeters
    #[validate(range(min = 50.0, max = 300.0))]
    pub height_cm: f64,
    pub activity_level: ActivityLevel,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            gender: Gender::Male,
            age: 25,
            weight_kg: 70.0,
            height_cm: 175.0,
            activity_level: ActivityLevel::ModeratelyActive,
        }
    }
}

// ============================================================================
// BMR and TDEE Calculations
// ============================================================================

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn basal_metabolic_rate(profile: &Profile) -> f64 {
    let base = 10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * profile.age as f64;
    match profile.gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// Calculate Total Daily Energy Expenditure, rounded to whole kcal
///
/// TDEE = round(BMR × Activity Multiplier)
pub fn total_daily_energy_expenditure(profile: &Profile) -> i32 {
    (basal_metabolic_rate(profile) * profile.activity_level.multiplier()).round() as i32
}

/// Energy estimate with breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyEstimate {
    /// Basal Metabolic Rate (unrounded)
    pub bmr: f64,
    /// Total Daily Energy Expenditure
    pub tdee: i32,
    /// Activity multiplier used
    pub activity_multiplier: f64,
}

/// Calculate the complete energy estimate for a profile
pub fn estimate_energy(profile: &Profile) -> EnergyEstimate {
    EnergyEstimate {
        bmr: basal_metabolic_rate(profile),
        tdee: total_daily_energy_expenditure(profile),
        activity_multiplier: profile.activity_level.multiplier(),
    }
}
