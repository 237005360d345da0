//! Input validation functions
//!
//! The computation core accepts any numbers. These checks run at the
//! application boundary, before values enter the session state.
//! Uses both custom validators and the `validator` crate derive macros.

use crate::catalog::FoodDraft;
use crate::energy::Profile;
use crate::errors::NutritionError;
use crate::goals::MacroGoal;
use validator::Validate;

fn require_finite(label: &str, value: f64) -> Result<(), NutritionError> {
    if value.is_nan() || value.is_infinite() {
        return Err(NutritionError::Validation(format!(
            "{} must be a valid number",
            label
        )));
    }
    Ok(())
}

/// Validate a body profile (age 1-150, weight 20-500 kg, height 50-300 cm)
pub fn validate_profile(profile: &Profile) -> Result<(), NutritionError> {
    require_finite("Weight", profile.weight_kg)?;
    require_finite("Height", profile.height_cm)?;
    profile.validate()?;
    Ok(())
}

/// Validate a user-entered food
pub fn validate_food_draft(draft: &FoodDraft) -> Result<(), NutritionError> {
    if draft.name.trim().is_empty() {
        return Err(NutritionError::Validation(
            "Food name cannot be empty".to_string(),
        ));
    }
    for (label, value) in [
        ("Calories", draft.calories),
        ("Protein", draft.protein),
        ("Fat", draft.fat),
        ("Carbs", draft.carbs),
    ] {
        require_finite(label, value)?;
    }
    draft.validate()?;
    Ok(())
}

/// Validate a logged portion weight in grams
pub fn validate_portion_grams(weight_grams: f64) -> Result<(), NutritionError> {
    require_finite("Weight", weight_grams)?;
    if weight_grams <= 0.0 {
        return Err(NutritionError::Validation(
            "Portion weight must be positive".to_string(),
        ));
    }
    if weight_grams > 5000.0 {
        return Err(NutritionError::Validation(
            "Portion weight must be at most 5000 g".to_string(),
        ));
    }
    Ok(())
}

/// Validate burned calories for an exercise entry
pub fn validate_burned_calories(calories: f64) -> Result<(), NutritionError> {
    require_finite("Calories", calories)?;
    if calories < 0.0 {
        return Err(NutritionError::Validation(
            "Burned calories cannot be negative".to_string(),
        ));
    }
    if calories > 10000.0 {
        return Err(NutritionError::Validation(
            "Burned calories unreasonably high".to_string(),
        ));
    }
    Ok(())
}

/// Validate manually edited goals: no negative targets
pub fn validate_goal(goal: &MacroGoal) -> Result<(), NutritionError> {
    if goal.calories < 0 || goal.protein < 0 || goal.carbs < 0 || goal.fat < 0 {
        return Err(NutritionError::Validation(
            "Goals cannot be negative".to_string(),
        ));
    }
    Ok(())
}
