//! Error types for the NutriTrack core
//!
//! The computation functions are total and never fail. Errors only arise
//! when callers ask the core to validate input at the application boundary.

use thiserror::Error;

/// Core error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NutritionError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<validator::ValidationErrors> for NutritionError {
    fn from(errors: validator::ValidationErrors) -> Self {
        NutritionError::Validation(errors.to_string())
    }
}
