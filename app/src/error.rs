//! Application error handling
//!
//! Unified error type for the session, the store and configuration.
//! Core validation errors convert into the matching variants.

use nutritrack_shared::NutritionError;
use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl From<NutritionError> for AppError {
    fn from(err: NutritionError) -> Self {
        match err {
            NutritionError::Validation(msg) => AppError::Validation(msg),
            NutritionError::NotFound(msg) => AppError::NotFound(msg),
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_validation_maps_to_validation() {
        let err: AppError = NutritionError::Validation("bad weight".to_string()).into();
        assert!(matches!(err, AppError::Validation(ref m) if m == "bad weight"));
    }

    #[test]
    fn test_core_not_found_maps_to_not_found() {
        let err: AppError = NutritionError::NotFound("food 42".to_string()).into();
        assert_eq!(err.to_string(), "Resource not found: food 42");
    }

    #[test]
    fn test_io_error_is_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
