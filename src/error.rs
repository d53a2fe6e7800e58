//! Error types for tabprep

use thiserror::Error;

/// Result type alias for tabprep operations
pub type Result<T> = std::result::Result<T, PrepError>;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum PrepError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Transformer not fitted")]
    NotFitted,

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<polars::error::PolarsError> for PrepError {
    fn from(err: polars::error::PolarsError) -> Self {
        PrepError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for PrepError {
    fn from(err: serde_json::Error) -> Self {
        PrepError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PrepError::FeatureNotFound("age".to_string());
        assert_eq!(err.to_string(), "Feature not found: age");
    }

    #[test]
    fn test_not_fitted_display() {
        assert_eq!(PrepError::NotFitted.to_string(), "Transformer not fitted");
    }
}
