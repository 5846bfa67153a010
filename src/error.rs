//! Error types for the ulasan library.
//!
//! All fallible operations return [`UlasanError`] through the crate-wide
//! [`Result`] alias. Each variant names one failure kind so that callers can
//! tell "no model yet" apart from "the model exists but prediction failed".
//!
//! # Examples
//!
//! ```
//! use ulasan::error::{Result, UlasanError};
//!
//! fn check_features(max_features: usize) -> Result<()> {
//!     if max_features == 0 {
//!         return Err(UlasanError::configuration("max_features must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_features(0).is_err());
//! ```

use thiserror::Error;

/// The main error type for ulasan operations.
#[derive(Error, Debug)]
pub enum UlasanError {
    /// Bad hyperparameters or an invalid setup (zero feature count, empty
    /// vocabulary corpus, split ratio out of range, malformed label space).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The dataset is empty or cannot be split into two non-empty partitions.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A transform or predict call was made before the component was fitted.
    #[error("Not fitted: {0}")]
    NotFitted(String),

    /// The requested learner name is not supported.
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// No model bundle is available for the session.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Shapes or values handed to a component do not match its contract.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with UlasanError.
pub type Result<T> = std::result::Result<T, UlasanError>;

impl UlasanError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        UlasanError::Configuration(msg.into())
    }

    /// Create a new insufficient data error.
    pub fn insufficient_data<S: Into<String>>(msg: S) -> Self {
        UlasanError::InsufficientData(msg.into())
    }

    /// Create a new not fitted error.
    pub fn not_fitted<S: Into<String>>(msg: S) -> Self {
        UlasanError::NotFitted(msg.into())
    }

    /// Create a new unknown model error.
    pub fn unknown_model<S: Into<String>>(msg: S) -> Self {
        UlasanError::UnknownModel(msg.into())
    }

    /// Create a new model unavailable error.
    pub fn model_unavailable<S: Into<String>>(msg: S) -> Self {
        UlasanError::ModelUnavailable(msg.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        UlasanError::InvalidInput(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        UlasanError::Analysis(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = UlasanError::configuration("max_features must be positive");
        assert_eq!(
            error.to_string(),
            "Configuration error: max_features must be positive"
        );

        let error = UlasanError::unknown_model("Gradient Boosting");
        assert_eq!(error.to_string(), "Unknown model: Gradient Boosting");

        let error = UlasanError::not_fitted("vectorizer");
        assert_eq!(error.to_string(), "Not fitted: vectorizer");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = UlasanError::from(json_error);

        match error {
            UlasanError::Json(_) => {} // Expected
            _ => panic!("Expected JSON error variant"),
        }
    }
}
