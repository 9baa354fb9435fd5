//! Error types shared by every calculator.
//!
//! All variants are validation failures raised before any arithmetic runs. A calculator
//! reports the first rule its input violates and nothing else, so callers can re-prompt
//! for that single field.

use thiserror::Error;

/// Validation failures reported by the calculators.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum StatError {
    #[error("Please fill in all fields with valid numbers ('{field}' is not a valid number).")]
    InvalidNumber { field: String },

    #[error("Sample size must be at least {minimum} (got {actual}).")]
    SampleSizeTooSmall { minimum: u32, actual: usize },

    #[error("Standard deviation must be positive ('{field}').")]
    NonPositiveDeviation { field: String },

    #[error("X and Y must have the same number of values (got {x} and {y}).")]
    LengthMismatch { x: usize, y: usize },

    #[error("Cannot calculate correlation: no variation in data.")]
    NoVariance,

    #[error("Please enter valid numeric values separated by commas.")]
    EmptySeries,

    #[error("Unsupported significance or confidence level: {value}")]
    UnsupportedLevel { value: f64 },
}

impl StatError {
    pub(crate) fn invalid_number(field: &str) -> Self {
        StatError::InvalidNumber {
            field: field.to_string(),
        }
    }

    pub(crate) fn non_positive_deviation(field: &str) -> Self {
        StatError::NonPositiveDeviation {
            field: field.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StatError>;
