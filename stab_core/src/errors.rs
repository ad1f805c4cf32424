//! # Error Types
//!
//! Structured error types for stab_core. Every fallible calculation returns a
//! [`CalcResult`], so a caller can tell a rejected input apart from a
//! physically degenerate (but valid) answer such as a negative GM.
//!
//! ## Example
//!
//! ```rust
//! use stab_core::errors::{CalcError, CalcResult};
//!
//! fn validate_displacement(displacement_t: f64) -> CalcResult<()> {
//!     if displacement_t <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "displacement_t".to_string(),
//!             value: displacement_t.to_string(),
//!             reason: "Displacement must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for stab_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by the front ends.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-finite, out of range, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Numerical integration was given too few (or an unusable number of) samples
    #[error("Insufficient samples for {rule}: need {required}, got {actual}")]
    InsufficientSamples {
        rule: String,
        required: String,
        actual: usize,
    },

    /// Calculation could not produce a result from otherwise valid inputs
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an InsufficientSamples error
    pub fn insufficient_samples(rule: impl Into<String>, required: impl Into<String>, actual: usize) -> Self {
        CalcError::InsufficientSamples {
            rule: rule.into(),
            required: required.into(),
            actual,
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::InsufficientSamples { .. } => "INSUFFICIENT_SAMPLES",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Reject NaN and infinities for a named input.
pub fn ensure_finite(field: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"))
    }
}

/// Require a finite, strictly positive input.
pub fn ensure_positive(field: &str, value: f64) -> CalcResult<()> {
    ensure_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be positive"));
    }
    Ok(())
}

/// Require a finite, non-negative input.
pub fn ensure_non_negative(field: &str, value: f64) -> CalcResult<()> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value cannot be negative"));
    }
    Ok(())
}

/// Require a finite ratio in the closed interval [0, 1].
pub fn ensure_ratio(field: &str, value: f64) -> CalcResult<()> {
    ensure_finite(field, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(CalcError::invalid_input(field, value.to_string(), "Ratio must be between 0 and 1"));
    }
    Ok(())
}
