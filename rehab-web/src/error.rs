//! Error types
//!
//! Missing landmarks and degenerate geometry are not errors: they surface
//! as `None` results and the frame loop carries on. The types here cover
//! configuration, check-in input and persistence.

use thiserror::Error;

/// Rejected configuration value
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("excellent tolerance ({excellent}) is wider than good tolerance ({good})")]
    ToleranceOrder { excellent: f32, good: f32 },

    #[error("target reps must be at least 1")]
    ZeroTargetReps,
}

/// Rejected daily check-in field
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckInError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u8,
        min: u8,
        max: u8,
    },
}

/// Key-value store failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend unavailable: {0}")]
    Backend(String),

    #[error("value under `{key}` could not be decoded: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("value for `{key}` could not be encoded: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Finite and >= 0
pub(crate) fn ensure_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field, value });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

/// Finite and > 0
pub(crate) fn ensure_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    ensure_non_negative(field, value)?;
    if value == 0.0 {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(())
}
