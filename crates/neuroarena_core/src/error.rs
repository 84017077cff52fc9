//! Error types for the simulation core.
//!
//! Structural and import problems fail fast through [`SimError`]. Numeric edge
//! cases hit while ticking never surface here; the systems fall back to
//! neutral values instead.

use thiserror::Error;

/// Main error type for neuroarena_core operations.
#[derive(Error, Debug)]
pub enum SimError {
    /// Flattened weight vector does not fit the network architecture.
    #[error("Shape mismatch: expected {expected} weights, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Configuration rejected before any tick runs.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Snapshot (de)serialization errors.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File system errors from snapshot or history glue.
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for neuroarena_core operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates a new serialization error.
    #[must_use]
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        Self::Serialization(msg.into())
    }
}

/// Returns a [`SimError::Configuration`] from the enclosing function unless
/// the condition holds.
#[macro_export]
macro_rules! ensure_config {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::error::SimError::configuration(format!($($arg)+)));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::ShapeMismatch {
            expected: 10,
            actual: 3,
        };
        assert_eq!(err.to_string(), "Shape mismatch: expected 10 weights, got 3");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SimError = io_err.into();
        assert!(matches!(err, SimError::Io(_)));
    }
}
