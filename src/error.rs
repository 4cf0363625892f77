//! Error types for the numl learning engine

use thiserror::Error;

/// Result type alias for numl operations
pub type Result<T> = std::result::Result<T, NumlError>;

/// Main error type for the engine
#[derive(Error, Debug)]
pub enum NumlError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl NumlError {
    /// Fails unless both lengths agree
    pub(crate) fn check_dims(expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(NumlError::DimensionMismatch { expected, actual })
        }
    }
}

impl From<polars::error::PolarsError> for NumlError {
    fn from(err: polars::error::PolarsError) -> Self {
        NumlError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for NumlError {
    fn from(err: serde_json::Error) -> Self {
        NumlError::SerializationError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for NumlError {
    fn from(err: ndarray::ShapeError) -> Self {
        NumlError::DataError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NumlError::DimensionMismatch { expected: 2, actual: 3 };
        assert_eq!(err.to_string(), "Dimension mismatch: expected 2, got 3");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: NumlError = io_err.into();
        assert!(matches!(err, NumlError::IoError(_)));
    }

    #[test]
    fn test_check_dims() {
        assert!(NumlError::check_dims(3, 3).is_ok());
        assert!(matches!(
            NumlError::check_dims(2, 3),
            Err(NumlError::DimensionMismatch { expected: 2, actual: 3 })
        ));
    }
}
