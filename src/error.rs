//! Error types for tabular operations
//!
//! One crate-wide error enum plus a `Result` alias, re-exported from the
//! crate root. Kernel entry points reject malformed operands with
//! `InvalidShape` before any computation begins; there is no partial-failure
//! mode.

use thiserror::Error;

/// Errors produced by tabular operations
#[derive(Error, Debug)]
pub enum TabularError {
    /// Operand shape rejected before any computation
    #[error("Invalid shape: {reason}")]
    InvalidShape {
        /// Why the operands were rejected
        reason: String,
    },

    /// Quantization domain or CLI configuration rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Failure while serializing a report
    #[error("Format error: {0}")]
    Format(#[from] serde_json::Error),

    /// Failure while writing a report
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tabular operations
pub type Result<T> = std::result::Result<T, TabularError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_shape_display() {
        let err = TabularError::InvalidShape {
            reason: "length 31 is not a multiple of 32".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid shape: length 31 is not a multiple of 32"
        );
    }

    #[test]
    fn test_invalid_configuration_display() {
        let err = TabularError::InvalidConfiguration("bad domain".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: bad domain");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = TabularError::from(io);
        assert!(matches!(err, TabularError::Io(_)));
    }
}
