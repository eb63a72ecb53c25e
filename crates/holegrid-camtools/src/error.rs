//! Error types for the CAM tools crate.
//!
//! Machine parameters are validated before a renderer exists, so every
//! error here is raised before any toolpath text is written.

use thiserror::Error;

/// Errors that can occur while setting up a CAM tool.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),
}

/// Errors related to machine parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter value is not a finite number.
    #[error("Parameter '{name}' is not finite: {value}")]
    NotFinite { name: &'static str, value: f64 },

    /// A parameter value is on the wrong side of zero.
    #[error("Invalid value for '{name}': {value} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Parameters are mutually incompatible.
    #[error("Incompatible parameters: {0}")]
    Incompatible(String),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::InvalidValue {
            name: "z_depth",
            value: 0.125,
            reason: "must be negative",
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'z_depth': 0.125 (must be negative)"
        );

        let err = ParameterError::NotFinite {
            name: "bit_size",
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "Parameter 'bit_size' is not finite: NaN");
    }

    #[test]
    fn test_parameter_error_conversion() {
        let err: CamToolError = ParameterError::Incompatible("x".to_string()).into();
        assert!(matches!(err, CamToolError::Parameter(_)));
        assert_eq!(err.to_string(), "Parameter error: Incompatible parameters: x");
    }

    #[test]
    fn test_incompatible_display() {
        let err = ParameterError::Incompatible("too many passes".to_string());
        assert_eq!(err.to_string(), "Incompatible parameters: too many passes");
    }
}
