//! Error types for pressure transforms.

use gp_core::error::GpError;
use thiserror::Error;

/// Contract violations raised by the transform functions.
///
/// Numeric domain problems never show up here; they are reported as `NaN`
/// in the affected output samples.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PressureError {
    #[error("Shape mismatch for {what}: expected {expected} samples, found {found}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Invalid coefficient: {what}")]
    InvalidCoefficient { what: &'static str },
}

pub type PressureResult<T> = Result<T, PressureError>;

impl From<GpError> for PressureError {
    fn from(e: GpError) -> Self {
        match e {
            GpError::LengthMismatch {
                what,
                expected,
                found,
            } => PressureError::ShapeMismatch {
                what,
                expected,
                found,
            },
            GpError::NonFinite { what, .. } => PressureError::InvalidCoefficient { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PressureError::ShapeMismatch {
            what: "obp",
            expected: 4,
            found: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("obp"));
        assert!(msg.contains('4'));
    }

    #[test]
    fn error_conversion() {
        let core_err = GpError::LengthMismatch {
            what: "vn",
            expected: 2,
            found: 1,
        };
        let err: PressureError = core_err.into();
        assert!(matches!(err, PressureError::ShapeMismatch { what: "vn", .. }));
    }
}
