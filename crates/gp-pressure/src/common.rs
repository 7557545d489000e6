//! Common utilities for pressure transforms.

use crate::error::{PressureError, PressureResult};
use gp_core::numeric::{ensure_finite, ensure_same_len};

/// Ensure every named slice has the length of the first one.
pub fn check_aligned(reference: usize, others: &[(&'static str, usize)]) -> PressureResult<()> {
    for &(what, len) in others {
        ensure_same_len(what, reference, len)?;
    }
    Ok(())
}

/// Ensure a scalar coefficient is finite.
pub fn check_coefficient(value: f64, what: &'static str) -> PressureResult<f64> {
    ensure_finite(value, what).map_err(|_| PressureError::InvalidCoefficient { what })
}

/// Count the `NaN` samples of a transform output and trace them.
pub(crate) fn trace_domain_errors(what: &'static str, out: &[f64]) {
    let bad = out.iter().filter(|v| v.is_nan()).count();
    if bad > 0 {
        tracing::debug!(transform = what, samples = bad, "samples outside model domain");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligned_slices_pass() {
        assert!(check_aligned(3, &[("obp", 3), ("vn", 3)]).is_ok());
    }

    #[test]
    fn first_misaligned_slice_is_named() {
        let err = check_aligned(3, &[("obp", 3), ("vn", 2)]).unwrap_err();
        assert_eq!(
            err,
            PressureError::ShapeMismatch {
                what: "vn",
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn coefficient_must_be_finite() {
        assert!(check_coefficient(1.0, "a").is_ok());
        assert!(check_coefficient(f64::INFINITY, "a").is_err());
        assert!(check_coefficient(f64::NAN, "a").is_err());
    }
}
