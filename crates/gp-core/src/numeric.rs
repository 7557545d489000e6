use crate::GpError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, GpError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(GpError::NonFinite { what, value: v })
    }
}

/// Check that `found` has the length of the reference array.
pub fn ensure_same_len(what: &'static str, expected: usize, found: usize) -> Result<(), GpError> {
    if expected == found {
        Ok(())
    } else {
        Err(GpError::LengthMismatch {
            what,
            expected,
            found,
        })
    }
}

/// Round half away from zero to `decimals` places. NaN stays NaN.
pub fn round_to(v: Real, decimals: i32) -> Real {
    let scale = 10f64.powi(decimals);
    (v * scale).round() / scale
}

/// Leftmost insertion point of `value` in an ascending slice.
///
/// Returns the first index `i` with `sorted[i] >= value`, or `sorted.len()`
/// when every element is smaller.
pub fn insertion_index(sorted: &[Real], value: Real) -> usize {
    sorted.partition_point(|&x| x < value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn same_len_reports_both_sizes() {
        assert!(ensure_same_len("obp", 3, 3).is_ok());
        let err = ensure_same_len("obp", 3, 2).unwrap_err();
        assert_eq!(
            err,
            GpError::LengthMismatch {
                what: "obp",
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn round_to_three_places() {
        assert_eq!(round_to(2.70049, 3), 2.7);
        assert_eq!(round_to(1.23456, 3), 1.235);
        assert!(round_to(Real::NAN, 3).is_nan());
    }

    #[test]
    fn insertion_index_is_leftmost() {
        let depth = [100.0, 200.0, 300.0];
        assert_eq!(insertion_index(&depth, 50.0), 0);
        assert_eq!(insertion_index(&depth, 200.0), 1);
        assert_eq!(insertion_index(&depth, 250.0), 2);
        assert_eq!(insertion_index(&depth, 400.0), 3);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn insertion_index_keeps_order(
            mut values in prop::collection::vec(-1.0e4_f64..1.0e4_f64, 0..32),
            probe in -2.0e4_f64..2.0e4_f64,
        ) {
            values.sort_by(f64::total_cmp);
            let idx = insertion_index(&values, probe);
            prop_assert!(values[..idx].iter().all(|&v| v < probe));
            prop_assert!(values[idx..].iter().all(|&v| v >= probe));
        }
    }
}
