//! Eaton ratio method.

use crate::common::{check_aligned, check_coefficient, trace_domain_errors};
use crate::error::PressureResult;

/// Eaton exponent used when none is configured.
pub const DEFAULT_EATON_EXPONENT: f64 = 3.0;

/// Pore pressure from velocity with the Eaton method.
///
/// `P = S - (S - Ph)·(v/vn)^n`, where `S` is the lithostatic (overburden)
/// pressure and `Ph` the hydrostatic pressure. A sample with `vn == 0` is
/// `NaN`.
pub fn compute_eaton_pressure(
    v: &[f64],
    vn: &[f64],
    hydrostatic: &[f64],
    lithostatic: &[f64],
    n: f64,
) -> PressureResult<Vec<f64>> {
    check_aligned(
        v.len(),
        &[
            ("vn", vn.len()),
            ("hydrostatic", hydrostatic.len()),
            ("lithostatic", lithostatic.len()),
        ],
    )?;
    check_coefficient(n, "n")?;

    let out: Vec<f64> = v
        .iter()
        .zip(vn)
        .zip(hydrostatic.iter().zip(lithostatic))
        .map(|((&vel, &vel_n), (&p_h, &s))| {
            if vel_n == 0.0 {
                return f64::NAN;
            }
            let ves = (s - p_h) * (vel / vel_n).powf(n);
            s - ves
        })
        .collect();

    trace_domain_errors("eaton", &out);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PressureError;
    use gp_core::numeric::{Tolerances, nearly_equal};

    #[test]
    fn normal_velocity_gives_hydrostatic_pressure() {
        let v = [2000.0, 2500.0, 3000.0];
        let hydro = [10.0, 20.0, 30.0];
        let litho = [22.0, 44.0, 66.0];
        let tol = Tolerances {
            abs: 1e-9,
            rel: 1e-12,
        };
        for n in [1.0, 3.0, 7.5] {
            let pp = compute_eaton_pressure(&v, &v, &hydro, &litho, n).unwrap();
            for (p, h) in pp.iter().zip(&hydro) {
                assert!(nearly_equal(*p, *h, tol));
            }
        }
    }

    #[test]
    fn larger_exponent_raises_overpressure() {
        let v = [1800.0];
        let vn = [2000.0];
        let hydro = [20.0];
        let litho = [45.0];
        let p1 = compute_eaton_pressure(&v, &vn, &hydro, &litho, 1.0).unwrap()[0];
        let p5 = compute_eaton_pressure(&v, &vn, &hydro, &litho, 5.0).unwrap()[0];
        assert!(litho[0] - p5 < litho[0] - p1);
        assert!(p5 > p1);
    }

    #[test]
    fn zero_normal_velocity_is_nan_only_at_that_sample() {
        let v = [2000.0, 2000.0];
        let vn = [0.0, 2100.0];
        let pp = compute_eaton_pressure(&v, &vn, &[10.0, 11.0], &[20.0, 22.0], 3.0).unwrap();
        assert_eq!(pp.len(), 2);
        assert!(pp[0].is_nan());
        assert!(pp[1].is_finite());
    }

    #[test]
    fn misaligned_inputs_fail() {
        let err = compute_eaton_pressure(&[1.0, 2.0], &[1.0, 2.0], &[1.0], &[1.0, 2.0], 3.0)
            .unwrap_err();
        assert!(matches!(
            err,
            PressureError::ShapeMismatch {
                what: "hydrostatic",
                expected: 2,
                found: 1
            }
        ));
    }
}
