//! Multivariate virgin curve.
//!
//! Velocity is a function of effective stress, porosity and shale volume:
//! `v = a0 - a1·φ - a2·Vsh + a3·σ^B`.

use crate::common::{check_aligned, check_coefficient, trace_domain_errors};
use crate::error::PressureResult;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultivariateCoefficients {
    pub a0: f64,
    pub a1: f64,
    pub a2: f64,
    pub a3: f64,
    /// Stress exponent
    pub b: f64,
}

impl MultivariateCoefficients {
    pub fn new(a0: f64, a1: f64, a2: f64, a3: f64, b: f64) -> Self {
        Self { a0, a1, a2, a3, b }
    }

    fn validate(&self) -> PressureResult<()> {
        check_coefficient(self.a0, "a0")?;
        check_coefficient(self.a1, "a1")?;
        check_coefficient(self.a2, "a2")?;
        check_coefficient(self.a3, "a3")?;
        check_coefficient(self.b, "B")?;
        Ok(())
    }
}

/// Effective stress from velocity, porosity and shale volume.
///
/// `σ = ((v - a0 + a1·φ + a2·Vsh)/a3)^(1/B)`. Every sample is `NaN` when
/// `a3` or `B` is zero; a negative base under a fractional `1/B` gives `NaN`.
pub fn invert_multivariate_virgin(
    vel: &[f64],
    phi: &[f64],
    vsh: &[f64],
    coef: &MultivariateCoefficients,
) -> PressureResult<Vec<f64>> {
    check_aligned(vel.len(), &[("phi", phi.len()), ("vsh", vsh.len())])?;
    coef.validate()?;
    let MultivariateCoefficients { a0, a1, a2, a3, b } = *coef;

    let out: Vec<f64> = vel
        .iter()
        .zip(phi.iter().zip(vsh))
        .map(|(&v, (&p, &sh))| {
            if a3 == 0.0 || b == 0.0 {
                return f64::NAN;
            }
            ((v - a0 + a1 * p + a2 * sh) / a3).powf(1.0 / b)
        })
        .collect();

    trace_domain_errors("invert_multivariate_virgin", &out);
    Ok(out)
}

/// Velocity from effective stress, porosity and shale volume.
pub fn multivariate_virgin(
    sigma: &[f64],
    phi: &[f64],
    vsh: &[f64],
    coef: &MultivariateCoefficients,
) -> PressureResult<Vec<f64>> {
    check_aligned(sigma.len(), &[("phi", phi.len()), ("vsh", vsh.len())])?;
    coef.validate()?;
    let MultivariateCoefficients { a0, a1, a2, a3, b } = *coef;

    let out: Vec<f64> = sigma
        .iter()
        .zip(phi.iter().zip(vsh))
        .map(|(&s, (&p, &sh))| a0 - a1 * p - a2 * sh + a3 * s.powf(b))
        .collect();

    trace_domain_errors("multivariate_virgin", &out);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PressureError;
    use gp_core::numeric::{Tolerances, nearly_equal};

    fn coef() -> MultivariateCoefficients {
        MultivariateCoefficients::new(2800.0, 4000.0, 900.0, 60.0, 0.7)
    }

    #[test]
    fn forward_curve_known_value() {
        let v = multivariate_virgin(&[1.0], &[0.2], &[0.5], &coef()).unwrap();
        // 2800 - 800 - 450 + 60
        assert!(nearly_equal(v[0], 1610.0, Tolerances::default()));
    }

    #[test]
    fn zero_a3_is_nan() {
        let c = MultivariateCoefficients::new(2800.0, 4000.0, 900.0, 0.0, 0.7);
        let sigma = invert_multivariate_virgin(&[3000.0, 3100.0], &[0.1, 0.1], &[0.2, 0.2], &c)
            .unwrap();
        assert!(sigma.iter().all(|s| s.is_nan()));
    }

    #[test]
    fn negative_base_is_nan() {
        // base = (1000 - 2800 + 400 + 90)/60 < 0, 1/B fractional
        let sigma = invert_multivariate_virgin(&[1000.0], &[0.1], &[0.1], &coef()).unwrap();
        assert!(sigma[0].is_nan());
    }

    #[test]
    fn auxiliary_logs_must_align() {
        let err = multivariate_virgin(&[1.0, 2.0], &[0.1, 0.2], &[0.3], &coef()).unwrap_err();
        assert!(matches!(err, PressureError::ShapeMismatch { what: "vsh", .. }));
    }
}
