//! Bowers velocity/effective-stress relations.
//!
//! Virgin curve: `v = v0 + a·σ^b`, with `v0` the velocity of unconsolidated
//! sediment. Unloading curve: `v = v0 + a·(σmax·(σ/σmax)^(1/u))^b`, where
//! `σmax` is the effective stress reached at `v_max` before unloading began.

use crate::common::{check_aligned, check_coefficient, trace_domain_errors};
use crate::error::{PressureError, PressureResult};
use gp_core::units::constants::V0_MPS;

/// Coefficients of the Bowers model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BowersCoefficients {
    /// Virgin curve multiplier (> 0)
    pub a: f64,
    /// Virgin curve exponent (non-zero)
    pub b: f64,
    /// Unloading exponent (>= 1, 1 means no unloading correction)
    pub u: f64,
    /// Maximum velocity reached before unloading (m/s)
    pub v_max: f64,
}

impl BowersCoefficients {
    pub fn new(a: f64, b: f64, u: f64, v_max: f64) -> Self {
        Self { a, b, u, v_max }
    }

    /// Reject coefficients outside the model definition.
    pub fn validate(&self) -> PressureResult<()> {
        check_virgin_coefficients(self.a, self.b)?;
        check_coefficient(self.u, "u")?;
        check_coefficient(self.v_max, "v_max")?;
        if self.u < 1.0 {
            return Err(PressureError::InvalidCoefficient { what: "u" });
        }
        Ok(())
    }

    /// Maximum effective stress for these coefficients.
    pub fn sigma_max(&self) -> f64 {
        sigma_max(self.v_max, self.a, self.b)
    }
}

fn check_virgin_coefficients(a: f64, b: f64) -> PressureResult<()> {
    check_coefficient(a, "a")?;
    check_coefficient(b, "b")?;
    if a <= 0.0 {
        return Err(PressureError::InvalidCoefficient { what: "a" });
    }
    if b == 0.0 {
        return Err(PressureError::InvalidCoefficient { what: "b" });
    }
    Ok(())
}

/// Effective stress on the virgin (loading) branch for a single velocity.
///
/// `((v - v0)/a)^(1/b)`. A velocity below `v0` gives `NaN` unless `1/b` is
/// an integer, in which case the real power is returned.
#[inline]
pub fn effective_stress_loading(v: f64, a: f64, b: f64) -> f64 {
    ((v - V0_MPS) / a).powf(1.0 / b)
}

/// Effective stress on the unloading branch for a single velocity.
///
/// `NaN` when `sigma_max` is zero.
#[inline]
pub fn effective_stress_unloading(v: f64, a: f64, b: f64, u: f64, sigma_max: f64) -> f64 {
    if sigma_max == 0.0 {
        return f64::NAN;
    }
    sigma_max * (effective_stress_loading(v, a, b) / sigma_max).powf(u)
}

/// Effective stress reached at `v_max` on the virgin curve.
#[inline]
pub fn sigma_max(v_max: f64, a: f64, b: f64) -> f64 {
    effective_stress_loading(v_max, a, b)
}

/// Virgin curve velocity for a single effective stress. Negative stress gives `NaN`.
#[inline]
pub fn virgin_velocity(sigma: f64, a: f64, b: f64) -> f64 {
    if sigma < 0.0 {
        return f64::NAN;
    }
    V0_MPS + a * sigma.powf(b)
}

/// Pore pressure from velocity with the Bowers method.
///
/// Samples before `transition_index` use the virgin curve, samples at or
/// after it use the unloading curve. The jump at the transition is part of
/// the model. A `transition_index` past the end means no unloading.
pub fn bowers(
    v: &[f64],
    obp: &[f64],
    transition_index: usize,
    coef: &BowersCoefficients,
) -> PressureResult<Vec<f64>> {
    check_aligned(v.len(), &[("obp", obp.len())])?;
    coef.validate()?;

    let BowersCoefficients { a, b, u, .. } = *coef;
    let s_max = coef.sigma_max();

    let out: Vec<f64> = v
        .iter()
        .zip(obp)
        .enumerate()
        .map(|(i, (&vel, &p_ob))| {
            let ves = if i < transition_index {
                effective_stress_loading(vel, a, b)
            } else {
                effective_stress_unloading(vel, a, b, u, s_max)
            };
            p_ob - ves
        })
        .collect();

    trace_domain_errors("bowers", &out);
    Ok(out)
}

/// Velocity on the virgin curve for each effective stress.
pub fn virgin_curve(sigma: &[f64], a: f64, b: f64) -> PressureResult<Vec<f64>> {
    check_virgin_coefficients(a, b)?;
    let out: Vec<f64> = sigma.iter().map(|&s| virgin_velocity(s, a, b)).collect();
    trace_domain_errors("virgin_curve", &out);
    Ok(out)
}

/// Velocity on the unloading curve for each effective stress.
///
/// Each stress is mapped onto the virgin curve domain through
/// `σmax·(σ/σmax)^(1/u)`. Every sample is `NaN` when `σmax` is zero.
pub fn unloading_curve(
    sigma: &[f64],
    a: f64,
    b: f64,
    u: f64,
    v_max: f64,
) -> PressureResult<Vec<f64>> {
    BowersCoefficients::new(a, b, u, v_max).validate()?;
    let s_max = sigma_max(v_max, a, b);

    let out: Vec<f64> = sigma
        .iter()
        .map(|&s| {
            if s_max == 0.0 {
                return f64::NAN;
            }
            let independent = s_max * (s / s_max).powf(1.0 / u);
            virgin_velocity(independent, a, b)
        })
        .collect();

    trace_domain_errors("unloading_curve", &out);
    Ok(out)
}
