//! Discrete pressure measurements resolved against a reference depth axis.

use gp_core::numeric::{insertion_index, round_to};

/// Resolve `(depth, coef)` measurements to pressures.
///
/// For each measurement deeper than `hydrodynamic_depth`, the pressure is
/// `hydrostatic[i] * coef`, where `i` is the leftmost insertion index of the
/// measurement depth in `reference_depth`, rounded to 3 decimals. This is a
/// nearest-or-next lookup, not interpolation. Measurements past the end of
/// the reference axis are skipped.
///
/// Returns `(depths, pressures)` of the kept measurements.
pub fn lookup_pressure_points(
    reference_depth: &[f64],
    hydrostatic: &[f64],
    depths: &[f64],
    coefs: &[f64],
    hydrodynamic_depth: f64,
) -> (Vec<f64>, Vec<f64>) {
    let mut out_depth = Vec::with_capacity(depths.len());
    let mut out_pressure = Vec::with_capacity(depths.len());

    for (&dp, &co) in depths.iter().zip(coefs) {
        if dp <= hydrodynamic_depth {
            continue;
        }
        let idx = insertion_index(reference_depth, dp);
        let Some(&hydro) = hydrostatic.get(idx) else {
            tracing::warn!(depth = dp, "measurement below the reference depth axis, skipped");
            continue;
        };
        out_depth.push(dp);
        out_pressure.push(round_to(hydro * co, 3));
    }

    (out_depth, out_pressure)
}
