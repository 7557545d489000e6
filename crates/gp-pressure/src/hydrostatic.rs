//! Hydrostatic reference pressure.
//!
//! Depths are measured from the kelly bushing. Above sea level the pressure
//! is zero, through the water column it follows the sea water gradient, and
//! below the mudline it follows the pore fluid gradient.

use gp_core::units::{Density, Pressure, as_mpa, constants::g0, g_cc, m};

/// Fluid densities used for the hydrostatic column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydrostaticModel {
    pub rho_fluid: Density,
    pub rho_water: Density,
}

impl Default for HydrostaticModel {
    fn default() -> Self {
        Self {
            rho_fluid: g_cc(1.0),
            rho_water: g_cc(1.0),
        }
    }
}

impl HydrostaticModel {
    pub fn new(rho_fluid: Density, rho_water: Density) -> Self {
        Self {
            rho_fluid,
            rho_water,
        }
    }

    /// Hydrostatic pressure in MPa at one depth (m below kelly bushing).
    pub fn pressure_at(&self, depth: f64, kelly_bushing: f64, water_depth: f64) -> f64 {
        if depth.is_nan() {
            return f64::NAN;
        }
        let below_sea = depth - kelly_bushing;
        if below_sea <= 0.0 {
            return 0.0;
        }
        let water = below_sea.min(water_depth);
        let sediment = (below_sea - water_depth).max(0.0);
        let p: Pressure = self.rho_water * g0() * m(water) + self.rho_fluid * g0() * m(sediment);
        as_mpa(p)
    }

    /// Hydrostatic pressure in MPa at each depth.
    pub fn pressure(&self, depth: &[f64], kelly_bushing: f64, water_depth: f64) -> Vec<f64> {
        depth
            .iter()
            .map(|&d| self.pressure_at(d, kelly_bushing, water_depth))
            .collect()
    }
}

/// Hydrostatic pressure (MPa) with fresh water density for both columns.
pub fn hydrostatic_pressure(depth: &[f64], kelly_bushing: f64, depth_w: f64) -> Vec<f64> {
    HydrostaticModel::default().pressure(depth, kelly_bushing, depth_w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gp_core::numeric::{Tolerances, nearly_equal};

    const TOL: Tolerances = Tolerances {
        abs: 1e-12,
        rel: 1e-9,
    };

    #[test]
    fn zero_above_sea_level() {
        let p = hydrostatic_pressure(&[0.0, 10.0, 25.0], 25.0, 100.0);
        assert_eq!(p, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn follows_water_gradient_then_fluid_gradient() {
        let model = HydrostaticModel::new(g_cc(1.1), g_cc(1.0));
        let kb = 25.0;
        let wd = 100.0;
        let p = model.pressure(&[75.0, 125.0, 1125.0], kb, wd);
        let g = 9.806_65;
        assert!(nearly_equal(p[0], 50.0 * g * 1000.0 / 1e6, TOL));
        assert!(nearly_equal(p[1], 100.0 * g * 1000.0 / 1e6, TOL));
        let expected = (100.0 * 1000.0 + 1000.0 * 1100.0) * g / 1e6;
        assert!(nearly_equal(p[2], expected, TOL));
    }

    #[test]
    fn nan_depth_stays_nan() {
        let p = hydrostatic_pressure(&[f64::NAN, 200.0], 10.0, 50.0);
        assert!(p[0].is_nan());
        assert!(p[1] > 0.0);
    }
}
