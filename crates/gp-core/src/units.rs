// gp-core/src/units.rs

use uom::si::f64::{
    Acceleration as UomAcceleration, Length as UomLength, MassDensity as UomMassDensity,
    Pressure as UomPressure,
};

// Public canonical unit types (SI, f64)
pub type Accel = UomAcceleration;
pub type Density = UomMassDensity;
pub type Length = UomLength;
pub type Pressure = UomPressure;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

/// Density given in g/cm³, the unit well logs report it in.
#[inline]
pub fn g_cc(v: f64) -> Density {
    use uom::si::mass_density::gram_per_cubic_centimeter;
    Density::new::<gram_per_cubic_centimeter>(v)
}

/// Pressure value in MPa, the unit pressure logs are stored in.
#[inline]
pub fn as_mpa(p: Pressure) -> f64 {
    use uom::si::pressure::megapascal;
    p.get::<megapascal>()
}

pub mod constants {
    use super::*;

    pub const G0_MPS2: f64 = 9.806_65;

    /// Velocity of unconsolidated sediment in the Bowers relations (m/s).
    pub const V0_MPS: f64 = 1524.0;

    #[inline]
    pub fn g0() -> Accel {
        use uom::si::acceleration::meter_per_second_squared;
        Accel::new::<meter_per_second_squared>(G0_MPS2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _l = m(2.0);
        let _rho = g_cc(1.03);
        let _g0 = constants::g0();
        let p: Pressure = g_cc(1.0) * constants::g0() * m(1000.0);
        assert!((as_mpa(p) - 9.806_65).abs() < 1e-9);
    }

    #[test]
    fn water_column_is_about_ten_kpa_per_meter() {
        let p: Pressure = g_cc(1.0) * constants::g0() * m(1.0);
        assert!((as_mpa(p) - 0.009_806_65).abs() < 1e-12);
    }
}
