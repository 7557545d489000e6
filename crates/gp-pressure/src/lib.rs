//! gp-pressure: pore pressure transforms for geopressure.
//!
//! Provides:
//! - Bowers virgin/unloading curves and the blended Bowers pressure
//! - Eaton ratio method
//! - Multivariate virgin curve (velocity from stress, porosity and shale volume) and its inverse
//! - Hydrostatic reference pressure and the normal compaction velocity trend
//!
//! All transforms are pure functions over depth-aligned slices. They return a
//! new vector of the same length as their inputs. Samples outside the domain
//! of a relation (negative base under a fractional power, zero divisor) come
//! out as `NaN`; only mismatched slice lengths and invalid scalar
//! coefficients are reported as errors.
//!
//! # Example
//!
//! ```
//! use gp_pressure::compute_eaton_pressure;
//!
//! let v = [2000.0, 2100.0];
//! let vn = [2200.0, 2300.0];
//! let hydro = [20.0, 21.0];
//! let litho = [40.0, 42.0];
//!
//! let pp = compute_eaton_pressure(&v, &vn, &hydro, &litho, 3.0).unwrap();
//! assert!(pp[0] > hydro[0] && pp[0] < litho[0]);
//! ```

pub mod bowers;
pub mod common;
pub mod eaton;
pub mod error;
pub mod hydrostatic;
pub mod multivariate;
pub mod trend;

// Re-exports
pub use bowers::{
    BowersCoefficients, bowers, effective_stress_loading, effective_stress_unloading, sigma_max,
    unloading_curve, virgin_curve, virgin_velocity,
};
pub use eaton::{DEFAULT_EATON_EXPONENT, compute_eaton_pressure};
pub use error::{PressureError, PressureResult};
pub use hydrostatic::{HydrostaticModel, hydrostatic_pressure};
pub use multivariate::{MultivariateCoefficients, invert_multivariate_virgin, multivariate_virgin};
pub use trend::{CompactionTrend, normal};
