//! Depth-indexed log series.

use crate::{WellError, WellResult};
use serde::{Deserialize, Serialize};

/// Physical property a log measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PropertyType {
    Pressure,
    Velocity,
    Density,
    #[default]
    Other,
}

impl PropertyType {
    /// Guess the property from a unit string.
    pub fn from_unit(unit: &str) -> Self {
        match unit.to_ascii_lowercase().as_str() {
            "mpa" | "kpa" | "pa" | "psi" | "bar" => PropertyType::Pressure,
            "m/s" | "km/s" | "ft/s" => PropertyType::Velocity,
            "g/cc" | "g/cm3" | "kg/m3" => PropertyType::Density,
            _ => PropertyType::Other,
        }
    }

    /// Short code used in log headers.
    pub fn code(self) -> &'static str {
        match self {
            PropertyType::Pressure => "PRE",
            PropertyType::Velocity => "VEL",
            PropertyType::Density => "DEN",
            PropertyType::Other => "OTH",
        }
    }
}

/// A named, unit-tagged series sampled at `depth[i]`.
///
/// `NaN` marks a missing sample. A log is not modified after it is
/// returned; build a new one instead.
#[derive(Debug, Clone, Default)]
pub struct Log {
    name: String,
    units: String,
    description: String,
    property_type: PropertyType,
    depth: Vec<f64>,
    data: Vec<f64>,
}

impl Log {
    /// Create a log. `depth` and `data` must have the same length.
    pub fn new(name: impl Into<String>, depth: Vec<f64>, data: Vec<f64>) -> WellResult<Self> {
        let name = name.into();
        if depth.len() != data.len() {
            return Err(WellError::LogShape {
                name,
                depth: depth.len(),
                data: data.len(),
            });
        }
        Ok(Self {
            name,
            depth,
            data,
            ..Self::default()
        })
    }

    /// A log without samples, returned when there is nothing to report.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_property_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = property_type;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn property_type(&self) -> PropertyType {
        self.property_type
    }

    pub fn depth(&self) -> &[f64] {
        &self.depth
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// Table column name for this log: description with blanks as `_`, then the unit.
    pub fn column_name(&self) -> String {
        let label = if self.description.is_empty() {
            &self.name
        } else {
            &self.description
        };
        crate::table::format_column_name(&label.replace(' ', "_"), &self.units)
    }

    /// `(depth, value)` pairs, skipping missing samples.
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.depth
            .iter()
            .zip(&self.data)
            .filter(|(_, v)| !v.is_nan())
            .map(|(&d, &v)| (d, v))
    }
}
