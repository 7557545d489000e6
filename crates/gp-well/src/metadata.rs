//! Well metadata and model parameter sets.
//!
//! Metadata files are JSON (YAML when the extension is `.yaml`/`.yml`):
//!
//! ```json
//! {
//!   "hdf_file": "wells.json",
//!   "well_name": "CUG-1",
//!   "loc": [1200.0, 3400.0],
//!   "KB": 41.0,
//!   "WD": 82.0,
//!   "TD": 3500.0,
//!   "nct": {"a": 7.9, "b": -0.0002},
//!   "MDT": {"depth": [1800.0, 2100.0], "coef": [1.05, 1.21]}
//! }
//! ```
//!
//! Every field may be absent at parse time; see [`WellMetadata::missing_fields`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub type MetadataResult<T> = Result<T, MetadataError>;

#[derive(thiserror::Error, Debug)]
pub enum MetadataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Surface location of the well.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location(pub f64, pub f64);

/// One named set of model parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterSet {
    /// Pressure measurements as coefficients of hydrostatic pressure at depth.
    Points { depth: Vec<f64>, coef: Vec<f64> },
    /// Bare list of depths. Listed before `Trend`, which would also accept a
    /// two-element list.
    Depths(Vec<f64>),
    /// Two-parameter trend such as the normal compaction trend.
    Trend { a: f64, b: f64 },
    /// Anything else found in the file, kept so it survives a save.
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WellMetadata {
    /// Reference to the store holding the log table.
    #[serde(rename = "hdf_file", default, skip_serializing_if = "Option::is_none")]
    pub store: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub well_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<Location>,
    #[serde(rename = "KB", default, skip_serializing_if = "Option::is_none")]
    pub kelly_bushing: Option<f64>,
    #[serde(rename = "WD", default, skip_serializing_if = "Option::is_none")]
    pub water_depth: Option<f64>,
    #[serde(rename = "TD", default, skip_serializing_if = "Option::is_none")]
    pub total_depth: Option<f64>,
    /// Parameter sets keyed by name ("nct", "MDT", "EMW", ...).
    #[serde(flatten)]
    pub parameters: BTreeMap<String, ParameterSet>,
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

impl WellMetadata {
    pub fn load(path: &Path) -> MetadataResult<Self> {
        let content = std::fs::read_to_string(path)?;
        if is_yaml(path) {
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(serde_json::from_str(&content)?)
        }
    }

    pub fn save(&self, path: &Path) -> MetadataResult<()> {
        let content = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Names of required fields absent from the document.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.store.is_none() {
            missing.push("hdf_file");
        }
        if self.well_name.is_none() {
            missing.push("well_name");
        }
        if self.loc.is_none() {
            missing.push("loc");
        }
        if self.kelly_bushing.is_none() {
            missing.push("KB");
        }
        if self.water_depth.is_none() {
            missing.push("WD");
        }
        if self.total_depth.is_none() {
            missing.push("TD");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn well_name(&self) -> &str {
        self.well_name.as_deref().unwrap_or_default()
    }

    /// Key of the well's table in a store: lowercase, `-` replaced by `_`.
    pub fn storage_key(&self) -> String {
        self.well_name().to_lowercase().replace('-', "_")
    }

    /// Store location, relative paths taken from `base` (the metadata file's directory).
    pub fn store_path(&self, base: &Path) -> Option<PathBuf> {
        let store = self.store.as_ref()?;
        if store.is_absolute() {
            Some(store.clone())
        } else {
            Some(base.join(store))
        }
    }

    /// `(depth, coef)` of a point parameter set.
    pub fn points(&self, key: &str) -> Option<(&[f64], &[f64])> {
        match self.parameters.get(key)? {
            ParameterSet::Points { depth, coef } => Some((depth.as_slice(), coef.as_slice())),
            _ => None,
        }
    }

    /// `(a, b)` of a trend parameter set.
    pub fn trend(&self, key: &str) -> Option<(f64, f64)> {
        match self.parameters.get(key)? {
            ParameterSet::Trend { a, b } => Some((*a, *b)),
            _ => None,
        }
    }

    /// Depth list of a parameter set, or the depths of a point set.
    pub fn depths(&self, key: &str) -> Option<&[f64]> {
        match self.parameters.get(key)? {
            ParameterSet::Depths(depth) | ParameterSet::Points { depth, .. } => {
                Some(depth.as_slice())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "hdf_file": "wells.json",
        "well_name": "CUG-1",
        "loc": [1200.0, 3400.0],
        "KB": 41.0,
        "WD": 82.0,
        "TD": 3500.0,
        "nct": {"a": 7.9, "b": -0.0002},
        "MDT": {"depth": [1800.0, 2100.0], "coef": [1.05, 1.21]},
        "MP": [900.0, 1200.0],
        "comment": "drilled 2009"
    }"#;

    #[test]
    fn parses_fields_and_parameter_sets() {
        let meta: WellMetadata = serde_json::from_str(DOC).unwrap();
        assert!(meta.is_complete());
        assert_eq!(meta.well_name(), "CUG-1");
        assert_eq!(meta.storage_key(), "cug_1");
        assert_eq!(meta.kelly_bushing, Some(41.0));
        assert_eq!(meta.loc, Some(Location(1200.0, 3400.0)));
        assert_eq!(meta.trend("nct"), Some((7.9, -0.0002)));
        let (depth, coef) = meta.points("MDT").unwrap();
        assert_eq!(depth, &[1800.0, 2100.0]);
        assert_eq!(coef, &[1.05, 1.21]);
        assert_eq!(meta.depths("MP").unwrap(), &[900.0, 1200.0]);
        assert!(matches!(
            meta.parameters.get("comment"),
            Some(ParameterSet::Other(_))
        ));
    }

    #[test]
    fn missing_fields_are_listed_not_fatal() {
        let meta: WellMetadata = serde_json::from_str(r#"{"well_name": "W-2", "KB": 20.0}"#).unwrap();
        assert_eq!(meta.missing_fields(), vec!["hdf_file", "loc", "WD", "TD"]);
        assert!(!meta.is_complete());
    }

    #[test]
    fn points_without_coef_are_not_points() {
        let meta: WellMetadata =
            serde_json::from_str(r#"{"EMW": {"depth": [1000.0]}}"#).unwrap();
        assert!(meta.points("EMW").is_none());
    }

    #[test]
    fn yaml_round_trip() {
        let meta: WellMetadata = serde_json::from_str(DOC).unwrap();
        let path = std::env::temp_dir().join("gp_well_metadata_test.yaml");
        meta.save(&path).unwrap();
        let loaded = WellMetadata::load(&path).unwrap();
        assert_eq!(loaded.well_name(), "CUG-1");
        assert_eq!(loaded.points("MDT"), meta.points("MDT"));
        let _ = std::fs::remove_file(&path);
    }
}
