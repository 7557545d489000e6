//! Well aggregate: metadata, log table, and derived pressure references.

use crate::log::{Log, PropertyType};
use crate::metadata::{Location, WellMetadata};
use crate::points::lookup_pressure_points;
use crate::storage::{JsonFileStore, WellStorage};
use crate::table::{Column, LogTable};
use crate::{WellError, WellResult};
use gp_core::numeric::insertion_index;
use gp_pressure::{BowersCoefficients, HydrostaticModel, bowers, compute_eaton_pressure, normal};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::warn;

/// Log every derived reference is computed against.
pub const OVERBURDEN_LOG: &str = "Overburden_Pressure";

/// Depth sampling interval assumed when shifting logs to sea level (m).
pub const SAMPLE_INTERVAL_M: f64 = 0.1;

/// Parameter set holding the normal compaction trend.
const NCT_KEY: &str = "nct";

/// Datum that log depths are expressed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthReference {
    /// Measured depth from the kelly bushing, as stored.
    #[default]
    KellyBushing,
    /// Shifted up by the kelly bushing height.
    Sea,
}

/// A well and its log table.
///
/// A well without a table is *unloaded*: only metadata is available and
/// every log operation fails with [`WellError::NotLoaded`]. Loading happens
/// once, when the table is read from storage.
#[derive(Debug, Clone)]
pub struct Well {
    metadata: WellMetadata,
    hydrostatic_model: HydrostaticModel,
    table: Option<LogTable>,
}

impl fmt::Display for Well {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Well {}", self.name())
    }
}

impl Well {
    /// Unloaded well. Missing required metadata fields are reported and left empty.
    pub fn new(metadata: WellMetadata) -> Self {
        for field in metadata.missing_fields() {
            warn!(well = metadata.well_name(), field, "missing required metadata field");
        }
        Self {
            metadata,
            hydrostatic_model: HydrostaticModel::default(),
            table: None,
        }
    }

    /// Loaded well over an existing table.
    pub fn from_parts(metadata: WellMetadata, table: LogTable) -> Self {
        let mut well = Self::new(metadata);
        well.table = Some(table);
        well
    }

    /// Read the well's table from storage. A failed read is reported and
    /// the well stays unloaded.
    pub fn open(metadata: WellMetadata, storage: &dyn WellStorage) -> Self {
        let mut well = Self::new(metadata);
        match storage.read(&well.storage_key()) {
            Ok(table) => well.table = Some(table),
            Err(e) => warn!(well = well.name(), error = %e, "could not read well table"),
        }
        well
    }

    /// Load metadata from a file and open the JSON store it references.
    pub fn load(path: &Path) -> WellResult<Self> {
        let metadata = WellMetadata::load(path)?;
        let base = path.parent().unwrap_or(Path::new("."));
        match metadata.store_path(base) {
            Some(store) => Ok(Self::open(metadata, &JsonFileStore::new(store))),
            None => Ok(Self::new(metadata)),
        }
    }

    pub fn with_hydrostatic_model(mut self, model: HydrostaticModel) -> Self {
        self.hydrostatic_model = model;
        self
    }

    pub fn name(&self) -> &str {
        self.metadata.well_name()
    }

    pub fn metadata(&self) -> &WellMetadata {
        &self.metadata
    }

    pub fn storage_key(&self) -> String {
        self.metadata.storage_key()
    }

    pub fn location(&self) -> Option<Location> {
        self.metadata.loc
    }

    pub fn kelly_bushing(&self) -> f64 {
        self.metadata.kelly_bushing.unwrap_or_default()
    }

    pub fn water_depth(&self) -> f64 {
        self.metadata.water_depth.unwrap_or_default()
    }

    pub fn total_depth(&self) -> f64 {
        self.metadata.total_depth.unwrap_or_default()
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    pub fn table(&self) -> Option<&LogTable> {
        self.table.as_ref()
    }

    fn loaded_table(&self) -> WellResult<&LogTable> {
        self.table.as_ref().ok_or_else(|| WellError::NotLoaded {
            well: self.name().to_string(),
        })
    }

    fn loaded_table_mut(&mut self) -> WellResult<&mut LogTable> {
        let well = self.metadata.well_name().to_string();
        self.table.as_mut().ok_or(WellError::NotLoaded { well })
    }

    fn missing_parameter(&self, key: &str) -> WellError {
        warn!(well = self.name(), key, "cannot find parameter set");
        WellError::MissingParameterSet {
            well: self.name().to_string(),
            key: key.to_string(),
        }
    }

    /// Names of the logs in the table, without the depth axis.
    pub fn logs(&self) -> Vec<String> {
        self.table
            .as_ref()
            .map(LogTable::log_names)
            .unwrap_or_default()
    }

    /// Log name to unit. A column without a unit maps to an empty string.
    pub fn unit_map(&self) -> BTreeMap<String, String> {
        self.table
            .as_ref()
            .map(LogTable::unit_map)
            .unwrap_or_default()
    }

    /// Number of samples the kelly bushing spans at the fixed sampling interval.
    ///
    /// The small offset rounds away the representation error of `0.1`, so a
    /// 41 m kelly bushing spans 410 samples where plain floor division gives 409.
    /// Non-finite or huge values saturate; `shift_up` turns those into an all-`NaN` log.
    fn sea_shift(&self) -> usize {
        ((self.kelly_bushing() / SAMPLE_INTERVAL_M) + 1e-9).floor().max(0.0) as usize
    }

    fn log_id(&self, name: &str) -> String {
        let prefix: String = name.to_lowercase().chars().take(3).collect();
        format!("{prefix}_{}", self.storage_key())
    }

    fn build_log(&self, name: &str, reference: DepthReference) -> WellResult<Log> {
        let table = self.loaded_table()?;
        let Some(column) = table.column(name) else {
            warn!(well = self.name(), log = name, "no log found");
            return Err(WellError::LogNotFound {
                name: name.to_string(),
            });
        };

        let data = match reference {
            DepthReference::KellyBushing => column.data.clone(),
            DepthReference::Sea => shift_up(&column.data, self.sea_shift()),
        };

        Ok(Log::new(self.log_id(name), table.depth().to_vec(), data)?
            .with_units(column.unit.as_str())
            .with_description(name)
            .with_property_type(PropertyType::from_unit(&column.unit)))
    }

    /// One log from the table, depth taken from the canonical depth axis.
    pub fn get_single_log(&self, name: &str, reference: DepthReference) -> WellResult<Log> {
        self.build_log(name, reference)
    }

    /// Several logs, in the requested order. Fails on the first missing name.
    pub fn get_logs(&self, names: &[&str], reference: DepthReference) -> WellResult<Vec<Log>> {
        names
            .iter()
            .map(|name| self.build_log(name, reference))
            .collect()
    }

    /// Merge logs into the table with an outer join on depth.
    ///
    /// Logs are merged in order; a failure leaves the earlier ones merged.
    pub fn add_log(&mut self, logs: &[Log]) -> WellResult<()> {
        let table = self.loaded_table_mut()?;
        for log in logs {
            let column = Column::from_key(&log.column_name(), log.data().to_vec());
            table.merge_outer(log.depth(), column)?;
        }
        Ok(())
    }

    pub fn drop_log(&mut self, name: &str) -> WellResult<()> {
        let well = self.name().to_string();
        let table = self.loaded_table_mut()?;
        if table.remove_column(name).is_none() {
            warn!(well = %well, log = name, "no log named {name}");
            return Err(WellError::LogNotFound {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Persist the table under the well's storage key.
    pub fn save(&self, storage: &mut dyn WellStorage) -> WellResult<()> {
        let table = self.loaded_table()?;
        storage.write(&self.storage_key(), table)?;
        Ok(())
    }

    fn overburden(&self) -> WellResult<Log> {
        self.get_single_log(OVERBURDEN_LOG, DepthReference::KellyBushing)
    }

    fn hydrostatic_for(&self, obp: &Log) -> Vec<f64> {
        self.hydrostatic_model
            .pressure(obp.depth(), self.kelly_bushing(), self.water_depth())
    }

    fn normal_velocity_for(&self, obp: &Log) -> WellResult<Vec<f64>> {
        let (a, b) = self
            .metadata
            .trend(NCT_KEY)
            .ok_or_else(|| self.missing_parameter(NCT_KEY))?;
        Ok(normal(obp.depth(), a, b))
    }

    /// Hydrostatic pressure (MPa) on the overburden depth axis.
    pub fn hydrostatic(&self) -> WellResult<Vec<f64>> {
        let obp = self.overburden()?;
        Ok(self.hydrostatic_for(&obp))
    }

    /// Overburden pressure values.
    pub fn lithostatic(&self) -> WellResult<Vec<f64>> {
        Ok(self.overburden()?.data().to_vec())
    }

    /// Normal compaction trend velocity on the overburden depth axis.
    pub fn normal_velocity(&self) -> WellResult<Vec<f64>> {
        let obp = self.overburden()?;
        self.normal_velocity_for(&obp)
    }

    /// Index of `depth` on the overburden depth axis (leftmost insertion point).
    pub fn depth_index(&self, depth: f64) -> WellResult<usize> {
        Ok(insertion_index(self.overburden()?.depth(), depth))
    }

    /// Pressure measurements of parameter set `key`, as coefficients of hydrostatic pressure.
    ///
    /// Measurements at or above `hydrodynamic_depth` are left out. A missing
    /// parameter set is reported and yields an empty log.
    pub fn pressure_points(
        &self,
        key: &str,
        reference: DepthReference,
        hydrodynamic_depth: f64,
    ) -> WellResult<Log> {
        let obp = self.overburden()?;
        let Some((depth, coef)) = self.metadata.points(key) else {
            warn!(well = self.name(), key, "cannot find parameter set");
            return Ok(Log::empty());
        };
        if depth.len() != coef.len() {
            warn!(
                well = self.name(),
                key,
                depths = depth.len(),
                coefs = coef.len(),
                "parameter set lengths differ, extra entries ignored"
            );
        }

        let hydro = self.hydrostatic_for(&obp);
        let (mut out_depth, pressure) =
            lookup_pressure_points(obp.depth(), &hydro, depth, coef, hydrodynamic_depth);
        if reference == DepthReference::Sea {
            let kb = self.kelly_bushing();
            out_depth.iter_mut().for_each(|d| *d -= kb);
        }

        Ok(Log::new(
            format!("{}_{}", key.to_lowercase(), self.storage_key()),
            out_depth,
            pressure,
        )?
        .with_description(key)
        .with_units(obp.units())
        .with_property_type(PropertyType::Pressure))
    }

    /// Measured pressure points.
    pub fn measured_pressure(&self, reference: DepthReference) -> WellResult<Log> {
        self.pressure_points("Measured_Pressure", reference, 0.0)
    }

    /// Equivalent mud weight.
    pub fn emw(&self, reference: DepthReference) -> WellResult<Log> {
        self.pressure_points("EMW", reference, 0.0)
    }

    /// Drillstem test pressures.
    pub fn dst(&self, reference: DepthReference) -> WellResult<Log> {
        self.pressure_points("DST", reference, 0.0)
    }

    /// Wireline formation test pressures (MDT and/or RFT), excluding the
    /// hydrodynamic interval above `hydrodynamic_depth`.
    pub fn wireline_test(
        &self,
        hydrodynamic_depth: f64,
        reference: DepthReference,
    ) -> WellResult<Log> {
        self.pressure_points("MDT", reference, hydrodynamic_depth)
    }

    /// Pressure measurements on the loading curve.
    pub fn loading_pressure(&self, reference: DepthReference) -> WellResult<Log> {
        self.pressure_points("loading", reference, 0.0)
    }

    /// Pressure measurements on the unloading curve.
    pub fn unloading_pressure(&self, reference: DepthReference) -> WellResult<Log> {
        self.pressure_points("unloading", reference, 0.0)
    }

    /// Raw pressure coefficients of the measured pressure set.
    pub fn pressure_coefficients(&self) -> WellResult<Log> {
        let (depth, coef) = self
            .metadata
            .points("Measured_Pressure")
            .ok_or_else(|| self.missing_parameter("Measured_Pressure"))?;
        let n = depth.len().min(coef.len());
        Ok(Log::new("Measured_Pressure", depth[..n].to_vec(), coef[..n].to_vec())?
            .with_description("Pressure coefficient"))
    }

    /// Hydrostatic pressure at the depths of the normally pressured zone (`MP`).
    pub fn normal_pressure(&self) -> WellResult<Log> {
        let obp = self.overburden()?;
        let depths = self
            .metadata
            .depths("MP")
            .ok_or_else(|| self.missing_parameter("MP"))?;
        let hydro = self.hydrostatic_for(&obp);

        let mut out_depth = Vec::with_capacity(depths.len());
        let mut out_pressure = Vec::with_capacity(depths.len());
        for &dp in depths {
            if let Some(&p) = hydro.get(insertion_index(obp.depth(), dp)) {
                out_depth.push(dp);
                out_pressure.push(p);
            }
        }

        Ok(Log::new(format!("mp_{}", self.storage_key()), out_depth, out_pressure)?
            .with_description("Normal_Pressure")
            .with_units(obp.units())
            .with_property_type(PropertyType::Pressure))
    }

    /// Pore pressure with the Eaton method.
    ///
    /// `velocity` must be sampled on the overburden depth axis.
    pub fn eaton(&self, velocity: &[f64], n: f64) -> WellResult<Log> {
        let obp = self.overburden()?;
        let hydro = self.hydrostatic_for(&obp);
        let vn = self.normal_velocity_for(&obp)?;
        let data = compute_eaton_pressure(velocity, &vn, &hydro, obp.data(), n)?;

        Ok(Log::new(
            format!("pressure_eaton_{}", self.storage_key()),
            obp.depth().to_vec(),
            data,
        )?
        .with_description("Pressure_Eaton")
        .with_units(obp.units())
        .with_property_type(PropertyType::Pressure))
    }

    /// Pore pressure with the Bowers method, using the overburden log as `obp`.
    ///
    /// `velocity` must be sampled on the overburden depth axis.
    pub fn bowers(
        &self,
        velocity: &[f64],
        transition_index: usize,
        coef: &BowersCoefficients,
    ) -> WellResult<Log> {
        let obp = self.overburden()?;
        let data = bowers(velocity, obp.data(), transition_index, coef)?;

        Ok(Log::new(
            format!("pressure_bowers_{}", self.storage_key()),
            obp.depth().to_vec(),
            data,
        )?
        .with_description("Pressure_Bowers")
        .with_units(obp.units())
        .with_property_type(PropertyType::Pressure))
    }
}

/// Move samples `shift` positions toward the start; the vacated tail is `NaN`.
fn shift_up(data: &[f64], shift: usize) -> Vec<f64> {
    (0..data.len())
        .map(|i| {
            i.checked_add(shift)
                .and_then(|k| data.get(k))
                .copied()
                .unwrap_or(f64::NAN)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ParameterSet;
    use crate::storage::MemoryStorage;

    fn metadata() -> WellMetadata {
        let mut meta = WellMetadata {
            store: Some("wells.json".into()),
            well_name: Some("W-1".to_string()),
            loc: Some(Location(0.0, 0.0)),
            kelly_bushing: Some(0.2),
            water_depth: Some(0.0),
            total_depth: Some(0.5),
            ..WellMetadata::default()
        };
        meta.parameters.insert(
            "nct".to_string(),
            ParameterSet::Trend { a: 8.0, b: 0.0 },
        );
        meta
    }

    fn table() -> LogTable {
        LogTable::new(vec![0.0, 0.1, 0.2, 0.3, 0.4])
            .unwrap()
            .with_column(Column::new(
                OVERBURDEN_LOG,
                "MPa",
                vec![1.0, 2.0, 3.0, 4.0, 5.0],
            ))
            .unwrap()
    }

    #[test]
    fn sea_reference_shifts_by_kelly_bushing_samples() {
        let well = Well::from_parts(metadata(), table());
        let log = well.get_single_log(OVERBURDEN_LOG, DepthReference::Sea).unwrap();
        assert_eq!(&log.data()[..3], &[3.0, 4.0, 5.0]);
        assert!(log.data()[3].is_nan());
        assert!(log.data()[4].is_nan());
        assert_eq!(log.depth(), &[0.0, 0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn retrieved_log_is_named_after_well() {
        let well = Well::from_parts(metadata(), table());
        let log = well
            .get_single_log(OVERBURDEN_LOG, DepthReference::KellyBushing)
            .unwrap();
        assert_eq!(log.name(), "ove_w_1");
        assert_eq!(log.description(), OVERBURDEN_LOG);
        assert_eq!(log.units(), "MPa");
        assert_eq!(log.property_type(), PropertyType::Pressure);
    }

    #[test]
    fn unloaded_well_reports_not_loaded() {
        let well = Well::new(metadata());
        assert!(!well.is_loaded());
        assert!(well.logs().is_empty());
        assert!(matches!(
            well.hydrostatic(),
            Err(WellError::NotLoaded { .. })
        ));
    }

    #[test]
    fn open_from_missing_store_entry_stays_unloaded() {
        let storage = MemoryStorage::new();
        let well = Well::open(metadata(), &storage);
        assert!(!well.is_loaded());
    }

    #[test]
    fn shift_up_handles_zero_and_oversized_shifts() {
        assert_eq!(shift_up(&[1.0, 2.0], 0), vec![1.0, 2.0]);
        assert!(shift_up(&[1.0, 2.0], 5).iter().all(|v| v.is_nan()));
        assert!(shift_up(&[1.0, 2.0, 3.0], usize::MAX).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn sea_shift_counts_whole_samples() {
        let mut meta = metadata();
        meta.kelly_bushing = Some(41.0);
        assert_eq!(Well::new(meta.clone()).sea_shift(), 410);
        meta.kelly_bushing = Some(25.0);
        assert_eq!(Well::new(meta).sea_shift(), 250);
    }

    #[test]
    fn huge_kelly_bushing_gives_empty_sea_log() {
        for kb in [1.0e25, f64::INFINITY] {
            let mut meta = metadata();
            meta.kelly_bushing = Some(kb);
            let well = Well::from_parts(meta, table());
            let log = well.get_single_log(OVERBURDEN_LOG, DepthReference::Sea).unwrap();
            assert_eq!(log.len(), 5);
            assert!(log.data().iter().all(|v| v.is_nan()));
        }
    }
}
