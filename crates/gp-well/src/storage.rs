//! Well storage API.
//!
//! A store holds one log table per well, keyed by well name. The JSON file
//! store keeps every table of a store in one document; each call opens the
//! file, operates, and releases it.

use crate::table::{Column, DEPTH_COLUMN, LogTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No well named {name}")]
    WellNotFound { name: String },

    #[error("Stored table for {name} is invalid: {what}")]
    InvalidTable { name: String, what: String },
}

/// Persistence boundary for well log tables.
pub trait WellStorage {
    fn list_wells(&self) -> StorageResult<Vec<String>>;

    /// Fails with [`StorageError::WellNotFound`] when the well is absent.
    fn read(&self, well_name: &str) -> StorageResult<LogTable>;

    /// Create or replace the table of a well.
    fn write(&mut self, well_name: &str, table: &LogTable) -> StorageResult<()>;

    /// Fails with [`StorageError::WellNotFound`] when the well is absent.
    fn remove(&mut self, well_name: &str) -> StorageResult<()>;
}

/// Map-backed store, mostly for tests and scratch sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    tables: BTreeMap<String, LogTable>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WellStorage for MemoryStorage {
    fn list_wells(&self) -> StorageResult<Vec<String>> {
        Ok(self.tables.keys().cloned().collect())
    }

    fn read(&self, well_name: &str) -> StorageResult<LogTable> {
        self.tables
            .get(well_name)
            .cloned()
            .ok_or_else(|| StorageError::WellNotFound {
                name: well_name.to_string(),
            })
    }

    fn write(&mut self, well_name: &str, table: &LogTable) -> StorageResult<()> {
        self.tables.insert(well_name.to_string(), table.clone());
        Ok(())
    }

    fn remove(&mut self, well_name: &str) -> StorageResult<()> {
        self.tables
            .remove(well_name)
            .map(|_| ())
            .ok_or_else(|| StorageError::WellNotFound {
                name: well_name.to_string(),
            })
    }
}

/// Serialized form of a log table. `NaN` is written as `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredTable {
    pub columns: Vec<StoredColumn>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

fn to_stored_values(data: &[f64]) -> Vec<Option<f64>> {
    data.iter()
        .map(|&v| if v.is_nan() { None } else { Some(v) })
        .collect()
}

impl StoredTable {
    pub fn from_table(table: &LogTable) -> Self {
        let mut columns = Vec::with_capacity(table.columns().len() + 1);
        columns.push(StoredColumn {
            name: DEPTH_COLUMN.to_string(),
            values: to_stored_values(table.depth()),
        });
        for column in table.columns() {
            columns.push(StoredColumn {
                name: column.key(),
                values: to_stored_values(&column.data),
            });
        }
        Self { columns }
    }

    /// Rebuild a table. The `Depth(m)` column must exist and be complete.
    pub fn into_table(self, well_name: &str) -> StorageResult<LogTable> {
        let invalid = |what: String| StorageError::InvalidTable {
            name: well_name.to_string(),
            what,
        };

        let mut columns = self.columns;
        let depth_pos = columns
            .iter()
            .position(|c| c.name == DEPTH_COLUMN)
            .ok_or_else(|| invalid(format!("missing {DEPTH_COLUMN} column")))?;
        let depth_column = columns.remove(depth_pos);
        let depth: Vec<f64> = depth_column
            .values
            .into_iter()
            .map(|v| v.ok_or_else(|| invalid("missing depth value".to_string())))
            .collect::<StorageResult<_>>()?;

        let mut table = LogTable::new(depth).map_err(|e| invalid(e.to_string()))?;
        for stored in columns {
            let data = stored.values.iter().map(|v| v.unwrap_or(f64::NAN)).collect();
            table
                .insert_column(Column::from_key(&stored.name, data))
                .map_err(|e| invalid(e.to_string()))?;
        }
        Ok(table)
    }
}

/// Store backed by a single JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_all(&self) -> StorageResult<BTreeMap<String, StoredTable>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save_all(&self, wells: &BTreeMap<String, StoredTable>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string(wells)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl WellStorage for JsonFileStore {
    fn list_wells(&self) -> StorageResult<Vec<String>> {
        Ok(self.load_all()?.into_keys().collect())
    }

    fn read(&self, well_name: &str) -> StorageResult<LogTable> {
        tracing::debug!(store = %self.path.display(), well = well_name, "reading well table");
        let stored = self
            .load_all()?
            .remove(well_name)
            .ok_or_else(|| StorageError::WellNotFound {
                name: well_name.to_string(),
            })?;
        stored.into_table(well_name)
    }

    fn write(&mut self, well_name: &str, table: &LogTable) -> StorageResult<()> {
        tracing::debug!(store = %self.path.display(), well = well_name, "writing well table");
        let mut wells = self.load_all()?;
        wells.insert(well_name.to_string(), StoredTable::from_table(table));
        self.save_all(&wells)
    }

    fn remove(&mut self, well_name: &str) -> StorageResult<()> {
        let mut wells = self.load_all()?;
        if wells.remove(well_name).is_none() {
            return Err(StorageError::WellNotFound {
                name: well_name.to_string(),
            });
        }
        self.save_all(&wells)
    }
}
