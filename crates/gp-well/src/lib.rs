//! gp-well: well log data model for geopressure.
//!
//! A [`Well`] owns a [`LogTable`] (named columns over one canonical depth
//! axis), its metadata, and per-well model parameters. It derives the
//! hydrostatic, lithostatic and normal velocity references from the
//! `Overburden_Pressure` log and feeds them to the transforms in
//! `gp-pressure`. Tables are persisted through the [`WellStorage`] trait.

pub mod log;
pub mod metadata;
pub mod points;
pub mod storage;
pub mod table;
pub mod well;

pub use log::{Log, PropertyType};
pub use metadata::{Location, MetadataError, MetadataResult, ParameterSet, WellMetadata};
pub use points::lookup_pressure_points;
pub use storage::{JsonFileStore, MemoryStorage, StorageError, StorageResult, WellStorage};
pub use table::{Column, DEPTH_COLUMN, LogTable, format_column_name, parse_column_name};
pub use well::{DepthReference, OVERBURDEN_LOG, SAMPLE_INTERVAL_M, Well};

use gp_pressure::PressureError;

pub type WellResult<T> = Result<T, WellError>;

#[derive(thiserror::Error, Debug)]
pub enum WellError {
    #[error("Well '{well}' has no log table loaded")]
    NotLoaded { well: String },

    #[error("No log named '{name}'")]
    LogNotFound { name: String },

    #[error("Log '{name}' already exists")]
    DuplicateLog { name: String },

    #[error("Log '{name}' has {depth} depth samples but {data} data samples")]
    LogShape {
        name: String,
        depth: usize,
        data: usize,
    },

    #[error("Depth axis of '{name}' is not strictly increasing")]
    NonMonotonicDepth { name: String },

    #[error("{well}: cannot find parameter set '{key}'")]
    MissingParameterSet { well: String, key: String },

    #[error("Well '{well}' has no store reference")]
    NoStore { well: String },

    #[error("Pressure transform error: {0}")]
    Pressure(#[from] PressureError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),
}
