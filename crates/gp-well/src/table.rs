//! Log table: named columns over one canonical depth axis.
//!
//! Columns are addressed as `Name(unit)`. The depth axis is the `Depth(m)`
//! column of the stored form and is kept separately here.

use crate::{WellError, WellResult};
use std::collections::BTreeMap;

/// Canonical depth column name.
pub const DEPTH_COLUMN: &str = "Depth(m)";

/// Build a column name from a log name and unit.
pub fn format_column_name(name: &str, unit: &str) -> String {
    if unit.is_empty() {
        name.to_string()
    } else {
        format!("{name}({unit})")
    }
}

/// Split a column name into log name and unit. A name without `(` has no unit.
pub fn parse_column_name(column: &str) -> (String, String) {
    let trimmed = column.trim_end_matches(')');
    match trimmed.split_once('(') {
        Some((name, unit)) => (name.to_string(), unit.to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub unit: String,
    pub data: Vec<f64>,
}

impl Column {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            data,
        }
    }

    /// Column from a `Name(unit)` key.
    pub fn from_key(key: &str, data: Vec<f64>) -> Self {
        let (name, unit) = parse_column_name(key);
        Self { name, unit, data }
    }

    pub fn key(&self) -> String {
        format_column_name(&self.name, &self.unit)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogTable {
    depth: Vec<f64>,
    columns: Vec<Column>,
}

fn check_increasing(name: &str, depth: &[f64]) -> WellResult<()> {
    let ok = depth.iter().all(|d| !d.is_nan()) && depth.windows(2).all(|w| w[0] < w[1]);
    if ok {
        Ok(())
    } else {
        Err(WellError::NonMonotonicDepth {
            name: name.to_string(),
        })
    }
}

impl LogTable {
    /// Empty table over a strictly increasing depth axis.
    pub fn new(depth: Vec<f64>) -> WellResult<Self> {
        check_increasing("Depth", &depth)?;
        Ok(Self {
            depth,
            columns: Vec::new(),
        })
    }

    /// Builder form of [`LogTable::insert_column`].
    pub fn with_column(mut self, column: Column) -> WellResult<Self> {
        self.insert_column(column)?;
        Ok(self)
    }

    /// Add a column sampled on the existing depth axis.
    pub fn insert_column(&mut self, column: Column) -> WellResult<()> {
        if column.data.len() != self.depth.len() {
            return Err(WellError::LogShape {
                name: column.name,
                depth: self.depth.len(),
                data: column.data.len(),
            });
        }
        if self.column(&column.name).is_some() {
            return Err(WellError::DuplicateLog { name: column.name });
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn depth(&self) -> &[f64] {
        &self.depth
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Log names in column order.
    pub fn log_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Log name to unit.
    pub fn unit_map(&self) -> BTreeMap<String, String> {
        self.columns
            .iter()
            .map(|c| (c.name.clone(), c.unit.clone()))
            .collect()
    }

    pub fn remove_column(&mut self, name: &str) -> Option<Column> {
        let idx = self.columns.iter().position(|c| c.name == name)?;
        Some(self.columns.remove(idx))
    }

    /// Outer join of a new column on depth.
    ///
    /// The resulting depth axis is the sorted union of both axes. Depths are
    /// matched by exact value. Rows missing from either side get `NaN`.
    pub fn merge_outer(&mut self, depth: &[f64], column: Column) -> WellResult<()> {
        if depth.len() != column.data.len() {
            return Err(WellError::LogShape {
                name: column.name,
                depth: depth.len(),
                data: column.data.len(),
            });
        }
        check_increasing(&column.name, depth)?;
        if self.column(&column.name).is_some() {
            return Err(WellError::DuplicateLog { name: column.name });
        }

        let left = &self.depth;
        let mut merged = Vec::with_capacity(left.len().max(depth.len()));
        let mut left_rows = Vec::with_capacity(merged.capacity());
        let mut right_rows = Vec::with_capacity(merged.capacity());

        let (mut i, mut j) = (0, 0);
        loop {
            match (left.get(i), depth.get(j)) {
                (Some(&x), Some(&y)) if x == y => {
                    merged.push(x);
                    left_rows.push(Some(i));
                    right_rows.push(Some(j));
                    i += 1;
                    j += 1;
                }
                (Some(&x), Some(&y)) if x < y => {
                    merged.push(x);
                    left_rows.push(Some(i));
                    right_rows.push(None);
                    i += 1;
                }
                (_, Some(&y)) => {
                    merged.push(y);
                    left_rows.push(None);
                    right_rows.push(Some(j));
                    j += 1;
                }
                (Some(&x), None) => {
                    merged.push(x);
                    left_rows.push(Some(i));
                    right_rows.push(None);
                    i += 1;
                }
                (None, None) => break,
            }
        }

        let pick = |rows: &[Option<usize>], data: &[f64]| -> Vec<f64> {
            rows.iter()
                .map(|r| r.map_or(f64::NAN, |k| data[k]))
                .collect()
        };

        for existing in &mut self.columns {
            existing.data = pick(&left_rows, &existing.data);
        }
        let data = pick(&right_rows, &column.data);
        self.columns.push(Column { data, ..column });
        self.depth = merged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LogTable {
        LogTable::new(vec![10.0, 20.0, 30.0])
            .unwrap()
            .with_column(Column::new("Velocity", "m/s", vec![2000.0, 2100.0, 2200.0]))
            .unwrap()
    }

    #[test]
    fn parse_and_format_column_names() {
        assert_eq!(
            parse_column_name("Overburden_Pressure(MPa)"),
            ("Overburden_Pressure".to_string(), "MPa".to_string())
        );
        assert_eq!(
            parse_column_name("Gamma"),
            ("Gamma".to_string(), String::new())
        );
        assert_eq!(parse_column_name("Depth(m)").0, "Depth");
        assert_eq!(format_column_name("Velocity", "m/s"), "Velocity(m/s)");
        assert_eq!(format_column_name("Gamma", ""), "Gamma");
    }

    #[test]
    fn outer_join_fills_missing_rows_with_nan() {
        let mut t = table();
        t.merge_outer(&[10.0, 20.0], Column::new("Density", "g/cc", vec![2.1, 2.2]))
            .unwrap();

        assert_eq!(t.depth(), &[10.0, 20.0, 30.0]);
        let rho = &t.column("Density").unwrap().data;
        assert_eq!(&rho[..2], &[2.1, 2.2]);
        assert!(rho[2].is_nan());
    }

    #[test]
    fn outer_join_extends_depth_axis() {
        let mut t = table();
        t.merge_outer(&[15.0, 30.0, 40.0], Column::new("Gamma", "API", vec![1.0, 2.0, 3.0]))
            .unwrap();

        assert_eq!(t.depth(), &[10.0, 15.0, 20.0, 30.0, 40.0]);
        let vel = &t.column("Velocity").unwrap().data;
        assert_eq!(vel[0], 2000.0);
        assert!(vel[1].is_nan());
        assert_eq!(vel[3], 2200.0);
        assert!(vel[4].is_nan());
        let gr = &t.column("Gamma").unwrap().data;
        assert!(gr[0].is_nan());
        assert_eq!(gr[1], 1.0);
        assert_eq!(gr[4], 3.0);
    }

    #[test]
    fn join_requires_exact_depth_match() {
        let mut t = table();
        t.merge_outer(&[20.000_1], Column::new("Gamma", "API", vec![1.0]))
            .unwrap();
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn duplicate_and_unsorted_logs_are_rejected() {
        let mut t = table();
        let dup = t.merge_outer(&[10.0], Column::new("Velocity", "m/s", vec![1.0]));
        assert!(matches!(dup, Err(WellError::DuplicateLog { .. })));
        let unsorted = t.merge_outer(&[20.0, 10.0], Column::new("Gamma", "API", vec![1.0, 2.0]));
        assert!(matches!(unsorted, Err(WellError::NonMonotonicDepth { .. })));
        // failed merges leave the table untouched
        assert_eq!(t, table());
    }

    #[test]
    fn remove_column_by_name() {
        let mut t = table();
        assert!(t.remove_column("Velocity").is_some());
        assert!(t.remove_column("Velocity").is_none());
        assert!(t.log_names().is_empty());
    }
}
