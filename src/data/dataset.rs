//! GOTM-ERSEM dataset wrapper.

use super::{cell_edges, variable};
use crate::error::{HovmollerError, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use ndarray::{Array2, ArrayD, Axis};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// CF-style time axis encoding, parsed from a `"<unit> since <datetime>"`
/// units attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeEncoding {
    /// Reference datetime the coordinate counts from.
    pub epoch: NaiveDateTime,
    /// Seconds per coordinate unit.
    pub seconds_per_unit: f64,
}

impl TimeEncoding {
    /// Parse a units attribute such as `"seconds since 2020-01-01 00:00:00"`.
    pub fn parse(units: &str) -> Option<Self> {
        let (unit, epoch_str) = units.split_once(" since ")?;
        let seconds_per_unit = match unit.trim().to_ascii_lowercase().as_str() {
            "seconds" | "second" | "s" => 1.0,
            "minutes" | "minute" | "min" => 60.0,
            "hours" | "hour" | "h" => 3600.0,
            "days" | "day" | "d" => 86400.0,
            _ => return None,
        };
        let epoch_str = epoch_str.trim();
        let epoch = NaiveDateTime::parse_from_str(epoch_str, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| {
                NaiveDate::parse_from_str(epoch_str, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN))
            })
            .ok()?;
        Some(Self {
            epoch,
            seconds_per_unit,
        })
    }

    /// Convert a raw time coordinate value to a datetime.
    pub fn decode(&self, value: f64) -> NaiveDateTime {
        self.epoch + Duration::milliseconds((value * self.seconds_per_unit * 1000.0) as i64)
    }

    /// Format a raw time coordinate value as a date label.
    pub fn format(&self, value: f64) -> String {
        self.decode(value).format("%Y-%m-%d").to_string()
    }
}

/// An opened GOTM-ERSEM output file with derived plot coordinates.
///
/// Opening the file immediately reads the time and depth coordinates and
/// derives the cell-edge arrays mesh plotting consumes. Extracted
/// (depth, time) sections are attached under their variable name; attaching
/// a name twice replaces the earlier array (last write wins).
pub struct GotmDataset {
    /// Path to the source file.
    pub path: PathBuf,
    file: netcdf::File,
    /// Time coordinate centers in raw file units.
    pub time: Vec<f64>,
    /// Depth coordinate centers at the first horizontal position and time step.
    pub depth: Vec<f64>,
    /// Time cell edges, one longer than the centers.
    pub time_edges: Vec<f64>,
    /// Depth cell edges, one longer than the centers.
    pub depth_edges: Vec<f64>,
    /// Decoded time units, when the attribute is parseable.
    pub time_encoding: Option<TimeEncoding>,
    sections: HashMap<String, Array2<f64>>,
}

impl fmt::Debug for GotmDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GotmDataset")
            .field("path", &self.path)
            .field("time", &self.time.len())
            .field("depth", &self.depth.len())
            .field("sections", &self.sections.keys())
            .finish()
    }
}

fn is_horizontal(dim: &str) -> bool {
    matches!(dim, "lat" | "lon" | "y" | "x")
}

impl GotmDataset {
    /// Open a GOTM-ERSEM output file and derive its plot coordinates.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HovmollerError::file_open(
                path.to_path_buf(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            ));
        }
        let file = netcdf::open(path)
            .map_err(|e| HovmollerError::NetCdf(format!("{}: {}", path.display(), e)))?;

        let (time, time_encoding) = read_time(&file)?;
        let depth = read_depth_profile(&file)?;

        let time_edges = cell_edges(&time)?;
        let depth_edges = cell_edges(&depth)?;
        tracing::debug!(
            time = time.len(),
            depth = depth.len(),
            "derived cell edges for {}",
            path.display()
        );

        Ok(Self {
            path: path.to_path_buf(),
            file,
            time,
            depth,
            time_edges,
            depth_edges,
            time_encoding,
            sections: HashMap::new(),
        })
    }

    pub(crate) fn file(&self) -> &netcdf::File {
        &self.file
    }

    /// Read a variable's full extent as `f64` together with its dimension names.
    pub fn read_variable(&self, name: &str) -> Result<(ArrayD<f64>, Vec<String>)> {
        let var = self
            .file
            .variable(name)
            .ok_or_else(|| HovmollerError::variable_not_found(name))?;
        let dims = var
            .dimensions()
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        Ok((variable::read_values(&var)?, dims))
    }

    /// Attach a (depth, time) section under a variable name, returning any
    /// array it displaces.
    pub fn attach_section(&mut self, name: &str, section: Array2<f64>) -> Option<Array2<f64>> {
        self.sections.insert(name.to_string(), section)
    }

    /// Look up an attached section by variable name.
    pub fn section(&self, name: &str) -> Option<&Array2<f64>> {
        self.sections.get(name)
    }
}

fn read_time(file: &netcdf::File) -> Result<(Vec<f64>, Option<TimeEncoding>)> {
    let var = file
        .variable("time")
        .ok_or_else(|| HovmollerError::variable_not_found("time"))?;
    let values = variable::read_values(&var)?;
    let encoding = variable::string_attr(&var, "units").and_then(|u| TimeEncoding::parse(&u));
    Ok((values.iter().copied().collect(), encoding))
}

/// Depth centers with the singleton horizontal axes removed.
///
/// GOTM writes `z` per time step; the first step's profile is used for the
/// edge derivation. A horizontal axis longer than one point is rejected:
/// this layer only plots single-column output.
fn read_depth_profile(file: &netcdf::File) -> Result<Vec<f64>> {
    let var = file
        .variable("z")
        .ok_or_else(|| HovmollerError::variable_not_found("z"))?;
    let dims: Vec<String> = var
        .dimensions()
        .iter()
        .map(|d| d.name().to_string())
        .collect();
    let mut values: ArrayD<f64> = variable::read_values(&var)?;

    // Drop horizontal axes from the back so earlier indices stay valid.
    for (i, dim) in dims.iter().enumerate().rev() {
        if is_horizontal(dim) {
            if values.shape()[i] != 1 {
                return Err(HovmollerError::dimension_mismatch(
                    "z",
                    &dims,
                    "a single lat/lon position",
                ));
            }
            values = values.index_axis_move(Axis(i), 0);
        }
    }

    let profile = match values.ndim() {
        1 => values,
        2 => values.index_axis_move(Axis(0), 0),
        _ => {
            return Err(HovmollerError::dimension_mismatch(
                "z",
                &dims,
                "(z) or (time, z) after removing lat/lon",
            ))
        }
    };
    Ok(profile.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_seconds_encoding() {
        let enc = TimeEncoding::parse("seconds since 2020-01-01 00:00:00").unwrap();
        assert_eq!(enc.seconds_per_unit, 1.0);
        assert_eq!(enc.format(86400.0), "2020-01-02");
    }

    #[test]
    fn parse_days_with_date_only_epoch() {
        let enc = TimeEncoding::parse("days since 2019-06-15").unwrap();
        assert_eq!(enc.seconds_per_unit, 86400.0);
        assert_eq!(enc.format(1.5), "2019-06-16");
    }

    #[test]
    fn unparseable_units_are_none() {
        assert!(TimeEncoding::parse("degrees_north").is_none());
        assert!(TimeEncoding::parse("fortnights since 2020-01-01").is_none());
    }
}
