//! ERSEM attribute normalization for display.
//!
//! Raw GOTM-ERSEM metadata is written for machines: units like `mmol N/m^3`
//! and long names like `sea water potential temperature`. This module
//! rewrites them into presentation-ready labels and computes a rounded
//! display range per variable.

use super::dataset::GotmDataset;
use super::variable;
use crate::error::{HovmollerError, Result};
use std::collections::BTreeMap;

/// Unit substring rewrites, applied in this order against the raw string.
pub const UNIT_REWRITES: [(&str, &str); 4] = [
    ("m^3", "m$^3$"),
    ("m-3", "m$^{-3}$"),
    ("1/m", "m$^{-1}$"),
    ("m-1", "m$^{-1}$"),
];

const LONG_NAME_REWRITES: [(&str, &str); 1] = [("potential temperature", "Temperature")];

/// Display-ready metadata for one plottable variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableAttrs {
    /// Units with exponent notation rewritten for display.
    pub units: Option<String>,
    /// Long name with known phrases rewritten.
    pub long_name: Option<String>,
    /// `(floor(min), ceil(max))` over the variable's finite values.
    pub range: (f64, f64),
}

impl VariableAttrs {
    /// A colorbar label built from the long name and units.
    pub fn value_label(&self) -> Option<String> {
        match (&self.long_name, &self.units) {
            (Some(name), Some(units)) => Some(format!("{} ({})", name, units)),
            (Some(name), None) => Some(name.clone()),
            (None, Some(units)) => Some(units.clone()),
            (None, None) => None,
        }
    }
}

/// Whether a dimension tuple is plottable as a depth-time section.
pub(crate) fn is_section_dims(dims: &[String]) -> bool {
    dims == ["time", "z", "lat", "lon"] || dims == ["time", "z", "y", "x"]
}

pub(crate) fn rewrite_units(units: &str) -> String {
    UNIT_REWRITES
        .iter()
        .fold(units.to_string(), |s, (from, to)| s.replace(from, to))
}

pub(crate) fn rewrite_long_name(long_name: &str) -> String {
    LONG_NAME_REWRITES
        .iter()
        .fold(long_name.to_string(), |s, (from, to)| s.replace(from, to))
}

/// `(floor(min), ceil(max))` over the finite values, or `None` when there
/// are none.
pub(crate) fn rounded_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut seen = false;
    for v in values {
        if v.is_finite() {
            seen = true;
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
        }
    }
    seen.then(|| (min.floor(), max.ceil()))
}

impl GotmDataset {
    /// Display metadata for every `(time, z, lat, lon)` data variable.
    ///
    /// Variables with any other dimension tuple are skipped, not an error,
    /// as are coordinate variables (a variable named after one of its own
    /// dimensions, like the 4D `z` GOTM writes). A matching variable with
    /// no finite values is rejected: a NaN display range must never reach
    /// a plot.
    pub fn normalized_attrs(&self) -> Result<BTreeMap<String, VariableAttrs>> {
        let mut attrs = BTreeMap::new();
        for var in self.file().variables() {
            let dims: Vec<String> = var
                .dimensions()
                .iter()
                .map(|d| d.name().to_string())
                .collect();
            if !is_section_dims(&dims) {
                continue;
            }
            let name = var.name().to_string();
            if dims.contains(&name) {
                continue;
            }
            let units = variable::string_attr(&var, "units").map(|u| rewrite_units(&u));
            let long_name =
                variable::string_attr(&var, "long_name").map(|l| rewrite_long_name(&l));
            let values = variable::read_values(&var)?;
            let range = rounded_range(values.iter().copied())
                .ok_or_else(|| HovmollerError::empty_data(&name))?;
            attrs.insert(
                name,
                VariableAttrs {
                    units,
                    long_name,
                    range,
                },
            );
        }
        Ok(attrs)
    }
}
