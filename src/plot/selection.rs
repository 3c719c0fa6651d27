//! Variable selection and section extraction.

use crate::data::{is_section_dims, rounded_range, GotmDataset};
use crate::error::{HovmollerError, Result};
use ndarray::{Array2, Axis, Ix4};

/// Optional display hints for a section plot. Unset fields fall back to
/// values derived from the data.
#[derive(Debug, Clone, Default)]
pub struct SelectionHints {
    /// X (time) axis range in raw time coordinates.
    pub xrange: Option<(f64, f64)>,
    /// Y (depth) axis range.
    pub yrange: Option<(f64, f64)>,
    /// Color scale range.
    pub vrange: Option<(f64, f64)>,
    /// X axis label.
    pub xlabel: Option<String>,
    /// Y axis label.
    pub ylabel: Option<String>,
    /// Colorbar label.
    pub vlabel: Option<String>,
}

/// One variable bound to display hints, with its (depth, time) section
/// attached to the dataset wrapper.
///
/// Construction extracts the variable, removes the singleton lat/lon axes,
/// transposes to (depth, time), and attaches the result on the wrapper
/// under the variable's name. Selecting the same name again replaces the
/// attached section.
#[derive(Debug, Clone)]
pub struct VariableSelection {
    /// Name of the selected variable.
    pub varname: String,
    /// X axis range, when hinted.
    pub xrange: Option<(f64, f64)>,
    /// Y axis range, when hinted.
    pub yrange: Option<(f64, f64)>,
    /// Color scale bounds: the hint when given, the rounded data range
    /// otherwise.
    pub vrange: (f64, f64),
    /// X axis label.
    pub xlabel: Option<String>,
    /// Y axis label.
    pub ylabel: Option<String>,
    /// Colorbar label.
    pub vlabel: Option<String>,
}

impl VariableSelection {
    /// Select a variable for plotting, attaching its section to the dataset.
    pub fn new(dataset: &mut GotmDataset, varname: &str, hints: SelectionHints) -> Result<Self> {
        let section = extract_section(dataset, varname)?;
        let vrange = match hints.vrange {
            Some(range) => range,
            None => rounded_range(section.iter().copied())
                .ok_or_else(|| HovmollerError::empty_data(varname))?,
        };
        dataset.attach_section(varname, section);
        tracing::debug!(varname, ?vrange, "selected variable");

        Ok(Self {
            varname: varname.to_string(),
            xrange: hints.xrange,
            yrange: hints.yrange,
            vrange,
            xlabel: hints.xlabel,
            ylabel: hints.ylabel,
            vlabel: hints.vlabel,
        })
    }
}

/// Extract a variable as a (depth, time) array with the singleton lat/lon
/// axes removed.
fn extract_section(dataset: &GotmDataset, varname: &str) -> Result<Array2<f64>> {
    let (values, dims) = dataset.read_variable(varname)?;
    if !is_section_dims(&dims) {
        return Err(HovmollerError::dimension_mismatch(
            varname,
            &dims,
            "(time, z, lat, lon) or (time, z, y, x)",
        ));
    }

    let values = values
        .into_dimensionality::<Ix4>()
        .map_err(|e| HovmollerError::NetCdf(format!("'{}': {}", varname, e)))?;
    let shape = values.shape();
    if shape[2] != 1 || shape[3] != 1 {
        return Err(HovmollerError::dimension_mismatch(
            varname,
            &dims,
            "a single lat/lon position (pre-select a water column first)",
        ));
    }

    // (time, z, 1, 1) -> (time, z) -> (z, time)
    let section = values
        .index_axis_move(Axis(3), 0)
        .index_axis_move(Axis(2), 0);
    Ok(section.t().to_owned())
}
