//! Hovmoller - depth-time section plots from GOTM-ERSEM netCDF output.
//!
//! Hovmoller post-processes GOTM-ERSEM model output: it normalizes variable
//! metadata (units, long names, display ranges) for presentation and renders
//! labeled depth-time colored mesh sections to PNG.
//!
//! # Features
//!
//! - NetCDF file reading with derived cell-edge coordinates
//! - Unit and long-name normalization for display
//! - Flat-shaded depth-time mesh plots with colorbar
//! - Exact physical panel sizing independent of label extents
//! - Timestamp repair for plain-text forcing files
//!
//! # Example
//!
//! ```ignore
//! use hovmoller::data::GotmDataset;
//! use hovmoller::plot::{PlotConfig, SaveOptions, SectionPlotter, SelectionHints, VariableSelection};
//! use std::path::Path;
//!
//! let mut ds = GotmDataset::open(Path::new("gotm_ersem.nc"))?;
//! let attrs = ds.normalized_attrs()?;
//!
//! let mut hints = SelectionHints::default();
//! hints.vrange = attrs.get("temp").map(|a| a.range);
//! let selection = VariableSelection::new(&mut ds, "temp", hints)?;
//!
//! let plotter = SectionPlotter::new(0, &ds, PlotConfig::new(8.0, 3.0), selection)?;
//! plotter.save(Path::new("temp.png"), &SaveOptions::default())?;
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod data;
pub mod error;
pub mod plot;
pub mod timefix;

pub use error::{HovmollerError, Result};
