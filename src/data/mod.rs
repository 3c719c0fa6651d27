//! Dataset access and attribute normalization.
//!
//! This module opens GOTM-ERSEM netCDF output, derives the cell-edge
//! coordinates mesh plotting needs, and normalizes per-variable metadata
//! into display-ready form.

mod attrs;
mod dataset;
mod edges;
mod variable;

pub use attrs::{VariableAttrs, UNIT_REWRITES};
pub use dataset::{GotmDataset, TimeEncoding};
pub use edges::cell_edges;

pub(crate) use attrs::{is_section_dims, rounded_range};
