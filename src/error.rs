//! Error types for Hovmoller.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Hovmoller operations.
pub type Result<T> = std::result::Result<T, HovmollerError>;

/// Errors that can occur in Hovmoller.
#[derive(Debug, Error)]
pub enum HovmollerError {
    /// Failed to open a file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        /// Path that could not be opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to read NetCDF file.
    #[error("NetCDF error: {0}")]
    NetCdf(String),

    /// A requested variable does not exist in the dataset.
    #[error("Variable not found: {name}")]
    VariableNotFound {
        /// Name of the missing variable.
        name: String,
    },

    /// A variable does not have the dimensions an operation requires.
    #[error("Variable '{name}' has dimensions ({dims}), expected {expected}")]
    DimensionMismatch {
        /// Name of the offending variable.
        name: String,
        /// Actual dimension names, comma separated.
        dims: String,
        /// Description of the expected dimensions.
        expected: String,
    },

    /// A variable holds no finite values, so no display range exists.
    #[error("Variable '{name}' has no finite values")]
    EmptyData {
        /// Name of the degenerate variable.
        name: String,
    },

    /// Figure rendering or export failed.
    #[error("Render error: {0}")]
    Render(String),

    /// Timestamp repair failed.
    #[error("Timestamp repair error: {0}")]
    Timefix(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HovmollerError {
    /// Create a FileOpen error.
    pub fn file_open(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileOpen { path, source }
    }

    /// Create a VariableNotFound error.
    pub fn variable_not_found(name: impl Into<String>) -> Self {
        Self::VariableNotFound { name: name.into() }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch(
        name: impl Into<String>,
        dims: &[String],
        expected: impl Into<String>,
    ) -> Self {
        Self::DimensionMismatch {
            name: name.into(),
            dims: dims.join(", "),
            expected: expected.into(),
        }
    }

    /// Create an EmptyData error.
    pub fn empty_data(name: impl Into<String>) -> Self {
        Self::EmptyData { name: name.into() }
    }
}

impl From<netcdf::Error> for HovmollerError {
    fn from(err: netcdf::Error) -> Self {
        Self::NetCdf(err.to_string())
    }
}
