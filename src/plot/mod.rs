//! Section plotting: configuration, selection, and rendering.
//!
//! A plot is composed from three value objects: a [`PlotConfig`] for
//! styling, a [`VariableSelection`] binding one variable to display hints,
//! and a [`SectionPlotter`] that draws them into an owned figure and
//! exports it.

mod colormap;
mod config;
mod figure;
mod plotter;
mod selection;
mod ticks;

pub use colormap::Colormap;
pub use config::{BoundingBox, PlotConfig};
pub use figure::Figure;
pub use plotter::{ColorbarOptions, MeshOptions, SaveOptions, SectionPlotter};
pub use selection::{SelectionHints, VariableSelection};
