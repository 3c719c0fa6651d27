//! Figure styling configuration.

/// How the exported image is cropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundingBox {
    /// Trim uniform background borders down to the drawn content.
    #[default]
    Tight,
    /// Keep the full computed canvas.
    Standard,
}

/// Figure styling parameters.
///
/// A pure value holder: every field has a default and nothing is validated
/// beyond its type. Sizes are in inches, font sizes in points, the rotation
/// in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Axes panel width in inches (the data area, excluding labels).
    pub width: f64,
    /// Axes panel height in inches.
    pub height: f64,
    /// Export resolution in dots per inch.
    pub dpi: u32,
    /// Crop mode used on export.
    pub bbox: BoundingBox,
    /// Base font size.
    pub fontsize: f64,
    /// Tick and axis label size.
    pub labelsize: f64,
    /// Title font size.
    pub title_fontsize: f64,
    /// X axis label font size.
    pub xlabel_fontsize: f64,
    /// Y axis label font size.
    pub ylabel_fontsize: f64,
    /// Axes frame and tick mark width.
    pub linewidth: f64,
    /// X tick label rotation in degrees.
    pub rotation: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 3.0,
            dpi: 600,
            bbox: BoundingBox::Tight,
            fontsize: 12.0,
            labelsize: 12.0,
            title_fontsize: 12.0,
            xlabel_fontsize: 12.0,
            ylabel_fontsize: 12.0,
            linewidth: 1.0,
            rotation: 45.0,
        }
    }
}

impl PlotConfig {
    /// A configuration with the given panel size and everything else at its
    /// default.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = PlotConfig::default();
        assert_eq!(cfg.dpi, 600);
        assert_eq!(cfg.bbox, BoundingBox::Tight);
        assert_eq!(cfg.rotation, 45.0);
        assert_eq!(cfg.labelsize, 12.0);
    }

    #[test]
    fn new_only_overrides_the_panel_size() {
        let cfg = PlotConfig::new(6.0, 2.5);
        assert_eq!(cfg.width, 6.0);
        assert_eq!(cfg.height, 2.5);
        assert_eq!(cfg.dpi, PlotConfig::default().dpi);
    }
}
