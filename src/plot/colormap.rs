//! Colormaps for mesh rendering.

use image::Rgba;
use std::str::FromStr;

/// Colormaps available for mesh plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    /// Classic blue-to-red rainbow, the section plot default.
    #[default]
    Jet,
    /// Perceptually uniform dark-purple-to-yellow.
    Viridis,
    /// Perceptually uniform purple-to-yellow.
    Plasma,
    /// Blue-white-red diverging.
    BlueRed,
}

/// Anchor color at a normalized position.
struct Stop {
    t: f64,
    rgb: [u8; 3],
}

const JET: &[Stop] = &[
    Stop { t: 0.0, rgb: [0, 0, 128] },
    Stop { t: 0.125, rgb: [0, 0, 255] },
    Stop { t: 0.375, rgb: [0, 255, 255] },
    Stop { t: 0.625, rgb: [255, 255, 0] },
    Stop { t: 0.875, rgb: [255, 0, 0] },
    Stop { t: 1.0, rgb: [128, 0, 0] },
];

const VIRIDIS: &[Stop] = &[
    Stop { t: 0.0, rgb: [68, 1, 84] },
    Stop { t: 0.25, rgb: [59, 82, 139] },
    Stop { t: 0.5, rgb: [33, 145, 140] },
    Stop { t: 0.75, rgb: [94, 201, 98] },
    Stop { t: 1.0, rgb: [253, 231, 37] },
];

const PLASMA: &[Stop] = &[
    Stop { t: 0.0, rgb: [13, 8, 135] },
    Stop { t: 0.25, rgb: [126, 3, 168] },
    Stop { t: 0.5, rgb: [204, 71, 120] },
    Stop { t: 0.75, rgb: [248, 149, 64] },
    Stop { t: 1.0, rgb: [240, 249, 33] },
];

const BLUE_RED: &[Stop] = &[
    Stop { t: 0.0, rgb: [0, 0, 255] },
    Stop { t: 0.5, rgb: [255, 255, 255] },
    Stop { t: 1.0, rgb: [255, 0, 0] },
];

impl Colormap {
    /// Map a normalized value (0.0 to 1.0, clamped) to an RGBA color.
    pub fn color(self, t: f64) -> Rgba<u8> {
        let stops = match self {
            Self::Jet => JET,
            Self::Viridis => VIRIDIS,
            Self::Plasma => PLASMA,
            Self::BlueRed => BLUE_RED,
        };
        let t = t.clamp(0.0, 1.0);

        let mut lower = &stops[0];
        for pair in stops.windows(2) {
            lower = &pair[0];
            let upper = &pair[1];
            if t <= upper.t {
                let span = upper.t - lower.t;
                let f = if span > 0.0 { (t - lower.t) / span } else { 0.0 };
                return Rgba([
                    lerp(lower.rgb[0], upper.rgb[0], f),
                    lerp(lower.rgb[1], upper.rgb[1], f),
                    lerp(lower.rgb[2], upper.rgb[2], f),
                    255,
                ]);
            }
        }
        let last = &stops[stops.len() - 1];
        Rgba([last.rgb[0], last.rgb[1], last.rgb[2], 255])
    }

    /// Display name, matching the `FromStr` spelling.
    pub fn name(self) -> &'static str {
        match self {
            Self::Jet => "jet",
            Self::Viridis => "viridis",
            Self::Plasma => "plasma",
            Self::BlueRed => "bluered",
        }
    }
}

impl FromStr for Colormap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jet" => Ok(Self::Jet),
            "viridis" => Ok(Self::Viridis),
            "plasma" => Ok(Self::Plasma),
            "bluered" | "blue-red" => Ok(Self::BlueRed),
            other => Err(format!(
                "unknown colormap '{}' (expected jet, viridis, plasma, or bluered)",
                other
            )),
        }
    }
}

fn lerp(a: u8, b: u8, f: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * f).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jet_endpoints() {
        assert_eq!(Colormap::Jet.color(0.0), Rgba([0, 0, 128, 255]));
        assert_eq!(Colormap::Jet.color(1.0), Rgba([128, 0, 0, 255]));
    }

    #[test]
    fn jet_midpoint_is_between_cyan_and_yellow() {
        let Rgba([r, g, b, _]) = Colormap::Jet.color(0.5);
        assert_eq!(g, 255);
        assert!(r > 0 && b > 0);
    }

    #[test]
    fn out_of_range_values_clamp() {
        assert_eq!(Colormap::Jet.color(-3.0), Colormap::Jet.color(0.0));
        assert_eq!(Colormap::Jet.color(42.0), Colormap::Jet.color(1.0));
    }

    #[test]
    fn bluered_center_is_white() {
        assert_eq!(Colormap::BlueRed.color(0.5), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn parse_round_trips_names() {
        for cmap in [
            Colormap::Jet,
            Colormap::Viridis,
            Colormap::Plasma,
            Colormap::BlueRed,
        ] {
            assert_eq!(cmap.name().parse::<Colormap>().unwrap(), cmap);
        }
        assert!("magma".parse::<Colormap>().is_err());
    }
}
