//! Figure canvas: pixel drawing, text, and PNG export.

use super::config::BoundingBox;
use crate::error::{HovmollerError, Result};
use image::{imageops, ImageBuffer, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use rusttype::{point, Font, Scale};
use std::fmt;
use std::path::Path;

/// Embedded font - DejaVu Sans.
const FONT_DATA: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

pub(crate) const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub(crate) const FOREGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Font scale in pixels for a point size at the given resolution.
pub(crate) fn font_scale(points: f64, dpi: u32) -> Scale {
    Scale::uniform((points * dpi as f64 / 72.0) as f32)
}

/// A drawable raster figure holding one axes panel.
///
/// The panel keeps the exact pixel size requested; label and colorbar
/// margins are added around it, so the canvas grows rather than the data
/// area shrinking.
pub struct Figure {
    image: RgbaImage,
    font: Font<'static>,
    /// Pixel offset of the axes panel inside the canvas.
    pub panel_origin: (u32, u32),
    /// Axes panel size in pixels.
    pub panel_size: (u32, u32),
}

impl fmt::Debug for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Figure")
            .field("canvas", &(self.image.width(), self.image.height()))
            .field("panel_origin", &self.panel_origin)
            .field("panel_size", &self.panel_size)
            .finish()
    }
}

impl Figure {
    /// Create an empty figure. Fails if the embedded font cannot be loaded.
    pub(crate) fn new() -> Result<Self> {
        let font = Font::try_from_bytes(FONT_DATA)
            .ok_or_else(|| HovmollerError::Render("embedded font failed to load".to_string()))?;
        Ok(Self {
            image: ImageBuffer::from_pixel(1, 1, BACKGROUND),
            font,
            panel_origin: (0, 0),
            panel_size: (0, 0),
        })
    }

    /// Replace the canvas with a fresh background of the given size.
    pub(crate) fn reset(
        &mut self,
        width: u32,
        height: u32,
        panel_origin: (u32, u32),
        panel_size: (u32, u32),
    ) {
        self.image = ImageBuffer::from_pixel(width.max(1), height.max(1), BACKGROUND);
        self.panel_origin = panel_origin;
        self.panel_size = panel_size;
    }

    /// The rendered canvas.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Pixel extent of a text string at the given scale.
    pub(crate) fn text_size(&self, text: &str, scale: Scale) -> (u32, u32) {
        let v_metrics = self.font.v_metrics(scale);
        let height = (v_metrics.ascent - v_metrics.descent).ceil().max(0.0) as u32;
        let width = self
            .font
            .layout(text, scale, point(0.0, v_metrics.ascent))
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .last()
            .unwrap_or(0.0)
            .ceil()
            .max(0.0) as u32;
        (width, height)
    }

    /// Draw text with its top-left corner at `(x, y)`.
    pub(crate) fn draw_text(&mut self, text: &str, x: i32, y: i32, scale: Scale) {
        draw_text_mut(&mut self.image, FOREGROUND, x, y, scale, &self.font, text);
    }

    /// Draw text rotated counterclockwise, centered on `(cx, cy)`.
    pub(crate) fn draw_text_rotated(
        &mut self,
        text: &str,
        cx: i32,
        cy: i32,
        angle_deg: f64,
        scale: Scale,
    ) {
        let (w, h) = self.text_size(text, scale);
        if w == 0 || h == 0 {
            return;
        }
        // Square scratch image large enough for any rotation of the text.
        let side = (((w * w + h * h) as f64).sqrt().ceil() as u32) + 2;
        let mut scratch: RgbaImage = ImageBuffer::from_pixel(side, side, Rgba([0, 0, 0, 0]));
        draw_text_mut(
            &mut scratch,
            FOREGROUND,
            ((side - w) / 2) as i32,
            ((side - h) / 2) as i32,
            scale,
            &self.font,
            text,
        );
        // rotate_about_center turns clockwise for positive angles.
        let rotated = rotate_about_center(
            &scratch,
            (-angle_deg.to_radians()) as f32,
            Interpolation::Bilinear,
            Rgba([0, 0, 0, 0]),
        );
        let x = cx as i64 - side as i64 / 2;
        let y = cy as i64 - side as i64 / 2;
        imageops::overlay(&mut self.image, &rotated, x, y);
    }

    /// Fill the half-open pixel rectangle `[x0, x1) x [y0, y1)`, clipped to
    /// the canvas.
    pub(crate) fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba<u8>) {
        let (w, h) = (self.image.width() as i32, self.image.height() as i32);
        let (x0, x1) = (x0.min(x1), x0.max(x1));
        let (y0, y1) = (y0.min(y1), y0.max(y1));
        for y in y0.max(0)..y1.min(h) {
            for x in x0.max(0)..x1.min(w) {
                self.image.put_pixel(x as u32, y as u32, color);
            }
        }
    }

    /// Export the canvas to `path`, cropping background borders in
    /// [`BoundingBox::Tight`] mode with `pad` pixels kept around the content.
    pub(crate) fn save_png(&self, path: &Path, bbox: BoundingBox, pad: u32) -> Result<()> {
        let result = match bbox {
            BoundingBox::Standard => self.image.save(path),
            BoundingBox::Tight => match content_bounds(&self.image) {
                Some((x0, y0, x1, y1)) => {
                    let x0 = x0.saturating_sub(pad);
                    let y0 = y0.saturating_sub(pad);
                    let x1 = (x1 + pad).min(self.image.width() - 1);
                    let y1 = (y1 + pad).min(self.image.height() - 1);
                    imageops::crop_imm(&self.image, x0, y0, x1 - x0 + 1, y1 - y0 + 1)
                        .to_image()
                        .save(path)
                }
                None => self.image.save(path),
            },
        };
        result.map_err(|e| HovmollerError::Render(format!("{}: {}", path.display(), e)))
    }
}

/// Inclusive bounds of all non-background pixels, or `None` for a blank
/// canvas.
fn content_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if *pixel != BACKGROUND {
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }
    bounds
}
