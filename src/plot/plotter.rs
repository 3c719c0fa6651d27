//! Section plotter: mesh, colorbar, labels, and export.

use super::colormap::Colormap;
use super::config::{BoundingBox, PlotConfig};
use super::figure::{font_scale, Figure, FOREGROUND};
use super::selection::VariableSelection;
use super::ticks::{format_tick, nice_ticks};
use crate::data::GotmDataset;
use crate::error::{HovmollerError, Result};
use image::Rgba;
use std::path::Path;

/// Overrides for the mesh draw call. Unset fields keep the defaults.
#[derive(Debug, Clone, Default)]
pub struct MeshOptions {
    /// Colormap; jet when unset.
    pub cmap: Option<Colormap>,
    /// Lower color bound; the selection's value range when unset.
    pub vmin: Option<f64>,
    /// Upper color bound; the selection's value range when unset.
    pub vmax: Option<f64>,
    /// RGBA fill for missing (NaN) cells; left as background when unset.
    pub missing: Option<[u8; 4]>,
}

/// Overrides for the colorbar. Unset fields keep the defaults.
#[derive(Debug, Clone, Default)]
pub struct ColorbarOptions {
    /// Gap between panel and colorbar as a fraction of the panel width;
    /// 0.01 when unset.
    pub pad: Option<f64>,
    /// Colorbar width as a fraction of the panel width; 0.03 when unset.
    pub width: Option<f64>,
}

/// Overrides threaded through [`SectionPlotter::save`]. The nested mesh and
/// colorbar options reach the corresponding render steps unchanged.
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Export resolution; the configuration's dpi when unset.
    pub dpi: Option<u32>,
    /// Crop mode; the configuration's mode when unset.
    pub bbox: Option<BoundingBox>,
    /// Mesh overrides.
    pub mesh: MeshOptions,
    /// Colorbar overrides.
    pub colorbar: ColorbarOptions,
}

// Tick geometry in points, following matplotlib's defaults.
const TICK_LEN_PT: f64 = 3.5;
const TICK_PAD_PT: f64 = 3.5;
const LABEL_PAD_PT: f64 = 4.0;

/// Renders one variable selection as a depth-time mesh figure.
///
/// Owns its figure from construction until [`SectionPlotter::save`]
/// consumes it; a plotter is not reusable after saving.
#[derive(Debug)]
pub struct SectionPlotter<'a> {
    /// Caller-assigned ordinal of this plot.
    pub index: usize,
    dataset: &'a GotmDataset,
    cfg: PlotConfig,
    selection: VariableSelection,
    figure: Figure,
}

impl<'a> SectionPlotter<'a> {
    /// Create a plotter with an owned, still-empty figure.
    pub fn new(
        index: usize,
        dataset: &'a GotmDataset,
        cfg: PlotConfig,
        selection: VariableSelection,
    ) -> Result<Self> {
        Ok(Self {
            index,
            dataset,
            cfg,
            selection,
            figure: Figure::new()?,
        })
    }

    /// The owned figure in its current state.
    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// Draw the mesh, colorbar, labels, and ticks into the owned figure.
    ///
    /// The axes panel ends up exactly `width x height` inches at the
    /// configured dpi; margins are solved around it from the measured label
    /// extents, so label length never shrinks the data area.
    pub fn render(&mut self, mesh: &MeshOptions, colorbar: &ColorbarOptions) -> Result<&Figure> {
        let section = self
            .dataset
            .section(&self.selection.varname)
            .ok_or_else(|| HovmollerError::variable_not_found(&self.selection.varname))?;

        let (nz, nt) = (section.nrows(), section.ncols());
        if nt + 1 != self.dataset.time_edges.len() || nz + 1 != self.dataset.depth_edges.len() {
            return Err(HovmollerError::Render(format!(
                "section '{}' is {}x{} but the dataset has {} time and {} depth centers",
                self.selection.varname,
                nz,
                nt,
                self.dataset.time_edges.len() - 1,
                self.dataset.depth_edges.len() - 1,
            )));
        }

        // Resolve defaults against caller overrides.
        let cmap = mesh.cmap.unwrap_or_default();
        let vmin = mesh.vmin.unwrap_or(self.selection.vrange.0);
        let vmax = mesh.vmax.unwrap_or(self.selection.vrange.1);
        let missing = mesh.missing.map(Rgba);
        let cb_pad_frac = colorbar.pad.unwrap_or(0.01);
        let cb_width_frac = colorbar.width.unwrap_or(0.03);

        let dpi = self.cfg.dpi;
        let pw = (self.cfg.width * dpi as f64).round().max(1.0) as u32;
        let ph = (self.cfg.height * dpi as f64).round().max(1.0) as u32;
        let lw = ((self.cfg.linewidth * dpi as f64 / 72.0).round() as u32).max(1);
        let tick_len = (TICK_LEN_PT * dpi as f64 / 72.0).round() as u32;
        let tick_pad = (TICK_PAD_PT * dpi as f64 / 72.0).round() as u32;
        let label_pad = (LABEL_PAD_PT * dpi as f64 / 72.0).round() as u32;

        let tick_scale = font_scale(self.cfg.labelsize, dpi);
        let ylabel_scale = font_scale(self.cfg.ylabel_fontsize, dpi);
        let xlabel_scale = font_scale(self.cfg.xlabel_fontsize, dpi);

        // Axis extents, hints first.
        let (x0, x1) = self.selection.xrange.unwrap_or_else(|| {
            let e = &self.dataset.time_edges;
            (e[0], e[e.len() - 1])
        });
        let (y0, y1) = self.selection.yrange.unwrap_or_else(|| {
            let e = &self.dataset.depth_edges;
            e.iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                })
        });
        // A flat value range (vmax == vmin) is valid: constant fields map to
        // the colormap midpoint. Only an inverted range is an error.
        if !(x1 > x0) || !(y1 > y0) || vmax < vmin {
            return Err(HovmollerError::Render(format!(
                "degenerate axis or value extent for '{}'",
                self.selection.varname
            )));
        }

        let x_ticks = nice_ticks(x0, x1, 6);
        let y_ticks = nice_ticks(y0, y1, 5);
        let cb_ticks = nice_ticks(vmin, vmax, 5);

        let encoding = self.dataset.time_encoding;
        let x_label_for = move |v: f64| match encoding {
            Some(enc) => enc.format(v),
            None => format_tick(v),
        };

        // Measure label extents to solve the margins.
        let theta = self.cfg.rotation.to_radians();
        let mut x_tick_drop = 0u32;
        for &v in &x_ticks {
            let (w, h) = self.figure.text_size(&x_label_for(v), tick_scale);
            let extent =
                (w as f64 * theta.sin().abs() + h as f64 * theta.cos().abs()).ceil() as u32;
            x_tick_drop = x_tick_drop.max(extent);
        }
        let mut y_tick_width = 0u32;
        let mut text_height = 0u32;
        for &v in &y_ticks {
            let (w, h) = self.figure.text_size(&format_tick(v), tick_scale);
            y_tick_width = y_tick_width.max(w);
            text_height = text_height.max(h);
        }
        let mut cb_tick_width = 0u32;
        for &v in &cb_ticks {
            let (w, h) = self.figure.text_size(&format_tick(v), tick_scale);
            cb_tick_width = cb_tick_width.max(w);
            text_height = text_height.max(h);
        }

        let cb_pad = (cb_pad_frac * pw as f64).round() as u32;
        let cb_width = ((cb_width_frac * pw as f64).round() as u32).max(lw * 2);

        let ylabel_depth = match &self.selection.ylabel {
            Some(text) => label_pad + self.figure.text_size(text, ylabel_scale).1,
            None => 0,
        };
        let xlabel_depth = match &self.selection.xlabel {
            Some(text) => label_pad + self.figure.text_size(text, xlabel_scale).1,
            None => 0,
        };
        let vlabel_depth = match &self.selection.vlabel {
            Some(text) => label_pad + self.figure.text_size(text, ylabel_scale).1,
            None => 0,
        };

        let outer = 2u32;
        let left = outer + ylabel_depth + y_tick_width + tick_pad + tick_len;
        let top = outer + text_height / 2;
        let bottom = tick_len + tick_pad + x_tick_drop + xlabel_depth + outer;
        let right = cb_pad + cb_width + tick_pad + cb_tick_width + vlabel_depth + outer;

        self.figure
            .reset(left + pw + right, top + ph + bottom, (left, top), (pw, ph));
        let (ox, oy) = (left as i64, top as i64);

        let map_x = |v: f64| ox + ((v - x0) / (x1 - x0) * pw as f64).round() as i64;
        let map_y = |v: f64| oy + ph as i64 - ((v - y0) / (y1 - y0) * ph as f64).round() as i64;

        // Mesh cells, flat shaded.
        let te = &self.dataset.time_edges;
        let de = &self.dataset.depth_edges;
        let span = vmax - vmin;
        for zi in 0..nz {
            for ti in 0..nt {
                let value = section[[zi, ti]];
                let color = if value.is_nan() {
                    match missing {
                        Some(c) => c,
                        None => continue,
                    }
                } else if span > 0.0 {
                    cmap.color((value - vmin) / span)
                } else {
                    cmap.color(0.5)
                };
                let cx0 = map_x(te[ti]).clamp(ox, ox + pw as i64);
                let cx1 = map_x(te[ti + 1]).clamp(ox, ox + pw as i64);
                let cy0 = map_y(de[zi]).clamp(oy, oy + ph as i64);
                let cy1 = map_y(de[zi + 1]).clamp(oy, oy + ph as i64);
                self.figure
                    .fill_rect(cx0 as i32, cy0 as i32, cx1 as i32, cy1 as i32, color);
            }
        }

        // Axes frame.
        let lwi = lw as i32;
        let (oxi, oyi) = (ox as i32, oy as i32);
        let (pwi, phi) = (pw as i32, ph as i32);
        self.figure
            .fill_rect(oxi - lwi, oyi - lwi, oxi + pwi + lwi, oyi, FOREGROUND);
        self.figure.fill_rect(
            oxi - lwi,
            oyi + phi,
            oxi + pwi + lwi,
            oyi + phi + lwi,
            FOREGROUND,
        );
        self.figure
            .fill_rect(oxi - lwi, oyi, oxi, oyi + phi, FOREGROUND);
        self.figure
            .fill_rect(oxi + pwi, oyi, oxi + pwi + lwi, oyi + phi, FOREGROUND);

        // X ticks: marks outward, labels rotated per the configuration.
        for &v in &x_ticks {
            let xp = map_x(v) as i32;
            self.figure.fill_rect(
                xp - lwi / 2,
                oyi + phi + lwi,
                xp - lwi / 2 + lwi,
                oyi + phi + lwi + tick_len as i32,
                FOREGROUND,
            );
            let label = x_label_for(v);
            let (w, h) = self.figure.text_size(&label, tick_scale);
            let drop = (w as f64 * theta.sin().abs() + h as f64 * theta.cos().abs()).ceil() as i32;
            let cy = oyi + phi + lwi + (tick_len + tick_pad) as i32 + drop / 2;
            if self.cfg.rotation == 0.0 {
                self.figure
                    .draw_text(&label, xp - w as i32 / 2, cy - h as i32 / 2, tick_scale);
            } else {
                self.figure
                    .draw_text_rotated(&label, xp, cy, self.cfg.rotation, tick_scale);
            }
        }

        // Y ticks: marks outward, labels right-aligned.
        for &v in &y_ticks {
            let yp = map_y(v) as i32;
            self.figure.fill_rect(
                oxi - lwi - tick_len as i32,
                yp - lwi / 2,
                oxi - lwi,
                yp - lwi / 2 + lwi,
                FOREGROUND,
            );
            let label = format_tick(v);
            let (w, h) = self.figure.text_size(&label, tick_scale);
            self.figure.draw_text(
                &label,
                oxi - lwi - (tick_len + tick_pad) as i32 - w as i32,
                yp - h as i32 / 2,
                tick_scale,
            );
        }

        // Axis labels.
        if let Some(text) = self.selection.ylabel.clone() {
            let (_, h) = self.figure.text_size(&text, ylabel_scale);
            let cx = (outer + h / 2) as i32;
            self.figure
                .draw_text_rotated(&text, cx, oyi + phi / 2, 90.0, ylabel_scale);
        }
        if let Some(text) = self.selection.xlabel.clone() {
            let (w, _) = self.figure.text_size(&text, xlabel_scale);
            let y = oyi + phi + lwi + (tick_len + tick_pad + x_tick_drop + label_pad) as i32;
            self.figure
                .draw_text(&text, oxi + pwi / 2 - w as i32 / 2, y, xlabel_scale);
        }

        // Colorbar: vertical gradient spanning the value range.
        let cb_x0 = oxi + pwi + lwi + cb_pad as i32;
        let cb_x1 = cb_x0 + cb_width as i32;
        for row in 0..phi {
            let t = 1.0 - row as f64 / (phi - 1).max(1) as f64;
            let color = cmap.color(t);
            self.figure
                .fill_rect(cb_x0, oyi + row, cb_x1, oyi + row + 1, color);
        }
        self.figure
            .fill_rect(cb_x0 - lwi, oyi - lwi, cb_x1 + lwi, oyi, FOREGROUND);
        self.figure.fill_rect(
            cb_x0 - lwi,
            oyi + phi,
            cb_x1 + lwi,
            oyi + phi + lwi,
            FOREGROUND,
        );
        self.figure
            .fill_rect(cb_x0 - lwi, oyi, cb_x0, oyi + phi, FOREGROUND);
        self.figure
            .fill_rect(cb_x1, oyi, cb_x1 + lwi, oyi + phi, FOREGROUND);

        for &v in &cb_ticks {
            let frac = if span > 0.0 { (v - vmin) / span } else { 0.5 };
            let yp = (oyi + phi - (frac * ph as f64).round() as i32).clamp(oyi, oyi + phi);
            let label = format_tick(v);
            let (_, h) = self.figure.text_size(&label, tick_scale);
            self.figure.draw_text(
                &label,
                cb_x1 + lwi + tick_pad as i32,
                yp - h as i32 / 2,
                tick_scale,
            );
        }
        if let Some(text) = self.selection.vlabel.clone() {
            let (_, h) = self.figure.text_size(&text, ylabel_scale);
            let cx = cb_x1 + lwi + (tick_pad + cb_tick_width + label_pad) as i32 + h as i32 / 2;
            self.figure
                .draw_text_rotated(&text, cx, oyi + phi / 2, 90.0, ylabel_scale);
        }

        tracing::debug!(
            index = self.index,
            varname = %self.selection.varname,
            vmin,
            vmax,
            "rendered section"
        );
        Ok(&self.figure)
    }

    /// Render and export the figure, consuming the plotter.
    ///
    /// The nested mesh and colorbar overrides are threaded through to
    /// [`SectionPlotter::render`]; dpi and bbox overrides replace the
    /// configuration's values for this export only.
    pub fn save(mut self, path: &Path, opts: &SaveOptions) -> Result<()> {
        if let Some(dpi) = opts.dpi {
            self.cfg.dpi = dpi;
        }
        self.render(&opts.mesh, &opts.colorbar)?;
        let bbox = opts.bbox.unwrap_or(self.cfg.bbox);
        let pad = (0.1 * self.cfg.dpi as f64).round() as u32;
        self.figure.save_png(path, bbox, pad)?;
        tracing::info!(path = %path.display(), "saved section plot");
        Ok(())
    }
}
