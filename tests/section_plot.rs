//! End-to-end tests against a real netCDF file on disk.

use hovmoller::data::GotmDataset;
use hovmoller::plot::{
    Colormap, ColorbarOptions, MeshOptions, PlotConfig, SaveOptions, SectionPlotter,
    SelectionHints, VariableSelection,
};
use std::path::Path;

const NT: usize = 6;
const NZ: usize = 4;
const PROFILE: [f64; NZ] = [-1.0, -3.0, -5.0, -7.0];

/// Write a single-column GOTM-style output file: coordinates `time` and a
/// 4D `z`, plus a few data variables on `(time, z, lat, lon)`.
fn write_fixture(path: &Path, lat_len: usize) -> Result<(), netcdf::Error> {
    let mut file = netcdf::create(path)?;
    file.add_dimension("time", NT)?;
    file.add_dimension("z", NZ)?;
    file.add_dimension("lat", lat_len)?;
    file.add_dimension("lon", 1)?;

    {
        let mut var = file.add_variable::<f64>("time", &["time"])?;
        var.put_attribute("units", "seconds since 2020-01-01 00:00:00")?;
        let hours: Vec<f64> = (0..NT).map(|i| i as f64 * 3600.0).collect();
        var.put_values(&hours, ..)?;
    }
    {
        let mut var = file.add_variable::<f64>("z", &["time", "z", "lat", "lon"])?;
        var.put_attribute("units", "m")?;
        let mut values = Vec::with_capacity(NT * NZ * lat_len);
        for _ in 0..NT {
            for &z in &PROFILE {
                for _ in 0..lat_len {
                    values.push(z);
                }
            }
        }
        var.put_values(&values, ..)?;
    }
    {
        let mut var = file.add_variable::<f64>("temp", &["time", "z", "lat", "lon"])?;
        var.put_attribute("units", "degC")?;
        var.put_attribute("long_name", "sea water potential temperature")?;
        let mut values = Vec::with_capacity(NT * NZ * lat_len);
        for ti in 0..NT {
            for zi in 0..NZ {
                for _ in 0..lat_len {
                    values.push(10.0 + zi as f64 + 0.5 * ti as f64);
                }
            }
        }
        var.put_values(&values, ..)?;
    }
    {
        let mut var = file.add_variable::<f64>("chl", &["time", "z", "lat", "lon"])?;
        var.put_attribute("units", "mg C/m^3")?;
        var.put_attribute("long_name", "chlorophyll")?;
        let mut values = vec![0.25; NT * NZ * lat_len];
        values[0] = f64::NAN;
        var.put_values(&values, ..)?;
    }
    {
        let mut var = file.add_variable::<f64>("flat", &["time", "z", "lat", "lon"])?;
        let values = vec![0.5; NT * NZ * lat_len];
        var.put_values(&values, ..)?;
    }
    {
        // Constant at an integer value: its rounded range is degenerate.
        let mut var = file.add_variable::<f64>("ice", &["time", "z", "lat", "lon"])?;
        let values = vec![5.0; NT * NZ * lat_len];
        var.put_values(&values, ..)?;
    }
    {
        let mut var = file.add_variable::<f64>("wind", &["time"])?;
        let values = vec![5.0; NT];
        var.put_values(&values, ..)?;
    }
    Ok(())
}

fn open_fixture(dir: &tempfile::TempDir) -> GotmDataset {
    let path = dir.path().join("result.nc");
    write_fixture(&path, 1).unwrap();
    GotmDataset::open(&path).unwrap()
}

#[test]
fn open_derives_cell_edges() {
    let dir = tempfile::tempdir().unwrap();
    let ds = open_fixture(&dir);

    assert_eq!(ds.depth, PROFILE);
    assert_eq!(ds.depth_edges, [0.0, -2.0, -4.0, -6.0, -8.0]);

    assert_eq!(ds.time_edges.len(), NT + 1);
    assert_eq!(ds.time_edges[0], -1800.0);
    assert_eq!(ds.time_edges[NT], 19800.0);

    let enc = ds.time_encoding.unwrap();
    assert_eq!(enc.format(0.0), "2020-01-01");
    assert_eq!(enc.format(86400.0), "2020-01-02");
}

#[test]
fn normalized_attrs_filter_and_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let ds = open_fixture(&dir);
    let attrs = ds.normalized_attrs().unwrap();

    // Data variables only: the 4D `z` coordinate variable is excluded.
    let names: Vec<&str> = attrs.keys().map(String::as_str).collect();
    assert_eq!(names, ["chl", "flat", "ice", "temp"]);

    let temp = &attrs["temp"];
    assert_eq!(temp.long_name.as_deref(), Some("sea water Temperature"));
    assert_eq!(temp.units.as_deref(), Some("degC"));
    assert_eq!(temp.range, (10.0, 16.0));
    assert_eq!(
        temp.value_label().unwrap(),
        "sea water Temperature (degC)"
    );

    let chl = &attrs["chl"];
    assert_eq!(chl.units.as_deref(), Some("mg C/m$^3$"));
    // The NaN cell must not poison the display range.
    assert_eq!(chl.range, (0.0, 1.0));
}

#[test]
fn selection_extracts_transposed_section() {
    let dir = tempfile::tempdir().unwrap();
    let mut ds = open_fixture(&dir);
    let sel = VariableSelection::new(&mut ds, "temp", SelectionHints::default()).unwrap();

    assert_eq!(sel.vrange, (10.0, 16.0));
    let section = ds.section("temp").unwrap();
    assert_eq!(section.dim(), (NZ, NT));
    // Written time-major as 10 + zi + ti/2; the section is (depth, time).
    assert_eq!(section[[2, 3]], 13.5);
    assert_eq!(section[[0, 0]], 10.0);
}

#[test]
fn selection_hints_override_derived_values() {
    let dir = tempfile::tempdir().unwrap();
    let mut ds = open_fixture(&dir);
    let hints = SelectionHints {
        vrange: Some((0.0, 30.0)),
        vlabel: Some("Temperature (degC)".into()),
        ..SelectionHints::default()
    };
    let sel = VariableSelection::new(&mut ds, "temp", hints).unwrap();
    assert_eq!(sel.vrange, (0.0, 30.0));
    assert_eq!(sel.vlabel.as_deref(), Some("Temperature (degC)"));
}

#[test]
fn reattaching_a_section_replaces_it() {
    let dir = tempfile::tempdir().unwrap();
    let mut ds = open_fixture(&dir);
    VariableSelection::new(&mut ds, "temp", SelectionHints::default()).unwrap();

    let replacement = ndarray::Array2::zeros((NZ, NT));
    let displaced = ds.attach_section("temp", replacement).unwrap();
    assert_eq!(displaced[[2, 3]], 13.5);
    assert_eq!(ds.section("temp").unwrap()[[2, 3]], 0.0);
}

#[test]
fn missing_variable_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut ds = open_fixture(&dir);
    let err = VariableSelection::new(&mut ds, "salt", SelectionHints::default()).unwrap_err();
    assert!(err.to_string().contains("salt"));
}

#[test]
fn coordinate_variable_is_not_a_section() {
    let dir = tempfile::tempdir().unwrap();
    let mut ds = open_fixture(&dir);
    let err = VariableSelection::new(&mut ds, "wind", SelectionHints::default()).unwrap_err();
    assert!(err.to_string().contains("dimensions"));
}

#[test]
fn wide_horizontal_axis_is_rejected_at_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("basin.nc");
    write_fixture(&path, 3).unwrap();
    let err = GotmDataset::open(&path).unwrap_err();
    assert!(err.to_string().contains("single lat/lon"));
}

#[test]
fn mesh_colors_follow_the_colormap() {
    let dir = tempfile::tempdir().unwrap();
    let mut ds = open_fixture(&dir);
    let hints = SelectionHints {
        vrange: Some((0.0, 1.0)),
        ..SelectionHints::default()
    };
    let sel = VariableSelection::new(&mut ds, "flat", hints).unwrap();
    let cfg = PlotConfig {
        dpi: 60,
        ..PlotConfig::new(4.0, 2.0)
    };
    let mut plotter = SectionPlotter::new(0, &ds, cfg, sel).unwrap();
    let figure = plotter
        .render(&MeshOptions::default(), &ColorbarOptions::default())
        .unwrap();

    // Every cell holds 0.5 of a (0, 1) range, so the panel center must be
    // the colormap's midpoint color.
    let (ox, oy) = figure.panel_origin;
    let (pw, ph) = figure.panel_size;
    let pixel = *figure.image().get_pixel(ox + pw / 2, oy + ph / 2);
    assert_eq!(pixel, Colormap::Jet.color(0.5));
}

#[test]
fn constant_field_renders_at_the_colormap_midpoint() {
    let dir = tempfile::tempdir().unwrap();
    let mut ds = open_fixture(&dir);
    // No hints: the derived range is (5.0, 5.0).
    let sel = VariableSelection::new(&mut ds, "ice", SelectionHints::default()).unwrap();
    assert_eq!(sel.vrange, (5.0, 5.0));

    let cfg = PlotConfig {
        dpi: 60,
        ..PlotConfig::new(4.0, 2.0)
    };
    let mut plotter = SectionPlotter::new(0, &ds, cfg, sel).unwrap();
    let figure = plotter
        .render(&MeshOptions::default(), &ColorbarOptions::default())
        .unwrap();

    let (ox, oy) = figure.panel_origin;
    let (pw, ph) = figure.panel_size;
    let pixel = *figure.image().get_pixel(ox + pw / 2, oy + ph / 2);
    assert_eq!(pixel, Colormap::Jet.color(0.5));
}

#[test]
fn save_exports_a_decodable_png() {
    let dir = tempfile::tempdir().unwrap();
    let mut ds = open_fixture(&dir);
    let sel = VariableSelection::new(&mut ds, "temp", SelectionHints::default()).unwrap();
    let cfg = PlotConfig::new(4.0, 2.0);
    let plotter = SectionPlotter::new(0, &ds, cfg, sel).unwrap();

    let out = dir.path().join("temp.png");
    let opts = SaveOptions {
        dpi: Some(60),
        ..SaveOptions::default()
    };
    plotter.save(&out, &opts).unwrap();

    let img = image::open(&out).unwrap();
    assert!(img.width() > 0 && img.height() > 0);
    // Tight cropping keeps the panel, so the image cannot be smaller than it.
    assert!(img.width() >= 4 * 60);
    assert!(img.height() >= 2 * 60);
}
