//! Hovmoller - GOTM-ERSEM depth-time section plotting.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand};
use hovmoller::data::GotmDataset;
use hovmoller::plot::{
    Colormap, MeshOptions, PlotConfig, SaveOptions, SectionPlotter, SelectionHints,
    VariableSelection,
};
use hovmoller::timefix;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "hovmoller")]
#[command(about = "Depth-time section plots from GOTM-ERSEM netCDF output", long_about = None)]
struct Args {
    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one variable as a depth-time mesh plot
    Plot {
        /// GOTM-ERSEM output netCDF file
        file: PathBuf,

        /// Variable to plot
        #[arg(short, long)]
        var: String,

        /// Output image path (PNG)
        #[arg(short, long)]
        output: PathBuf,

        /// Panel width in inches
        #[arg(long, default_value_t = 8.0)]
        width: f64,

        /// Panel height in inches
        #[arg(long, default_value_t = 3.0)]
        height: f64,

        /// Export resolution in dots per inch
        #[arg(long, default_value_t = 600)]
        dpi: u32,

        /// Colormap (jet, viridis, plasma, bluered)
        #[arg(long, default_value = "jet")]
        cmap: String,

        /// Lower color bound (defaults to the rounded data minimum)
        #[arg(long)]
        vmin: Option<f64>,

        /// Upper color bound (defaults to the rounded data maximum)
        #[arg(long)]
        vmax: Option<f64>,

        /// X axis label
        #[arg(long)]
        xlabel: Option<String>,

        /// Y axis label
        #[arg(long, default_value = "Depth (m)")]
        ylabel: String,

        /// Colorbar label (defaults to the variable's long name and units)
        #[arg(long)]
        vlabel: Option<String>,

        /// X tick label rotation in degrees
        #[arg(long, default_value_t = 45.0)]
        rotation: f64,
    },

    /// List plottable variables with normalized display metadata
    Vars {
        /// GOTM-ERSEM output netCDF file
        file: PathBuf,
    },

    /// Rewrite timestamps of a text time series onto an even datetime grid
    FixTime {
        /// Input time-series file
        input: PathBuf,

        /// Output file with corrected timestamps
        output: PathBuf,

        /// Start datetime, e.g. "2020-01-01 00:00:00"
        #[arg(long)]
        start: String,

        /// End datetime (inclusive)
        #[arg(long)]
        end: String,

        /// Time step, e.g. 1h, 30min, 1d
        #[arg(long)]
        freq: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let log_path = log_path.clone();
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_writer(move || {
                std::fs::OpenOptions::new()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(&log_path)
                    .expect("Failed to open log file")
            })
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting Hovmoller");
    }

    match args.command {
        Command::Plot {
            file,
            var,
            output,
            width,
            height,
            dpi,
            cmap,
            vmin,
            vmax,
            xlabel,
            ylabel,
            vlabel,
            rotation,
        } => {
            let cmap: Colormap = cmap
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;

            let mut ds = GotmDataset::open(&file)
                .with_context(|| format!("opening {}", file.display()))?;
            let attrs = ds.normalized_attrs()?;
            let var_attrs = attrs.get(&var);

            let hints = SelectionHints {
                vrange: var_attrs.map(|a| a.range),
                xlabel,
                ylabel: Some(ylabel),
                vlabel: vlabel.or_else(|| var_attrs.and_then(|a| a.value_label())),
                ..SelectionHints::default()
            };
            let selection = VariableSelection::new(&mut ds, &var, hints)
                .with_context(|| format!("selecting '{}'", var))?;

            let cfg = PlotConfig {
                width,
                height,
                dpi,
                rotation,
                ..PlotConfig::default()
            };
            let opts = SaveOptions {
                mesh: MeshOptions {
                    cmap: Some(cmap),
                    vmin,
                    vmax,
                    ..MeshOptions::default()
                },
                ..SaveOptions::default()
            };
            let plotter = SectionPlotter::new(0, &ds, cfg, selection)?;
            plotter
                .save(&output, &opts)
                .with_context(|| format!("saving {}", output.display()))?;
            println!("Saved {}", output.display());
        }

        Command::Vars { file } => {
            let ds = GotmDataset::open(&file)
                .with_context(|| format!("opening {}", file.display()))?;
            let attrs = ds.normalized_attrs()?;
            if attrs.is_empty() {
                println!("No (time, z, lat, lon) variables found");
            }
            for (name, a) in &attrs {
                println!(
                    "{:<16} {:<40} [{}] range=({}, {})",
                    name,
                    a.long_name.as_deref().unwrap_or("-"),
                    a.units.as_deref().unwrap_or("-"),
                    a.range.0,
                    a.range.1
                );
            }
        }

        Command::FixTime {
            input,
            output,
            start,
            end,
            freq,
        } => {
            let start = parse_datetime(&start)?;
            let end = parse_datetime(&end)?;
            let step = timefix::parse_freq(&freq)?;
            timefix::update_datetime_in_file(&input, &output, start, end, step)?;
            println!("Wrote {}", output.display());
        }
    }

    Ok(())
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
        .with_context(|| format!("invalid datetime '{}' (expected YYYY-MM-DD [HH:MM:SS])", s))
}
