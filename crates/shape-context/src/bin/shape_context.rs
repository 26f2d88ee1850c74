use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use shape_context::io::{DescriptorReport, ShapeContextIoError, ShapeContextRunConfig};
use shape_context::{build_descriptors, NeighborhoodMode, ShapeContextError};

#[cfg(not(feature = "tracing"))]
use log::info;
#[cfg(feature = "tracing")]
use tracing::info;

#[cfg(feature = "tracing")]
use shape_context::core::init_tracing;
#[cfg(not(feature = "tracing"))]
use shape_context::core::{init_with_level, parse_level};

#[derive(Parser, Debug)]
#[command(name = "shape-context")]
#[command(about = "Compute Shape Context descriptors for a 2D point set")]
struct Cli {
    /// Log level (off, error, warn, info, debug, trace). Ignored with the
    /// `tracing` feature, which reads RUST_LOG instead.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute descriptors and write a JSON report.
    Compute(ComputeArgs),
    /// Write a run config with default parameters.
    InitConfig {
        /// Point file the config refers to.
        #[arg(long)]
        points: PathBuf,
        /// Where to write the config.
        #[arg(long, default_value = "shape_context_config.json")]
        out: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ComputeArgs {
    /// Point file (`{ "points": [[x, y], ...] }`). Overrides the config's `points_path`.
    #[arg(long)]
    points: Option<PathBuf>,
    /// Run config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Report path. Overrides the config's `output_path`.
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long)]
    nbins_r: Option<usize>,
    #[arg(long)]
    nbins_theta: Option<usize>,
    #[arg(long)]
    r_inner: Option<f64>,
    #[arg(long)]
    r_outer: Option<f64>,
    /// Local neighbourhood half-width.
    #[arg(long)]
    window: Option<f64>,
    /// Use the square box window instead of the legacy x-only filter.
    #[arg(long)]
    symmetric_window: bool,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Io(#[from] ShapeContextIoError),
    #[error(transparent)]
    Descriptor(#[from] ShapeContextError),
    #[error("no point file given (use --points or a config with points_path)")]
    MissingPoints,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match cli.command {
        Command::Compute(args) => compute(&args),
        Command::InitConfig { points, out } => init_config(&points, &out),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: &str) {
    if let Err(err) = init_with_level(parse_level(level)) {
        eprintln!("logger already installed: {err}");
    }
}

#[cfg(feature = "tracing")]
fn init_logging(_level: &str) {
    init_tracing(false);
}

fn resolve_config(args: &ComputeArgs) -> Result<ShapeContextRunConfig, CliError> {
    let mut cfg = match (&args.config, &args.points) {
        (Some(path), _) => ShapeContextRunConfig::load_json(path)?,
        (None, Some(points)) => ShapeContextRunConfig::new(points.to_string_lossy()),
        (None, None) => return Err(CliError::MissingPoints),
    };

    if let Some(points) = &args.points {
        cfg.points_path = points.to_string_lossy().into_owned();
    }
    if let Some(out) = &args.out {
        cfg.output_path = Some(out.to_string_lossy().into_owned());
    }
    if let Some(v) = args.nbins_r {
        cfg.params.nbins_r = v;
    }
    if let Some(v) = args.nbins_theta {
        cfg.params.nbins_theta = v;
    }
    if let Some(v) = args.r_inner {
        cfg.params.r_inner = v;
    }
    if let Some(v) = args.r_outer {
        cfg.params.r_outer = v;
    }
    if args.window.is_some() {
        cfg.params.window = args.window;
    }
    if args.symmetric_window {
        cfg.params.neighborhood = NeighborhoodMode::SymmetricBox;
    }
    Ok(cfg)
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip(args)))]
fn compute(args: &ComputeArgs) -> Result<(), CliError> {
    let cfg = resolve_config(args)?;
    let points = cfg.load_points()?;
    info!("loaded {} points from {}", points.len(), cfg.points_path);

    let mut report = DescriptorReport::new(&cfg, args.config.as_deref(), points.len());
    let outcome = build_descriptors(&points, &cfg.params);
    match &outcome {
        Ok(desc) => {
            info!(
                "computed {} descriptors of length {}",
                desc.num_points(),
                desc.descriptor_len()
            );
            report.set_descriptors(desc);
        }
        Err(err) => report.set_error(err),
    }

    let out_path = cfg.output_path();
    report.write_json(&out_path)?;
    println!("wrote report JSON to {}", out_path.display());

    outcome.map(|_| ()).map_err(CliError::from)
}

fn init_config(points: &Path, out: &Path) -> Result<(), CliError> {
    let cfg = ShapeContextRunConfig::new(points.to_string_lossy());
    cfg.write_json(out)?;
    println!("wrote config JSON to {}", out.display());
    Ok(())
}
