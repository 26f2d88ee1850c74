//! High-level facade crate for the `shape-context-*` workspace.
//!
//! This crate provides:
//! - re-exports of the descriptor builder from `shape-context-core`,
//! - JSON helpers for point files, run configs and descriptor reports,
//! - the `shape-context` command-line tool (feature `cli`).
//!
//! ## Quickstart
//!
//! ```no_run
//! use shape_context::io::{PointSetFile, ShapeContextRunConfig};
//! use shape_context::build_descriptors;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = ShapeContextRunConfig::load_json("run.json")?;
//! let points = cfg.load_points()?;
//! let desc = build_descriptors(&points, &cfg.params)?;
//! println!("{} descriptors of length {}", desc.num_points(), desc.descriptor_len());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `shape_context::core`: point sets, parameters, geometry, binning, descriptors.
//! - `shape_context::io`: JSON files on disk.
//!
//! Features: `parallel` fills descriptor rows on the rayon pool, `tracing`
//! adds spans and a `tracing-subscriber` initializer.

pub use shape_context_core as core;

pub use shape_context_core::{
    build_descriptors, InputError, LogPolarHistogram, NeighborhoodMode, ParamsError, PointSet,
    ShapeContextBuilder, ShapeContextDescriptors, ShapeContextError, ShapeContextParams,
};

pub mod io;
