//! Shape Context descriptors for 2D point sets.
//!
//! For every point the descriptor is a log-polar histogram of where the
//! other points lie: distance bucketed on a log scale (in units of the mean
//! pairwise distance), direction bucketed on `[0, 2π)` relative to the
//! direction between the two farthest points. The result is invariant to
//! uniform scaling and to rigid rotation of the input.
//!
//! This crate is purely geometric. It does not load images, detect edges or
//! sample contour points; it takes the points as given.
//!
//! ```
//! use shape_context_core::{build_descriptors, PointSet, ShapeContextParams};
//!
//! let points = PointSet::from_xy(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0])?;
//! let params = ShapeContextParams::new(2, 4, 0.1, 2.0);
//! let desc = build_descriptors(&points, &params)?;
//! assert_eq!(desc.num_points(), 4);
//! assert_eq!(desc.descriptor_len(), 8);
//! # Ok::<(), shape_context_core::ShapeContextError>(())
//! ```
//!
//! Behaviour worth knowing about:
//! - every point is also paired with itself; the zero self-distance lands in
//!   the last radius row, angle column 0;
//! - pairs whose normalised distance reaches the outermost edge are dropped;
//! - the default window filter is [`NeighborhoodMode::Legacy`], which checks a
//!   neighbour's `x` against both of the centre's ranges.

mod binning;
mod descriptor;
mod error;
mod geometry;
mod histogram;
mod logger;
mod neighborhood;
mod params;
mod points;

pub use binning::{log_radius_edges, LogPolarBins};
pub use descriptor::{build_descriptors, ShapeContextBuilder, ShapeContextDescriptors};
pub use error::{InputError, ParamsError, ShapeContextError};
pub use geometry::{PairwiseGeometry, ANGLE_SNAP_EPS};
pub use histogram::LogPolarHistogram;
pub use neighborhood::{neighbor_indices, window_contains};
pub use params::{NeighborhoodMode, ShapeContextParams};
pub use points::PointSet;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, parse_level};
