//! Neighbour selection around a centre point.

use crate::{NeighborhoodMode, PointSet};
use nalgebra::Point2;

/// Whether `other` falls inside the window of half-width `window` around `center`.
#[inline]
pub fn window_contains(
    center: &Point2<f64>,
    other: &Point2<f64>,
    window: f64,
    mode: NeighborhoodMode,
) -> bool {
    let x_range = (center.x - window)..=(center.x + window);
    let y_range = (center.y - window)..=(center.y + window);
    let second = match mode {
        NeighborhoodMode::Legacy => other.x,
        NeighborhoodMode::SymmetricBox => other.y,
    };
    x_range.contains(&other.x) && y_range.contains(&second)
}

/// Indices binned against `center`, ascending. The centre itself is a
/// candidate like any other point.
pub fn neighbor_indices(
    points: &PointSet,
    center: usize,
    window: Option<f64>,
    mode: NeighborhoodMode,
) -> impl Iterator<Item = usize> + '_ {
    let pts = points.as_slice();
    let c = pts[center];
    (0..pts.len()).filter(move |&j| match window {
        None => true,
        Some(w) => window_contains(&c, &pts[j], w, mode),
    })
}
