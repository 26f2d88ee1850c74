//! Log-polar bin assignment for every ordered point pair.

use crate::geometry::PairwiseGeometry;
use log::warn;
use nalgebra::DMatrix;
use std::f64::consts::TAU;

/// Floored division with an exact remainder.
///
/// `a - b * q` is computed through `fmod`, so a quotient that is an exact
/// integer in real arithmetic is not pushed across the integer boundary by
/// the rounding of `a / b`.
pub(crate) fn floor_div(a: f64, b: f64) -> f64 {
    let rem = a % b;
    let mut div = (a - rem) / b;
    if rem != 0.0 && ((b < 0.0) != (rem < 0.0)) {
        div -= 1.0;
    }
    if div != 0.0 {
        let floored = div.floor();
        if div - floored > 0.5 {
            floored + 1.0
        } else {
            floored
        }
    } else {
        0.0f64.copysign(a / b)
    }
}

/// `nbins_r` log-spaced edges from `r_inner` to `r_outer` inclusive.
///
/// With a single bin the only edge is `r_inner`.
pub fn log_radius_edges(nbins_r: usize, r_inner: f64, r_outer: f64) -> Vec<f64> {
    let start = r_inner.log10();
    let stop = r_outer.log10();
    match nbins_r {
        0 => Vec::new(),
        1 => vec![10f64.powf(start)],
        n => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|m| {
                    let exponent = if m == n - 1 {
                        stop
                    } else {
                        m as f64 * step + start
                    };
                    10f64.powf(exponent)
                })
                .collect()
        }
    }
}

/// Radius bin id: how many edges lie strictly above `normalized`.
///
/// `0` means the pair is outside the grid; id `k` maps to histogram row `k - 1`.
#[inline]
pub(crate) fn radius_bin_id(normalized: f64, edges: &[f64]) -> usize {
    edges.iter().filter(|&&edge| normalized < edge).count()
}

/// Zero-based angle column for an angle in `[0, 2π]`.
pub(crate) fn angle_column(angle: f64, nbins_theta: usize) -> usize {
    let width = TAU / nbins_theta as f64;
    let col = floor_div(angle, width) as usize;
    if col >= nbins_theta {
        // only an angle of exactly 2π gets here; 2π ≡ 0
        warn!("angle {angle} fell on the 2π boundary, wrapped into column 0");
        col % nbins_theta
    } else {
        col
    }
}

/// Precomputed `(radius id, angle column)` for all ordered pairs.
///
/// Read-only once built, so histogram rows can be filled independently.
#[derive(Clone, Debug)]
pub struct LogPolarBins {
    radius_ids: DMatrix<usize>,
    angle_cols: DMatrix<usize>,
}

impl LogPolarBins {
    pub fn assign(geometry: &PairwiseGeometry, edges: &[f64], nbins_theta: usize) -> Self {
        let n = geometry.len();
        let radius_ids = DMatrix::from_fn(n, n, |i, j| {
            radius_bin_id(geometry.normalized_distance(i, j), edges)
        });
        let angle_cols = DMatrix::from_fn(n, n, |i, j| {
            angle_column(geometry.angle(i, j), nbins_theta)
        });
        Self {
            radius_ids,
            angle_cols,
        }
    }

    /// Raw radius bin id for `(i, j)`, `0` when excluded.
    #[inline]
    pub fn radius_id(&self, i: usize, j: usize) -> usize {
        self.radius_ids[(i, j)]
    }

    #[inline]
    pub fn angle_col(&self, i: usize, j: usize) -> usize {
        self.angle_cols[(i, j)]
    }

    /// Histogram cell `(row, col)` of `j` relative to `i`, or `None` if excluded.
    #[inline]
    pub fn cell(&self, i: usize, j: usize) -> Option<(usize, usize)> {
        match self.radius_ids[(i, j)] {
            0 => None,
            id => Some((id - 1, self.angle_cols[(i, j)])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn floor_div_matches_floored_semantics() {
        assert_eq!(floor_div(7.0, 2.0), 3.0);
        assert_eq!(floor_div(-7.0, 2.0), -4.0);
        assert_eq!(floor_div(0.0, 3.0), 0.0);
        assert_eq!(floor_div(1.0, 0.8535533905932738), 1.0);
        // exact multiples stay on their integer
        assert_eq!(floor_div(PI, FRAC_PI_2), 2.0);
        assert_eq!(floor_div(3.0 * FRAC_PI_2, FRAC_PI_2), 3.0);
    }

    #[test]
    fn log_edges_span_inner_to_outer() {
        let edges = log_radius_edges(5, 0.125, 2.0);
        assert_eq!(edges.len(), 5);
        assert_relative_eq!(edges[0], 0.125, epsilon = 1e-12);
        assert_relative_eq!(edges[1], 0.25, epsilon = 1e-12);
        assert_relative_eq!(edges[2], 0.5, epsilon = 1e-12);
        assert_relative_eq!(edges[3], 1.0, epsilon = 1e-12);
        assert_relative_eq!(edges[4], 2.0, epsilon = 1e-12);
        assert!(edges.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(log_radius_edges(1, 0.1, 2.0).len(), 1);
        assert_relative_eq!(log_radius_edges(1, 0.1, 2.0)[0], 0.1, epsilon = 1e-12);
    }

    #[test]
    fn radius_ids_count_edges_above() {
        let edges = [0.1, 2.0];
        assert_eq!(radius_bin_id(0.0, &edges), 2);
        assert_eq!(radius_bin_id(1.0, &edges), 1);
        assert_eq!(radius_bin_id(2.0, &edges), 0);
        assert_eq!(radius_bin_id(5.0, &edges), 0);
    }

    #[test]
    fn angle_columns_cover_the_circle() {
        assert_eq!(angle_column(0.0, 4), 0);
        assert_eq!(angle_column(FRAC_PI_2 - 1e-9, 4), 0);
        assert_eq!(angle_column(FRAC_PI_2, 4), 1);
        assert_eq!(angle_column(PI, 4), 2);
        assert_eq!(angle_column(TAU - 1e-9, 4), 3);
        assert_eq!(angle_column(TAU, 4), 0);
        assert_eq!(angle_column(1.0, 1), 0);
    }
}
