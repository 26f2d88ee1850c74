//! Pairwise distances and orientation-normalised angles.
//!
//! All angles are measured relative to the direction between the two
//! mutually farthest points, so a rigid rotation of the input leaves them
//! unchanged.

use crate::binning::floor_div;
use crate::{InputError, PointSet};
use log::debug;
use nalgebra::DMatrix;
use std::f64::consts::TAU;

/// Relative angles closer to zero than this are snapped to exactly zero.
pub const ANGLE_SNAP_EPS: f64 = 1e-7;

/// Derived `N × N` matrices for one descriptor computation.
#[derive(Clone, Debug)]
pub struct PairwiseGeometry {
    distances: DMatrix<f64>,
    mean_distance: f64,
    reference_pair: (usize, usize),
    reference_angle: f64,
    angles: DMatrix<f64>,
}

impl PairwiseGeometry {
    /// Compute distances, the reference orientation and normalised angles.
    ///
    /// Fails with [`InputError::CoincidentPoints`] when more than one point is
    /// given and all of them coincide.
    pub fn new(points: &PointSet) -> Result<Self, InputError> {
        let pts = points.as_slice();
        let n = pts.len();

        let distances = DMatrix::from_fn(n, n, |i, j| nalgebra::distance(&pts[i], &pts[j]));

        let mut sum = 0.0;
        let mut reference_pair = (0, 0);
        let mut max_distance = f64::NEG_INFINITY;
        // row-major scan, first maximum wins
        for i in 0..n {
            for j in 0..n {
                let d = distances[(i, j)];
                sum += d;
                if d > max_distance {
                    max_distance = d;
                    reference_pair = (i, j);
                }
            }
        }
        let mean_distance = sum / (n * n) as f64;
        if mean_distance == 0.0 && n > 1 {
            return Err(InputError::CoincidentPoints { count: n });
        }

        let raw = DMatrix::from_fn(n, n, |i, j| {
            let d = pts[j] - pts[i];
            d.y.atan2(d.x)
        });
        let reference_angle = raw[reference_pair];

        let angles = DMatrix::from_fn(n, n, |i, j| {
            let mut theta = raw[(i, j)];
            if i != j {
                theta -= reference_angle;
            }
            if theta.abs() < ANGLE_SNAP_EPS {
                theta = 0.0;
            }
            if theta < 0.0 {
                theta += TAU;
            }
            theta
        });

        debug!(
            "pairwise geometry: n={n} mean_distance={mean_distance:.6} reference=({}, {}) angle={reference_angle:.6}",
            reference_pair.0, reference_pair.1
        );

        Ok(Self {
            distances,
            mean_distance,
            reference_pair,
            reference_angle,
            angles,
        })
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.distances.nrows()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Euclidean distance matrix.
    #[inline]
    pub fn distances(&self) -> &DMatrix<f64> {
        &self.distances
    }

    /// Mean over all `N²` entries, zero diagonal included.
    #[inline]
    pub fn mean_distance(&self) -> f64 {
        self.mean_distance
    }

    /// First farthest pair `(p, q)` in row-major order.
    #[inline]
    pub fn reference_pair(&self) -> (usize, usize) {
        self.reference_pair
    }

    /// Raw angle from `p` to `q`, used as the zero direction.
    #[inline]
    pub fn reference_angle(&self) -> f64 {
        self.reference_angle
    }

    /// `floor(d(i, j) / mean)`.
    ///
    /// A single point has a zero mean; its self-distance normalises to 0.
    pub fn normalized_distance(&self, i: usize, j: usize) -> f64 {
        if self.mean_distance == 0.0 {
            return 0.0;
        }
        floor_div(self.distances[(i, j)], self.mean_distance)
    }

    /// Angle of `j` seen from `i`, relative to the reference, in `[0, 2π]`.
    ///
    /// The diagonal keeps its raw value of zero.
    #[inline]
    pub fn angle(&self, i: usize, j: usize) -> f64 {
        self.angles[(i, j)]
    }

    /// Normalised angle matrix.
    #[inline]
    pub fn angles(&self) -> &DMatrix<f64> {
        &self.angles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn unit_square() -> PointSet {
        PointSet::from_xy(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]).unwrap()
    }

    #[test]
    fn distances_are_symmetric_with_zero_diagonal() {
        let g = PairwiseGeometry::new(&unit_square()).unwrap();
        let d = g.distances();
        assert_eq!(d.nrows(), 4);
        for i in 0..4 {
            assert_eq!(d[(i, i)], 0.0);
            for j in 0..4 {
                assert_eq!(d[(i, j)], d[(j, i)]);
            }
        }
        assert_relative_eq!(d[(0, 2)], 2f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(
            g.mean_distance(),
            (8.0 + 4.0 * 2f64.sqrt()) / 16.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn reference_pair_is_first_maximum() {
        let g = PairwiseGeometry::new(&unit_square()).unwrap();
        // (0, 2) and (1, 3) tie; row-major scan meets (0, 2) first
        assert_eq!(g.reference_pair(), (0, 2));
        assert_relative_eq!(g.reference_angle(), FRAC_PI_4, epsilon = 1e-15);
    }

    #[test]
    fn angles_are_relative_to_reference() {
        let g = PairwiseGeometry::new(&unit_square()).unwrap();
        assert_eq!(g.angle(0, 2), 0.0);
        assert_eq!(g.angle(0, 0), 0.0);
        assert_relative_eq!(g.angle(0, 1), TAU - FRAC_PI_4, epsilon = 1e-12);
        assert_relative_eq!(g.angle(1, 0), 3.0 * FRAC_PI_4, epsilon = 1e-12);
        assert_relative_eq!(g.angle(1, 3), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(g.angle(2, 0), PI, epsilon = 1e-12);
        assert!(g.angles().iter().all(|&a| (0.0..=TAU).contains(&a)));
    }

    #[test]
    fn normalized_distance_floors_by_mean() {
        let g = PairwiseGeometry::new(&unit_square()).unwrap();
        assert_eq!(g.normalized_distance(0, 0), 0.0);
        assert_eq!(g.normalized_distance(0, 1), 1.0);
        assert_eq!(g.normalized_distance(0, 2), 1.0);
    }

    #[test]
    fn single_point_is_not_degenerate() {
        let points = PointSet::from_xy(&[3.0, 4.0]).unwrap();
        let g = PairwiseGeometry::new(&points).unwrap();
        assert_eq!(g.mean_distance(), 0.0);
        assert_eq!(g.normalized_distance(0, 0), 0.0);
        assert_eq!(g.reference_pair(), (0, 0));
    }

    #[test]
    fn coincident_points_are_rejected() {
        let points = PointSet::from_xy(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]).unwrap();
        assert_eq!(
            PairwiseGeometry::new(&points).unwrap_err(),
            InputError::CoincidentPoints { count: 3 }
        );
    }
}
