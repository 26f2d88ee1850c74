//! Validated 2D point sets.

use crate::InputError;
use nalgebra::{DMatrix, Point2};

/// Ordered, non-empty set of finite 2D points.
///
/// `x` is the first coordinate column and `y` the second. The order is kept
/// as given: descriptor rows come back in the same order.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    points: Vec<Point2<f64>>,
}

impl PointSet {
    /// Validate and wrap a list of points.
    pub fn new(points: Vec<Point2<f64>>) -> Result<Self, InputError> {
        if points.is_empty() {
            return Err(InputError::EmptyPointSet);
        }
        if let Some(index) = points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(InputError::NonFiniteCoordinate { index });
        }
        Ok(Self { points })
    }

    /// Build from a flattened `[x0, y0, x1, y1, ...]` buffer.
    pub fn from_xy(coords: &[f64]) -> Result<Self, InputError> {
        if coords.len() % 2 != 0 {
            return Err(InputError::OddCoordinateCount { len: coords.len() });
        }
        Self::new(
            coords
                .chunks_exact(2)
                .map(|xy| Point2::new(xy[0], xy[1]))
                .collect(),
        )
    }

    /// Build from `[x, y]` rows. Every row must hold exactly two values.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, InputError> {
        let mut points = Vec::with_capacity(rows.len());
        for row in rows {
            match row.as_ref() {
                &[x, y] => points.push(Point2::new(x, y)),
                other => return Err(InputError::WrongDimension { dims: other.len() }),
            }
        }
        Self::new(points)
    }

    /// Build from an `N × 2` matrix, one point per row.
    pub fn from_matrix(m: &DMatrix<f64>) -> Result<Self, InputError> {
        if m.ncols() != 2 {
            return Err(InputError::WrongDimension { dims: m.ncols() });
        }
        Self::new(
            m.row_iter()
                .map(|row| Point2::new(row[0], row[1]))
                .collect(),
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false` for a constructed set; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Point2<f64>] {
        &self.points
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Point2<f64>> {
        self.points.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point2<f64>> {
        self.points.iter()
    }

    /// Points as `[x, y]` pairs.
    pub fn to_rows(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|p| [p.x, p.y]).collect()
    }

    /// Apply `f` to every point, keeping validation.
    pub fn map(&self, f: impl Fn(&Point2<f64>) -> Point2<f64>) -> Result<Self, InputError> {
        Self::new(self.points.iter().map(f).collect())
    }
}

impl TryFrom<Vec<Point2<f64>>> for PointSet {
    type Error = InputError;

    fn try_from(points: Vec<Point2<f64>>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point2<f64>;
    type IntoIter = std::slice::Iter<'a, Point2<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
