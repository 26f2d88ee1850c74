//! Descriptor builder.
//!
//! The pairwise phase (distances, reference orientation, bin ids) runs
//! first and is read-only afterwards; the per-point phase then fills one
//! output row per point. With the `parallel` feature the rows are filled on
//! the rayon pool, each worker owning a disjoint row of a pre-allocated
//! buffer.

use crate::binning::LogPolarBins;
use crate::geometry::PairwiseGeometry;
use crate::histogram::{check_grid, LogPolarHistogram};
use crate::neighborhood::neighbor_indices;
use crate::{ParamsError, PointSet, ShapeContextError, ShapeContextParams};
use log::debug;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// `N × (nbins_r · nbins_theta)` descriptor matrix, one row per input point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDescriptors")]
pub struct ShapeContextDescriptors {
    nbins_r: usize,
    nbins_theta: usize,
    data: DMatrix<f64>,
}

#[derive(Deserialize)]
struct RawDescriptors {
    nbins_r: usize,
    nbins_theta: usize,
    data: DMatrix<f64>,
}

impl TryFrom<RawDescriptors> for ShapeContextDescriptors {
    type Error = ParamsError;

    fn try_from(raw: RawDescriptors) -> Result<Self, Self::Error> {
        check_grid(raw.nbins_r, raw.nbins_theta, raw.data.ncols())?;
        Ok(Self {
            nbins_r: raw.nbins_r,
            nbins_theta: raw.nbins_theta,
            data: raw.data,
        })
    }
}

impl ShapeContextDescriptors {
    #[inline]
    pub fn num_points(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn nbins_r(&self) -> usize {
        self.nbins_r
    }

    #[inline]
    pub fn nbins_theta(&self) -> usize {
        self.nbins_theta
    }

    /// Columns per row.
    #[inline]
    pub fn descriptor_len(&self) -> usize {
        self.data.ncols()
    }

    #[inline]
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    pub fn into_matrix(self) -> DMatrix<f64> {
        self.data
    }

    /// Flattened descriptor of point `i`.
    pub fn descriptor(&self, i: usize) -> Vec<f64> {
        self.data.row(i).iter().copied().collect()
    }

    /// Descriptor of point `i` as a 2D histogram.
    pub fn histogram(&self, i: usize) -> LogPolarHistogram {
        LogPolarHistogram::from_row(self.nbins_r, self.nbins_theta, self.descriptor(i))
    }

    /// Number of binned pairings per point.
    pub fn row_totals(&self) -> Vec<f64> {
        self.data.row_iter().map(|row| row.sum()).collect()
    }

    /// Rows as plain vectors, in input order.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }
}

/// Builds Shape Context descriptors for a fixed, validated parameter set.
#[derive(Clone, Debug)]
pub struct ShapeContextBuilder {
    params: ShapeContextParams,
    radius_edges: Vec<f64>,
}

impl ShapeContextBuilder {
    pub fn new(params: ShapeContextParams) -> Result<Self, ParamsError> {
        params.validate()?;
        let radius_edges = params.radius_edges();
        Ok(Self {
            params,
            radius_edges,
        })
    }

    #[inline]
    pub fn params(&self) -> &ShapeContextParams {
        &self.params
    }

    /// Log-spaced radius edges, ascending.
    #[inline]
    pub fn radius_edges(&self) -> &[f64] {
        &self.radius_edges
    }

    /// Compute one descriptor row per point.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "debug",
            skip(self, points),
            fields(
                points = points.len(),
                nbins_r = self.params.nbins_r,
                nbins_theta = self.params.nbins_theta
            )
        )
    )]
    pub fn build(&self, points: &PointSet) -> Result<ShapeContextDescriptors, ShapeContextError> {
        let n = points.len();
        let geometry = PairwiseGeometry::new(points)?;
        let bins = LogPolarBins::assign(&geometry, &self.radius_edges, self.params.nbins_theta);

        let len = self.params.descriptor_len();
        let mut buffer = vec![0.0f64; n * len];
        self.fill_rows(points, &bins, &mut buffer);

        let data = DMatrix::from_row_slice(n, len, &buffer);
        debug!(
            "built {n} descriptors ({}x{} bins, window={:?}), {} pairings binned",
            self.params.nbins_r,
            self.params.nbins_theta,
            self.params.window,
            data.sum()
        );

        Ok(ShapeContextDescriptors {
            nbins_r: self.params.nbins_r,
            nbins_theta: self.params.nbins_theta,
            data,
        })
    }

    #[cfg(not(feature = "parallel"))]
    fn fill_rows(&self, points: &PointSet, bins: &LogPolarBins, buffer: &mut [f64]) {
        let len = self.params.descriptor_len();
        buffer
            .chunks_mut(len)
            .enumerate()
            .for_each(|(i, row)| self.fill_row(points, bins, i, row));
    }

    #[cfg(feature = "parallel")]
    fn fill_rows(&self, points: &PointSet, bins: &LogPolarBins, buffer: &mut [f64]) {
        use rayon::prelude::*;

        let len = self.params.descriptor_len();
        buffer
            .par_chunks_mut(len)
            .enumerate()
            .for_each(|(i, row)| self.fill_row(points, bins, i, row));
    }

    fn fill_row(&self, points: &PointSet, bins: &LogPolarBins, i: usize, row: &mut [f64]) {
        let mut hist = LogPolarHistogram::new(self.params.nbins_r, self.params.nbins_theta);
        for j in neighbor_indices(points, i, self.params.window, self.params.neighborhood) {
            if let Some((r, t)) = bins.cell(i, j) {
                hist.increment(r, t);
            }
        }
        row.copy_from_slice(hist.as_slice());
    }
}

/// Validate `params` and compute descriptors for `points`.
pub fn build_descriptors(
    points: &PointSet,
    params: &ShapeContextParams,
) -> Result<ShapeContextDescriptors, ShapeContextError> {
    ShapeContextBuilder::new(params.clone())?.build(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InputError;

    fn unit_square() -> PointSet {
        PointSet::from_xy(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]).unwrap()
    }

    #[test]
    fn unit_square_matches_hand_computed_histograms() {
        let params = ShapeContextParams::new(2, 4, 0.1, 2.0);
        let desc = build_descriptors(&unit_square(), &params).unwrap();

        // row 0 (far): the three other corners; row 1 (near): the self-pair in column 0
        let expected = [
            [2.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0],
            [1.0, 2.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 2.0, 0.0, 1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 2.0, 1.0, 0.0, 0.0, 0.0],
        ];
        assert_eq!(desc.num_points(), 4);
        assert_eq!(desc.descriptor_len(), 8);
        for (i, row) in expected.iter().enumerate() {
            assert_eq!(desc.descriptor(i), row.to_vec(), "point {i}");
        }
        assert_eq!(desc.row_totals(), vec![4.0; 4]);
    }

    #[test]
    fn single_point_bins_only_its_self_pair() {
        let params = ShapeContextParams::default();
        let points = PointSet::from_xy(&[3.0, 4.0]).unwrap();
        let desc = build_descriptors(&points, &params).unwrap();

        assert_eq!(desc.num_points(), 1);
        let h = desc.histogram(0);
        assert_eq!(h.nonzero_cells(), vec![(params.nbins_r - 1, 0, 1.0)]);
    }

    #[test]
    fn builder_rejects_invalid_params() {
        let params = ShapeContextParams::new(0, 4, 0.1, 2.0);
        let err = build_descriptors(&unit_square(), &params).unwrap_err();
        assert_eq!(err, ShapeContextError::InvalidParameter(ParamsError::NoRadiusBins));
    }

    #[test]
    fn coincident_points_surface_as_invalid_input() {
        let points = PointSet::from_xy(&[2.0, 2.0, 2.0, 2.0]).unwrap();
        let err = build_descriptors(&points, &ShapeContextParams::default()).unwrap_err();
        assert_eq!(
            err,
            ShapeContextError::InvalidInput(InputError::CoincidentPoints { count: 2 })
        );
    }

    #[test]
    fn deserialization_rejects_inconsistent_grids() {
        let params = ShapeContextParams::new(2, 4, 0.1, 2.0);
        let desc = build_descriptors(&unit_square(), &params).unwrap();
        let json = serde_json::to_string(&desc).unwrap();
        let back: ShapeContextDescriptors = serde_json::from_str(&json).unwrap();
        assert_eq!(back, desc);

        // zero-sized grid over a 1x2 matrix
        let err = serde_json::from_str::<ShapeContextDescriptors>(
            r#"{"nbins_r":0,"nbins_theta":0,"data":[[1.0,0.0],1,2]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("nbins_r must be >= 1"));

        // 2x4 grid over rows of length 2
        let err = serde_json::from_str::<ShapeContextDescriptors>(
            r#"{"nbins_r":2,"nbins_theta":4,"data":[[1.0,0.0],1,2]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("2x4 grid does not match 2 cells"));
    }

    #[test]
    fn histogram_view_matches_flat_row() {
        let params = ShapeContextParams::new(2, 4, 0.1, 2.0);
        let desc = build_descriptors(&unit_square(), &params).unwrap();
        for i in 0..desc.num_points() {
            assert_eq!(desc.histogram(i).as_slice(), desc.descriptor(i).as_slice());
        }
        assert_eq!(desc.to_rows().len(), 4);
    }
}
