use crate::ParamsError;
use serde::{Deserialize, Serialize};

/// Check that an `nbins_r × nbins_theta` grid is non-empty and holds `len` cells.
pub(crate) fn check_grid(
    nbins_r: usize,
    nbins_theta: usize,
    len: usize,
) -> Result<(), ParamsError> {
    if nbins_r < 1 {
        return Err(ParamsError::NoRadiusBins);
    }
    if nbins_theta < 1 {
        return Err(ParamsError::NoAngleBins);
    }
    if nbins_r.checked_mul(nbins_theta) != Some(len) {
        return Err(ParamsError::GridMismatch {
            nbins_r,
            nbins_theta,
            len,
        });
    }
    Ok(())
}

/// One point's `nbins_r × nbins_theta` log-polar histogram.
///
/// Cells are stored radius-major: cell `(r, t)` lives at `r * nbins_theta + t`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHistogram")]
pub struct LogPolarHistogram {
    nbins_r: usize,
    nbins_theta: usize,
    counts: Vec<f64>,
}

#[derive(Deserialize)]
struct RawHistogram {
    nbins_r: usize,
    nbins_theta: usize,
    counts: Vec<f64>,
}

impl TryFrom<RawHistogram> for LogPolarHistogram {
    type Error = ParamsError;

    fn try_from(raw: RawHistogram) -> Result<Self, Self::Error> {
        Self::from_flat(raw.nbins_r, raw.nbins_theta, raw.counts)
    }
}

impl LogPolarHistogram {
    pub fn new(nbins_r: usize, nbins_theta: usize) -> Self {
        Self {
            nbins_r,
            nbins_theta,
            counts: vec![0.0; nbins_r * nbins_theta],
        }
    }

    /// Wrap a flattened row, checking it against the grid.
    pub fn from_flat(
        nbins_r: usize,
        nbins_theta: usize,
        counts: Vec<f64>,
    ) -> Result<Self, ParamsError> {
        check_grid(nbins_r, nbins_theta, counts.len())?;
        Ok(Self {
            nbins_r,
            nbins_theta,
            counts,
        })
    }

    /// Length already matches the grid.
    pub(crate) fn from_row(nbins_r: usize, nbins_theta: usize, counts: Vec<f64>) -> Self {
        debug_assert_eq!(counts.len(), nbins_r * nbins_theta);
        Self {
            nbins_r,
            nbins_theta,
            counts,
        }
    }

    #[inline]
    pub fn nbins_r(&self) -> usize {
        self.nbins_r
    }

    #[inline]
    pub fn nbins_theta(&self) -> usize {
        self.nbins_theta
    }

    #[inline]
    pub fn get(&self, r: usize, t: usize) -> f64 {
        self.counts[r * self.nbins_theta + t]
    }

    #[inline]
    pub fn increment(&mut self, r: usize, t: usize) {
        self.counts[r * self.nbins_theta + t] += 1.0;
    }

    /// Sum over all cells: the number of pairings that were binned.
    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }

    /// Cells with a non-zero count, as `(r, t, count)`.
    pub fn nonzero_cells(&self) -> Vec<(usize, usize, f64)> {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c != 0.0)
            .map(|(k, &c)| (k / self.nbins_theta, k % self.nbins_theta, c))
            .collect()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.counts
    }
}
