use crate::binning::log_radius_edges;
use crate::ParamsError;
use serde::{Deserialize, Serialize};

/// How the optional window selects neighbours around a centre point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborhoodMode {
    /// Neighbour `x` must lie within `window` of the centre's `x` **and** of
    /// the centre's `y`. The neighbour's `y` is never inspected.
    ///
    /// This is the filter descriptors were historically computed with; keep
    /// it when comparing against previously stored descriptors.
    #[default]
    Legacy,
    /// Axis-aligned square box: neighbour `x` against centre `x`, neighbour
    /// `y` against centre `y`.
    SymmetricBox,
}

/// Histogram grid parameters for Shape Context descriptors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeContextParams {
    /// Number of log-radius bins (histogram rows).
    #[serde(default = "default_nbins_r")]
    pub nbins_r: usize,
    /// Number of angle bins on `[0, 2π)` (histogram columns).
    #[serde(default = "default_nbins_theta")]
    pub nbins_theta: usize,
    /// First (smallest) log-spaced radius edge, in mean-distance units.
    #[serde(default = "default_r_inner")]
    pub r_inner: f64,
    /// Last (largest) log-spaced radius edge, in mean-distance units.
    #[serde(default = "default_r_outer")]
    pub r_outer: f64,
    /// Optional half-width of the local neighbourhood, in input units.
    /// `None` bins every point against every point.
    #[serde(default, alias = "max_window_size")]
    pub window: Option<f64>,
    #[serde(default)]
    pub neighborhood: NeighborhoodMode,
}

fn default_nbins_r() -> usize {
    5
}

fn default_nbins_theta() -> usize {
    12
}

fn default_r_inner() -> f64 {
    0.125
}

fn default_r_outer() -> f64 {
    2.0
}

impl Default for ShapeContextParams {
    fn default() -> Self {
        Self {
            nbins_r: default_nbins_r(),
            nbins_theta: default_nbins_theta(),
            r_inner: default_r_inner(),
            r_outer: default_r_outer(),
            window: None,
            neighborhood: NeighborhoodMode::default(),
        }
    }
}

impl ShapeContextParams {
    /// All-pairs parameters with the given grid.
    pub fn new(nbins_r: usize, nbins_theta: usize, r_inner: f64, r_outer: f64) -> Self {
        Self {
            nbins_r,
            nbins_theta,
            r_inner,
            r_outer,
            window: None,
            neighborhood: NeighborhoodMode::default(),
        }
    }

    pub fn with_window(mut self, window: f64) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_neighborhood(mut self, neighborhood: NeighborhoodMode) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Length of one flattened descriptor (`nbins_r * nbins_theta`).
    #[inline]
    pub fn descriptor_len(&self) -> usize {
        self.nbins_r * self.nbins_theta
    }

    /// Check bin counts, radius bounds and the window.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.nbins_r < 1 {
            return Err(ParamsError::NoRadiusBins);
        }
        if self.nbins_theta < 1 {
            return Err(ParamsError::NoAngleBins);
        }
        let radii_ok = |r: f64| r.is_finite() && r > 0.0;
        if !radii_ok(self.r_inner) || !radii_ok(self.r_outer) {
            return Err(ParamsError::NonPositiveRadius {
                r_inner: self.r_inner,
                r_outer: self.r_outer,
            });
        }
        if self.r_inner >= self.r_outer {
            return Err(ParamsError::InvertedRadii {
                r_inner: self.r_inner,
                r_outer: self.r_outer,
            });
        }
        if let Some(window) = self.window {
            if !window.is_finite() || window <= 0.0 {
                return Err(ParamsError::InvalidWindow { window });
            }
        }
        Ok(())
    }

    /// Upper edges of the log-radius bins, ascending.
    pub fn radius_edges(&self) -> Vec<f64> {
        log_radius_edges(self.nbins_r, self.r_inner, self.r_outer)
    }
}
