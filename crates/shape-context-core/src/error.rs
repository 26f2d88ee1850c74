/// Problems with the supplied point set.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("point set is empty")]
    EmptyPointSet,
    #[error("points must have exactly 2 coordinates (got {dims})")]
    WrongDimension { dims: usize },
    #[error("flat coordinate buffer must hold x, y pairs (got {len} values)")]
    OddCoordinateCount { len: usize },
    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
    #[error("all {count} points coincide, mean pairwise distance is zero")]
    CoincidentPoints { count: usize },
}

/// Histogram grid parameter validation errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    #[error("nbins_r must be >= 1")]
    NoRadiusBins,
    #[error("nbins_theta must be >= 1")]
    NoAngleBins,
    #[error("r_inner and r_outer must be finite and > 0 (got r_inner={r_inner}, r_outer={r_outer})")]
    NonPositiveRadius { r_inner: f64, r_outer: f64 },
    #[error("r_inner must be < r_outer (got r_inner={r_inner}, r_outer={r_outer})")]
    InvertedRadii { r_inner: f64, r_outer: f64 },
    #[error("window must be finite and > 0 (got {window})")]
    InvalidWindow { window: f64 },
    #[error("{nbins_r}x{nbins_theta} grid does not match {len} cells")]
    GridMismatch {
        nbins_r: usize,
        nbins_theta: usize,
        len: usize,
    },
}

/// Errors returned by the descriptor builder.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ShapeContextError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] ParamsError),
}
