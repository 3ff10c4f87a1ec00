use gridwarp_raster::RasterError;

/// Errors that can occur when configuring or running a warp.
///
/// All variants are configuration-time failures; per-pixel missing
/// input (outside the source, ROI-excluded, no-data, NaN) is resolved
/// by substitution and never surfaces as an error.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum WarpError {
    /// The affine matrix has zero determinant and cannot be inverted.
    #[error("Affine matrix is not invertible")]
    SingularTransform,

    /// A raster does not have the band count the engine was built for.
    #[error("Raster has {0} bands but the engine expects {1}")]
    BandCountMismatch(usize, usize),

    /// The fill policy does not provide one value per band.
    #[error("Fill policy provides {0} values for {1} bands")]
    FillBandMismatch(usize, usize),

    /// The engine must be configured with at least one band.
    #[error("Engine requires at least one band")]
    ZeroBands,

    /// Error from the underlying raster views.
    #[error(transparent)]
    Raster(#[from] RasterError),
}
