/// An error type for the raster module.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RasterError {
    /// Error when the raster dimensions are zero.
    #[error("Raster dimensions must be non-zero, got {0}x{1}")]
    ZeroSize(usize, usize),

    /// Error when the raster has no bands.
    #[error("Raster must have at least one band")]
    ZeroBands,

    /// Error when the band offset table does not match the band count.
    #[error("Band offset table has {0} entries for {1} bands")]
    BandOffsetMismatch(usize, usize),

    /// Error when the sample buffer is too short for the layout.
    #[error("Data length ({0}) does not cover the raster layout ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when a band index is out of range.
    #[error("Band index {0} out of range for {1} bands")]
    BandOutOfRange(usize, usize),

    /// Error when a mask buffer is too short for its bounds.
    #[error("Mask length ({0}) does not cover its bounds ({1})")]
    InvalidMaskLength(usize, usize),
}
