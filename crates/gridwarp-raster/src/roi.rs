use crate::error::RasterError;
use crate::raster::Rect;

/// Region-of-interest sampler.
///
/// A mask restricting which source pixels may contribute to resampled
/// output. Implementations must be cheap to query and safe to share
/// across row workers.
pub trait RoiSampler: Sync {
    /// Bounding rectangle outside which [`RoiSampler::contains`] is
    /// always false.
    fn bounds(&self) -> Rect;

    /// Whether the source pixel (x, y) is inside the region of interest.
    fn contains(&self, x: i64, y: i64) -> bool;
}

/// Dense ROI mask backed by a byte buffer (accessor mode).
///
/// The mask holds exactly one sample per source pixel with its own
/// scanline stride, independent of the band count of the raster it
/// co-registers with. A sample of 0 excludes the pixel; any nonzero
/// value includes it.
///
/// # Example
///
/// ```
/// use gridwarp_raster::{DenseRoi, Rect, RoiSampler};
///
/// let mask = [1u8, 0, 1, 1];
/// let roi = DenseRoi::new(&mask, Rect::new(0, 0, 2, 2), 2).unwrap();
/// assert!(roi.contains(0, 0));
/// assert!(!roi.contains(1, 0));
/// assert!(!roi.contains(5, 5));
/// ```
#[derive(Debug, Clone)]
pub struct DenseRoi<'a> {
    mask: &'a [u8],
    bounds: Rect,
    line_stride: usize,
}

impl<'a> DenseRoi<'a> {
    /// Create a dense ROI from a mask buffer, its pixel bounds and its
    /// scanline stride.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is too short to cover the bounds.
    pub fn new(mask: &'a [u8], bounds: Rect, line_stride: usize) -> Result<Self, RasterError> {
        let (w, h) = (bounds.width() as usize, bounds.height() as usize);
        let required = if w == 0 || h == 0 {
            0
        } else {
            (h - 1) * line_stride + w
        };
        if mask.len() < required {
            return Err(RasterError::InvalidMaskLength(mask.len(), required));
        }
        Ok(Self {
            mask,
            bounds,
            line_stride,
        })
    }
}

impl RoiSampler for DenseRoi<'_> {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    fn contains(&self, x: i64, y: i64) -> bool {
        if !self.bounds.contains(x, y) {
            return false;
        }
        // one mask sample per pixel, regardless of the image band count
        let idx = (y - self.bounds.min_y) as usize * self.line_stride
            + (x - self.bounds.min_x) as usize;
        self.mask[idx] != 0
    }
}

/// ROI backed by a bounded random-access point query (iterator mode).
///
/// Used when the region is too large or complex to materialize as a
/// dense buffer.
pub struct PointRoi<F> {
    query: F,
    bounds: Rect,
}

impl<F> PointRoi<F>
where
    F: Fn(i64, i64) -> bool + Sync,
{
    /// Create a point-query ROI with its bounding rectangle.
    pub fn new(bounds: Rect, query: F) -> Self {
        Self { query, bounds }
    }
}

impl<F> RoiSampler for PointRoi<F>
where
    F: Fn(i64, i64) -> bool + Sync,
{
    fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    fn contains(&self, x: i64, y: i64) -> bool {
        self.bounds.contains(x, y) && (self.query)(x, y)
    }
}
