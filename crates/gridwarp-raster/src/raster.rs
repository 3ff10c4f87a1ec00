use crate::error::RasterError;

/// Half-open rectangle in pixel coordinates.
///
/// # Examples
///
/// ```
/// use gridwarp_raster::Rect;
///
/// let r = Rect::new(0, 0, 4, 4);
/// assert!(r.contains(3, 3));
/// assert!(!r.contains(4, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Leftmost contained column.
    pub min_x: i64,
    /// Topmost contained row.
    pub min_y: i64,
    /// One past the rightmost contained column.
    pub max_x: i64,
    /// One past the bottommost contained row.
    pub max_y: i64,
}

impl Rect {
    /// Create a rectangle from its half-open bounds.
    pub fn new(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Whether the pixel (x, y) lies inside the rectangle.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }

    /// Width of the rectangle in pixels.
    pub fn width(&self) -> i64 {
        self.max_x - self.min_x
    }

    /// Height of the rectangle in pixels.
    pub fn height(&self) -> i64 {
        self.max_y - self.min_y
    }
}

/// Layout descriptor for a rectangular multi-band sample buffer.
///
/// The sample for pixel (x, y) in band b lives at
/// `band_offsets[b] + (y - min_y) * line_stride + (x - min_x) * pixel_stride`.
/// Both pixel-interleaved and banded (planar) buffers are described
/// uniformly this way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterDesc {
    /// Width of the region in pixels.
    pub width: usize,
    /// Height of the region in pixels.
    pub height: usize,
    /// Number of bands.
    pub bands: usize,
    /// Column of the leftmost pixel.
    pub min_x: i64,
    /// Row of the topmost pixel.
    pub min_y: i64,
    /// Sample distance between horizontally adjacent pixels.
    pub pixel_stride: usize,
    /// Sample distance between vertically adjacent pixels.
    pub line_stride: usize,
    /// Per-band offset of the first sample.
    pub band_offsets: Vec<usize>,
}

impl RasterDesc {
    /// Describe a pixel-interleaved buffer rooted at the origin.
    ///
    /// # Example
    ///
    /// ```
    /// use gridwarp_raster::RasterDesc;
    ///
    /// let desc = RasterDesc::interleaved(4, 3, 2);
    /// assert_eq!(desc.pixel_stride, 2);
    /// assert_eq!(desc.line_stride, 8);
    /// assert_eq!(desc.required_len(), 24);
    /// ```
    pub fn interleaved(width: usize, height: usize, bands: usize) -> Self {
        Self {
            width,
            height,
            bands,
            min_x: 0,
            min_y: 0,
            pixel_stride: bands,
            line_stride: width * bands,
            band_offsets: (0..bands).collect(),
        }
    }

    /// Describe a banded (planar) buffer rooted at the origin.
    pub fn banded(width: usize, height: usize, bands: usize) -> Self {
        Self {
            width,
            height,
            bands,
            min_x: 0,
            min_y: 0,
            pixel_stride: 1,
            line_stride: width,
            band_offsets: (0..bands).map(|b| b * width * height).collect(),
        }
    }

    /// Move the region origin to (min_x, min_y).
    pub fn with_origin(mut self, min_x: i64, min_y: i64) -> Self {
        self.min_x = min_x;
        self.min_y = min_y;
        self
    }

    /// Pixel bounds of the region.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.min_x,
            self.min_y,
            self.min_x + self.width as i64,
            self.min_y + self.height as i64,
        )
    }

    /// Minimum buffer length that covers every sample of the layout.
    pub fn required_len(&self) -> usize {
        let base = self.band_offsets.iter().copied().max().unwrap_or(0);
        base + (self.height - 1) * self.line_stride + (self.width - 1) * self.pixel_stride + 1
    }

    /// Flat index of the sample for pixel (x, y) in band b.
    ///
    /// The pixel must lie inside [`RasterDesc::bounds`].
    #[inline]
    pub fn index(&self, x: i64, y: i64, band: usize) -> usize {
        debug_assert!(self.bounds().contains(x, y));
        debug_assert!(band < self.bands);
        self.band_offsets[band]
            + (y - self.min_y) as usize * self.line_stride
            + (x - self.min_x) as usize * self.pixel_stride
    }

    /// Whether every scanline's samples fall within its own
    /// `line_stride` chunk, so rows can be processed independently.
    pub fn rows_are_independent(&self) -> bool {
        let last_in_row = (self.width - 1) * self.pixel_stride;
        self.band_offsets.iter().all(|&o| o + last_in_row < self.line_stride)
    }

    /// Descriptor of a single scanline, offset `row` lines down, with
    /// band offsets relative to the start of that line.
    pub fn scanline(&self, row: usize) -> Self {
        debug_assert!(row < self.height);
        Self {
            height: 1,
            min_y: self.min_y + row as i64,
            ..self.clone()
        }
    }

    fn validate(&self) -> Result<(), RasterError> {
        if self.width == 0 || self.height == 0 {
            return Err(RasterError::ZeroSize(self.width, self.height));
        }
        if self.bands == 0 {
            return Err(RasterError::ZeroBands);
        }
        if self.band_offsets.len() != self.bands {
            return Err(RasterError::BandOffsetMismatch(
                self.band_offsets.len(),
                self.bands,
            ));
        }
        Ok(())
    }
}

/// Read-only view over rectangular multi-band sample data.
///
/// The view borrows the caller's buffer for the duration of one
/// computation; nothing is retained past the call.
#[derive(Debug, Clone)]
pub struct Raster<'a, T> {
    data: &'a [T],
    desc: RasterDesc,
}

impl<'a, T: Copy> Raster<'a, T> {
    /// Create a view from a layout descriptor and a sample buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor is malformed or the buffer is
    /// too short to cover the layout.
    pub fn new(desc: RasterDesc, data: &'a [T]) -> Result<Self, RasterError> {
        desc.validate()?;
        let required = desc.required_len();
        if data.len() < required {
            return Err(RasterError::InvalidDataLength(data.len(), required));
        }
        Ok(Self { data, desc })
    }

    /// The layout descriptor of the view.
    pub fn desc(&self) -> &RasterDesc {
        &self.desc
    }

    /// Pixel bounds of the view.
    pub fn bounds(&self) -> Rect {
        self.desc.bounds()
    }

    /// The sample for pixel (x, y) in band b.
    #[inline]
    pub fn get(&self, x: i64, y: i64, band: usize) -> T {
        self.data[self.desc.index(x, y, band)]
    }

    /// The underlying sample buffer.
    pub fn as_slice(&self) -> &[T] {
        self.data
    }
}

/// Mutable view over rectangular multi-band sample data.
#[derive(Debug)]
pub struct RasterMut<'a, T> {
    data: &'a mut [T],
    desc: RasterDesc,
}

impl<'a, T: Copy> RasterMut<'a, T> {
    /// Create a mutable view from a layout descriptor and a sample buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor is malformed or the buffer is
    /// too short to cover the layout.
    pub fn new(desc: RasterDesc, data: &'a mut [T]) -> Result<Self, RasterError> {
        desc.validate()?;
        let required = desc.required_len();
        if data.len() < required {
            return Err(RasterError::InvalidDataLength(data.len(), required));
        }
        Ok(Self { data, desc })
    }

    /// The layout descriptor of the view.
    pub fn desc(&self) -> &RasterDesc {
        &self.desc
    }

    /// Pixel bounds of the view.
    pub fn bounds(&self) -> Rect {
        self.desc.bounds()
    }

    /// The sample for pixel (x, y) in band b.
    #[inline]
    pub fn get(&self, x: i64, y: i64, band: usize) -> T {
        self.data[self.desc.index(x, y, band)]
    }

    /// Write the sample for pixel (x, y) in band b.
    #[inline]
    pub fn set(&mut self, x: i64, y: i64, band: usize, value: T) {
        let idx = self.desc.index(x, y, band);
        self.data[idx] = value;
    }

    /// The underlying sample buffer.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        self.data
    }

    /// Reborrow as a read-only view.
    pub fn as_raster(&self) -> Raster<'_, T> {
        Raster {
            data: self.data,
            desc: self.desc.clone(),
        }
    }
}
