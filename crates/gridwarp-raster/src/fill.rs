use crate::sample::Sample;

/// Policy for destination pixels that cannot be validly computed.
///
/// When writing is enabled, such pixels receive a per-band fill value;
/// otherwise the destination buffer is left untouched at that location
/// and the caller must pre-initialize it or tolerate stale content.
#[derive(Debug, Clone, PartialEq)]
pub struct FillPolicy<T: Sample> {
    write_fill: bool,
    values: Vec<T>,
}

impl<T: Sample> FillPolicy<T> {
    /// Write the given per-band values into uncomputable pixels.
    pub fn fill(values: Vec<T>) -> Self {
        Self {
            write_fill: true,
            values,
        }
    }

    /// Convert a generic double-valued background array into per-band
    /// fill values, applying the datatype rounding and saturation rules.
    pub fn from_background(background: &[f64]) -> Self {
        Self::fill(background.iter().map(|&v| T::from_blend(v)).collect())
    }

    /// Leave uncomputable destination pixels unmodified.
    pub fn leave() -> Self {
        Self {
            write_fill: false,
            values: Vec::new(),
        }
    }

    /// Whether uncomputable pixels are overwritten.
    pub fn writes_fill(&self) -> bool {
        self.write_fill
    }

    /// Number of per-band fill values, when writing is enabled.
    pub fn bands(&self) -> Option<usize> {
        self.write_fill.then_some(self.values.len())
    }

    /// The fill value for a band. Only meaningful when writing is enabled.
    #[inline]
    pub fn value(&self, band: usize) -> T {
        self.values[band]
    }
}
