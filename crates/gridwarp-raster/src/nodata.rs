use crate::sample::Sample;

/// Classification rule for "no-data" sample values.
#[derive(Debug, Clone, PartialEq)]
pub enum NoDataRule<T> {
    /// A numeric interval; each end may be open or closed.
    Interval {
        /// Lower end of the interval.
        min: T,
        /// Upper end of the interval.
        max: T,
        /// Whether `min` itself is no-data.
        min_inclusive: bool,
        /// Whether `max` itself is no-data.
        max_inclusive: bool,
    },
    /// An explicit set of no-data values.
    Values(Vec<T>),
}

/// A per-datatype no-data classifier.
///
/// Immutable once constructed; byte classifiers precompute a 256-entry
/// lookup table so per-tap classification is a single indexed load.
/// NaN is not classified here; engines test floating NaN separately.
///
/// # Example
///
/// ```
/// use gridwarp_raster::NoData;
///
/// let nodata = NoData::range(10u8, 20u8);
/// assert!(nodata.contains(10));
/// assert!(nodata.contains(20));
/// assert!(!nodata.contains(21));
/// ```
#[derive(Debug, Clone)]
pub struct NoData<T: Sample> {
    rule: NoDataRule<T>,
    lut: Option<Box<[bool; 256]>>,
}

impl<T: Sample> NoData<T> {
    /// Build a classifier from a rule.
    pub fn new(rule: NoDataRule<T>) -> Self {
        let lut = if T::BYTE_LUT {
            let mut table = Box::new([false; 256]);
            for (i, slot) in table.iter_mut().enumerate() {
                *slot = Self::matches(&rule, T::from_blend(i as f64));
            }
            Some(table)
        } else {
            None
        };
        Self { rule, lut }
    }

    /// Classifier for the closed interval `[min, max]`.
    pub fn range(min: T, max: T) -> Self {
        Self::new(NoDataRule::Interval {
            min,
            max,
            min_inclusive: true,
            max_inclusive: true,
        })
    }

    /// Classifier for a single no-data value.
    pub fn value(v: T) -> Self {
        Self::new(NoDataRule::Values(vec![v]))
    }

    fn matches(rule: &NoDataRule<T>, v: T) -> bool {
        match rule {
            NoDataRule::Interval {
                min,
                max,
                min_inclusive,
                max_inclusive,
            } => {
                let above = if *min_inclusive { v >= *min } else { v > *min };
                let below = if *max_inclusive { v <= *max } else { v < *max };
                above && below
            }
            NoDataRule::Values(values) => values.iter().any(|n| *n == v),
        }
    }

    /// Whether `v` is classified as no-data.
    #[inline]
    pub fn contains(&self, v: T) -> bool {
        if let (Some(lut), Some(i)) = (&self.lut, v.lut_index()) {
            return lut[i];
        }
        Self::matches(&self.rule, v)
    }
}

impl<T: Sample> PartialEq for NoData<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rule == other.rule
    }
}
