//! Scanline clipping against the valid source region.
//!
//! Because the backward mapping is affine, the set of destination
//! columns on a scanline whose source coordinate falls inside the valid
//! region is a single contiguous run; clipping therefore needs only two
//! bounds, not a per-pixel test.

use gridwarp_raster::Rect;

/// Continuous region of resolvable source coordinates, half-open on
/// the upper sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidRegion {
    /// Lower x bound (inclusive).
    pub x0: f64,
    /// Upper x bound (exclusive).
    pub x1: f64,
    /// Lower y bound (inclusive).
    pub y0: f64,
    /// Upper y bound (exclusive).
    pub y1: f64,
}

impl ValidRegion {
    /// The resolvable region of a raster with the given pixel bounds:
    /// the half-pixel neighborhood of its pixel centers. Taps for
    /// coordinates inside this region clamp to the raster edge.
    pub fn of_bounds(bounds: Rect) -> Self {
        Self {
            x0: bounds.min_x as f64 - 0.5,
            x1: bounds.max_x as f64 - 0.5,
            y0: bounds.min_y as f64 - 0.5,
            y1: bounds.max_y as f64 - 0.5,
        }
    }

    /// Whether the continuous source coordinate lies inside the region.
    #[inline]
    pub fn contains(&self, sx: f64, sy: f64) -> bool {
        sx >= self.x0 && sx < self.x1 && sy >= self.y0 && sy < self.y1
    }
}

/// A contiguous run of destination columns, half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipSpan {
    /// First destination column whose source coordinate is valid.
    pub begin: i64,
    /// One past the last valid destination column.
    pub end: i64,
}

impl ClipSpan {
    /// Whether the run contains no columns.
    pub fn is_empty(&self) -> bool {
        self.begin >= self.end
    }
}

/// Compute the maximal run of destination columns in `[min_x, max_x)`
/// whose backward-mapped source coordinate stays inside `region`.
///
/// `start` is the continuous source coordinate of destination column
/// `min_x` and `delta` the per-column source increment. The candidate
/// bounds are solved from the two linear inequalities per axis, then
/// nudged against direct evaluation to absorb floating round-off.
pub fn clip_scanline(
    start: (f64, f64),
    delta: (f64, f64),
    region: &ValidRegion,
    min_x: i64,
    max_x: i64,
) -> ClipSpan {
    let n = (max_x - min_x).max(0);
    let valid = |t: i64| {
        let t = t as f64;
        region.contains(start.0 + t * delta.0, start.1 + t * delta.1)
    };

    let mut t_lo = 0.0f64;
    let mut t_hi = n as f64;
    for (s, d, lo, hi) in [
        (start.0, delta.0, region.x0, region.x1),
        (start.1, delta.1, region.y0, region.y1),
    ] {
        if d == 0.0 {
            if !(s >= lo && s < hi) {
                return ClipSpan {
                    begin: min_x,
                    end: min_x,
                };
            }
            continue;
        }
        let a = (lo - s) / d;
        let b = (hi - s) / d;
        let (axis_lo, axis_hi) = if d > 0.0 { (a, b) } else { (b, a) };
        t_lo = t_lo.max(axis_lo);
        t_hi = t_hi.min(axis_hi);
    }
    if t_lo >= t_hi {
        return ClipSpan {
            begin: min_x,
            end: min_x,
        };
    }

    let mut begin = (t_lo.ceil() as i64).clamp(0, n);
    let mut end = (t_hi.ceil() as i64).clamp(0, n);

    // the float estimate can be off by one either way at each end
    while begin < end && !valid(begin) {
        begin += 1;
    }
    while begin > 0 && valid(begin - 1) {
        begin -= 1;
    }
    while end > begin && !valid(end - 1) {
        end -= 1;
    }
    while end < n && end > begin && valid(end) {
        end += 1;
    }

    if begin >= end {
        return ClipSpan {
            begin: min_x,
            end: min_x,
        };
    }
    ClipSpan {
        begin: min_x + begin,
        end: min_x + end,
    }
}
