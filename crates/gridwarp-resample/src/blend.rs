//! Weighted bilinear interpolation.
//!
//! Taps are ordered top-left, top-right, bottom-left, bottom-right.
//! When some taps are invalid the blend degrades by dropping the
//! invalid members from each row pair, scaling the survivor by its own
//! fraction, and combining the surviving rows the same way. This exact
//! algebra is what reference implementations produce on boundary
//! pixels; it is not a renormalized weighted average.

/// Standard separable bilinear blend of four valid taps.
///
/// `xfrac` and `yfrac` are the fractional offsets in `[0, 1)`.
#[inline]
pub fn blend_full(s00: f64, s01: f64, s10: f64, s11: f64, xfrac: f64, yfrac: f64) -> f64 {
    let top = s00 + (s01 - s00) * xfrac;
    let bottom = s10 + (s11 - s10) * xfrac;
    top + (bottom - top) * yfrac
}

/// Blend one row pair, dropping invalid members.
///
/// Returns `None` when both members are invalid.
#[inline]
fn blend_pair(a: f64, a_valid: bool, b: f64, b_valid: bool, frac: f64) -> Option<f64> {
    match (a_valid, b_valid) {
        (true, true) => Some(a + (b - a) * frac),
        (true, false) => Some(a * (1.0 - frac)),
        (false, true) => Some(b * frac),
        (false, false) => None,
    }
}

/// Weighted bilinear blend with per-tap binary validity.
///
/// With all four weights set this reproduces [`blend_full`]; with none
/// set it yields 0.0 (callers normally handle the all-invalid case with
/// the fill policy before blending).
pub fn blend_partial(s: [f64; 4], w: [bool; 4], xfrac: f64, yfrac: f64) -> f64 {
    let top = blend_pair(s[0], w[0], s[1], w[1], xfrac);
    let bottom = blend_pair(s[2], w[2], s[3], w[3], xfrac);
    match (top, bottom) {
        (Some(t), Some(b)) => t + (b - t) * yfrac,
        (Some(t), None) => t * (1.0 - yfrac),
        (None, Some(b)) => b * yfrac,
        (None, None) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn full_weights_match_separable_blend() {
        let s = [10.0, 20.0, 50.0, 60.0];
        for &(xf, yf) in &[(0.0, 0.0), (0.25, 0.25), (0.75, 0.5), (0.999, 0.001)] {
            let general = blend_partial(s, [true; 4], xf, yf);
            let separable = blend_full(s[0], s[1], s[2], s[3], xf, yf);
            assert_relative_eq!(general, separable, epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_fractions_return_top_left() {
        assert_eq!(blend_partial([7.0, 1.0, 2.0, 3.0], [true; 4], 0.0, 0.0), 7.0);
    }

    #[test]
    fn single_valid_corner_scales_by_its_fractions() {
        let s = [10.0, 20.0, 50.0, 60.0];
        let (xf, yf) = (0.75, 0.25);
        // only the top-right corner survives; its influence scales with
        // the distance-derived fractions rather than renormalizing to 1
        assert_relative_eq!(
            blend_partial(s, [false, true, false, false], xf, yf),
            20.0 * xf * (1.0 - yf),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            blend_partial(s, [true, false, false, false], xf, yf),
            10.0 * (1.0 - xf) * (1.0 - yf),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            blend_partial(s, [false, false, true, false], xf, yf),
            50.0 * (1.0 - xf) * yf,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            blend_partial(s, [false, false, false, true], xf, yf),
            60.0 * xf * yf,
            epsilon = 1e-12
        );
    }

    #[test]
    fn single_valid_corner_at_its_own_offset_is_exact() {
        // at zero distance from the surviving corner the blend returns
        // that tap exactly
        assert_eq!(
            blend_partial([9.0, 1.0, 2.0, 3.0], [true, false, false, false], 0.0, 0.0),
            9.0
        );
    }

    #[test]
    fn top_row_invalid_uses_bottom_scaled_by_yfrac() {
        let s = [10.0, 20.0, 50.0, 60.0];
        let (xf, yf) = (0.5, 0.25);
        let bottom = 50.0 + (60.0 - 50.0) * xf;
        assert_relative_eq!(
            blend_partial(s, [false, false, true, true], xf, yf),
            bottom * yf,
            epsilon = 1e-12
        );
    }

    #[test]
    fn bottom_row_invalid_uses_top_scaled_by_yfrac_complement() {
        let s = [10.0, 20.0, 50.0, 60.0];
        let (xf, yf) = (0.5, 0.25);
        let top = 10.0 + (20.0 - 10.0) * xf;
        assert_relative_eq!(
            blend_partial(s, [true, true, false, false], xf, yf),
            top * (1.0 - yf),
            epsilon = 1e-12
        );
    }

    #[test]
    fn diagonal_invalid_configuration_is_pinned() {
        // w00 and w11 survive on opposite corners; each row pair keeps
        // its single survivor scaled by its own fraction and the rows
        // combine with the standard yfrac blend
        let s = [10.0, 20.0, 50.0, 60.0];
        let (xf, yf) = (0.25, 0.75);
        let top = 10.0 * (1.0 - xf);
        let bottom = 60.0 * xf;
        assert_relative_eq!(
            blend_partial(s, [true, false, false, true], xf, yf),
            top + (bottom - top) * yf,
            epsilon = 1e-12
        );

        // the other diagonal
        let top = 20.0 * xf;
        let bottom = 50.0 * (1.0 - xf);
        assert_relative_eq!(
            blend_partial(s, [false, true, true, false], xf, yf),
            top + (bottom - top) * yf,
            epsilon = 1e-12
        );
    }

    #[test]
    fn all_invalid_yields_zero() {
        assert_eq!(blend_partial([1.0, 2.0, 3.0, 4.0], [false; 4], 0.5, 0.5), 0.0);
    }
}
