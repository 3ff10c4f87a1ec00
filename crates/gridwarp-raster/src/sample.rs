use num_traits::Bounded;

/// Trait for raster sample datatypes.
///
/// Implemented for the six supported sample types: `u8`, `i16`, `u16`,
/// `i32`, `f32` and `f64`. Blend arithmetic runs in `f64`; this trait
/// defines how samples widen into it and how blended results narrow back,
/// including the per-datatype rounding and saturation rules.
///
/// Send and Sync are required so engines can be shared across row workers.
pub trait Sample: Copy + PartialOrd + Send + Sync + 'static {
    /// Whether a 256-entry classification table can index this type.
    ///
    /// Only true for byte samples; see [`Sample::lut_index`].
    const BYTE_LUT: bool = false;

    /// Widen the sample to `f64` for blend arithmetic.
    fn to_f64(self) -> f64;

    /// Narrow a blended `f64` back to the sample type.
    ///
    /// Signed integer types round half away from zero and saturate at
    /// their representable range. Unsigned types round half up and
    /// saturate at `[0, MAX]`. Floating types pass through unchanged,
    /// without rounding or clamping.
    fn from_blend(v: f64) -> Self;

    /// Whether the sample is NaN. Always false for integer types.
    fn is_nan(self) -> bool {
        false
    }

    /// Index into a 256-entry lookup table, for byte samples only.
    fn lut_index(self) -> Option<usize> {
        None
    }
}

macro_rules! impl_sample_unsigned {
    ($t:ty) => {
        impl Sample for $t {
            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_blend(v: f64) -> Self {
                // round half up, then saturate at [0, MAX]
                let r = (v + 0.5).floor();
                let max = <$t as Bounded>::max_value() as f64;
                if r <= 0.0 {
                    0
                } else if r >= max {
                    <$t as Bounded>::max_value()
                } else {
                    r as $t
                }
            }
        }
    };
}

macro_rules! impl_sample_signed {
    ($t:ty) => {
        impl Sample for $t {
            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_blend(v: f64) -> Self {
                // f64::round is round half away from zero
                let r = v.round();
                let min = <$t as Bounded>::min_value() as f64;
                let max = <$t as Bounded>::max_value() as f64;
                if r <= min {
                    <$t as Bounded>::min_value()
                } else if r >= max {
                    <$t as Bounded>::max_value()
                } else {
                    r as $t
                }
            }
        }
    };
}

impl_sample_unsigned!(u16);
impl_sample_signed!(i16);
impl_sample_signed!(i32);

impl Sample for u8 {
    const BYTE_LUT: bool = true;

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_blend(v: f64) -> Self {
        let r = (v + 0.5).floor();
        if r <= 0.0 {
            0
        } else if r >= 255.0 {
            255
        } else {
            r as u8
        }
    }

    fn lut_index(self) -> Option<usize> {
        Some(self as usize)
    }
}

impl Sample for f32 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_blend(v: f64) -> Self {
        v as f32
    }

    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }
}

impl Sample for f64 {
    fn to_f64(self) -> f64 {
        self
    }

    fn from_blend(v: f64) -> Self {
        v
    }

    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_rounds_half_up_and_saturates() {
        assert_eq!(u8::from_blend(254.5), 255);
        assert_eq!(u8::from_blend(254.49), 254);
        assert_eq!(u8::from_blend(300.0), 255);
        assert_eq!(u8::from_blend(-3.0), 0);
        assert_eq!(u8::from_blend(0.4), 0);
    }

    #[test]
    fn signed_rounds_half_away_from_zero() {
        assert_eq!(i16::from_blend(-0.5), -1);
        assert_eq!(i16::from_blend(0.5), 1);
        assert_eq!(i16::from_blend(-0.49), 0);
        assert_eq!(i16::from_blend(40000.0), i16::MAX);
        assert_eq!(i16::from_blend(-40000.0), i16::MIN);
        assert_eq!(i32::from_blend(3e10), i32::MAX);
    }

    #[test]
    fn unsigned_short_saturates() {
        assert_eq!(u16::from_blend(65535.5), u16::MAX);
        assert_eq!(u16::from_blend(-1.0), 0);
        assert_eq!(u16::from_blend(1234.5), 1235);
    }

    #[test]
    fn floats_pass_through() {
        assert_eq!(f32::from_blend(254.5), 254.5f32);
        assert_eq!(f64::from_blend(-1e300), -1e300);
        assert!(f32::from_blend(f64::NAN).is_nan());
    }

    #[test]
    fn only_bytes_carry_a_lut() {
        assert!(u8::BYTE_LUT);
        assert_eq!(42u8.lut_index(), Some(42));
        assert!(!i16::BYTE_LUT);
        assert_eq!(42i16.lut_index(), None);
    }
}
