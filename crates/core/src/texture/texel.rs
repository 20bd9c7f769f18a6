//! Scalar element types a texture can hold.

use std::fmt::Debug;

/// A scalar texture element.
///
/// Every texel type converts losslessly enough to `f32` for filtering and
/// interpolation, and back with truncation.
pub trait Texel: Copy + Default + PartialOrd + Debug + Send + Sync + 'static {
    /// Full-intensity value (opaque alpha, white)
    const MAX_INTENSITY: Self;

    /// Widen to `f32` for arithmetic
    fn to_f32(self) -> f32;

    /// Narrow from `f32`, truncating toward zero
    fn from_f32(value: f32) -> Self;
}

impl Texel for f32 {
    const MAX_INTENSITY: Self = 1.0;

    #[inline(always)]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline(always)]
    fn from_f32(value: f32) -> Self {
        value
    }
}

impl Texel for u8 {
    const MAX_INTENSITY: Self = u8::MAX;

    #[inline(always)]
    fn to_f32(self) -> f32 {
        f32::from(self)
    }

    /// Out-of-range values saturate at 0 and 255, NaN becomes 0.
    #[inline(always)]
    fn from_f32(value: f32) -> Self {
        value as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_truncates() {
        assert_eq!(u8::from_f32(254.99), 254);
        assert_eq!(u8::from_f32(0.7), 0);
    }

    #[test]
    fn test_byte_saturates() {
        assert_eq!(u8::from_f32(300.0), 255);
        assert_eq!(u8::from_f32(-4.0), 0);
        assert_eq!(u8::from_f32(f32::NAN), 0);
    }

    #[test]
    fn test_float_identity() {
        assert_eq!(f32::from_f32(-3.25), -3.25);
        assert_eq!(0.5f32.to_f32(), 0.5);
    }
}
