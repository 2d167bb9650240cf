use num_traits::Float;
use std::fmt::{Debug, Display};

/// Floating point element type that every color conversion is computed in
#[allow(private_bounds)]
pub trait Sample: SampleInternal + Float + Default + Debug + Display + Send + Sync + 'static {}

pub(crate) trait SampleInternal: Copy {
    /// Turn a literal constant of a conversion formula into the working type
    fn lit(v: f64) -> Self;

    /// Quantize a device value in `0..=255` to a byte, saturating out of range values
    #[cfg(feature = "codec")]
    fn to_byte(self) -> u8;

    #[cfg(feature = "codec")]
    fn from_byte(v: u8) -> Self;
}

impl Sample for f32 {}

impl SampleInternal for f32 {
    #[inline(always)]
    fn lit(v: f64) -> Self {
        v as f32
    }

    #[cfg(feature = "codec")]
    #[inline(always)]
    fn to_byte(self) -> u8 {
        // `as` saturates and maps NaN to 0
        self.round() as u8
    }

    #[cfg(feature = "codec")]
    #[inline(always)]
    fn from_byte(v: u8) -> Self {
        f32::from(v)
    }
}

impl Sample for f64 {}

impl SampleInternal for f64 {
    #[inline(always)]
    fn lit(v: f64) -> Self {
        v
    }

    #[cfg(feature = "codec")]
    #[inline(always)]
    fn to_byte(self) -> u8 {
        self.round() as u8
    }

    #[cfg(feature = "codec")]
    #[inline(always)]
    fn from_byte(v: u8) -> Self {
        f64::from(v)
    }
}
