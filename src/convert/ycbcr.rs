use super::{FromRgb, ToRgb, map_pixels, mat_mul};
use crate::{ImageRef, RgbImage, Sample, YCbCrImage};

/// Rec. ITU-R BT.601 full range, applied on RGB scaled to `0..=1`
pub(super) const RGB_TO_YCBCR: [[f64; 3]; 3] = [
    [0.299, 0.587, 0.114],
    [-0.168736, -0.331264, 0.5],
    [0.5, -0.418688, -0.081312],
];

pub(super) const YCBCR_TO_RGB: [[f64; 3]; 3] = [
    [1.0, 0.0, 1.402],
    [1.0, -0.344136, -0.714136],
    [1.0, 1.772, 0.0],
];

/// Device RGB (`0..=255`) to Y'CbCr, luma in `0..=1`, chroma in `-0.5..=0.5`
#[inline(always)]
pub fn rgb_to_ycbcr<T: Sample>(rgb: [T; 3]) -> [T; 3] {
    mat_mul(&RGB_TO_YCBCR, rgb.map(|v| v / T::lit(255.0)))
}

/// Y'CbCr to device RGB, rounded to whole device values
#[inline(always)]
pub fn ycbcr_to_rgb<T: Sample>(ycbcr: [T; 3]) -> [T; 3] {
    mat_mul(&YCBCR_TO_RGB, ycbcr).map(|v| (v * T::lit(255.0)).round())
}

impl<T: Sample> FromRgb<T> for YCbCrImage<T> {
    fn from_rgb(&mut self, rgb: &RgbImage<T>) {
        ImageRef::from(rgb).assert_consistent();

        self.set_size(rgb.height, rgb.width);
        map_pixels(
            rgb.channels(),
            [&mut self.y, &mut self.cb, &mut self.cr],
            rgb_to_ycbcr::<T>,
        );
    }
}

impl<T: Sample> ToRgb<T> for YCbCrImage<T> {
    fn to_rgb(&self, rgb: &mut RgbImage<T>) {
        ImageRef::from(self).assert_consistent();

        rgb.set_size(self.height, self.width);
        map_pixels(
            self.channels(),
            [&mut rgb.r, &mut rgb.g, &mut rgb.b],
            ycbcr_to_rgb::<T>,
        );
    }
}
