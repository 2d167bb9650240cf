use super::{FromRgb, ToRgb, map_pixels, mat_mul};
use crate::{ImageRef, RgbImage, Sample, XyzImage};

/// Linear sRGB to XYZ, D65 white
pub(super) const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124, 0.3576, 0.1805],
    [0.2126, 0.7152, 0.0722],
    [0.0193, 0.1192, 0.9505],
];

pub(super) const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [3.2406, -1.5372, -0.4986],
    [-0.9689, 1.8758, 0.0415],
    [0.0557, -0.2040, 1.0570],
];

#[inline(always)]
fn srgb_to_linear<T: Sample>(v: T) -> T {
    if v > T::lit(0.04045) {
        ((v + T::lit(0.055)) / T::lit(1.055)).powf(T::lit(2.4))
    } else {
        v / T::lit(12.92)
    }
}

#[inline(always)]
fn linear_to_srgb<T: Sample>(v: T) -> T {
    if v > T::lit(0.0031308) {
        T::lit(1.055) * v.powf(T::lit(1.0 / 2.4)) - T::lit(0.055)
    } else {
        v * T::lit(12.92)
    }
}

/// Device RGB (`0..=255`) to XYZ (`0..=100`)
#[inline(always)]
pub fn rgb_to_xyz<T: Sample>(rgb: [T; 3]) -> [T; 3] {
    let linear = rgb.map(|v| srgb_to_linear(v / T::lit(255.0)));

    mat_mul(&RGB_TO_XYZ, linear).map(|v| v * T::lit(100.0))
}

/// XYZ (`0..=100`) to device RGB, rounded to whole device values
///
/// Colors outside of the sRGB gamut are not clamped.
#[inline(always)]
pub fn xyz_to_rgb<T: Sample>(xyz: [T; 3]) -> [T; 3] {
    let linear = mat_mul(&XYZ_TO_RGB, xyz.map(|v| v / T::lit(100.0)));

    linear.map(|v| (linear_to_srgb(v) * T::lit(255.0)).round())
}

impl<T: Sample> FromRgb<T> for XyzImage<T> {
    fn from_rgb(&mut self, rgb: &RgbImage<T>) {
        ImageRef::from(rgb).assert_consistent();

        self.set_size(rgb.height, rgb.width);
        map_pixels(
            rgb.channels(),
            [&mut self.x, &mut self.y, &mut self.z],
            rgb_to_xyz::<T>,
        );
    }
}

impl<T: Sample> ToRgb<T> for XyzImage<T> {
    fn to_rgb(&self, rgb: &mut RgbImage<T>) {
        ImageRef::from(self).assert_consistent();

        rgb.set_size(self.height, self.width);
        map_pixels(
            self.channels(),
            [&mut rgb.r, &mut rgb.g, &mut rgb.b],
            xyz_to_rgb::<T>,
        );
    }
}
