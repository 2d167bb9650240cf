use super::{FromRgb, ToRgb, map_pixels};
use crate::{ImageRef, NormalizedRgbImage, RgbImage, Sample};

/// Scale a pixel so its channels sum up to 255
///
/// A black pixel has no chromaticity to preserve and maps to `[0, 0, 0]`.
#[inline(always)]
pub fn rgb_to_normalized<T: Sample>(rgb: [T; 3]) -> [T; 3] {
    let [r, g, b] = rgb;
    let sum = r + g + b;

    if sum == T::lit(0.0) {
        return [sum; 3];
    }

    rgb.map(|c| c * T::lit(255.0) / sum)
}

impl<T: Sample> FromRgb<T> for NormalizedRgbImage<T> {
    fn from_rgb(&mut self, rgb: &RgbImage<T>) {
        ImageRef::from(rgb).assert_consistent();

        self.set_size(rgb.height, rgb.width);
        map_pixels(
            rgb.channels(),
            [
                &mut self.normalized_r,
                &mut self.normalized_g,
                &mut self.normalized_b,
            ],
            rgb_to_normalized::<T>,
        );
    }
}

/// The normalized values already use the `0..=255` device range and are copied as is
impl<T: Sample> ToRgb<T> for NormalizedRgbImage<T> {
    fn to_rgb(&self, rgb: &mut RgbImage<T>) {
        ImageRef::from(self).assert_consistent();

        rgb.height = self.height;
        rgb.width = self.width;
        rgb.r.clone_from(&self.normalized_r);
        rgb.g.clone_from(&self.normalized_g);
        rgb.b.clone_from(&self.normalized_b);
    }
}
