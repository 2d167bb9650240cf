use super::{FromRgb, ToRgb, map_pixels, rgb_to_xyz, xyz_to_rgb};
use crate::{ImageRef, LabImage, RgbImage, Sample};

/// D65 reference white on the `0..=100` XYZ scale
const WHITE: [f64; 3] = [95.047, 100.0, 108.883];

const EPSILON: f64 = 0.008856;
const SLOPE: f64 = 7.787;
const OFFSET: f64 = 16.0 / 116.0;

/// XYZ (`0..=100`) to L*a*b*
#[inline(always)]
pub fn xyz_to_lab<T: Sample>([x, y, z]: [T; 3]) -> [T; 3] {
    let normalized = [x / T::lit(WHITE[0]), y / T::lit(WHITE[1]), z / T::lit(WHITE[2])];

    let [fx, fy, fz] = normalized.map(|v| {
        if v > T::lit(EPSILON) {
            v.cbrt()
        } else {
            T::lit(SLOPE) * v + T::lit(OFFSET)
        }
    });

    [
        T::lit(116.0) * fy - T::lit(16.0),
        T::lit(500.0) * (fx - fy),
        T::lit(200.0) * (fy - fz),
    ]
}

/// L*a*b* to XYZ (`0..=100`)
///
/// The branch between the cube and the linear segment is chosen on the cubed value,
/// mirroring the threshold of [`xyz_to_lab`].
#[inline(always)]
pub fn lab_to_xyz<T: Sample>([l, a, b]: [T; 3]) -> [T; 3] {
    let fy = (l + T::lit(16.0)) / T::lit(116.0);
    let fx = a / T::lit(500.0) + fy;
    let fz = fy - b / T::lit(200.0);

    let [x, y, z] = [fx, fy, fz].map(|f| {
        let cubed = f.powi(3);

        if cubed > T::lit(EPSILON) {
            cubed
        } else {
            (f - T::lit(OFFSET)) / T::lit(SLOPE)
        }
    });

    [x * T::lit(WHITE[0]), y * T::lit(WHITE[1]), z * T::lit(WHITE[2])]
}

impl<T: Sample> FromRgb<T> for LabImage<T> {
    fn from_rgb(&mut self, rgb: &RgbImage<T>) {
        ImageRef::from(rgb).assert_consistent();

        self.set_size(rgb.height, rgb.width);
        map_pixels(
            rgb.channels(),
            [&mut self.l, &mut self.a, &mut self.b],
            |rgb| xyz_to_lab(rgb_to_xyz(rgb)),
        );
    }
}

impl<T: Sample> ToRgb<T> for LabImage<T> {
    fn to_rgb(&self, rgb: &mut RgbImage<T>) {
        ImageRef::from(self).assert_consistent();

        rgb.set_size(self.height, self.width);
        map_pixels(
            self.channels(),
            [&mut rgb.r, &mut rgb.g, &mut rgb.b],
            |lab| xyz_to_rgb(lab_to_xyz(lab)),
        );
    }
}
