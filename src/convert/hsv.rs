use super::{FromRgb, ToRgb, map_pixels};
use crate::{HsvImage, ImageRef, RgbImage, Sample};

/// Device RGB (`0..=255`) to HSV, every component in `0..=1`
///
/// Grays have no hue and get `h = 0, s = 0`.
#[inline(always)]
pub fn rgb_to_hsv<T: Sample>(rgb: [T; 3]) -> [T; 3] {
    let zero = T::lit(0.0);
    let one = T::lit(1.0);

    let [r, g, b] = rgb.map(|v| v / T::lit(255.0));

    let min = r.min(g.min(b));
    let max = r.max(g.max(b));
    let delta = max - min;

    if delta == zero {
        return [zero, zero, max];
    }

    let s = delta / max;

    let [delta_r, delta_g, delta_b] =
        [r, g, b].map(|c| ((max - c) / T::lit(6.0) + delta / T::lit(2.0)) / delta);

    let mut h = if r == max {
        delta_b - delta_g
    } else if g == max {
        T::lit(1.0 / 3.0) + delta_r - delta_b
    } else {
        T::lit(2.0 / 3.0) + delta_g - delta_r
    };

    if h < zero {
        h = h + one;
    }
    if h > one {
        h = h - one;
    }

    [h, s, max]
}

/// HSV (`0..=1`) to device RGB, rounded to whole device values
#[inline(always)]
pub fn hsv_to_rgb<T: Sample>([h, s, v]: [T; 3]) -> [T; 3] {
    let zero = T::lit(0.0);
    let one = T::lit(1.0);
    let full = T::lit(255.0);

    if s == zero {
        let gray = (v * full).round();
        return [gray, gray, gray];
    }

    let mut sector = h * T::lit(6.0);
    if sector == T::lit(6.0) {
        sector = zero;
    }

    let index = sector.floor();
    let fraction = sector - index;

    let p = v * (one - s);
    let q = v * (one - s * fraction);
    let t = v * (one - s * (one - fraction));

    let rgb = if index == zero {
        [v, t, p]
    } else if index == T::lit(1.0) {
        [q, v, p]
    } else if index == T::lit(2.0) {
        [p, v, t]
    } else if index == T::lit(3.0) {
        [p, q, v]
    } else if index == T::lit(4.0) {
        [t, p, v]
    } else {
        [v, p, q]
    };

    rgb.map(|c| (c * full).round())
}

impl<T: Sample> FromRgb<T> for HsvImage<T> {
    fn from_rgb(&mut self, rgb: &RgbImage<T>) {
        ImageRef::from(rgb).assert_consistent();

        self.set_size(rgb.height, rgb.width);
        map_pixels(
            rgb.channels(),
            [&mut self.h, &mut self.s, &mut self.v],
            rgb_to_hsv::<T>,
        );
    }
}

impl<T: Sample> ToRgb<T> for HsvImage<T> {
    fn to_rgb(&self, rgb: &mut RgbImage<T>) {
        ImageRef::from(self).assert_consistent();

        rgb.set_size(self.height, self.width);
        map_pixels(
            self.channels(),
            [&mut rgb.r, &mut rgb.g, &mut rgb.b],
            hsv_to_rgb::<T>,
        );
    }
}
