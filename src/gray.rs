//! Single channel images
//!
//! A grayscale image is a bare [`Grid`]. It interoperates with the color variants by
//! broadcasting into RGB and by collapsing RGB into its luma.

use crate::convert::{from_rgb, reduce_pixels, to_rgb};
use crate::{Grid, ImageMut, ImageRef, RgbImage, Sample};
use tracing::trace;

/// BT.709 luma weights of R, G and B
pub const LUMA: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Luma of a device RGB pixel, rounded to a whole device value
#[inline(always)]
pub fn luma<T: Sample>([r, g, b]: [T; 3]) -> T {
    (T::lit(LUMA[0]) * r + T::lit(LUMA[1]) * g + T::lit(LUMA[2]) * b).round()
}

/// Collapse an RGB image into its luma
///
/// # Panics
///
/// If `src` does not pass [`RgbImage::check`], before `dst` is modified.
pub fn rgb_to_gray<T: Sample>(src: &RgbImage<T>, dst: &mut Grid<T>) {
    ImageRef::from(src).assert_consistent();

    dst.set_size(src.height, src.width);
    reduce_pixels(src.channels(), dst, luma::<T>);
}

/// Broadcast a grayscale image into all three channels of an RGB image
pub fn gray_to_rgb<T: Copy>(src: &Grid<T>, dst: &mut RgbImage<T>) {
    (dst.height, dst.width) = src.dims();

    dst.r.clone_from(src);
    dst.g.clone_from(src);
    dst.b.clone_from(src);
}

/// Convert any variant to grayscale, non RGB sources are converted to RGB first
///
/// # Panics
///
/// If `src` does not pass its `check`, before `dst` is modified.
pub fn to_gray<'a, T: Sample>(src: impl Into<ImageRef<'a, T>>, dst: &mut Grid<T>) {
    let src = src.into();

    trace!(
        from = %src.color_space(),
        height = src.height(),
        width = src.width(),
        "convert to grayscale"
    );

    match src {
        ImageRef::Rgb(rgb) => rgb_to_gray(rgb, dst),
        src => {
            src.assert_consistent();

            let mut rgb = RgbImage::<T>::new();
            to_rgb(src, &mut rgb);
            rgb_to_gray(&rgb, dst);
        }
    }
}

/// Convert a grayscale image to any variant by way of its RGB broadcast
pub fn from_gray<'a, T: Sample>(src: &Grid<T>, dst: impl Into<ImageMut<'a, T>>) {
    let dst = dst.into();

    trace!(
        to = %dst.color_space(),
        height = src.height(),
        width = src.width(),
        "convert from grayscale"
    );

    match dst {
        ImageMut::Rgb(rgb) => gray_to_rgb(src, rgb),
        dst => {
            let mut rgb = RgbImage::<T>::new();
            gray_to_rgb(src, &mut rgb);
            from_rgb(&rgb, dst);
        }
    }
}

/// `above` where a value is strictly greater than `cutoff`, `below` everywhere else
pub fn threshold<T: PartialOrd + Copy>(src: &Grid<T>, cutoff: T, below: T, above: T) -> Grid<T> {
    src.map(|v| if v > cutoff { above } else { below })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HsvImage, XyzImage};

    #[test]
    fn luma_of_reference_colors() {
        assert_eq!(luma([255.0f64, 255.0, 255.0]), 255.0);
        assert_eq!(luma([0.0f64, 0.0, 0.0]), 0.0);
        assert_eq!(luma([255.0f32, 0.0, 0.0]), 54.0);
    }

    #[test]
    fn rgb_to_gray_resizes_destination() {
        let rgb = RgbImage::filled(3, 2, 255.0f64, 0.0, 0.0);
        let mut gray = Grid::new(10, 10);

        rgb_to_gray(&rgb, &mut gray);

        assert_eq!(gray.dims(), (3, 2));
        assert!(gray.as_slice().iter().all(|&v| v == 54.0));
    }

    #[test]
    fn broadcast_round_trip() {
        let gray = Grid::from_fn(4, 3, |y, x| (y * 60 + x * 7) as f64);

        let mut rgb = RgbImage::<f64>::new();
        gray_to_rgb(&gray, &mut rgb);
        assert!(rgb.check());
        assert_eq!(rgb.g, gray);

        let mut back = Grid::new(0, 0);
        rgb_to_gray(&rgb, &mut back);
        assert_eq!(back, gray);
    }

    #[test]
    fn to_gray_pivots_through_rgb() {
        let rgb = RgbImage::filled(2, 2, 30.0f64, 120.0, 200.0);

        let mut hsv = HsvImage::<f64>::new();
        from_rgb(&rgb, &mut hsv);

        let mut direct = Grid::new(0, 0);
        to_gray(&hsv, &mut direct);

        let mut pivot = RgbImage::<f64>::new();
        to_rgb(&hsv, &mut pivot);
        let mut expected = Grid::new(0, 0);
        rgb_to_gray(&pivot, &mut expected);

        assert_eq!(direct, expected);
    }

    #[test]
    fn from_gray_into_xyz() {
        let gray = Grid::filled(2, 5, 255.0f64);
        let mut xyz = XyzImage::<f64>::new();

        from_gray(&gray, &mut xyz);

        assert_eq!((xyz.height, xyz.width), (2, 5));
        assert!(xyz.check());
        assert!(xyz.y.as_slice().iter().all(|&v| (v - 100.0).abs() < 0.01));
    }

    #[test]
    fn threshold_is_strict() {
        let src = Grid::from_vec(1, 3, vec![10.0f32, 200.0, 127.0]).unwrap();

        let out = threshold(&src, 127.0, 0.0, 255.0);

        assert_eq!(out.as_slice(), &[0.0, 255.0, 0.0]);
        assert_eq!(out.dims(), (1, 3));
    }

    #[test]
    fn threshold_on_integral_grid() {
        let src = Grid::from_vec(2, 2, vec![0u8, 1, 2, 3]).unwrap();

        assert_eq!(threshold(&src, 1, 7, 9).as_slice(), &[7, 7, 9, 9]);
    }
}
