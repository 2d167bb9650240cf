//! Conversions between the color image variants
//!
//! Every variant other than RGB converts to and from RGB ([`ToRgb`], [`FromRgb`]).
//! [`convert`] connects any two variants, routing through RGB when neither side is RGB.

use crate::{Grid, ImageMut, ImageRef, RgbImage, Sample};
use tracing::trace;

mod hsv;
mod lab;
mod normalized;
mod xyz;
mod ycbcr;

pub use hsv::{hsv_to_rgb, rgb_to_hsv};
pub use lab::{lab_to_xyz, xyz_to_lab};
pub use normalized::rgb_to_normalized;
pub use xyz::{rgb_to_xyz, xyz_to_rgb};
pub use ycbcr::{rgb_to_ycbcr, ycbcr_to_rgb};

/// Fill `self` with the conversion of an RGB image
///
/// # Panics
///
/// If `rgb` does not pass [`RgbImage::check`]. `self` is left untouched in that case.
pub trait FromRgb<T> {
    fn from_rgb(&mut self, rgb: &RgbImage<T>);
}

/// Fill an RGB image with the conversion of `self`
///
/// # Panics
///
/// If `self` does not pass its `check`. `rgb` is left untouched in that case.
pub trait ToRgb<T> {
    fn to_rgb(&self, rgb: &mut RgbImage<T>);
}

impl<T: Sample> FromRgb<T> for RgbImage<T> {
    fn from_rgb(&mut self, rgb: &RgbImage<T>) {
        ImageRef::from(rgb).assert_consistent();
        self.clone_from(rgb);
    }
}

impl<T: Sample> ToRgb<T> for RgbImage<T> {
    fn to_rgb(&self, rgb: &mut RgbImage<T>) {
        ImageRef::from(self).assert_consistent();
        rgb.clone_from(self);
    }
}

/// Convert any variant to RGB
///
/// # Panics
///
/// If `src` does not pass its `check`, before `dst` is modified.
pub fn to_rgb<'a, T: Sample>(src: impl Into<ImageRef<'a, T>>, dst: &mut RgbImage<T>) {
    let src = src.into();

    trace!(
        from = %src.color_space(),
        height = src.height(),
        width = src.width(),
        "convert to RGB"
    );

    match src {
        ImageRef::Rgb(image) => image.to_rgb(dst),
        ImageRef::NormalizedRgb(image) => image.to_rgb(dst),
        ImageRef::Xyz(image) => image.to_rgb(dst),
        ImageRef::Lab(image) => image.to_rgb(dst),
        ImageRef::Hsv(image) => image.to_rgb(dst),
        ImageRef::YCbCr(image) => image.to_rgb(dst),
    }
}

/// Convert an RGB image to any variant
///
/// # Panics
///
/// If `src` does not pass [`RgbImage::check`], before `dst` is modified.
pub fn from_rgb<'a, T: Sample>(src: &RgbImage<T>, dst: impl Into<ImageMut<'a, T>>) {
    let dst = dst.into();

    trace!(
        to = %dst.color_space(),
        height = src.height,
        width = src.width,
        "convert from RGB"
    );

    match dst {
        ImageMut::Rgb(image) => image.from_rgb(src),
        ImageMut::NormalizedRgb(image) => image.from_rgb(src),
        ImageMut::Xyz(image) => image.from_rgb(src),
        ImageMut::Lab(image) => image.from_rgb(src),
        ImageMut::Hsv(image) => image.from_rgb(src),
        ImageMut::YCbCr(image) => image.from_rgb(src),
    }
}

/// Convert any variant to any other variant
///
/// If neither side is RGB the image is converted to RGB first and from there to the
/// destination, there are no direct paths between the other variants.
///
/// # Panics
///
/// If `src` does not pass its `check`, before `dst` is modified.
pub fn convert<'a, 'b, T: Sample>(
    src: impl Into<ImageRef<'a, T>>,
    dst: impl Into<ImageMut<'b, T>>,
) {
    match (src.into(), dst.into()) {
        (src, ImageMut::Rgb(dst)) => to_rgb(src, dst),
        (ImageRef::Rgb(src), dst) => from_rgb(src, dst),
        (src, dst) => {
            src.assert_consistent();

            let mut rgb = RgbImage::<T>::new();
            to_rgb(src, &mut rgb);
            from_rgb(&rgb, dst);
        }
    }
}

/// Smallest amount of pixels handed to a single rayon job
#[cfg(feature = "multi-thread")]
const MIN_PIXELS_PER_JOB: usize = 4096;

#[cfg(feature = "multi-thread")]
fn min_job_len(len: usize) -> usize {
    len.div_ceil(num_cpus::get()).max(MIN_PIXELS_PER_JOB)
}

/// Run `f` on every pixel of the three `src` channels and store the result in `dst`
///
/// All six grids must have the same length.
pub(crate) fn map_pixels<T, F>(src: [&Grid<T>; 3], dst: [&mut Grid<T>; 3], f: F)
where
    T: Sample,
    F: Fn([T; 3]) -> [T; 3] + Send + Sync,
{
    let [s0, s1, s2] = src.map(|grid| grid.as_slice());
    let [d0, d1, d2] = dst.map(|grid| grid.as_mut_slice());

    debug_assert!([s1.len(), s2.len(), d0.len(), d1.len(), d2.len()]
        .iter()
        .all(|&len| len == s0.len()));

    #[cfg(feature = "multi-thread")]
    {
        use rayon::prelude::*;

        let min_len = min_job_len(s0.len());

        d0.par_iter_mut()
            .zip(d1.par_iter_mut())
            .zip(d2.par_iter_mut())
            .zip(s0.par_iter().zip(s1.par_iter()).zip(s2.par_iter()))
            .with_min_len(min_len)
            .for_each(|(((o0, o1), o2), ((&a, &b), &c))| {
                [*o0, *o1, *o2] = f([a, b, c]);
            });
    }

    #[cfg(not(feature = "multi-thread"))]
    for (((o0, o1), o2), ((&a, &b), &c)) in d0
        .iter_mut()
        .zip(d1.iter_mut())
        .zip(d2.iter_mut())
        .zip(s0.iter().zip(s1).zip(s2))
    {
        [*o0, *o1, *o2] = f([a, b, c]);
    }
}

/// Like [`map_pixels`] but collapses every pixel into a single value
pub(crate) fn reduce_pixels<T, F>(src: [&Grid<T>; 3], dst: &mut Grid<T>, f: F)
where
    T: Sample,
    F: Fn([T; 3]) -> T + Send + Sync,
{
    let [s0, s1, s2] = src.map(|grid| grid.as_slice());
    let dst = dst.as_mut_slice();

    debug_assert!([s1.len(), s2.len(), dst.len()]
        .iter()
        .all(|&len| len == s0.len()));

    #[cfg(feature = "multi-thread")]
    {
        use rayon::prelude::*;

        let min_len = min_job_len(s0.len());

        dst.par_iter_mut()
            .zip(s0.par_iter().zip(s1.par_iter()).zip(s2.par_iter()))
            .with_min_len(min_len)
            .for_each(|(o, ((&a, &b), &c))| *o = f([a, b, c]));
    }

    #[cfg(not(feature = "multi-thread"))]
    for (o, ((&a, &b), &c)) in dst.iter_mut().zip(s0.iter().zip(s1).zip(s2)) {
        *o = f([a, b, c]);
    }
}

/// Multiply the row major matrix `m` with the column vector `v`
#[inline(always)]
pub(crate) fn mat_mul<T: Sample>(m: &[[f64; 3]; 3], [a, b, c]: [T; 3]) -> [T; 3] {
    m.map(|row| T::lit(row[0]) * a + T::lit(row[1]) * b + T::lit(row[2]) * c)
}
