use crate::codec::{Codec, CodecError, ImageCodec, quantize, quantize_gray, widen, widen_gray};
use crate::{Grid, ImageMut, ImageRef, RgbImage, Sample};
use tracing::trace;

/// Error indicating an invalid [`Window`] for a given image
#[derive(Debug, thiserror::Error)]
pub enum CropError {
    #[error("window {window:?} goes out of the {height}x{width} source image's bounds")]
    WindowOutOfBounds {
        window: Window,
        height: usize,
        width: usize,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Rect used to mark the "cropping" window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Window {
    /// Window at `(y, x)` spanning `height` x `width`
    pub fn new(y: usize, x: usize, height: usize, width: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn bounds_check(self, height: usize, width: usize) -> Result<(), CropError> {
        let out_of_bounds = CropError::WindowOutOfBounds {
            window: self,
            height,
            width,
        };

        let w = self.x.checked_add(self.width);
        let h = self.y.checked_add(self.height);

        match (w, h) {
            (Some(w), Some(h)) if w <= width && h <= height => Ok(()),
            _ => Err(out_of_bounds),
        }
    }
}

/// Crop any variant, by way of RGB if it is not RGB already
///
/// The window is checked against the source first, so a window starting outside of the
/// source fails even if it is empty. A valid empty window resizes `dst` to 0x0 without
/// invoking the codec. `dst` is only modified on success.
///
/// # Panics
///
/// If `src` does not pass its `check`.
pub fn crop<'a, 'b, T: Sample>(
    src: impl Into<ImageRef<'a, T>>,
    dst: impl Into<ImageMut<'b, T>>,
    window: Window,
) -> Result<(), CropError> {
    crop_with(ImageCodec::global(), src, dst, window)
}

pub fn crop_with<'a, 'b, T: Sample>(
    codec: impl Codec,
    src: impl Into<ImageRef<'a, T>>,
    dst: impl Into<ImageMut<'b, T>>,
    window: Window,
) -> Result<(), CropError> {
    let src = src.into();
    let mut dst = dst.into();

    src.assert_consistent();
    window.bounds_check(src.height(), src.width())?;

    trace!(space = %src.color_space(), ?window, "crop");

    if window.is_empty() {
        dst.set_size(0, 0);
        return Ok(());
    }

    let cropped = codec.subregion(&quantize(src), window)?;
    widen(&cropped, dst);

    Ok(())
}

/// Crop an RGB image, see [`crop`]
pub fn crop_rgb<T: Sample>(
    src: &RgbImage<T>,
    dst: &mut RgbImage<T>,
    window: Window,
) -> Result<(), CropError> {
    crop(src, dst, window)
}

/// Crop a grayscale image, see [`crop`]
pub fn crop_gray<T: Sample>(
    src: &Grid<T>,
    dst: &mut Grid<T>,
    window: Window,
) -> Result<(), CropError> {
    crop_gray_with(ImageCodec::global(), src, dst, window)
}

pub fn crop_gray_with<T: Sample>(
    codec: impl Codec,
    src: &Grid<T>,
    dst: &mut Grid<T>,
    window: Window,
) -> Result<(), CropError> {
    window.bounds_check(src.height(), src.width())?;

    trace!(?window, "crop grayscale");

    if window.is_empty() {
        dst.set_size(0, 0);
        return Ok(());
    }

    let cropped = codec.subregion(&quantize_gray(src), window)?;
    widen_gray(&cropped, dst);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColorSpace, HsvImage};

    fn gradient() -> RgbImage<f64> {
        let mut rgb = RgbImage::<f64>::with_size(6, 8);
        rgb.r = Grid::from_fn(6, 8, |y, x| (y * 40 + x) as f64);
        rgb.g = Grid::from_fn(6, 8, |y, x| (x * 30 + y) as f64);
        rgb.b = Grid::filled(6, 8, 77.0);
        rgb
    }

    #[test]
    fn bounds() {
        let ok = Window::new(2, 3, 4, 5);
        assert!(ok.bounds_check(6, 8).is_ok());

        let too_wide = Window::new(0, 4, 1, 5);
        assert!(too_wide.bounds_check(6, 8).is_err());

        let overflow = Window::new(0, usize::MAX, 1, 1);
        assert!(overflow.bounds_check(6, 8).is_err());
    }

    #[test]
    fn crop_rgb_window() {
        let src = gradient();
        let mut dst = RgbImage::<f64>::new();

        crop_rgb(&src, &mut dst, Window::new(1, 2, 3, 4)).unwrap();

        assert_eq!((dst.height, dst.width), (3, 4));
        assert!(dst.check());
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(dst.r[(y, x)], src.r[(y + 1, x + 2)]);
                assert_eq!(dst.g[(y, x)], src.g[(y + 1, x + 2)]);
                assert_eq!(dst.b[(y, x)], 77.0);
            }
        }
    }

    #[test]
    fn out_of_bounds_leaves_destination() {
        let src = gradient();
        let mut dst = HsvImage::filled(1, 1, 0.5f64, 0.5, 0.5);
        let before = dst.clone();

        let err = crop(&src, &mut dst, Window::new(5, 0, 2, 1)).unwrap_err();

        assert!(matches!(err, CropError::WindowOutOfBounds { .. }));
        assert_eq!(dst, before);
    }

    #[test]
    fn empty_window_outside_fails() {
        let src = gradient();
        let mut dst = RgbImage::<f64>::new();

        assert!(crop(&src, &mut dst, Window::new(7, 0, 0, 0)).is_err());
        assert!(crop(&src, &mut dst, Window::new(6, 8, 0, 0)).is_ok());
    }

    #[test]
    fn crop_into_other_variant() {
        let src = gradient();
        let mut hsv = HsvImage::<f64>::new();

        crop(&src, &mut hsv, Window::new(0, 0, 2, 2)).unwrap();

        assert_eq!(hsv.color_space(), ColorSpace::Hsv);
        assert_eq!((hsv.height, hsv.width), (2, 2));
        assert!(hsv.check());
    }

    #[test]
    fn crop_gray_window() {
        let src = Grid::from_fn(5, 5, |y, x| (y * 5 + x) as f32);
        let mut dst = Grid::new(0, 0);

        crop_gray(&src, &mut dst, Window::new(3, 1, 2, 3)).unwrap();

        assert_eq!(dst.dims(), (2, 3));
        assert_eq!(dst.as_slice(), &[16.0, 17.0, 18.0, 21.0, 22.0, 23.0]);
    }
}
