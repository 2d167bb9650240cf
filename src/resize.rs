use crate::codec::{Codec, CodecError, ImageCodec, quantize, quantize_gray, widen, widen_gray};
use crate::{Grid, ImageMut, ImageRef, RgbImage, Sample};
use tracing::trace;

/// Everything that can go wrong when calling [`resize`]
#[derive(Debug, thiserror::Error)]
pub enum ResizeError {
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Stretch any variant to `height` x `width`, by way of RGB if it is not RGB already
///
/// The aspect ratio is not preserved. A zero `height` or `width` resizes `dst` to 0x0
/// without invoking the codec. Otherwise an empty `src` has nothing to resample from and
/// fails with [`CodecError::EmptyImage`]. `dst` is only modified on success.
///
/// # Panics
///
/// If `src` does not pass its `check`.
pub fn resize<'a, 'b, T: Sample>(
    src: impl Into<ImageRef<'a, T>>,
    dst: impl Into<ImageMut<'b, T>>,
    height: usize,
    width: usize,
) -> Result<(), ResizeError> {
    resize_with(ImageCodec::global(), src, dst, height, width)
}

pub fn resize_with<'a, 'b, T: Sample>(
    codec: impl Codec,
    src: impl Into<ImageRef<'a, T>>,
    dst: impl Into<ImageMut<'b, T>>,
    height: usize,
    width: usize,
) -> Result<(), ResizeError> {
    let src = src.into();
    let mut dst = dst.into();

    src.assert_consistent();

    trace!(
        space = %src.color_space(),
        from_height = src.height(),
        from_width = src.width(),
        height,
        width,
        "resize"
    );

    if height == 0 || width == 0 {
        dst.set_size(0, 0);
        return Ok(());
    }

    if src.height() == 0 || src.width() == 0 {
        return Err(CodecError::EmptyImage {
            height: src.height(),
            width: src.width(),
        }
        .into());
    }

    let resampled = codec.resample(&quantize(src), height, width)?;
    widen(&resampled, dst);

    Ok(())
}

/// Stretch an RGB image, see [`resize`]
pub fn resize_rgb<T: Sample>(
    src: &RgbImage<T>,
    dst: &mut RgbImage<T>,
    height: usize,
    width: usize,
) -> Result<(), ResizeError> {
    resize(src, dst, height, width)
}

/// Stretch a grayscale image, see [`resize`]
pub fn resize_gray<T: Sample>(
    src: &Grid<T>,
    dst: &mut Grid<T>,
    height: usize,
    width: usize,
) -> Result<(), ResizeError> {
    resize_gray_with(ImageCodec::global(), src, dst, height, width)
}

pub fn resize_gray_with<T: Sample>(
    codec: impl Codec,
    src: &Grid<T>,
    dst: &mut Grid<T>,
    height: usize,
    width: usize,
) -> Result<(), ResizeError> {
    trace!(
        from_height = src.height(),
        from_width = src.width(),
        height,
        width,
        "resize grayscale"
    );

    if height == 0 || width == 0 {
        dst.set_size(0, 0);
        return Ok(());
    }

    if src.height() == 0 || src.width() == 0 {
        let (height, width) = src.dims();
        return Err(CodecError::EmptyImage { height, width }.into());
    }

    let resampled = codec.resample(&quantize_gray(src), height, width)?;
    widen_gray(&resampled, dst);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LabImage, YCbCrImage};

    #[test]
    fn resize_rgb_stretches() {
        let src = RgbImage::filled(3, 3, 200.0f32, 100.0, 0.0);
        let mut dst = RgbImage::<f32>::new();

        resize_rgb(&src, &mut dst, 6, 2).unwrap();

        assert_eq!((dst.height, dst.width), (6, 2));
        assert!(dst.check());
        assert!(dst.r.as_slice().iter().all(|&v| (v - 200.0).abs() <= 1.0));
        assert!(dst.g.as_slice().iter().all(|&v| (v - 100.0).abs() <= 1.0));
        assert!(dst.b.as_slice().iter().all(|&v| v <= 1.0));
    }

    #[test]
    fn zero_size_empties_destination() {
        let src = RgbImage::filled(3, 3, 1.0f64, 2.0, 3.0);
        let mut dst = LabImage::filled(2, 2, 1.0f64, 1.0, 1.0);

        resize(&src, &mut dst, 0, 5).unwrap();
        assert_eq!((dst.height, dst.width), (0, 0));
        assert!(dst.check());

        let mut gray = Grid::filled(2, 2, 1.0f64);
        resize_gray(&Grid::filled(3, 3, 9.0), &mut gray, 4, 0).unwrap();
        assert_eq!(gray.dims(), (0, 0));
    }

    #[test]
    fn empty_source_fails_and_leaves_destination() {
        let src = RgbImage::<f64>::new();
        let mut dst = LabImage::filled(2, 2, 1.0f64, 1.0, 1.0);
        let before = dst.clone();

        let err = resize(&src, &mut dst, 3, 3).unwrap_err();
        assert!(matches!(
            err,
            ResizeError::Codec(CodecError::EmptyImage {
                height: 0,
                width: 0
            })
        ));
        assert_eq!(dst, before);

        let mut gray = Grid::filled(2, 2, 1.0f64);
        let err = resize_gray(&Grid::new(0, 4), &mut gray, 3, 3).unwrap_err();
        assert!(matches!(
            err,
            ResizeError::Codec(CodecError::EmptyImage {
                height: 0,
                width: 4
            })
        ));
        assert_eq!(gray, Grid::filled(2, 2, 1.0));
    }

    #[test]
    fn resize_other_variant_keeps_kind() {
        let rgb = RgbImage::filled(4, 4, 90.0f64, 160.0, 30.0);
        let mut src = YCbCrImage::<f64>::new();
        crate::from_rgb(&rgb, &mut src);

        let mut dst = YCbCrImage::<f64>::new();
        resize(&src, &mut dst, 8, 8).unwrap();

        assert_eq!((dst.height, dst.width), (8, 8));
        assert!(dst.check());

        let mut back = RgbImage::<f64>::new();
        crate::to_rgb(&dst, &mut back);
        assert!(back.g.as_slice().iter().all(|&v| (v - 160.0).abs() <= 2.0));
    }

    #[test]
    fn resize_gray_stretches() {
        let src = Grid::filled(2, 2, 42.0f64);
        let mut dst = Grid::new(0, 0);

        resize_gray(&src, &mut dst, 3, 5).unwrap();

        assert_eq!(dst.dims(), (3, 5));
        assert!(dst.as_slice().iter().all(|&v| (v - 42.0).abs() <= 1.0));
    }
}
