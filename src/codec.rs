//! Boundary to the image file codecs and the resampler
//!
//! Codecs work on 8-bit device RGB. Images of any variant are converted to RGB and
//! quantized before they are handed to a [`Codec`], and widened and converted back
//! afterwards.

use crate::convert::{from_rgb, to_rgb};
use crate::gray::{gray_to_rgb, rgb_to_gray};
use crate::{Grid, ImageMut, ImageRef, RgbImage, Sample, Window};
use std::io::Cursor;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

pub use image::ImageFormat;

/// Everything that can go wrong at the codec boundary
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("cannot encode an empty {height}x{width} image")]
    EmptyImage { height: usize, width: usize },

    #[error("image dimensions {height}x{width} exceed the codec's limits")]
    TooLarge { height: usize, width: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("codec failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("resampler failed: {0}")]
    Resize(#[from] fir::ResizeError),

    #[error("resampler rejected the image buffer: {0}")]
    Buffer(#[from] fir::ImageBufferError),

    #[error("buffer of length {got} does not hold a {height}x{width} RGB image")]
    BufferSize {
        height: usize,
        width: usize,
        got: usize,
    },
}

/// Primitives provided by an image codec library
///
/// Implementations only ever see consistent, non empty images.
pub trait Codec {
    fn decode(&self, bytes: &[u8]) -> Result<RgbImage<u8>, CodecError>;

    fn encode(&self, rgb: &RgbImage<u8>, format: ImageFormat) -> Result<Vec<u8>, CodecError>;

    /// Stretch `rgb` to exactly `height` x `width`, the aspect ratio is not preserved
    fn resample(
        &self,
        rgb: &RgbImage<u8>,
        height: usize,
        width: usize,
    ) -> Result<RgbImage<u8>, CodecError>;

    /// Copy out the part of `rgb` covered by `window`, which lies inside of `rgb`
    fn subregion(&self, rgb: &RgbImage<u8>, window: Window) -> Result<RgbImage<u8>, CodecError>;
}

impl<C: Codec + ?Sized> Codec for &C {
    fn decode(&self, bytes: &[u8]) -> Result<RgbImage<u8>, CodecError> {
        (**self).decode(bytes)
    }

    fn encode(&self, rgb: &RgbImage<u8>, format: ImageFormat) -> Result<Vec<u8>, CodecError> {
        (**self).encode(rgb, format)
    }

    fn resample(
        &self,
        rgb: &RgbImage<u8>,
        height: usize,
        width: usize,
    ) -> Result<RgbImage<u8>, CodecError> {
        (**self).resample(rgb, height, width)
    }

    fn subregion(&self, rgb: &RgbImage<u8>, window: Window) -> Result<RgbImage<u8>, CodecError> {
        (**self).subregion(rgb, window)
    }
}

/// [`Codec`] backed by the `image` crate, resampling with [`fast_image_resize`](fir)
#[derive(Debug, Clone)]
pub struct ImageCodec {
    alg: fir::ResizeAlg,
}

impl Default for ImageCodec {
    fn default() -> Self {
        Self::new(fir::ResizeAlg::Convolution(fir::FilterType::Lanczos3))
    }
}

impl ImageCodec {
    pub fn new(alg: fir::ResizeAlg) -> Self {
        Self { alg }
    }

    /// Process wide instance used by the functions without an explicit codec
    pub fn global() -> &'static ImageCodec {
        static GLOBAL: OnceLock<ImageCodec> = OnceLock::new();

        GLOBAL.get_or_init(|| {
            let codec = ImageCodec::default();
            debug!(alg = ?codec.alg, "initialized image codec");
            codec
        })
    }
}

impl Codec for ImageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<RgbImage<u8>, CodecError> {
        let decoded = image::load_from_memory(bytes)?.to_rgb8();

        debug!(
            height = decoded.height(),
            width = decoded.width(),
            "decoded image"
        );

        let (width, height) = decoded.dimensions();
        unpack_rgb8(height as usize, width as usize, decoded.as_raw())
    }

    fn encode(&self, rgb: &RgbImage<u8>, format: ImageFormat) -> Result<Vec<u8>, CodecError> {
        let buffer = to_image_buffer(rgb)?;

        let mut out = Cursor::new(Vec::new());
        buffer.write_to(&mut out, format)?;

        debug!(?format, bytes = out.get_ref().len(), "encoded image");

        Ok(out.into_inner())
    }

    fn resample(
        &self,
        rgb: &RgbImage<u8>,
        height: usize,
        width: usize,
    ) -> Result<RgbImage<u8>, CodecError> {
        let (src_height, src_width) = dims_u32(rgb.height, rgb.width)?;
        let (dst_height, dst_width) = dims_u32(height, width)?;

        let src = fir::images::Image::from_vec_u8(
            src_width,
            src_height,
            pack_rgb8(rgb),
            fir::PixelType::U8x3,
        )?;
        let mut dst = fir::images::Image::new(dst_width, dst_height, fir::PixelType::U8x3);

        fir::Resizer::new().resize(
            &src,
            &mut dst,
            &fir::ResizeOptions::new().resize_alg(self.alg),
        )?;

        debug!(
            from_height = rgb.height,
            from_width = rgb.width,
            height,
            width,
            "resampled image"
        );

        unpack_rgb8(height, width, dst.buffer())
    }

    fn subregion(&self, rgb: &RgbImage<u8>, window: Window) -> Result<RgbImage<u8>, CodecError> {
        let buffer = to_image_buffer(rgb)?;
        let (y, x) = dims_u32(window.y, window.x)?;
        let (height, width) = dims_u32(window.height, window.width)?;

        let cropped = image::imageops::crop_imm(&buffer, x, y, width, height).to_image();

        debug!(?window, "cropped image");

        unpack_rgb8(window.height, window.width, cropped.as_raw())
    }
}

fn dims_u32(height: usize, width: usize) -> Result<(u32, u32), CodecError> {
    match (u32::try_from(height), u32::try_from(width)) {
        (Ok(h), Ok(w)) => Ok((h, w)),
        _ => Err(CodecError::TooLarge { height, width }),
    }
}

/// Interleave the three planes into `RGBRGB...`
fn pack_rgb8(rgb: &RgbImage<u8>) -> Vec<u8> {
    let [r, g, b] = rgb.channels().map(Grid::as_slice);

    r.iter()
        .zip(g)
        .zip(b)
        .flat_map(|((&r, &g), &b)| [r, g, b])
        .collect()
}

fn unpack_rgb8(height: usize, width: usize, packed: &[u8]) -> Result<RgbImage<u8>, CodecError> {
    let expected = height.checked_mul(width).and_then(|n| n.checked_mul(3));

    if expected != Some(packed.len()) {
        return Err(CodecError::BufferSize {
            height,
            width,
            got: packed.len(),
        });
    }

    let mut rgb = RgbImage::with_size(height, width);
    let [r, g, b] = rgb.channels_mut().map(Grid::as_mut_slice);

    for (((px, r), g), b) in packed.chunks_exact(3).zip(r).zip(g).zip(b) {
        [*r, *g, *b] = [px[0], px[1], px[2]];
    }

    Ok(rgb)
}

fn to_image_buffer(rgb: &RgbImage<u8>) -> Result<image::RgbImage, CodecError> {
    let (height, width) = dims_u32(rgb.height, rgb.width)?;

    image::RgbImage::from_raw(width, height, pack_rgb8(rgb))
        .ok_or(CodecError::TooLarge {
            height: rgb.height,
            width: rgb.width,
        })
}

/// Convert any variant to 8-bit RGB, rounding and saturating every channel
///
/// # Panics
///
/// If `src` does not pass its `check`.
pub(crate) fn quantize<T: Sample>(src: ImageRef<'_, T>) -> RgbImage<u8> {
    src.assert_consistent();

    let narrow = |rgb: &RgbImage<T>| RgbImage {
        height: rgb.height,
        width: rgb.width,
        r: rgb.r.map(|v| v.to_byte()),
        g: rgb.g.map(|v| v.to_byte()),
        b: rgb.b.map(|v| v.to_byte()),
    };

    match src {
        ImageRef::Rgb(rgb) => narrow(rgb),
        src => {
            let mut rgb = RgbImage::<T>::new();
            to_rgb(src, &mut rgb);
            narrow(&rgb)
        }
    }
}

/// Widen 8-bit RGB into the working type and convert it into `dst`
pub(crate) fn widen<T: Sample>(rgb8: &RgbImage<u8>, dst: ImageMut<'_, T>) {
    let rgb = RgbImage {
        height: rgb8.height,
        width: rgb8.width,
        r: rgb8.r.map(T::from_byte),
        g: rgb8.g.map(T::from_byte),
        b: rgb8.b.map(T::from_byte),
    };

    match dst {
        ImageMut::Rgb(dst) => *dst = rgb,
        dst => from_rgb(&rgb, dst),
    }
}

pub(crate) fn quantize_gray<T: Sample>(src: &Grid<T>) -> RgbImage<u8> {
    let mut rgb = RgbImage::new();
    gray_to_rgb(&src.map(|v| v.to_byte()), &mut rgb);
    rgb
}

pub(crate) fn widen_gray<T: Sample>(rgb8: &RgbImage<u8>, dst: &mut Grid<T>) {
    let mut rgb = RgbImage::<T>::new();
    widen(rgb8, ImageMut::Rgb(&mut rgb));
    rgb_to_gray(&rgb, dst);
}

/// Decode an encoded image into RGB
pub fn decode<T: Sample>(bytes: &[u8]) -> Result<RgbImage<T>, CodecError> {
    decode_with(ImageCodec::global(), bytes)
}

pub fn decode_with<T: Sample>(codec: impl Codec, bytes: &[u8]) -> Result<RgbImage<T>, CodecError> {
    let mut rgb = RgbImage::new();
    decode_into_with(codec, bytes, &mut rgb)?;
    Ok(rgb)
}

/// Decode an encoded image into any variant
///
/// `dst` is only modified if decoding succeeds.
pub fn decode_into<'a, T: Sample>(
    bytes: &[u8],
    dst: impl Into<ImageMut<'a, T>>,
) -> Result<(), CodecError> {
    decode_into_with(ImageCodec::global(), bytes, dst)
}

pub fn decode_into_with<'a, T: Sample>(
    codec: impl Codec,
    bytes: &[u8],
    dst: impl Into<ImageMut<'a, T>>,
) -> Result<(), CodecError> {
    let rgb8 = codec.decode(bytes)?;
    widen(&rgb8, dst.into());
    Ok(())
}

/// Encode any variant, converting it to 8-bit RGB first
///
/// # Panics
///
/// If `src` does not pass its `check`.
pub fn encode<'a, T: Sample>(
    src: impl Into<ImageRef<'a, T>>,
    format: ImageFormat,
) -> Result<Vec<u8>, CodecError> {
    encode_with(ImageCodec::global(), src, format)
}

pub fn encode_with<'a, T: Sample>(
    codec: impl Codec,
    src: impl Into<ImageRef<'a, T>>,
    format: ImageFormat,
) -> Result<Vec<u8>, CodecError> {
    let src = src.into();
    src.assert_consistent();

    let (height, width) = (src.height(), src.width());
    if height == 0 || width == 0 {
        return Err(CodecError::EmptyImage { height, width });
    }

    codec.encode(&quantize(src), format)
}

/// Load an image file as RGB
pub fn load<T: Sample>(path: impl AsRef<Path>) -> Result<RgbImage<T>, CodecError> {
    load_with(ImageCodec::global(), path)
}

pub fn load_with<T: Sample>(
    codec: impl Codec,
    path: impl AsRef<Path>,
) -> Result<RgbImage<T>, CodecError> {
    let mut rgb = RgbImage::new();
    load_into_with(codec, path, &mut rgb)?;
    Ok(rgb)
}

/// Load an image file into any variant
///
/// `dst` is only modified if loading succeeds.
pub fn load_into<'a, T: Sample>(
    path: impl AsRef<Path>,
    dst: impl Into<ImageMut<'a, T>>,
) -> Result<(), CodecError> {
    load_into_with(ImageCodec::global(), path, dst)
}

pub fn load_into_with<'a, T: Sample>(
    codec: impl Codec,
    path: impl AsRef<Path>,
    dst: impl Into<ImageMut<'a, T>>,
) -> Result<(), CodecError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading image");

    let bytes = std::fs::read(path)?;
    decode_into_with(codec, &bytes, dst)
}

/// Save any variant to a file, the file format is derived from the path's extension
///
/// # Panics
///
/// If `src` does not pass its `check`.
pub fn save<'a, T: Sample>(
    src: impl Into<ImageRef<'a, T>>,
    path: impl AsRef<Path>,
) -> Result<(), CodecError> {
    save_with(ImageCodec::global(), src, path)
}

pub fn save_with<'a, T: Sample>(
    codec: impl Codec,
    src: impl Into<ImageRef<'a, T>>,
    path: impl AsRef<Path>,
) -> Result<(), CodecError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "saving image");

    let format = ImageFormat::from_path(path)?;
    let bytes = encode_with(codec, src, format)?;

    std::fs::write(path, bytes)?;
    Ok(())
}

/// Load an image file as grayscale, collapsing color to its luma
pub fn load_gray<T: Sample>(path: impl AsRef<Path>) -> Result<Grid<T>, CodecError> {
    load_gray_with(ImageCodec::global(), path)
}

pub fn load_gray_with<T: Sample>(
    codec: impl Codec,
    path: impl AsRef<Path>,
) -> Result<Grid<T>, CodecError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading grayscale image");

    let rgb8 = codec.decode(&std::fs::read(path)?)?;

    let mut gray = Grid::new(0, 0);
    widen_gray(&rgb8, &mut gray);
    Ok(gray)
}

/// Save a grayscale image, every color channel of the file gets the same value
pub fn save_gray<T: Sample>(src: &Grid<T>, path: impl AsRef<Path>) -> Result<(), CodecError> {
    save_gray_with(ImageCodec::global(), src, path)
}

pub fn save_gray_with<T: Sample>(
    codec: impl Codec,
    src: &Grid<T>,
    path: impl AsRef<Path>,
) -> Result<(), CodecError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "saving grayscale image");

    let (height, width) = src.dims();
    if height == 0 || width == 0 {
        return Err(CodecError::EmptyImage { height, width });
    }

    let format = ImageFormat::from_path(path)?;
    let bytes = codec.encode(&quantize_gray(src), format)?;

    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LabImage;

    fn checker() -> RgbImage<u8> {
        let mut rgb = RgbImage::with_size(4, 6);
        rgb.r = Grid::from_fn(4, 6, |y, x| ((x + y) % 2 * 255) as u8);
        rgb.g = Grid::from_fn(4, 6, |y, x| (y * 40 + x) as u8);
        rgb.b = Grid::from_fn(4, 6, |_, x| (x * 30) as u8);
        rgb
    }

    #[test]
    fn pack_unpack() {
        let rgb = checker();

        let packed = pack_rgb8(&rgb);
        assert_eq!(packed.len(), 4 * 6 * 3);
        assert_eq!(&packed[..3], &[0, 0, 0]);
        assert_eq!(&packed[3..6], &[255, 1, 30]);

        assert_eq!(unpack_rgb8(4, 6, &packed).unwrap(), rgb);
        let err = unpack_rgb8(4, 5, &packed).unwrap_err();
        assert!(matches!(
            err,
            CodecError::BufferSize {
                height: 4,
                width: 5,
                got: 72,
            }
        ));
        assert!(err.to_string().contains("4x5 RGB image"));

        let err = unpack_rgb8(usize::MAX, 2, &packed).unwrap_err();
        assert!(matches!(err, CodecError::BufferSize { .. }));
    }

    #[test]
    fn png_in_memory_round_trip() {
        let codec = ImageCodec::default();
        let rgb = checker();

        let bytes = codec.encode(&rgb, ImageFormat::Png).unwrap();
        assert_eq!(codec.decode(&bytes).unwrap(), rgb);
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode::<f32>(b"definitely not an image").unwrap_err();

        assert!(matches!(err, CodecError::Image(_)));
    }

    #[test]
    fn resample_stretches() {
        let codec = ImageCodec::new(fir::ResizeAlg::Nearest);
        let rgb = RgbImage::filled(2, 2, 10u8, 20, 30);

        let out = codec.resample(&rgb, 5, 3).unwrap();

        assert_eq!((out.height, out.width), (5, 3));
        assert!(out.check());
        assert!(out.r.as_slice().iter().all(|&v| v == 10));
        assert!(out.b.as_slice().iter().all(|&v| v == 30));
    }

    #[test]
    fn subregion_copies_window() {
        let codec = ImageCodec::default();
        let rgb = checker();

        let out = codec
            .subregion(
                &rgb,
                Window {
                    x: 2,
                    y: 1,
                    width: 3,
                    height: 2,
                },
            )
            .unwrap();

        assert_eq!((out.height, out.width), (2, 3));
        assert_eq!(out.g[(0, 0)], rgb.g[(1, 2)]);
        assert_eq!(out.g[(1, 2)], rgb.g[(2, 4)]);
    }

    #[test]
    fn quantize_rounds_and_saturates() {
        let rgb = RgbImage::filled(1, 1, 300.0f64, -2.0, 127.5);

        let rgb8 = quantize(ImageRef::from(&rgb));

        assert_eq!(
            [rgb8.r[(0, 0)], rgb8.g[(0, 0)], rgb8.b[(0, 0)]],
            [255, 0, 128]
        );
    }

    #[test]
    fn encode_empty_image_fails() {
        let lab = LabImage::<f64>::new();

        let err = encode(&lab, ImageFormat::Png).unwrap_err();

        assert!(matches!(
            err,
            CodecError::EmptyImage {
                height: 0,
                width: 0
            }
        ));
    }

    #[test]
    fn global_is_shared() {
        assert!(std::ptr::eq(ImageCodec::global(), ImageCodec::global()));
    }
}
