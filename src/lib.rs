//! Raster images held in one of six color spaces with conversions between them
//!
//! Every variant ([`RgbImage`], [`NormalizedRgbImage`], [`XyzImage`], [`LabImage`],
//! [`HsvImage`], [`YCbCrImage`]) stores three [`Grid`]s of the same dimensions.
//! [`convert`] turns any variant into any other one, going through RGB when neither side
//! is RGB.
//!
//! ```
//! use sense_image::{LabImage, RgbImage, convert};
//!
//! let rgb = RgbImage::filled(2, 2, 255.0f64, 0.0, 0.0);
//! let mut lab = LabImage::new();
//!
//! convert(&rgb, &mut lab);
//!
//! assert_eq!((lab.height, lab.width), (2, 2));
//! ```

pub use color::ColorSpace;
pub use convert::{
    FromRgb, ToRgb, convert, from_rgb, hsv_to_rgb, lab_to_xyz, rgb_to_hsv, rgb_to_normalized,
    rgb_to_xyz, rgb_to_ycbcr, to_rgb, xyz_to_lab, xyz_to_rgb, ycbcr_to_rgb,
};
pub use gray::{LUMA, from_gray, gray_to_rgb, luma, rgb_to_gray, threshold, to_gray};
pub use grid::{Grid, GridError};
pub use handle::{ImageMut, ImageRef};
pub use sample::Sample;
pub use variants::{
    ColorImage, HsvImage, InconsistentImage, LabImage, NormalizedRgbImage, RgbImage, XyzImage,
    YCbCrImage,
};

#[cfg(feature = "codec")]
pub use codec::{
    Codec, CodecError, ImageCodec, ImageFormat, decode, decode_into, decode_into_with,
    decode_with, encode, encode_with, load, load_gray, load_gray_with, load_into, load_into_with,
    load_with, save, save_gray, save_gray_with, save_with,
};
#[cfg(feature = "codec")]
pub use crop::{CropError, Window, crop, crop_gray, crop_gray_with, crop_rgb, crop_with};
#[cfg(feature = "codec")]
pub use resize::{ResizeError, resize, resize_gray, resize_gray_with, resize_rgb, resize_with};


#[cfg(feature = "codec")]
pub use fir;
#[cfg(feature = "codec")]
pub use image;

#[cfg(feature = "codec")]
mod codec;
mod color;
mod convert;
#[cfg(feature = "codec")]
mod crop;
mod gray;
mod grid;
mod handle;
#[cfg(feature = "codec")]
mod resize;
mod sample;
mod variants;
