use crate::{ColorSpace, Grid, ImageMut, ImageRef};
use std::{fmt, io};

/// A channel grid of an image does not match the image's declared height and width
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "inconsistent height and width in {space} image: declared {height}x{width}, \
     channel {channel} is {channel_height}x{channel_width}"
)]
pub struct InconsistentImage {
    pub space: ColorSpace,
    pub height: usize,
    pub width: usize,
    pub channel: &'static str,
    pub channel_height: usize,
    pub channel_width: usize,
}

/// Capabilities shared by every color image variant
///
/// Code that has to act on a concrete variant goes through
/// [`as_image_ref`](ColorImage::as_image_ref) or
/// [`as_image_mut`](ColorImage::as_image_mut) and matches on the returned handle.
pub trait ColorImage<T> {
    fn color_space(&self) -> ColorSpace;
    fn height(&self) -> usize;
    fn width(&self) -> usize;

    /// Reallocate all channels to `height` x `width`, contents are unspecified afterwards
    fn set_size(&mut self, height: usize, width: usize);

    fn verify(&self) -> Result<(), InconsistentImage>;

    /// Returns `true` if all channels have the image's declared dimensions
    fn check(&self) -> bool {
        self.verify().is_ok()
    }

    /// Write a human readable dump of the image
    fn print(&self, sink: &mut dyn io::Write) -> io::Result<()>;

    fn as_image_ref(&self) -> ImageRef<'_, T>;
    fn as_image_mut(&mut self) -> ImageMut<'_, T>;
}

macro_rules! color_images {
    ($(
        $(#[$meta:meta])*
        $name:ident: $space:ident {
            $c1:ident: $l1:literal,
            $c2:ident: $l2:literal,
            $c3:ident: $l3:literal $(,)?
        }
    )*) => {
        $(
        $(#[$meta])*
        ///
        /// The channel grids are public, so the `(height, width)` invariant is checked by
        /// [`check`](Self::check) rather than enforced.
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $name<T> {
            pub height: usize,
            pub width: usize,
            pub $c1: Grid<T>,
            pub $c2: Grid<T>,
            pub $c3: Grid<T>,
        }

        impl<T: Copy + Default> $name<T> {
            /// Empty 0x0 image
            pub fn new() -> Self {
                Self::with_size(0, 0)
            }

            pub fn with_size(height: usize, width: usize) -> Self {
                Self {
                    height,
                    width,
                    $c1: Grid::new(height, width),
                    $c2: Grid::new(height, width),
                    $c3: Grid::new(height, width),
                }
            }

            /// Reallocate all channels to `height` x `width`
            ///
            /// Prior contents are not preserved, fill the image before reading it.
            pub fn set_size(&mut self, height: usize, width: usize) {
                self.height = height;
                self.width = width;
                self.$c1.set_size(height, width);
                self.$c2.set_size(height, width);
                self.$c3.set_size(height, width);
            }
        }

        impl<T: Copy> $name<T> {
            pub fn filled(height: usize, width: usize, $c1: T, $c2: T, $c3: T) -> Self {
                Self {
                    height,
                    width,
                    $c1: Grid::filled(height, width, $c1),
                    $c2: Grid::filled(height, width, $c2),
                    $c3: Grid::filled(height, width, $c3),
                }
            }

            pub const fn color_space(&self) -> ColorSpace {
                ColorSpace::$space
            }

            pub fn fill(&mut self, $c1: T, $c2: T, $c3: T) {
                self.$c1.fill($c1);
                self.$c2.fill($c2);
                self.$c3.fill($c3);
            }

            pub fn verify(&self) -> Result<(), InconsistentImage> {
                for (channel, grid) in [($l1, &self.$c1), ($l2, &self.$c2), ($l3, &self.$c3)] {
                    let (channel_height, channel_width) = grid.dims();

                    if (channel_height, channel_width) != (self.height, self.width) {
                        return Err(InconsistentImage {
                            space: ColorSpace::$space,
                            height: self.height,
                            width: self.width,
                            channel,
                            channel_height,
                            channel_width,
                        });
                    }
                }

                Ok(())
            }

            pub fn check(&self) -> bool {
                self.verify().is_ok()
            }

            /// Channels in declaration order
            pub fn channels(&self) -> [&Grid<T>; 3] {
                [&self.$c1, &self.$c2, &self.$c3]
            }

            pub fn channels_mut(&mut self) -> [&mut Grid<T>; 3] {
                [&mut self.$c1, &mut self.$c2, &mut self.$c3]
            }
        }

        impl<T: Copy + fmt::Display> $name<T> {
            pub fn print<W: io::Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
                write!(sink, "{self}")
            }
        }

        impl<T: Copy + fmt::Display> fmt::Display for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                writeln!(f, "Height: {}", self.height)?;
                writeln!(f, "Width : {}", self.width)?;
                writeln!(f, "{}:", $l1)?;
                write!(f, "{}", self.$c1)?;
                writeln!(f, "{}:", $l2)?;
                write!(f, "{}", self.$c2)?;
                writeln!(f, "{}:", $l3)?;
                write!(f, "{}", self.$c3)
            }
        }

        impl<T: Copy + Default + fmt::Display> ColorImage<T> for $name<T> {
            fn color_space(&self) -> ColorSpace {
                ColorSpace::$space
            }

            fn height(&self) -> usize {
                self.height
            }

            fn width(&self) -> usize {
                self.width
            }

            fn set_size(&mut self, height: usize, width: usize) {
                $name::set_size(self, height, width)
            }

            fn verify(&self) -> Result<(), InconsistentImage> {
                $name::verify(self)
            }

            fn print(&self, sink: &mut dyn io::Write) -> io::Result<()> {
                write!(sink, "{self}")
            }

            fn as_image_ref(&self) -> ImageRef<'_, T> {
                ImageRef::$space(self)
            }

            fn as_image_mut(&mut self) -> ImageMut<'_, T> {
                ImageMut::$space(self)
            }
        }

        impl<'a, T> From<&'a $name<T>> for ImageRef<'a, T> {
            fn from(image: &'a $name<T>) -> Self {
                ImageRef::$space(image)
            }
        }

        impl<'a, T> From<&'a mut $name<T>> for ImageMut<'a, T> {
            fn from(image: &'a mut $name<T>) -> Self {
                ImageMut::$space(image)
            }
        }
        )*
    };
}

color_images! {
    /// Image in device RGB, every channel in `0..=255`
    RgbImage: Rgb {
        r: "R",
        g: "G",
        b: "B",
    }

    /// Image in normalized R'G'B', the channels of a pixel sum up to 255
    NormalizedRgbImage: NormalizedRgb {
        normalized_r: "Normalized R'",
        normalized_g: "Normalized G'",
        normalized_b: "Normalized B'",
    }

    /// Image in CIE XYZ, roughly `0..=100`
    XyzImage: Xyz {
        x: "X",
        y: "Y",
        z: "Z",
    }

    /// Image in CIE L*a*b*, L* in `0..=100`, a* and b* signed
    LabImage: Lab {
        l: "L*",
        a: "a*",
        b: "b*",
    }

    /// Image in HSV, every channel in `0..=1`
    HsvImage: Hsv {
        h: "H",
        s: "S",
        v: "V",
    }

    /// Image in Y'CbCr, luma in `0..=1`, chroma in `-0.5..=0.5`
    YCbCrImage: YCbCr {
        y: "Y'",
        cb: "Cb",
        cr: "Cr",
    }
}
