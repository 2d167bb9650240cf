use crate::{
    ColorSpace, HsvImage, InconsistentImage, LabImage, NormalizedRgbImage, RgbImage, XyzImage,
    YCbCrImage,
};
use std::{fmt, io};

/// Borrowed view of some color image variant
///
/// The variant is the tag, so the tag can never disagree with the payload.
#[derive(Debug)]
pub enum ImageRef<'a, T> {
    Rgb(&'a RgbImage<T>),
    NormalizedRgb(&'a NormalizedRgbImage<T>),
    Xyz(&'a XyzImage<T>),
    Lab(&'a LabImage<T>),
    Hsv(&'a HsvImage<T>),
    YCbCr(&'a YCbCrImage<T>),
}

/// Mutably borrowed view of some color image variant
#[derive(Debug)]
pub enum ImageMut<'a, T> {
    Rgb(&'a mut RgbImage<T>),
    NormalizedRgb(&'a mut NormalizedRgbImage<T>),
    Xyz(&'a mut XyzImage<T>),
    Lab(&'a mut LabImage<T>),
    Hsv(&'a mut HsvImage<T>),
    YCbCr(&'a mut YCbCrImage<T>),
}

macro_rules! dispatch {
    ($handle:expr, $image:ident => $body:expr) => {
        match $handle {
            Self::Rgb($image) => $body,
            Self::NormalizedRgb($image) => $body,
            Self::Xyz($image) => $body,
            Self::Lab($image) => $body,
            Self::Hsv($image) => $body,
            Self::YCbCr($image) => $body,
        }
    };
}

impl<T> Clone for ImageRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ImageRef<'_, T> {}

impl<'a, T: Copy> ImageRef<'a, T> {
    pub fn color_space(&self) -> ColorSpace {
        dispatch!(self, image => image.color_space())
    }

    pub fn height(&self) -> usize {
        dispatch!(self, image => image.height)
    }

    pub fn width(&self) -> usize {
        dispatch!(self, image => image.width)
    }

    pub fn verify(&self) -> Result<(), InconsistentImage> {
        dispatch!(self, image => image.verify())
    }

    pub fn check(&self) -> bool {
        self.verify().is_ok()
    }

    /// Panics with the consistency failure if the image does not pass [`check`](Self::check)
    #[track_caller]
    pub(crate) fn assert_consistent(&self) {
        if let Err(e) = self.verify() {
            panic!("{e}");
        }
    }
}

impl<T: Copy + fmt::Display> ImageRef<'_, T> {
    pub fn print<W: io::Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        write!(sink, "{self}")
    }
}

impl<T: Copy + fmt::Display> fmt::Display for ImageRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, image => fmt::Display::fmt(image, f))
    }
}

impl<'a, T: Copy + Default> ImageMut<'a, T> {
    pub fn color_space(&self) -> ColorSpace {
        self.as_ref().color_space()
    }

    pub fn height(&self) -> usize {
        self.as_ref().height()
    }

    pub fn width(&self) -> usize {
        self.as_ref().width()
    }

    pub fn set_size(&mut self, height: usize, width: usize) {
        dispatch!(self, image => image.set_size(height, width))
    }

    pub fn verify(&self) -> Result<(), InconsistentImage> {
        self.as_ref().verify()
    }

    pub fn check(&self) -> bool {
        self.as_ref().check()
    }

    pub fn as_ref(&self) -> ImageRef<'_, T> {
        match self {
            Self::Rgb(image) => ImageRef::Rgb(image),
            Self::NormalizedRgb(image) => ImageRef::NormalizedRgb(image),
            Self::Xyz(image) => ImageRef::Xyz(image),
            Self::Lab(image) => ImageRef::Lab(image),
            Self::Hsv(image) => ImageRef::Hsv(image),
            Self::YCbCr(image) => ImageRef::YCbCr(image),
        }
    }

    /// Shorter lived handle to the same image
    pub fn reborrow(&mut self) -> ImageMut<'_, T> {
        match self {
            Self::Rgb(image) => ImageMut::Rgb(image),
            Self::NormalizedRgb(image) => ImageMut::NormalizedRgb(image),
            Self::Xyz(image) => ImageMut::Xyz(image),
            Self::Lab(image) => ImageMut::Lab(image),
            Self::Hsv(image) => ImageMut::Hsv(image),
            Self::YCbCr(image) => ImageMut::YCbCr(image),
        }
    }
}

impl<T: Copy + Default + fmt::Display> ImageMut<'_, T> {
    pub fn print<W: io::Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        self.as_ref().print(sink)
    }
}

impl<T: Copy + Default + fmt::Display> fmt::Display for ImageMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_ref(), f)
    }
}
