use std::fmt;

/// Color space of an image variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColorSpace {
    /// Device R, G, B in `0..=255`
    Rgb,

    /// Normalized R'G'B', each channel scaled by `255 / (r + g + b)`
    NormalizedRgb,

    /// CIE 1931 XYZ tristimulus values, D65 white at Y = 100
    Xyz,

    /// CIE L*a*b*, D65 reference white
    Lab,

    /// Hue, saturation and value, each in `0..=1`
    Hsv,

    /// Y'CbCr with BT.601 full range coefficients, luma in `0..=1`
    YCbCr,
}

impl ColorSpace {
    pub fn variants() -> impl Iterator<Item = ColorSpace> {
        use ColorSpace::*;

        [Rgb, NormalizedRgb, Xyz, Lab, Hsv, YCbCr].into_iter()
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorSpace::Rgb => "RGB",
            ColorSpace::NormalizedRgb => "Normalized R'G'B'",
            ColorSpace::Xyz => "XYZ",
            ColorSpace::Lab => "L*a*b*",
            ColorSpace::Hsv => "HSV",
            ColorSpace::YCbCr => "Y'CbCr",
        };

        f.write_str(name)
    }
}
