//! Channel layouts of a pixel buffer and the conversions between them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The channel order/format tag of a pixel buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    Bgr,
    Rgb,
    Rgba,
    Gray,
}

impl ColorSpace {
    /// Number of interleaved channels per pixel.
    #[inline]
    pub fn channels(self) -> u8 {
        match self {
            ColorSpace::Gray => 1,
            ColorSpace::Bgr | ColorSpace::Rgb => 3,
            ColorSpace::Rgba => 4,
        }
    }

    /// Default tag for a freshly allocated buffer with `channels` channels.
    pub fn for_channels(channels: u8) -> Option<Self> {
        match channels {
            1 => Some(ColorSpace::Gray),
            3 => Some(ColorSpace::Bgr),
            4 => Some(ColorSpace::Rgba),
            _ => None,
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorSpace::Bgr => "BGR",
            ColorSpace::Rgb => "RGB",
            ColorSpace::Rgba => "RGBA",
            ColorSpace::Gray => "GRAY",
        };
        f.write_str(name)
    }
}

/// A supported pixel conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Conversion {
    /// Swap the first and third channel of a 3-channel buffer.
    SwapRedBlue,
    /// Weighted luma; `red` is the index of the red channel in the source.
    ToGray { red: usize },
    DropAlpha,
    AddAlpha,
    /// Replicate a single channel across three.
    Replicate,
}

/// The fixed table of supported `(from, to)` conversions.
pub(crate) fn conversion(from: ColorSpace, to: ColorSpace) -> Option<Conversion> {
    use ColorSpace::*;

    match (from, to) {
        (Bgr, Rgb) | (Rgb, Bgr) => Some(Conversion::SwapRedBlue),
        (Bgr, Gray) => Some(Conversion::ToGray { red: 2 }),
        (Rgb, Gray) | (Rgba, Gray) => Some(Conversion::ToGray { red: 0 }),
        (Rgba, Rgb) => Some(Conversion::DropAlpha),
        (Rgb, Rgba) => Some(Conversion::AddAlpha),
        (Gray, Rgb) | (Gray, Bgr) => Some(Conversion::Replicate),
        _ => None,
    }
}

/// Converts an interleaved buffer. The caller has already checked the table.
pub(crate) fn convert(
    data: &[u8],
    from: ColorSpace,
    to: ColorSpace,
    conversion: Conversion,
) -> Vec<u8> {
    let src = usize::from(from.channels());
    let dst = usize::from(to.channels());
    let pixels = data.len() / src;
    let mut out = Vec::with_capacity(pixels * dst);

    for px in data.chunks_exact(src) {
        match conversion {
            Conversion::SwapRedBlue => out.extend_from_slice(&[px[2], px[1], px[0]]),
            Conversion::ToGray { red } => out.push(luma(px[red], px[1], px[2 - red])),
            Conversion::DropAlpha => out.extend_from_slice(&px[..3]),
            Conversion::AddAlpha => out.extend_from_slice(&[px[0], px[1], px[2], u8::MAX]),
            Conversion::Replicate => out.extend_from_slice(&[px[0], px[0], px[0]]),
        }
    }
    out
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    let value = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    value.round().clamp(0.0, 255.0) as u8
}
