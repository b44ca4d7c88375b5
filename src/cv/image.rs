//! The mutable raster image.
//!
//! An [`Image`] owns an interleaved 8-bit pixel buffer together with the
//! [`ColorSpace`] tag describing its channel order. Transforms mutate the
//! image in place and validate their arguments before touching the buffer,
//! so a failed call leaves the image unchanged. Copy-returning variants are
//! available through [`Mutate::mutated`](crate::mutate::Mutate::mutated).

use std::fmt;
use std::path::Path;

use image::imageops::{FilterType, GaussianBlurParameters};
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use tracing::{debug, info};

use super::color_space::{self, ColorSpace};
use super::draw::{Canvas, Drawable};
use super::point::Point;
use crate::error::StudioError;

/// Largest pixel buffer a resize may produce, matching the image crate's
/// default decoding allocation limit.
pub const MAX_BUFFER_BYTES: u64 = 512 * 1024 * 1024;

/// How many pixels [`Image::trim`] removes from each edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trim {
    /// The same amount on all four edges.
    Uniform(u32),
    /// `vertical` from top and bottom, `horizontal` from left and right.
    Axes { vertical: u32, horizontal: u32 },
    Edges {
        top: u32,
        bottom: u32,
        left: u32,
        right: u32,
    },
}

impl Trim {
    /// Builds a trim from 1, 2 or 4 amounts.
    ///
    /// Four amounts are read as `top, bottom, left, right`; two as
    /// `vertical, horizontal`.
    pub fn from_args(args: &[u32]) -> Result<Self, StudioError> {
        match *args {
            [all] => Ok(Trim::Uniform(all)),
            [vertical, horizontal] => Ok(Trim::Axes {
                vertical,
                horizontal,
            }),
            [top, bottom, left, right] => Ok(Trim::Edges {
                top,
                bottom,
                left,
                right,
            }),
            _ => Err(StudioError::InvalidArguments(format!(
                "trim expects 1, 2 or 4 amounts, got {}",
                args.len()
            ))),
        }
    }

    /// `(top, bottom, left, right)`.
    pub fn edges(&self) -> (u32, u32, u32, u32) {
        match *self {
            Trim::Uniform(all) => (all, all, all, all),
            Trim::Axes {
                vertical,
                horizontal,
            } => (vertical, vertical, horizontal, horizontal),
            Trim::Edges {
                top,
                bottom,
                left,
                right,
            } => (top, bottom, left, right),
        }
    }
}

/// An owned pixel buffer tagged with its color space.
///
/// `Clone` is a deep copy; two images never share pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    color_space: ColorSpace,
    data: Vec<u8>,
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Image({}x{}, {})",
            self.width, self.height, self.color_space
        )
    }
}

impl Image {
    /// A zero-filled image. One channel is GRAY, three BGR, four RGBA.
    pub fn create_blank(height: u32, width: u32, channels: u8) -> Result<Self, StudioError> {
        let color_space = ColorSpace::for_channels(channels).ok_or_else(|| {
            StudioError::InvalidArguments(format!(
                "blank images need 1, 3 or 4 channels, got {}",
                channels
            ))
        })?;
        if width == 0 || height == 0 {
            return Err(StudioError::InvalidArguments(format!(
                "blank image must not be empty, got {}x{}",
                width, height
            )));
        }

        let len = width as usize * height as usize * usize::from(channels);
        Ok(Self {
            width,
            height,
            color_space,
            data: vec![0; len],
        })
    }

    /// Wraps an interleaved buffer, checking its length against the shape.
    pub fn from_raw(
        width: u32,
        height: u32,
        color_space: ColorSpace,
        data: Vec<u8>,
    ) -> Result<Self, StudioError> {
        let expected =
            width as usize * height as usize * usize::from(color_space.channels());
        if width == 0 || height == 0 || data.len() != expected {
            return Err(StudioError::InvalidArguments(format!(
                "buffer of {} bytes does not hold a {}x{} {} image",
                data.len(),
                width,
                height,
                color_space
            )));
        }
        Ok(Self {
            width,
            height,
            color_space,
            data,
        })
    }

    /// Adopts a decoded buffer under the given tag.
    ///
    /// The buffer is normalized to 8-bit samples; its channel count must
    /// match the tag.
    pub fn from_pixels(pixels: DynamicImage, color_space: ColorSpace) -> Result<Self, StudioError> {
        let channels = pixels.color().channel_count();
        if channels != color_space.channels() {
            return Err(StudioError::InvalidArguments(format!(
                "{}-channel buffer cannot be tagged {}",
                channels, color_space
            )));
        }

        let (width, height) = (pixels.width(), pixels.height());
        let data = match channels {
            1 => pixels.into_luma8().into_raw(),
            3 => pixels.into_rgb8().into_raw(),
            _ => pixels.into_rgba8().into_raw(),
        };
        Self::from_raw(width, height, color_space, data)
    }

    /// Decodes a file. Images with alpha become RGBA, everything else RGB.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StudioError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| StudioError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let image = if decoded.color().has_alpha() {
            Self::from_pixels(DynamicImage::ImageRgba8(decoded.into_rgba8()), ColorSpace::Rgba)?
        } else {
            Self::from_pixels(DynamicImage::ImageRgb8(decoded.into_rgb8()), ColorSpace::Rgb)?
        };
        info!(path = %path.display(), image = ?image, "decoded image");
        Ok(image)
    }

    /// A zero-filled BGR image of the same size.
    pub fn blank_copy(&self) -> Result<Self, StudioError> {
        Self::create_blank(self.height, self.width, ColorSpace::Bgr.channels())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> u8 {
        self.color_space.channels()
    }

    #[inline]
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    pub fn center(&self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// The interleaved, row-major pixel bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// The channels of the pixel at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let channels = usize::from(self.channels());
        let start = (y as usize * self.width as usize + x as usize) * channels;
        self.data.get(start..start + channels)
    }

    /// Copies the buffer into an `image` crate value (channel order untouched).
    pub fn to_dynamic_image(&self) -> Result<DynamicImage, StudioError> {
        let (w, h, data) = (self.width, self.height, self.data.clone());
        let image = match self.color_space {
            ColorSpace::Gray => GrayImage::from_raw(w, h, data).map(DynamicImage::ImageLuma8),
            ColorSpace::Bgr | ColorSpace::Rgb => {
                RgbImage::from_raw(w, h, data).map(DynamicImage::ImageRgb8)
            }
            ColorSpace::Rgba => RgbaImage::from_raw(w, h, data).map(DynamicImage::ImageRgba8),
        };
        image.ok_or_else(|| {
            StudioError::InvalidArguments(format!("{:?} has an inconsistent buffer", self))
        })
    }

    fn replace_from_dynamic(&mut self, pixels: DynamicImage) -> Result<(), StudioError> {
        *self = Self::from_pixels(pixels, self.color_space)?;
        Ok(())
    }

    /// Applies `v * alpha + gamma` to every color sample, saturating.
    fn apply_linear(&mut self, alpha: f64, gamma: f64) {
        let has_alpha = self.color_space == ColorSpace::Rgba;
        let channels = usize::from(self.channels());

        for (i, sample) in self.data.iter_mut().enumerate() {
            if has_alpha && i % channels == 3 {
                continue;
            }
            let value = f64::from(*sample) * alpha + gamma;
            *sample = value.round().clamp(0.0, 255.0) as u8;
        }
    }

    /// Shifts brightness by `value`: positive values lift the shadows,
    /// negative ones pull the highlights down.
    pub fn brightness(&mut self, value: f64) -> Result<(), StudioError> {
        if !(-255.0..=255.0).contains(&value) {
            return Err(StudioError::InvalidArguments(format!(
                "brightness must be within [-255, 255], got {}",
                value
            )));
        }

        let (shadow, max) = if value > 0.0 {
            (value, 255.0)
        } else {
            (0.0, 255.0 + value)
        };
        let alpha = (max - shadow) / 255.0;
        debug!(value, alpha, gamma = shadow, "brightness");
        self.apply_linear(alpha, shadow);
        Ok(())
    }

    /// Stretches (positive) or flattens (negative) contrast around mid-gray.
    pub fn contrast(&mut self, value: f64) -> Result<(), StudioError> {
        if !(-127.0..=127.0).contains(&value) {
            return Err(StudioError::InvalidArguments(format!(
                "contrast must be within [-127, 127], got {}",
                value
            )));
        }

        let alpha = 131.0 * (value + 127.0) / (127.0 * (131.0 - value));
        let gamma = 127.0 * (1.0 - alpha);
        debug!(value, alpha, gamma, "contrast");
        self.apply_linear(alpha, gamma);
        Ok(())
    }

    /// Gaussian blur with a square `kernel_size` kernel (odd and positive).
    pub fn gaussian_blur(&mut self, kernel_size: u32) -> Result<(), StudioError> {
        if kernel_size % 2 == 0 {
            return Err(StudioError::InvalidArguments(format!(
                "blur kernel size must be odd and positive, got {}",
                kernel_size
            )));
        }
        if kernel_size == 1 {
            return Ok(());
        }

        debug!(kernel_size, "gaussian blur");
        let params = GaussianBlurParameters::new_from_kernel_size(kernel_size as f32);
        let blurred = self.to_dynamic_image()?.blur_advanced(params);
        self.replace_from_dynamic(blurred)?;
        Ok(())
    }

    /// Converts the buffer to another color space.
    ///
    /// Only the pairs of the conversion table are supported; any other
    /// request, including converting to the current space, fails without
    /// touching the image.
    pub fn convert_color_space(&mut self, to: ColorSpace) -> Result<(), StudioError> {
        let from = self.color_space;
        let conversion = color_space::conversion(from, to)
            .ok_or(StudioError::UnsupportedConversion { from, to })?;

        debug!(%from, %to, "color space conversion");
        self.data = color_space::convert(&self.data, from, to, conversion);
        self.color_space = to;
        Ok(())
    }

    pub fn rgb_conversion(&mut self) -> Result<(), StudioError> {
        self.convert_color_space(ColorSpace::Rgb)
    }

    /// Desaturates while keeping three channels.
    ///
    /// BGR and GRAY images end up BGR; RGB and RGBA end up RGB.
    pub fn grayscale(&mut self) -> Result<(), StudioError> {
        let target = match self.color_space {
            ColorSpace::Bgr | ColorSpace::Gray => ColorSpace::Bgr,
            ColorSpace::Rgb | ColorSpace::Rgba => ColorSpace::Rgb,
        };
        if self.color_space != ColorSpace::Gray {
            self.convert_color_space(ColorSpace::Gray)?;
        }
        self.convert_color_space(target)
    }

    fn scaled_size(&self, scale: f64) -> Result<(u32, u32), StudioError> {
        let width = (f64::from(self.width) * scale).trunc();
        let height = (f64::from(self.height) * scale).trunc();
        if !scale.is_finite() || width < 1.0 || height < 1.0 {
            return Err(StudioError::InvalidArguments(format!(
                "scale {} turns {}x{} into an empty image",
                scale, self.width, self.height
            )));
        }

        let too_large = || {
            StudioError::InvalidArguments(format!(
                "scale {} turns {}x{} into an image over {} bytes",
                scale, self.width, self.height, MAX_BUFFER_BYTES
            ))
        };
        if width > f64::from(u32::MAX) || height > f64::from(u32::MAX) {
            return Err(too_large());
        }
        let (width, height) = (width as u32, height as u32);
        let bytes = u64::from(width)
            .checked_mul(u64::from(height))
            .and_then(|n| n.checked_mul(u64::from(self.channels())))
            .filter(|&n| n <= MAX_BUFFER_BYTES)
            .ok_or_else(too_large)?;
        debug!(width, height, bytes, "resize target");
        Ok((width, height))
    }

    /// Scales both sides by `scale`, truncating to whole pixels.
    pub fn resize(&mut self, scale: f64) -> Result<(), StudioError> {
        let (width, height) = self.scaled_size(scale)?;
        if (width, height) == (self.width, self.height) {
            return Ok(());
        }

        debug!(scale, width, height, "resize");
        let resized = self
            .to_dynamic_image()?
            .resize_exact(width, height, FilterType::Triangle);
        self.replace_from_dynamic(resized)?;
        Ok(())
    }

    /// A resized copy.
    pub fn resized(&self, scale: f64) -> Result<Self, StudioError> {
        let mut copy = self.clone();
        copy.resize(scale)?;
        Ok(copy)
    }

    /// `count` copies scaled from `start` toward `stop` in equal steps.
    ///
    /// The step is `|stop - start| / count`, so `stop` itself is never
    /// reached.
    pub fn iter_resized_copies(
        &self,
        start: f64,
        stop: f64,
        count: usize,
    ) -> impl Iterator<Item = Result<Self, StudioError>> + '_ {
        let step = if count == 0 {
            0.0
        } else {
            (stop - start).abs() / count as f64
        };
        (0..count).map(move |i| self.resized(start + step * i as f64))
    }

    /// Removes pixels from the edges.
    pub fn trim(&mut self, trim: Trim) -> Result<(), StudioError> {
        let (top, bottom, left, right) = trim.edges();
        let vertical = u64::from(top) + u64::from(bottom);
        let horizontal = u64::from(left) + u64::from(right);
        if vertical >= u64::from(self.height) || horizontal >= u64::from(self.width) {
            return Err(StudioError::InvalidArguments(format!(
                "{:?} removes all of {:?}",
                trim, self
            )));
        }

        let width = self.width - left - right;
        let height = self.height - top - bottom;
        let channels = usize::from(self.channels());
        let row_len = self.width as usize * channels;
        let keep = width as usize * channels;
        let offset = left as usize * channels;

        let mut data = Vec::with_capacity(keep * height as usize);
        for row in self
            .data
            .chunks_exact(row_len)
            .skip(top as usize)
            .take(height as usize)
        {
            data.extend_from_slice(&row[offset..offset + keep]);
        }

        debug!(?trim, width, height, "trim");
        self.width = width;
        self.height = height;
        self.data = data;
        Ok(())
    }

    /// Appends `other` to the right. Heights and color spaces must match.
    pub fn concat_horizontal(&mut self, other: &Image) -> Result<(), StudioError> {
        if self.height != other.height || self.color_space != other.color_space {
            return Err(StudioError::IncompatibleImages(format!(
                "cannot place {:?} beside {:?}",
                other, self
            )));
        }

        let channels = usize::from(self.channels());
        let left_row = self.width as usize * channels;
        let right_row = other.width as usize * channels;

        let mut data = Vec::with_capacity(self.data.len() + other.data.len());
        for (left, right) in self
            .data
            .chunks_exact(left_row)
            .zip(other.data.chunks_exact(right_row))
        {
            data.extend_from_slice(left);
            data.extend_from_slice(right);
        }

        self.width += other.width;
        self.data = data;
        Ok(())
    }

    /// Appends `other` below. Widths and color spaces must match.
    pub fn concat_vertical(&mut self, other: &Image) -> Result<(), StudioError> {
        if self.width != other.width || self.color_space != other.color_space {
            return Err(StudioError::IncompatibleImages(format!(
                "cannot place {:?} below {:?}",
                other, self
            )));
        }

        self.data.extend_from_slice(&other.data);
        self.height += other.height;
        Ok(())
    }

    /// Paints `shape` onto the image right away.
    pub fn draw<D: Drawable>(&mut self, shape: &D, style: &D::Style) -> Result<(), StudioError> {
        let mut canvas = Canvas::new(self.width, self.height)?;
        shape.draw_on(&mut canvas, style)?;
        canvas.composite_into(&mut self.data, self.color_space);
        Ok(())
    }

    /// Encodes the image, picking the format from the file extension.
    ///
    /// BGR buffers are written as RGB.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StudioError> {
        let path = path.as_ref();
        let pixels = if self.color_space == ColorSpace::Bgr {
            let mut rgb = self.clone();
            rgb.rgb_conversion()?;
            rgb.to_dynamic_image()?
        } else {
            self.to_dynamic_image()?
        };

        pixels.save(path).map_err(|source| StudioError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), image = ?self, "saved image");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::{Color, Rectangle, Style};

    fn gradient(width: u32, height: u32) -> Image {
        let data = (0..width * height * 3).map(|i| (i % 251) as u8).collect();
        Image::from_raw(width, height, ColorSpace::Bgr, data).unwrap()
    }

    #[test]
    fn test_create_blank_shapes() {
        let image = Image::create_blank(100, 50, 3).unwrap();
        assert_eq!((image.width(), image.height(), image.channels()), (50, 100, 3));
        assert_eq!(image.color_space(), ColorSpace::Bgr);
        assert!(image.as_bytes().iter().all(|&b| b == 0));

        assert_eq!(Image::create_blank(2, 2, 1).unwrap().color_space(), ColorSpace::Gray);
        assert_eq!(Image::create_blank(2, 2, 4).unwrap().color_space(), ColorSpace::Rgba);
        assert!(matches!(
            Image::create_blank(2, 2, 2),
            Err(StudioError::InvalidArguments(_))
        ));
        assert!(Image::create_blank(0, 2, 3).is_err());
    }

    #[test]
    fn test_from_pixels_checks_channels() {
        let gray = DynamicImage::new_luma8(4, 4);
        assert!(Image::from_pixels(gray.clone(), ColorSpace::Gray).is_ok());
        assert!(matches!(
            Image::from_pixels(gray, ColorSpace::Rgb),
            Err(StudioError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_trim_arities() {
        let mut image = Image::create_blank(100, 100, 3).unwrap();
        image.trim(Trim::from_args(&[5]).unwrap()).unwrap();
        assert_eq!((image.width(), image.height()), (90, 90));

        let mut image = Image::create_blank(100, 100, 3).unwrap();
        image.trim(Trim::from_args(&[5, 5, 10, 10]).unwrap()).unwrap();
        assert_eq!((image.width(), image.height()), (80, 90));

        let mut image = Image::create_blank(100, 100, 3).unwrap();
        image.trim(Trim::from_args(&[10, 20]).unwrap()).unwrap();
        assert_eq!((image.width(), image.height()), (60, 80));

        assert!(matches!(
            Trim::from_args(&[1, 2, 3]),
            Err(StudioError::InvalidArguments(_))
        ));
        assert!(Trim::from_args(&[]).is_err());
    }

    #[test]
    fn test_trim_keeps_the_right_pixels() {
        let mut image = gradient(6, 4);
        let expected = image.pixel(2, 1).unwrap().to_vec();
        image
            .trim(Trim::Edges {
                top: 1,
                bottom: 0,
                left: 2,
                right: 1,
            })
            .unwrap();
        assert_eq!((image.width(), image.height()), (3, 3));
        assert_eq!(image.pixel(0, 0).unwrap(), expected.as_slice());
    }

    #[test]
    fn test_trim_everything_fails_and_leaves_image() {
        let mut image = Image::create_blank(10, 10, 3).unwrap();
        assert!(matches!(
            image.trim(Trim::Uniform(5)),
            Err(StudioError::InvalidArguments(_))
        ));
        assert_eq!((image.width(), image.height()), (10, 10));
    }

    #[test]
    fn test_unsupported_conversion_leaves_buffer() {
        let mut image = gradient(4, 4);
        image.rgb_conversion().unwrap();
        let before = image.clone();
        assert!(matches!(
            image.convert_color_space(ColorSpace::Rgb),
            Err(StudioError::UnsupportedConversion {
                from: ColorSpace::Rgb,
                to: ColorSpace::Rgb
            })
        ));
        assert_eq!(image, before);
    }

    #[test]
    fn test_bgr_to_rgb_swaps_channels() {
        let mut image = Image::from_raw(1, 1, ColorSpace::Bgr, vec![1, 2, 3]).unwrap();
        image.rgb_conversion().unwrap();
        assert_eq!(image.as_bytes(), &[3, 2, 1]);
        assert_eq!(image.color_space(), ColorSpace::Rgb);
    }

    #[test]
    fn test_grayscale_keeps_three_channels() {
        let mut image = Image::from_raw(1, 1, ColorSpace::Bgr, vec![0, 0, 255]).unwrap();
        image.grayscale().unwrap();
        assert_eq!(image.color_space(), ColorSpace::Bgr);
        assert_eq!(image.as_bytes(), &[76, 76, 76]);
    }

    #[test]
    fn test_brightness() {
        let mut image = Image::from_raw(1, 1, ColorSpace::Bgr, vec![0, 100, 255]).unwrap();
        image.brightness(0.0).unwrap();
        assert_eq!(image.as_bytes(), &[0, 100, 255]);

        image.brightness(51.0).unwrap();
        // alpha = 204/255, gamma = 51
        assert_eq!(image.as_bytes(), &[51, 131, 255]);

        let mut dark = Image::from_raw(1, 1, ColorSpace::Bgr, vec![0, 100, 255]).unwrap();
        dark.brightness(-255.0).unwrap();
        assert_eq!(dark.as_bytes(), &[0, 0, 0]);
    }

    #[test]
    fn test_brightness_skips_alpha() {
        let mut image = Image::from_raw(1, 1, ColorSpace::Rgba, vec![10, 10, 10, 200]).unwrap();
        image.brightness(100.0).unwrap();
        assert_eq!(image.as_bytes()[3], 200);
    }

    #[test]
    fn test_contrast() {
        let mut image = Image::from_raw(1, 1, ColorSpace::Gray, vec![127]).unwrap();
        image.contrast(60.0).unwrap();
        // Mid-gray is the fixed point.
        assert_eq!(image.as_bytes(), &[127]);

        let mut image = Image::from_raw(1, 2, ColorSpace::Gray, vec![100, 150]).unwrap();
        image.contrast(0.0).unwrap();
        assert_eq!(image.as_bytes(), &[100, 150]);

        image.contrast(64.0).unwrap();
        let bytes = image.as_bytes();
        assert!(bytes[0] < 100 && bytes[1] > 150);

        assert!(matches!(
            image.contrast(131.0),
            Err(StudioError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_gaussian_blur_validates_kernel() {
        let mut image = gradient(8, 8);
        assert!(matches!(
            image.gaussian_blur(4),
            Err(StudioError::InvalidArguments(_))
        ));
        assert!(image.gaussian_blur(0).is_err());

        let before = image.clone();
        image.gaussian_blur(1).unwrap();
        assert_eq!(image, before);
    }

    #[test]
    fn test_gaussian_blur_spreads_a_dot() {
        let mut image = Image::create_blank(9, 9, 1).unwrap();
        image.data[4 * 9 + 4] = 255;
        image.gaussian_blur(5).unwrap();

        assert_eq!(image.color_space(), ColorSpace::Gray);
        assert!(image.pixel(4, 4).unwrap()[0] < 255);
        assert!(image.pixel(5, 4).unwrap()[0] > 0);
        assert_eq!(image.pixel(0, 0).unwrap()[0], 0);
    }

    #[test]
    fn test_resize_truncates() {
        let mut image = Image::create_blank(15, 21, 3).unwrap();
        image.resize(0.5).unwrap();
        assert_eq!((image.width(), image.height()), (10, 7));
        assert_eq!(image.color_space(), ColorSpace::Bgr);

        assert!(matches!(
            image.resize(0.01),
            Err(StudioError::InvalidArguments(_))
        ));
        assert!(image.resize(f64::NAN).is_err());
    }

    #[test]
    fn test_resize_rejects_oversized_targets() {
        let mut image = Image::create_blank(100, 100, 3).unwrap();
        assert!(matches!(
            image.resize(1e9),
            Err(StudioError::InvalidArguments(_))
        ));
        // 20000 x 20000 x 3 fits in u32 sides but not in the buffer cap.
        assert!(matches!(
            image.resize(200.0),
            Err(StudioError::InvalidArguments(_))
        ));
        assert!(image.resized(f64::INFINITY).is_err());
        assert_eq!((image.width(), image.height()), (100, 100));

        let mut copies = image.iter_resized_copies(1.0, 2e9, 2);
        assert!(copies.next().is_some_and(|copy| copy.is_ok()));
        assert!(copies.next().is_some_and(|copy| copy.is_err()));
    }

    #[test]
    fn test_iter_resized_copies() {
        let image = Image::create_blank(100, 100, 3).unwrap();
        let sizes: Vec<u32> = image
            .iter_resized_copies(1.0, 2.0, 4)
            .map(|copy| copy.unwrap().width())
            .collect();
        assert_eq!(sizes, vec![100, 125, 150, 175]);
        assert_eq!(image.width(), 100);
        assert_eq!(image.iter_resized_copies(1.0, 2.0, 0).count(), 0);
    }

    #[test]
    fn test_concat() {
        let mut left = Image::create_blank(2, 3, 3).unwrap();
        let right = gradient(4, 2);
        left.concat_horizontal(&right).unwrap();
        assert_eq!((left.width(), left.height()), (7, 2));
        assert_eq!(left.pixel(3, 1).unwrap(), right.pixel(0, 1).unwrap());
        assert_eq!(left.pixel(2, 1).unwrap(), &[0, 0, 0]);

        let mut top = Image::create_blank(1, 7, 3).unwrap();
        top.concat_vertical(&left).unwrap();
        assert_eq!((top.width(), top.height()), (7, 3));
        assert_eq!(top.pixel(6, 2).unwrap(), right.pixel(3, 1).unwrap());
    }

    #[test]
    fn test_concat_mismatch() {
        let mut a = Image::create_blank(2, 2, 3).unwrap();
        let taller = Image::create_blank(3, 2, 3).unwrap();
        let gray = Image::create_blank(2, 2, 1).unwrap();
        assert!(matches!(
            a.concat_horizontal(&taller),
            Err(StudioError::IncompatibleImages(_))
        ));
        assert!(matches!(
            a.concat_horizontal(&gray),
            Err(StudioError::IncompatibleImages(_))
        ));
        assert!(matches!(
            a.concat_vertical(&Image::create_blank(2, 3, 3).unwrap()),
            Err(StudioError::IncompatibleImages(_))
        ));
    }

    #[test]
    fn test_draw_writes_bgr_order() {
        let mut image = Image::create_blank(10, 10, 3).unwrap();
        let rect = Rectangle::from_ltrb(2.0, 2.0, 6.0, 6.0).unwrap();
        image.draw(&rect, &Style::new(Color::RED, 1)).unwrap();

        assert_eq!(image.pixel(2, 2).unwrap(), &[0, 0, 255]);
        assert_eq!(image.pixel(4, 4).unwrap(), &[0, 0, 0]);
    }

    #[test]
    fn test_pixel_bounds() {
        let image = Image::create_blank(2, 3, 3).unwrap();
        assert!(image.pixel(2, 1).is_some());
        assert!(image.pixel(3, 0).is_none());
        assert!(image.pixel(0, 2).is_none());
    }

    #[test]
    fn test_center_and_blank_copy() {
        let image = gradient(5, 4);
        assert_eq!(image.center(), Point::new(2.5, 2.0));
        let blank = image.blank_copy().unwrap();
        assert_eq!((blank.width(), blank.height()), (5, 4));
        assert!(blank.as_bytes().iter().all(|&b| b == 0));
    }
}
