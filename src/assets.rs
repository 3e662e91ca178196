//! Decoded images for the background and logo.
//!
//! Decoding is synchronous and happens once per path change; the layout only
//! needs the intrinsic size, and the canvas samples the RGBA8 data directly.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};

/// A decoded RGBA8 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    data: RgbaImage,
}

impl RasterImage {
    /// Decode an image file (PNG or JPEG).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Image`] when the file is missing or cannot be decoded.
    pub fn open(path: &Path) -> Result<Self> {
        let decoded = image::open(path).map_err(|err| Error::Image {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Ok(Self {
            data: decoded.to_rgba8(),
        })
    }

    /// Wrap raw RGBA8 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] when `bytes` does not hold exactly
    /// `width * height * 4` values.
    pub fn from_rgba8(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self> {
        RgbaImage::from_raw(width, height, bytes)
            .map(|data| Self { data })
            .ok_or(Error::InvalidDimensions { width, height })
    }

    /// A single-color image.
    #[must_use]
    pub fn solid(width: u32, height: u32, color: Rgba) -> Self {
        let (r, g, b, a) = color.to_rgba_u8();
        Self {
            data: RgbaImage::from_pixel(width, height, image::Rgba([r, g, b, a])),
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.data.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.data.height()
    }

    /// Intrinsic size as `(width, height)`.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.data.dimensions()
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        self.data
            .get_pixel_checked(x, y)
            .map(|p| Rgba::from_rgba_u8(p[0], p[1], p[2], p[3]))
    }

    /// Pixel at clamped coordinates. The image must not be empty.
    pub(crate) fn get_clamped(&self, x: i64, y: i64) -> Rgba {
        let max_x = i64::from(self.width().saturating_sub(1));
        let max_y = i64::from(self.height().saturating_sub(1));
        let p = self
            .data
            .get_pixel(x.clamp(0, max_x) as u32, y.clamp(0, max_y) as u32);
        Rgba::from_rgba_u8(p[0], p[1], p[2], p[3])
    }
}

/// A user-selected image path together with its decoded pixels.
///
/// Changing the path drops the cached decode; a path that fails to decode
/// stays selected but yields no image.
#[derive(Clone, Debug, Default)]
pub struct ImageSlot {
    path: Option<PathBuf>,
    decoded: Option<RasterImage>,
}

impl ImageSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a new image (or `None` to remove it) and decode it.
    ///
    /// Returns `true` when the selection changed.
    pub fn set_path(&mut self, path: Option<PathBuf>) -> bool {
        if self.path == path {
            return false;
        }
        self.decoded = path.as_deref().and_then(|p| match RasterImage::open(p) {
            Ok(image) => Some(image),
            Err(err) => {
                emit_log(LogLevel::Warn, &format!("image unavailable: {err}"));
                None
            }
        });
        self.path = path;
        true
    }

    /// Install an already decoded image under `path`.
    pub fn set_image(&mut self, path: PathBuf, image: RasterImage) {
        self.path = Some(path);
        self.decoded = Some(image);
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn image(&self) -> Option<&RasterImage> {
        self.decoded.as_ref()
    }

    /// Intrinsic size of the decoded image.
    #[must_use]
    pub fn size(&self) -> Option<(u32, u32)> {
        self.decoded.as_ref().map(RasterImage::size)
    }
}
