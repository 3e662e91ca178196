//! Software RGBA framebuffer.
//!
//! [`PixelCanvas`] implements [`Surface`] with anti-aliased shapes, bilinear
//! image scaling and `rusttype` glyphs. Its pixels can be copied straight
//! into an RGBA8 frame (for example a `pixels` texture).

pub mod blit;
pub mod clip;
pub mod shapes;
pub mod text;

pub use clip::ClipRect;
pub use text::FontBook;

use crate::assets::RasterImage;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::layout::RectF;
use crate::surface::Surface;

/// A width × height grid of straight-alpha colors, row-major.
#[derive(Debug)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    fonts: FontBook,
}

impl PixelCanvas {
    /// Create a canvas filled with transparent black.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_fonts(width, height, FontBook::new())
    }

    /// Create a canvas that draws text with `fonts`.
    #[must_use]
    pub fn with_fonts(width: u32, height: u32, fonts: FontBook) -> Self {
        let size = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; size],
            fonts,
        }
    }

    #[must_use]
    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    pub fn fonts_mut(&mut self) -> &mut FontBook {
        &mut self.fonts
    }

    /// Reallocate for a new size; contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![Rgba::TRANSPARENT; (width as usize).saturating_mul(height as usize)];
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize).checked_mul(self.width as usize)?.checked_add(x as usize)?;
        (idx < self.pixels.len()).then_some(idx)
    }

    /// Pixel at `(x, y)`.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Overwrite a pixel.
    pub fn set(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
        }
    }

    /// Composite `color` over a pixel with extra `coverage` in `0..=1`.
    pub fn blend(&mut self, x: i32, y: i32, color: Rgba, coverage: f32) {
        if coverage <= 0.0 {
            return;
        }
        if let Some(idx) = self.index(x, y) {
            let src = color.multiply_alpha(coverage.min(1.0));
            self.pixels[idx] = src.blend_over(self.pixels[idx]);
        }
    }

    /// Raw pixel slice.
    #[must_use]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Area of `rect` (padded for anti-aliasing) that lies on the canvas.
    fn visible(&self, rect: RectF, pad: f32) -> Option<ClipRect> {
        ClipRect::covering(rect, pad).intersect(&ClipRect::canvas(self.width, self.height))
    }

    /// Copy the canvas into an RGBA8 frame of the same size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `frame` is not
    /// `width * height * 4` bytes long.
    pub fn write_rgba8(&self, frame: &mut [u8]) -> Result<()> {
        if frame.len() != self.pixels.len().saturating_mul(4) {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        for (dst, src) in frame.chunks_exact_mut(4).zip(&self.pixels) {
            let (r, g, b, a) = src.to_rgba_u8();
            dst.copy_from_slice(&[r, g, b, a]);
        }
        Ok(())
    }
}

impl Surface for PixelCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    fn fill_rounded_rect(&mut self, rect: RectF, radius: f32, color: Rgba) {
        let Some(area) = self.visible(rect, 1.0) else {
            return;
        };
        let radius = shapes::clamp_radius(rect, radius);
        for (x, y) in area.pixels() {
            let d = shapes::rounded_rect_distance(rect, radius, x as f32 + 0.5, y as f32 + 0.5);
            self.blend(x, y, color, shapes::coverage(d));
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        if !(radius > 0.0) {
            return;
        }
        let bounds = RectF::centered(cx, cy, radius * 2.0, radius * 2.0);
        let Some(area) = self.visible(bounds, 1.0) else {
            return;
        };
        for (x, y) in area.pixels() {
            let d = shapes::circle_distance(cx, cy, radius, x as f32 + 0.5, y as f32 + 0.5);
            self.blend(x, y, color, shapes::coverage(d));
        }
    }

    fn draw_image(&mut self, image: &RasterImage, dest: RectF) {
        if image.width() == 0 || image.height() == 0 || dest.is_empty() {
            return;
        }
        let Some(area) = self.visible(dest, 0.0) else {
            return;
        };
        for (x, y) in area.pixels() {
            let (sx, sy) = blit::source_point(image, dest, x, y);
            let color = blit::sample_bilinear(image, sx, sy);
            self.blend(x, y, color, 1.0);
        }
    }

    fn measure_text(&self, font: &str, size: f32, text: &str) -> f32 {
        self.fonts.measure(font, size, text)
    }

    fn line_height(&self, font: &str, size: f32) -> f32 {
        self.fonts.line_height(font, size)
    }

    fn draw_text_line(&mut self, font: &str, size: f32, text: &str, cx: f32, cy: f32, color: Rgba) {
        if !(size > 0.0) || text.is_empty() {
            return;
        }
        let mut coverage = Vec::new();
        {
            let Some(face) = self.fonts.resolve(font) else {
                return;
            };
            for glyph in text::layout_centered(face, size, text, cx, cy) {
                if let Some(bb) = glyph.pixel_bounding_box() {
                    glyph.draw(|gx, gy, v| {
                        coverage.push((bb.min.x + gx as i32, bb.min.y + gy as i32, v));
                    });
                }
            }
        }
        for (x, y, v) in coverage {
            self.blend(x, y, color, v);
        }
    }
}
