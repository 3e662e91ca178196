//! Integer pixel spans for clipping shapes to the canvas.

use crate::layout::RectF;

/// A clipping rectangle in whole pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClipRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ClipRect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole canvas.
    #[must_use]
    pub const fn canvas(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Smallest pixel span covering `rect`, widened by `pad` pixels on every side.
    ///
    /// Non-finite or negative-size rectangles map to an empty span.
    #[must_use]
    pub fn covering(rect: RectF, pad: f32) -> Self {
        let x0 = (rect.x - pad).floor();
        let y0 = (rect.y - pad).floor();
        let x1 = (rect.right() + pad).ceil();
        let y1 = (rect.bottom() + pad).ceil();
        if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return Self::new(0, 0, 0, 0);
        }
        let clamp = |v: f32| v.clamp(i32::MIN as f32, i32::MAX as f32) as i32;
        let (x0, y0, x1, y1) = (clamp(x0), clamp(y0), clamp(x1), clamp(y1));
        Self::new(x0, y0, x1.abs_diff(x0), y1.abs_diff(y0))
    }

    /// Check if a point is inside this rectangle.
    #[must_use]
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && py >= self.y && px < self.x_end() && py < self.y_end()
    }

    /// Compute intersection with another rectangle.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.x_end().min(other.x_end());
        let y2 = self.y_end().min(other.y_end());
        (x2 > x1 && y2 > y1).then(|| Self::new(x1, y1, x2.abs_diff(x1), y2.abs_diff(y1)))
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Every `(x, y)` in row-major order.
    pub fn pixels(self) -> impl Iterator<Item = (i32, i32)> {
        (self.y..self.y_end()).flat_map(move |y| (self.x..self.x_end()).map(move |x| (x, y)))
    }

    fn x_end(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    fn y_end(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }
}
