//! Scaled image blits.

use crate::assets::RasterImage;
use crate::color::Rgba;
use crate::layout::RectF;

/// Bilinear sample of `image` at continuous source coordinates.
///
/// `(sx, sy)` address pixel centers at `+0.5`; edges clamp. An empty image
/// samples as transparent.
#[must_use]
pub fn sample_bilinear(image: &RasterImage, sx: f32, sy: f32) -> Rgba {
    if image.width() == 0 || image.height() == 0 {
        return Rgba::TRANSPARENT;
    }
    let fx = sx - 0.5;
    let fy = sy - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let top = image.get_clamped(x0, y0).lerp(image.get_clamped(x0 + 1, y0), tx);
    let bottom = image
        .get_clamped(x0, y0 + 1)
        .lerp(image.get_clamped(x0 + 1, y0 + 1), tx);
    top.lerp(bottom, ty)
}

/// Map a destination pixel center to source coordinates for a stretch blit.
#[must_use]
pub fn source_point(image: &RasterImage, dest: RectF, px: i32, py: i32) -> (f32, f32) {
    let u = (px as f32 + 0.5 - dest.x) / dest.width;
    let v = (py as f32 + 0.5 - dest.y) / dest.height;
    (u * image.width() as f32, v * image.height() as f32)
}
