//! Signed-distance coverage for anti-aliased shapes.
//!
//! Coverage is evaluated at pixel centers: a pixel whose center lies on the
//! shape edge gets 0.5, and the ramp spans one pixel.

use crate::layout::RectF;

/// Largest corner radius that fits `rect`.
#[must_use]
pub fn clamp_radius(rect: RectF, radius: f32) -> f32 {
    let limit = rect.width.min(rect.height) / 2.0;
    if radius.is_nan() {
        return 0.0;
    }
    radius.clamp(0.0, limit.max(0.0))
}

/// Signed distance from `(px, py)` to the edge of a rounded rectangle.
///
/// Negative inside. `radius` must already be clamped.
#[must_use]
pub fn rounded_rect_distance(rect: RectF, radius: f32, px: f32, py: f32) -> f32 {
    let (cx, cy) = rect.center();
    let qx = (px - cx).abs() - (rect.width / 2.0 - radius);
    let qy = (py - cy).abs() - (rect.height / 2.0 - radius);
    let outside = qx.max(0.0).hypot(qy.max(0.0));
    let inside = qx.max(qy).min(0.0);
    outside + inside - radius
}

/// Signed distance from `(px, py)` to a circle's edge.
#[must_use]
pub fn circle_distance(cx: f32, cy: f32, radius: f32, px: f32, py: f32) -> f32 {
    (px - cx).hypot(py - cy) - radius
}

/// Convert a signed distance into pixel coverage.
#[must_use]
pub fn coverage(distance: f32) -> f32 {
    (0.5 - distance).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_clamped_to_half_short_side() {
        let rect = RectF::new(0.0, 0.0, 100.0, 30.0);
        assert!((clamp_radius(rect, 20.0) - 15.0).abs() < f32::EPSILON);
        assert!((clamp_radius(rect, 5.0) - 5.0).abs() < f32::EPSILON);
        assert!(clamp_radius(rect, -3.0).abs() < f32::EPSILON);
        assert!(clamp_radius(rect, f32::NAN).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rounded_rect_corners_are_cut() {
        let rect = RectF::new(0.0, 0.0, 40.0, 40.0);
        // Center is deep inside.
        assert!(rounded_rect_distance(rect, 10.0, 20.0, 20.0) < -19.0);
        // The sharp corner is outside once rounded.
        assert!(coverage(rounded_rect_distance(rect, 10.0, 0.5, 0.5)) < f32::EPSILON);
        // A square box keeps its corner.
        assert!(coverage(rounded_rect_distance(rect, 0.0, 0.5, 0.5)) > 0.99);
    }

    #[test]
    fn test_circle_edge_is_half_covered() {
        let d = circle_distance(0.0, 0.0, 5.0, 5.0, 0.0);
        assert!((coverage(d) - 0.5).abs() < 1e-5);
        assert!((coverage(circle_distance(0.0, 0.0, 5.0, 0.0, 0.0)) - 1.0).abs() < f32::EPSILON);
    }
}
