//! Overlap tests between circular footprints
//!
//! Walk points and markers are both circles, so touch detection reduces to
//! comparing center distance against the sum of radii.

use glam::Vec2;

/// Signed distance from `p` to the edge of a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Whether two circles share a region of non-zero area.
///
/// Circles that only touch at a single point do not count.
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    sd_circle(a, b, radius_b) < radius_a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concentric_circles_overlap() {
        let p = Vec2::new(100.0, 100.0);
        assert!(circles_overlap(p, 3.0, p, 6.0));
    }

    #[test]
    fn test_partial_overlap() {
        // 8 apart, radii sum 9
        assert!(circles_overlap(
            Vec2::new(108.0, 100.0),
            3.0,
            Vec2::new(100.0, 100.0),
            6.0
        ));
    }

    #[test]
    fn test_tangent_circles_do_not_overlap() {
        assert!(!circles_overlap(
            Vec2::new(109.0, 100.0),
            3.0,
            Vec2::new(100.0, 100.0),
            6.0
        ));
    }

    #[test]
    fn test_distant_circles() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(50.0, 50.0);
        assert!(!circles_overlap(a, 3.0, b, 6.0));
    }

    #[test]
    fn test_sd_circle_sign() {
        let c = Vec2::new(10.0, 10.0);
        assert!(sd_circle(c, c, 6.0) < 0.0);
        assert!(sd_circle(Vec2::new(20.0, 10.0), c, 6.0) > 0.0);
    }
}
