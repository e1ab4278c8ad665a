//! Joint angle geometry
//!
//! Two computation conventions exist in this domain and both are kept:
//! the signed-arctangent difference and the law-of-cosines dot product.
//! They agree after normalization to [0,180] but can differ in
//! floating-point edge behavior near 0 and 180 degrees, so each exercise
//! commits to one convention for its lifetime and the two are never mixed
//! for the same joint.

use reptrack_core::Point2;

/// Angle computation convention, fixed per exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleConvention {
    /// Difference of arctangents, reflected over 180
    SignedArctan,
    /// Arccos of the normalized dot product, input clipped to [-1,1]
    CosineLaw,
}

/// Angle in degrees at vertex `b`, normalized to [0,180]
pub fn angle_between(convention: AngleConvention, a: Point2, b: Point2, c: Point2) -> f32 {
    match convention {
        AngleConvention::SignedArctan => signed_arctan_angle(a, b, c),
        AngleConvention::CosineLaw => cosine_law_angle(a, b, c),
    }
}

fn signed_arctan_angle(a: Point2, b: Point2, c: Point2) -> f32 {
    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let mut angle = radians.to_degrees().abs();
    if angle > 180.0 {
        angle = 360.0 - angle;
    }
    angle
}

fn cosine_law_angle(a: Point2, b: Point2, c: Point2) -> f32 {
    let ba = Point2::new(a.x - b.x, a.y - b.y);
    let bc = Point2::new(c.x - b.x, c.y - b.y);

    let norm = (ba.x * ba.x + ba.y * ba.y).sqrt() * (bc.x * bc.x + bc.y * bc.y).sqrt();
    if norm <= f32::EPSILON {
        // Degenerate triangle, no meaningful angle
        return 0.0;
    }

    let cosine = ((ba.x * bc.x + ba.y * bc.y) / norm).clamp(-1.0, 1.0);
    cosine.acos().to_degrees()
}

/// Angle at `b` between the ray toward `a` and the upward vertical
///
/// Used for back alignment: the reference is a synthetic point directly
/// above the vertex (image coordinates grow downward).
pub fn angle_to_vertical(convention: AngleConvention, a: Point2, b: Point2) -> f32 {
    let reference = Point2::new(b.x, b.y - 0.1);
    angle_between(convention, a, b, reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn right_angle_points() -> (Point2, Point2, Point2) {
        (
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
        )
    }

    #[test]
    fn test_right_angle_both_conventions() {
        let (a, b, c) = right_angle_points();
        let arctan = angle_between(AngleConvention::SignedArctan, a, b, c);
        let cosine = angle_between(AngleConvention::CosineLaw, a, b, c);

        assert!((arctan - 90.0).abs() < 0.01);
        assert!((cosine - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_straight_line_is_180() {
        let a = Point2::new(0.0, 0.5);
        let b = Point2::new(0.5, 0.5);
        let c = Point2::new(1.0, 0.5);

        assert!((angle_between(AngleConvention::SignedArctan, a, b, c) - 180.0).abs() < 0.01);
        assert!((angle_between(AngleConvention::CosineLaw, a, b, c) - 180.0).abs() < 0.01);
    }

    #[test]
    fn test_collapsed_points_do_not_panic() {
        let p = Point2::new(0.5, 0.5);
        let angle = angle_between(AngleConvention::CosineLaw, p, p, p);
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_conventions_agree_after_normalization() {
        // Sampled triangles away from the degenerate cases
        let triples = [
            (
                Point2::new(0.2, 0.1),
                Point2::new(0.5, 0.5),
                Point2::new(0.9, 0.4),
            ),
            (
                Point2::new(0.1, 0.9),
                Point2::new(0.4, 0.2),
                Point2::new(0.8, 0.8),
            ),
        ];

        for (a, b, c) in triples {
            let arctan = angle_between(AngleConvention::SignedArctan, a, b, c);
            let cosine = angle_between(AngleConvention::CosineLaw, a, b, c);
            assert!(
                (arctan - cosine).abs() < 0.1,
                "conventions diverged: {arctan} vs {cosine}"
            );
        }
    }

    #[test]
    fn test_vertical_reference() {
        // Point directly below the vertex: 180 from the upward vertical
        let a = Point2::new(0.5, 0.9);
        let b = Point2::new(0.5, 0.5);
        let angle = angle_to_vertical(AngleConvention::CosineLaw, a, b);
        assert!((angle - 180.0).abs() < 0.01);
    }
}
