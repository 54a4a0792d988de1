//! Joint angle computation.

use crate::point::Point;

const FULL_TURN_DEGREES: f32 = 360.0;
const HALF_TURN_DEGREES: f32 = 180.0;

/// Unsigned angle in degrees opened at `vertex` between the limbs towards `a` and `b`.
///
/// The difference of the two limb bearings is folded into `[0, 180]`, so the
/// result does not depend on which of `a` and `b` comes first. Returns `None`
/// when either limb has zero length.
pub fn angle_between(vertex: Point, a: Point, b: Point) -> Option<f32> {
    let v1 = a - vertex;
    let v2 = b - vertex;

    if v1.is_zero() || v2.is_zero() {
        return None;
    }

    let raw = (v2.bearing() - v1.bearing()).to_degrees().abs();
    let folded = if raw > HALF_TURN_DEGREES {
        FULL_TURN_DEGREES - raw
    } else {
        raw
    };
    Some(folded.clamp(0.0, HALF_TURN_DEGREES))
}

#[cfg(test)]
mod tests {
    use super::angle_between;
    use crate::point::Point;
    use assert_approx_eq::assert_approx_eq;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y).unwrap()
    }

    #[test]
    fn straight_limb() {
        let angle = angle_between(p(0.5, 0.0), p(0.0, 0.0), p(1.0, 0.0)).unwrap();
        assert_approx_eq!(angle, 180.0, 1e-3);
    }

    #[test]
    fn right_angle() {
        let angle = angle_between(p(0.5, 0.0), p(0.0, 0.0), p(0.5, 0.5)).unwrap();
        assert_approx_eq!(angle, 90.0, 1e-3);
    }

    #[test]
    fn swapping_limbs_gives_same_angle() {
        let vertex = p(0.4, 0.6);
        let a = p(0.1, 0.9);
        let b = p(0.8, 0.2);
        let ab = angle_between(vertex, a, b).unwrap();
        let ba = angle_between(vertex, b, a).unwrap();
        assert_approx_eq!(ab, ba, 1e-4);
    }

    #[test]
    fn reflex_difference_is_folded() {
        // bearings of roughly +170 and -170 degrees differ by 340 before folding
        let vertex = p(0.5, 0.5);
        let a = p(0.0, 0.5 + 0.5 * 10.0_f32.to_radians().tan());
        let b = p(0.0, 0.5 - 0.5 * 10.0_f32.to_radians().tan());
        let angle = angle_between(vertex, a, b).unwrap();
        assert_approx_eq!(angle, 20.0, 1e-2);
    }

    #[test]
    fn always_within_half_turn() {
        let vertex = p(0.5, 0.5);
        let ring = (0..36)
            .map(|i| {
                let t = (i as f32 * 10.0).to_radians();
                p(0.5 + 0.3 * t.cos(), 0.5 + 0.3 * t.sin())
            })
            .collect::<Vec<_>>();
        for &a in &ring {
            for &b in &ring {
                let angle = angle_between(vertex, a, b).unwrap();
                assert!((0.0..=180.0).contains(&angle), "angle {} out of range", angle);
            }
        }
    }

    #[test]
    fn zero_length_limb_is_undefined() {
        let vertex = p(0.5, 0.5);
        assert!(angle_between(vertex, vertex, p(0.9, 0.9)).is_none());
        assert!(angle_between(vertex, p(0.1, 0.1), vertex).is_none());
    }
}
