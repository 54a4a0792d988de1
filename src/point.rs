use crate::error::Error;
use ordered_float::NotNan;
use std::ops::Sub;

/// A position in the detector's normalized coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Result<Self, Error> {
        Ok(Self {
            x: NotNan::new(x)
                .map_err(|e| Error::ConstructNotNan(e, x))?
                .into_inner(),
            y: NotNan::new(y)
                .map_err(|e| Error::ConstructNotNan(e, y))?
                .into_inner(),
        })
    }

    /// Bearing of the vector from the origin to this point, in radians.
    #[inline]
    pub fn bearing(self) -> f32 {
        self.y.atan2(self.x)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    #[inline]
    pub fn x(self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.y
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::Output {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Point;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn xy_points() {
        let a = Point::new(0.5, 0.5).unwrap();
        let b = Point::new(1.0, 0.75).unwrap();
        let delta = b - a;
        assert_eq!((delta.x(), delta.y()), (0.5, 0.25));
    }

    #[test]
    fn nan_is_rejected() {
        assert!(Point::new(f32::NAN, 0.5).is_err());
        assert!(Point::new(0.5, f32::NAN).is_err());
    }

    #[test]
    fn bearing_of_unit_vectors() {
        assert_approx_eq!(Point::new(1.0, 0.0).unwrap().bearing(), 0.0);
        assert_approx_eq!(
            Point::new(0.0, 1.0).unwrap().bearing(),
            std::f32::consts::FRAC_PI_2
        );
    }

    #[test]
    fn difference_of_equal_points_is_zero() {
        let a = Point::new(0.25, 0.75).unwrap();
        assert!((a - a).is_zero());
        assert!(!a.is_zero());
    }
}
