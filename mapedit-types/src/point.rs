use nalgebra::{Point2, Vector2};

/// 2d cartesian point with `f64` coordinates.
///
/// Map geometries store positions in map units (for a geographic map these
/// are lon/lat degrees, x pointing east and y pointing north).
pub type Point2d = Point2<f64>;

/// Distance operations on 2d cartesian points.
pub trait CartesianPoint {
    /// Vector pointing from `other` to `self`.
    fn sub(&self, other: &Point2d) -> Vector2<f64>;

    /// Squared euclidian distance between the points.
    fn distance_sq(&self, other: &Point2d) -> f64;

    /// Euclidian distance between the points.
    fn distance(&self, other: &Point2d) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Sum of the horizontal and vertical distances between the points.
    ///
    /// Cheaper than the euclidian distance, used where only a rough
    /// threshold check is needed (e.g. drag detection).
    fn taxicab_distance(&self, other: &Point2d) -> f64;
}

impl CartesianPoint for Point2d {
    fn sub(&self, other: &Point2d) -> Vector2<f64> {
        Vector2::new(self.x - other.x, self.y - other.y)
    }

    fn distance_sq(&self, other: &Point2d) -> f64 {
        let v = CartesianPoint::sub(self, other);
        v.x * v.x + v.y * v.y
    }

    fn taxicab_distance(&self, other: &Point2d) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn distances() {
        let a = Point2d::new(0.0, 0.0);
        let b = Point2d::new(3.0, 4.0);

        assert_abs_diff_eq!(a.distance_sq(&b), 25.0);
        assert_abs_diff_eq!(a.distance(&b), 5.0);
        assert_abs_diff_eq!(a.taxicab_distance(&b), 7.0);
    }
}
