use crate::point::{CartesianPoint, Point2d};

/// A straight line segment between two points.
#[derive(Debug, PartialEq)]
pub struct Segment<'a>(pub &'a Point2d, pub &'a Point2d);

#[derive(Debug, PartialEq, Eq)]
enum Orientation {
    Clockwise,
    Counterclockwise,
    Collinear,
}

impl Orientation {
    fn triplet(p: &Point2d, q: &Point2d, r: &Point2d) -> Self {
        let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
        if val == 0.0 {
            Orientation::Collinear
        } else if val > 0.0 {
            Orientation::Clockwise
        } else {
            Orientation::Counterclockwise
        }
    }
}

impl<'a> Segment<'a> {
    /// Shortest euclidian distance (squared) between a point and the segment:
    ///
    /// * if the normal from the point to the segment ends inside the segment, the returned value
    ///   is the squared length of the normal
    /// * if the normal from the point to the segment ends outside of the segment, the returned
    ///   value is the smaller one of the distances between the point and the segment's endpoints
    pub fn distance_to_point_sq(&self, point: &Point2d) -> f64 {
        if self.0 == self.1 {
            return self.0.distance_sq(point);
        }

        let ds = CartesianPoint::sub(self.1, self.0);
        let dp = CartesianPoint::sub(point, self.0);
        let ds_len = ds.x * ds.x + ds.y * ds.y;

        let r = (dp.x * ds.x + dp.y * ds.y) / ds_len;
        if r <= 0.0 {
            self.0.distance_sq(point)
        } else if r >= 1.0 {
            self.1.distance_sq(point)
        } else {
            let s = (dp.y * ds.x - dp.x * ds.y) / ds_len;
            (s * s) * ds_len
        }
    }

    /// Returns true, if the segment has at least one common point with the `other` segment.
    pub fn intersects(&self, other: &Segment) -> bool {
        fn on_segment(p: &Point2d, q: &Point2d, r: &Point2d) -> bool {
            q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
        }

        let o1 = Orientation::triplet(self.0, other.0, self.1);
        let o2 = Orientation::triplet(self.0, other.1, self.1);
        let o3 = Orientation::triplet(other.0, self.0, other.1);
        let o4 = Orientation::triplet(other.0, self.1, other.1);

        if o1 != o2 && o3 != o4 {
            return true;
        }

        if o1 == Orientation::Collinear && on_segment(self.0, other.0, self.1) {
            return true;
        }
        if o2 == Orientation::Collinear && on_segment(self.0, other.1, self.1) {
            return true;
        }
        if o3 == Orientation::Collinear && on_segment(other.0, self.0, other.1) {
            return true;
        }
        if o4 == Orientation::Collinear && on_segment(other.0, self.1, other.1) {
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn distance_to_point() {
        let a = Point2d::new(0.0, 0.0);
        let b = Point2d::new(2.0, 0.0);
        let segment = Segment(&a, &b);

        assert_abs_diff_eq!(segment.distance_to_point_sq(&Point2d::new(1.0, 1.0)), 1.0);
        assert_abs_diff_eq!(segment.distance_to_point_sq(&Point2d::new(1.0, 0.0)), 0.0);
        assert_abs_diff_eq!(segment.distance_to_point_sq(&Point2d::new(-1.0, 0.0)), 1.0);
        assert_abs_diff_eq!(segment.distance_to_point_sq(&Point2d::new(3.0, 1.0)), 2.0);
    }

    #[test]
    fn intersection() {
        let a = Point2d::new(0.0, 0.0);
        let b = Point2d::new(2.0, 2.0);
        let c = Point2d::new(0.0, 2.0);
        let d = Point2d::new(2.0, 0.0);
        let e = Point2d::new(3.0, 3.0);
        let f = Point2d::new(4.0, 3.0);

        assert!(Segment(&a, &b).intersects(&Segment(&c, &d)));
        assert!(!Segment(&a, &b).intersects(&Segment(&e, &f)));
        assert!(Segment(&a, &b).intersects(&Segment(&b, &e)));
    }
}
