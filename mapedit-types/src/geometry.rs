use serde::{Deserialize, Serialize};

use crate::contour::Contour;
use crate::point::{CartesianPoint, Point2d};
use crate::polygon::Polygon;
use crate::rect::Rect;

/// Geometry of a map feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geom {
    /// A single point.
    Point(Point2d),
    /// A line string or a ring.
    Contour(Contour),
    /// A polygon with optional holes.
    Polygon(Polygon),
}

impl Geom {
    /// Returns true if the `point` hits the geometry with the given tolerance (in the same
    /// units as the coordinates).
    ///
    /// A point geometry is hit within `tolerance` of its position, a contour within
    /// `tolerance` of any of its segments, a polygon anywhere inside it or within
    /// `tolerance` of its rings.
    pub fn is_point_inside(&self, point: &Point2d, tolerance: f64) -> bool {
        match self {
            Geom::Point(v) => v.distance_sq(point) <= tolerance * tolerance,
            Geom::Contour(v) => v.is_point_inside(point, tolerance),
            Geom::Polygon(v) => {
                v.contains_point(point)
                    || v.iter_contours().any(|c| c.is_point_inside(point, tolerance))
            }
        }
    }

    /// Bounding rectangle of the geometry.
    pub fn bounding_rectangle(&self) -> Option<Rect> {
        match self {
            Geom::Point(v) => Some(Rect::new(v.x, v.y, v.x, v.y)),
            Geom::Contour(v) => v.bounding_rectangle(),
            Geom::Polygon(v) => v.bounding_rectangle(),
        }
    }
}

impl From<Point2d> for Geom {
    fn from(value: Point2d) -> Self {
        Geom::Point(value)
    }
}

impl From<Contour> for Geom {
    fn from(value: Contour) -> Self {
        Geom::Contour(value)
    }
}

impl From<Polygon> for Geom {
    fn from(value: Polygon) -> Self {
        Geom::Polygon(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_hit_test() {
        let geom = Geom::Point(Point2d::new(10.0, 20.0));

        assert!(geom.is_point_inside(&Point2d::new(10.1, 20.1), 0.2));
        assert!(!geom.is_point_inside(&Point2d::new(11.0, 20.0), 0.2));
    }

    #[test]
    fn contour_hit_test() {
        let geom = Geom::Contour(Contour::open(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(10.0, 0.0),
        ]));

        assert!(geom.is_point_inside(&Point2d::new(5.0, 0.1), 0.2));
        assert!(!geom.is_point_inside(&Point2d::new(5.0, 1.0), 0.2));
    }

    #[test]
    fn polygon_hit_test() {
        let geom = Geom::Polygon(Polygon::from(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(10.0, 0.0),
            Point2d::new(10.0, 10.0),
            Point2d::new(0.0, 10.0),
        ]));

        assert!(geom.is_point_inside(&Point2d::new(5.0, 5.0), 0.0));
        // just outside the border, but within tolerance
        assert!(geom.is_point_inside(&Point2d::new(10.1, 5.0), 0.2));
        assert!(!geom.is_point_inside(&Point2d::new(12.0, 5.0), 0.2));
    }
}
