use serde::{Deserialize, Serialize};

use crate::contour::ClosedContour;
use crate::point::Point2d;
use crate::rect::Rect;
use crate::segment::Segment;

/// A polygon with one outer ring and any number of holes.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Outer contour.
    pub outer_contour: ClosedContour,
    /// Inner contours (holes).
    pub inner_contours: Vec<ClosedContour>,
}

impl Polygon {
    /// Creates a new polygon.
    pub fn new(outer_contour: ClosedContour, inner_contours: Vec<ClosedContour>) -> Self {
        Self {
            outer_contour,
            inner_contours,
        }
    }

    /// Iterates over all contours of the polygon, outer first.
    pub fn iter_contours(&self) -> impl Iterator<Item = &ClosedContour> {
        std::iter::once(&self.outer_contour).chain(self.inner_contours.iter())
    }

    /// Iterates over the segments of all contours of the polygon.
    pub fn iter_segments(&self) -> impl Iterator<Item = Segment<'_>> {
        self.iter_contours().flat_map(|c| c.iter_segments())
    }

    /// Returns true if the `point` lies inside the polygon or on one of its sides.
    ///
    /// Containment is tested per contour, so points inside a hole are outside the polygon
    /// regardless of the winding direction of the hole's ring.
    pub fn contains_point(&self, point: &Point2d) -> bool {
        ring_contains_point(&self.outer_contour, point)
            && !self
                .inner_contours
                .iter()
                .any(|ring| ring_contains_point(ring, point))
    }

    /// Bounding rectangle of the polygon.
    pub fn bounding_rectangle(&self) -> Option<Rect> {
        self.outer_contour.bounding_rectangle()
    }
}

/// Winding number test of a single ring.
fn ring_contains_point(ring: &ClosedContour, point: &Point2d) -> bool {
    let mut wn = 0i64;
    let x = point.x;
    let y = point.y;

    for segment in ring.iter_segments() {
        if segment.0.x < x && segment.1.x < x {
            continue;
        }

        let is_to_right = segment.0.x > x && segment.1.x > x || {
            let x_max = segment.0.x.max(segment.1.x);
            let ray_p1 = Point2d::new(x, y);
            let ray_p2 = Point2d::new(x_max, y);
            let ray = Segment(&ray_p1, &ray_p2);

            segment.intersects(&ray)
        };

        if is_to_right {
            if segment.0.y < y && segment.1.y >= y {
                wn += 1;
            } else if segment.0.y > y && segment.1.y <= y {
                wn -= 1;
            }
        }
    }

    wn != 0
}

impl From<ClosedContour> for Polygon {
    fn from(value: ClosedContour) -> Self {
        Self {
            outer_contour: value,
            inner_contours: vec![],
        }
    }
}

impl From<Vec<Point2d>> for Polygon {
    fn from(value: Vec<Point2d>) -> Self {
        Self {
            outer_contour: ClosedContour::new(value),
            inner_contours: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::from(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(4.0, 0.0),
            Point2d::new(4.0, 4.0),
            Point2d::new(0.0, 4.0),
        ])
    }

    #[test]
    fn contains_point() {
        let polygon = unit_square();

        assert!(polygon.contains_point(&Point2d::new(2.0, 2.0)));
        assert!(!polygon.contains_point(&Point2d::new(5.0, 2.0)));
        assert!(!polygon.contains_point(&Point2d::new(-1.0, 2.0)));
        assert!(!polygon.contains_point(&Point2d::new(2.0, 5.0)));
    }

    #[test]
    fn contains_point_with_hole() {
        let mut polygon = unit_square();
        polygon.inner_contours.push(ClosedContour::new(vec![
            Point2d::new(1.0, 1.0),
            Point2d::new(3.0, 1.0),
            Point2d::new(3.0, 3.0),
            Point2d::new(1.0, 3.0),
        ]));

        assert!(polygon.contains_point(&Point2d::new(0.5, 0.5)));
        assert!(!polygon.contains_point(&Point2d::new(2.0, 2.0)));
    }

    #[test]
    fn hole_winding_direction_does_not_matter() {
        // same hole, wound opposite to the outer ring
        let mut polygon = unit_square();
        polygon.inner_contours.push(ClosedContour::new(vec![
            Point2d::new(1.0, 3.0),
            Point2d::new(3.0, 3.0),
            Point2d::new(3.0, 1.0),
            Point2d::new(1.0, 1.0),
        ]));

        assert!(polygon.contains_point(&Point2d::new(0.5, 0.5)));
        assert!(!polygon.contains_point(&Point2d::new(2.0, 2.0)));
    }

    #[test]
    fn explicitly_closed_ring() {
        // A ring that repeats its first vertex at the end must behave the same.
        let polygon = Polygon::from(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(4.0, 0.0),
            Point2d::new(4.0, 4.0),
            Point2d::new(0.0, 4.0),
            Point2d::new(0.0, 0.0),
        ]);

        assert!(polygon.contains_point(&Point2d::new(2.0, 2.0)));
        assert!(!polygon.contains_point(&Point2d::new(5.0, 2.0)));
    }
}
