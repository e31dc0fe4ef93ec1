use serde::{Deserialize, Serialize};

use crate::point::Point2d;
use crate::rect::Rect;
use crate::segment::Segment;

/// A chain of vertices, open (a line string) or closed (a ring).
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    points: Vec<Point2d>,
    is_closed: bool,
}

impl Contour {
    /// Creates a new contour.
    pub fn new(points: Vec<Point2d>, is_closed: bool) -> Self {
        Self { points, is_closed }
    }

    /// Creates a new open contour.
    pub fn open(points: Vec<Point2d>) -> Self {
        Self {
            points,
            is_closed: false,
        }
    }

    /// Creates a new closed contour.
    pub fn closed(points: Vec<Point2d>) -> Self {
        Self {
            points,
            is_closed: true,
        }
    }

    /// Whether the last vertex connects back to the first one.
    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    /// Vertices of the contour.
    pub fn points(&self) -> &[Point2d] {
        &self.points
    }

    /// Iterates over the segments between consecutive vertices. For a closed contour the
    /// closing segment is included.
    pub fn iter_segments(&self) -> impl Iterator<Item = Segment<'_>> {
        let count = if self.points.len() < 2 {
            0
        } else if self.is_closed {
            self.points.len()
        } else {
            self.points.len() - 1
        };

        (0..count).map(|i| {
            Segment(
                &self.points[i],
                &self.points[(i + 1) % self.points.len()],
            )
        })
    }

    /// Squared distance from `point` to the closest segment of the contour. `None` for a
    /// contour with less than 2 vertices.
    pub fn distance_to_point_sq(&self, point: &Point2d) -> Option<f64> {
        self.iter_segments()
            .map(|v| v.distance_to_point_sq(point))
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Returns true if `point` lies within `tolerance` of any segment of the contour.
    pub fn is_point_inside(&self, point: &Point2d, tolerance: f64) -> bool {
        self.iter_segments()
            .any(|segment| segment.distance_to_point_sq(point) <= tolerance * tolerance)
    }

    /// Bounding rectangle of the contour vertices.
    pub fn bounding_rectangle(&self) -> Option<Rect> {
        Rect::from_points(self.points.iter())
    }
}

/// A contour that is guaranteed to be closed. The closing segment between the last and the
/// first vertices is implicit and the vertices are not required to repeat.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedContour {
    points: Vec<Point2d>,
}

impl ClosedContour {
    /// Creates a new closed contour.
    pub fn new(points: Vec<Point2d>) -> Self {
        Self { points }
    }

    /// Vertices of the contour.
    pub fn points(&self) -> &[Point2d] {
        &self.points
    }

    /// Iterates over the segments of the ring, including the implicit closing one.
    pub fn iter_segments(&self) -> impl Iterator<Item = Segment<'_>> {
        let count = if self.points.len() < 2 {
            0
        } else {
            self.points.len()
        };

        (0..count).map(|i| {
            Segment(
                &self.points[i],
                &self.points[(i + 1) % self.points.len()],
            )
        })
    }

    /// Returns true if `point` lies within `tolerance` of any segment of the ring.
    pub fn is_point_inside(&self, point: &Point2d, tolerance: f64) -> bool {
        self.iter_segments()
            .any(|segment| segment.distance_to_point_sq(point) <= tolerance * tolerance)
    }

    /// Bounding rectangle of the ring vertices.
    pub fn bounding_rectangle(&self) -> Option<Rect> {
        Rect::from_points(self.points.iter())
    }
}

impl From<ClosedContour> for Contour {
    fn from(value: ClosedContour) -> Self {
        Contour::closed(value.points)
    }
}
