use serde::{Deserialize, Serialize};

use crate::point::Point2d;

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Smallest x coordinate.
    pub x_min: f64,
    /// Smallest y coordinate.
    pub y_min: f64,
    /// Largest x coordinate.
    pub x_max: f64,
    /// Largest y coordinate.
    pub y_max: f64,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Smallest rectangle containing all the given points. `None` for an empty iterator.
    pub fn from_points<'a>(mut points: impl Iterator<Item = &'a Point2d>) -> Option<Self> {
        let first = points.next()?;
        let mut rect = Self::new(first.x, first.y, first.x, first.y);
        for point in points {
            rect.x_min = rect.x_min.min(point.x);
            rect.y_min = rect.y_min.min(point.y);
            rect.x_max = rect.x_max.max(point.x);
            rect.y_max = rect.y_max.max(point.y);
        }

        Some(rect)
    }

    /// Returns true if the point lies inside the rectangle or on its border.
    pub fn contains(&self, point: &Point2d) -> bool {
        point.x >= self.x_min && point.x <= self.x_max && point.y >= self.y_min && point.y <= self.y_max
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}
