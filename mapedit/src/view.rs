use mapedit_types::{Point2d, Rect, Size};

/// Position and extents of the part of the map that is displayed on the screen.
///
/// Map coordinates are cartesian with y pointing up; screen coordinates are pixels from the
/// top-left corner of the map widget with y pointing down. `resolution` is the size of one
/// screen pixel in map units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    center: Point2d,
    resolution: f64,
    size: Size,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: Point2d::new(0.0, 0.0),
            resolution: 1.0,
            size: Size::default(),
        }
    }
}

impl MapView {
    /// Creates a new view centered on the given point.
    pub fn new(center: Point2d, resolution: f64) -> Self {
        Self {
            center,
            resolution,
            ..Default::default()
        }
    }

    /// Center of the view in map coordinates.
    pub fn center(&self) -> Point2d {
        self.center
    }

    /// Returns a copy of the view with the given center.
    pub fn with_center(&self, center: Point2d) -> Self {
        Self { center, ..*self }
    }

    /// Size of one screen pixel in map units.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Returns a copy of the view with the given resolution.
    pub fn with_resolution(&self, resolution: f64) -> Self {
        Self {
            resolution,
            ..*self
        }
    }

    /// Size of the map widget in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns a copy of the view with the given widget size.
    pub fn with_size(&self, size: Size) -> Self {
        Self { size, ..*self }
    }

    /// Converts a screen pixel position into map coordinates. Returns `None` if the widget
    /// size is not set yet.
    pub fn screen_to_map(&self, pixel: Point2d) -> Option<Point2d> {
        if self.size.is_zero() {
            return None;
        }

        let x = self.center.x + (pixel.x - self.size.half_width()) * self.resolution;
        let y = self.center.y - (pixel.y - self.size.half_height()) * self.resolution;
        Some(Point2d::new(x, y))
    }

    /// Converts a map position into screen pixels. Returns `None` if the widget size is not
    /// set yet.
    pub fn map_to_screen(&self, position: Point2d) -> Option<Point2d> {
        if self.size.is_zero() {
            return None;
        }

        let x = (position.x - self.center.x) / self.resolution + self.size.half_width();
        let y = (self.center.y - position.y) / self.resolution + self.size.half_height();
        Some(Point2d::new(x, y))
    }

    /// Bounding rectangle of the visible map area.
    pub fn bounds(&self) -> Rect {
        let half_width = self.size.half_width() * self.resolution;
        let half_height = self.size.half_height() * self.resolution;
        Rect::new(
            self.center.x - half_width,
            self.center.y - half_height,
            self.center.x + half_width,
            self.center.y + half_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn view() -> MapView {
        MapView::new(Point2d::new(100.0, 50.0), 2.0).with_size(Size::new(200.0, 100.0))
    }

    #[test]
    fn screen_to_map_center() {
        let position = view()
            .screen_to_map(Point2d::new(100.0, 50.0))
            .expect("size not set");
        assert_abs_diff_eq!(position.x, 100.0);
        assert_abs_diff_eq!(position.y, 50.0);
    }

    #[test]
    fn screen_y_points_down() {
        let position = view()
            .screen_to_map(Point2d::new(100.0, 0.0))
            .expect("size not set");
        assert_abs_diff_eq!(position.y, 150.0);
    }

    #[test]
    fn round_trip() {
        let v = view();
        let screen = Point2d::new(30.0, 70.0);
        let map = v.screen_to_map(screen).expect("size not set");
        let back = v.map_to_screen(map).expect("size not set");

        assert_abs_diff_eq!(back.x, screen.x);
        assert_abs_diff_eq!(back.y, screen.y);
    }

    #[test]
    fn no_conversion_without_size() {
        let v = MapView::new(Point2d::new(0.0, 0.0), 1.0);
        assert!(v.screen_to_map(Point2d::new(10.0, 10.0)).is_none());
    }
}
