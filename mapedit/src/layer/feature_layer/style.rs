use serde::{Deserialize, Serialize};

use crate::Color;

use super::GeometryKind;

/// Rendering style of a feature.
///
/// Every feature carries its own style. New features copy the layer's base style so that
/// restyling one feature (e.g. for selection highlighting) does not touch its neighbors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureStyle {
    /// Color of points' and polygons' outline and of lines themselves.
    pub stroke_color: Color,
    /// Width of the stroke in pixels.
    pub stroke_width: f64,
    /// Fill color of points and polygons. Ignored for lines.
    pub fill_color: Color,
    /// Radius of point markers in pixels. Ignored for lines and polygons.
    pub point_radius: f64,
    /// Dash and gap lengths in pixels. `None` draws a solid stroke.
    pub dash_pattern: Option<(f64, f64)>,
}

impl Default for FeatureStyle {
    fn default() -> Self {
        Self {
            stroke_color: Color::BLACK,
            stroke_width: 1.0,
            fill_color: Color::TRANSPARENT,
            point_radius: 5.0,
            dash_pattern: None,
        }
    }
}

impl FeatureStyle {
    /// Default style for point layers.
    pub fn point_default() -> Self {
        Self {
            stroke_color: Color::BLACK,
            stroke_width: 1.0,
            fill_color: Color::from_hex("#FF7800"),
            point_radius: 8.0,
            dash_pattern: None,
        }
    }

    /// Default style for line layers.
    pub fn line_default() -> Self {
        Self {
            stroke_color: Color::from_hex("#3388FF"),
            stroke_width: 3.0,
            ..Default::default()
        }
    }

    /// Default style for polygon layers.
    pub fn polygon_default() -> Self {
        Self {
            stroke_color: Color::BLACK,
            stroke_width: 2.0,
            fill_color: Color::from_hex("#3388FF").with_alpha(128),
            ..Default::default()
        }
    }

    /// Style applied to the selected feature in place of its own.
    pub fn highlight() -> Self {
        Self {
            stroke_color: Color::from_hex("#FFCC00"),
            stroke_width: 4.0,
            fill_color: Color::from_hex("#FFCC00").with_alpha(100),
            point_radius: 10.0,
            dash_pattern: None,
        }
    }

    /// Style of the in-progress drawing preview.
    pub fn preview(kind: GeometryKind) -> Self {
        let base = match kind {
            GeometryKind::Point => Self::point_default(),
            GeometryKind::Line => Self::line_default(),
            GeometryKind::Polygon => Self::polygon_default(),
        };

        Self {
            stroke_color: Color::from_hex("#FF7800"),
            fill_color: Color::from_hex("#FF7800").with_alpha(50),
            dash_pattern: Some((5.0, 10.0)),
            ..base
        }
    }

    /// Returns a copy of the style with the given stroke color.
    pub fn with_stroke_color(&self, stroke_color: Color) -> Self {
        Self {
            stroke_color,
            ..self.clone()
        }
    }

    /// Returns a copy of the style with the given stroke width.
    pub fn with_stroke_width(&self, stroke_width: f64) -> Self {
        Self {
            stroke_width,
            ..self.clone()
        }
    }

    /// Returns a copy of the style with the given fill color.
    pub fn with_fill_color(&self, fill_color: Color) -> Self {
        Self {
            fill_color,
            ..self.clone()
        }
    }

    /// Returns a copy of the style with the given point radius.
    pub fn with_point_radius(&self, point_radius: f64) -> Self {
        Self {
            point_radius,
            ..self.clone()
        }
    }
}
