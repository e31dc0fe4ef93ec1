//! Concrete 2D geometry types used by the `mapedit` engine.
//!
//! Unlike general purpose GIS libraries this crate does not try to abstract
//! over point types or coordinate spaces. An editor works with one kind of
//! point (`f64` cartesian) and three kinds of geometries (points, contours
//! and polygons), so all types here are concrete and the algorithms are
//! written directly for them.
//!
//! The [`Geom`] enum is the geometry of a map feature. Hit-testing with a
//! tolerance (needed to select features with a mouse click) is provided by
//! [`Geom::is_point_inside`].

mod contour;
mod geometry;
mod point;
mod polygon;
mod rect;
mod segment;
mod size;

pub use contour::{ClosedContour, Contour};
pub use geometry::Geom;
pub use point::{CartesianPoint, Point2d};
pub use polygon::Polygon;
pub use rect::Rect;
pub use segment::Segment;
pub use size::Size;
