use mapedit_types::{ClosedContour, Contour, Geom, Point2d, Polygon};

use crate::layer::feature_layer::GeometryKind;

/// State of an in-progress drawing.
///
/// A session is a value: every transition consumes the old state and returns the new one,
/// so an interrupted drawing can never leave partial geometry behind. Vertices are
/// collected in map coordinates.
#[derive(Debug, Clone, Default)]
pub enum DrawSession {
    /// Nothing is being drawn.
    #[default]
    Empty,
    /// Vertices are being collected.
    Collecting {
        /// Vertices added so far, in click order.
        vertices: Vec<Point2d>,
    },
    /// The drawing is finished and its geometry is ready to be taken.
    Committed {
        /// The finished geometry.
        geometry: Geom,
    },
}

impl DrawSession {
    /// Adds a vertex to the session.
    ///
    /// A committed session is replaced by a new one starting from this vertex.
    pub fn with_vertex(self, vertex: Point2d) -> Self {
        match self {
            DrawSession::Collecting { mut vertices } => {
                vertices.push(vertex);
                DrawSession::Collecting { vertices }
            }
            DrawSession::Empty | DrawSession::Committed { .. } => DrawSession::Collecting {
                vertices: vec![vertex],
            },
        }
    }

    /// Geometry to show while the drawing is in progress, or `None` if there is not enough
    /// of it to show anything.
    ///
    /// A two-vertex polygon previews as an open line, since a ring cannot be built from it
    /// yet.
    pub fn preview(&self, kind: GeometryKind) -> Option<Geom> {
        let DrawSession::Collecting { vertices } = self else {
            return None;
        };

        match kind {
            GeometryKind::Point => vertices.last().map(|point| Geom::Point(*point)),
            GeometryKind::Line => {
                if vertices.len() < 2 {
                    None
                } else {
                    Some(Geom::Contour(Contour::open(vertices.clone())))
                }
            }
            GeometryKind::Polygon => match vertices.len() {
                0 | 1 => None,
                2 => Some(Geom::Contour(Contour::open(vertices.clone()))),
                _ => Some(Geom::Polygon(Polygon::from(closed_ring(vertices.clone())))),
            },
        }
    }

    /// Finishes the drawing.
    ///
    /// Consecutive duplicate vertices are dropped first: finishing a line or a polygon with
    /// a double click adds the final vertex twice. If fewer distinct vertices remain than
    /// the geometry kind needs (2 for lines, 3 for polygons), the drawing is discarded and
    /// the session becomes empty.
    pub fn finish(self, kind: GeometryKind) -> Self {
        let DrawSession::Collecting { vertices } = self else {
            return DrawSession::Empty;
        };

        let mut deduped: Vec<Point2d> = Vec::with_capacity(vertices.len());
        for vertex in vertices {
            if deduped.last() != Some(&vertex) {
                deduped.push(vertex);
            }
        }

        match kind {
            GeometryKind::Point => match deduped.last() {
                Some(point) => DrawSession::Committed {
                    geometry: Geom::Point(*point),
                },
                None => DrawSession::Empty,
            },
            GeometryKind::Line => {
                if deduped.len() < 2 {
                    DrawSession::Empty
                } else {
                    DrawSession::Committed {
                        geometry: Geom::Contour(Contour::open(deduped)),
                    }
                }
            }
            GeometryKind::Polygon => {
                if deduped.len() < 3 {
                    DrawSession::Empty
                } else {
                    DrawSession::Committed {
                        geometry: Geom::Polygon(Polygon::from(closed_ring(deduped))),
                    }
                }
            }
        }
    }

    /// Takes the committed geometry out of the session, leaving it empty. Returns `None` if
    /// the session is not committed.
    pub fn take_geometry(&mut self) -> Option<Geom> {
        match std::mem::take(self) {
            DrawSession::Committed { geometry } => Some(geometry),
            other => {
                *self = other;
                None
            }
        }
    }

    /// Returns true if no drawing is in progress or committed.
    pub fn is_empty(&self) -> bool {
        matches!(self, DrawSession::Empty)
    }
}

/// Builds a ring with an explicit closing vertex equal to the first one.
fn closed_ring(mut vertices: Vec<Point2d>) -> ClosedContour {
    if let Some(first) = vertices.first().copied() {
        vertices.push(first);
    }
    ClosedContour::new(vertices)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn collect(points: &[(f64, f64)]) -> DrawSession {
        points.iter().fold(DrawSession::Empty, |session, (x, y)| {
            session.with_vertex(Point2d::new(*x, *y))
        })
    }

    #[test]
    fn point_commits_at_last_vertex() {
        let session = collect(&[(10.0, 20.0)]).finish(GeometryKind::Point);
        assert_matches!(
            session,
            DrawSession::Committed {
                geometry: Geom::Point(point)
            } if point == Point2d::new(10.0, 20.0)
        );
    }

    #[test]
    fn line_with_one_vertex_is_discarded() {
        let session = collect(&[(0.0, 0.0)]).finish(GeometryKind::Line);
        assert_matches!(session, DrawSession::Empty);
    }

    #[test]
    fn line_commits_open_contour() {
        let mut session = collect(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).finish(GeometryKind::Line);

        let geometry = session.take_geometry().expect("not committed");
        let Geom::Contour(contour) = geometry else {
            panic!("expected a contour");
        };
        assert!(!contour.is_closed());
        assert_eq!(contour.points().len(), 3);
        assert!(session.is_empty());
    }

    #[test]
    fn polygon_ring_repeats_first_vertex() {
        let mut session =
            collect(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)]).finish(GeometryKind::Polygon);

        let Some(Geom::Polygon(polygon)) = session.take_geometry() else {
            panic!("expected a polygon");
        };
        let ring = polygon.outer_contour.points();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn double_click_duplicate_is_dropped() {
        // a double click delivers its position twice
        let session = collect(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (4.0, 4.0)])
            .finish(GeometryKind::Polygon);

        let DrawSession::Committed {
            geometry: Geom::Polygon(polygon),
        } = session
        else {
            panic!("expected a committed polygon");
        };
        assert_eq!(polygon.outer_contour.points().len(), 4);
    }

    #[test]
    fn polygon_with_two_distinct_vertices_is_discarded() {
        let session = collect(&[(0.0, 0.0), (4.0, 0.0), (4.0, 0.0)]).finish(GeometryKind::Polygon);
        assert_matches!(session, DrawSession::Empty);
    }

    #[test]
    fn two_vertex_polygon_previews_as_line() {
        let session = collect(&[(0.0, 0.0), (4.0, 0.0)]);
        assert_matches!(
            session.preview(GeometryKind::Polygon),
            Some(Geom::Contour(_))
        );

        let session = session.with_vertex(Point2d::new(4.0, 4.0));
        assert_matches!(
            session.preview(GeometryKind::Polygon),
            Some(Geom::Polygon(_))
        );
    }

    #[test]
    fn vertex_after_commit_starts_a_new_session() {
        let session = collect(&[(10.0, 20.0)])
            .finish(GeometryKind::Point)
            .with_vertex(Point2d::new(0.0, 0.0));

        assert_matches!(session, DrawSession::Collecting { ref vertices } if vertices.len() == 1);
    }

    #[test]
    fn take_geometry_on_collecting_keeps_vertices() {
        let mut session = collect(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(session.take_geometry().is_none());
        assert_matches!(session, DrawSession::Collecting { ref vertices } if vertices.len() == 2);
    }
}
