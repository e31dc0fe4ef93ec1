//! Vector layer that holds editable features.

use mapedit_types::Geom;
use serde::{Deserialize, Serialize};

pub mod attributes;
mod feature;
mod store;
mod style;

pub use attributes::{coerce_input, default_value, FieldDef, FieldType, Value};
pub use feature::{Feature, FeatureId};
pub use store::{FeatureStore, FeatureUpdate};
pub use style::FeatureStyle;

/// Kind of geometry a vector layer stores. All features of a layer have the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    /// Point features.
    Point,
    /// Polyline features.
    Line,
    /// Polygon features.
    Polygon,
}

/// Layer of vector features sharing one geometry kind, one attribute schema and one base
/// style.
pub struct FeatureLayer {
    name: String,
    geometry_kind: GeometryKind,
    style: FeatureStyle,
    schema: Vec<FieldDef>,
    features: FeatureStore,
}

impl FeatureLayer {
    /// Creates an empty layer.
    ///
    /// The schema always starts with an `id: integer` field. Extra fields given here are
    /// appended after it.
    pub fn new(name: impl Into<String>, geometry_kind: GeometryKind, fields: Vec<FieldDef>) -> Self {
        let mut schema = vec![FieldDef::new("id", FieldType::Integer)];
        schema.extend(fields.into_iter().filter(|field| field.name != "id"));

        let style = match geometry_kind {
            GeometryKind::Point => FeatureStyle::point_default(),
            GeometryKind::Line => FeatureStyle::line_default(),
            GeometryKind::Polygon => FeatureStyle::polygon_default(),
        };

        Self {
            name: name.into(),
            geometry_kind,
            style,
            schema,
            features: FeatureStore::new(),
        }
    }

    /// Name of the layer.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of geometry the layer's features have.
    pub fn geometry_kind(&self) -> GeometryKind {
        self.geometry_kind
    }

    /// Base style new features are created with.
    pub fn style(&self) -> &FeatureStyle {
        &self.style
    }

    /// Sets the base style for features created after this call. Existing features keep
    /// their current style.
    pub fn set_style(&mut self, style: FeatureStyle) {
        self.style = style;
    }

    /// Attribute schema of the layer.
    pub fn schema(&self) -> &[FieldDef] {
        &self.schema
    }

    /// Features of the layer.
    pub fn features(&self) -> &FeatureStore {
        &self.features
    }

    /// Features of the layer, mutable.
    pub fn features_mut(&mut self) -> &mut FeatureStore {
        &mut self.features
    }

    /// Creates a feature with the given geometry and default attribute values.
    ///
    /// Every schema field is initialized with its type's default, except `id`, which gets
    /// the feature's own id.
    pub fn create_feature(&mut self, geometry: Geom) -> FeatureId {
        let id = FeatureId::next();
        let mut feature = Feature::new(geometry, self.style.clone());

        for field in &self.schema {
            let value = if field.name == "id" {
                Value::Integer(id.as_u64() as i64)
            } else {
                default_value(field.field_type)
            };
            feature.properties.insert(field.name.clone(), value);
        }

        self.features.insert(id, feature);
        id
    }

    /// Returns ids of all features whose geometry lies within `tolerance` map units of the
    /// given point, in drawing order (topmost last).
    pub fn features_at(&self, point: mapedit_types::Point2d, tolerance: f64) -> Vec<FeatureId> {
        self.features
            .iter()
            .filter(|(_, feature)| feature.geometry.is_point_inside(&point, tolerance))
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use mapedit_types::Point2d;

    use super::*;

    #[test]
    fn schema_starts_with_id() {
        let layer = FeatureLayer::new(
            "roads",
            GeometryKind::Line,
            vec![FieldDef::new("name", FieldType::String)],
        );
        assert_eq!(layer.schema()[0], FieldDef::new("id", FieldType::Integer));
        assert_eq!(layer.schema()[1], FieldDef::new("name", FieldType::String));
    }

    #[test]
    fn duplicate_id_field_is_dropped() {
        let layer = FeatureLayer::new(
            "roads",
            GeometryKind::Line,
            vec![FieldDef::new("id", FieldType::String)],
        );
        assert_eq!(layer.schema().len(), 1);
        assert_eq!(layer.schema()[0].field_type, FieldType::Integer);
    }

    #[test]
    fn created_feature_gets_defaults() {
        let mut layer = FeatureLayer::new(
            "poi",
            GeometryKind::Point,
            vec![
                FieldDef::new("label", FieldType::String),
                FieldDef::new("rating", FieldType::Float),
            ],
        );
        let id = layer.create_feature(Geom::Point(Point2d::new(10.0, 20.0)));

        let feature = layer.features().get(id).expect("feature not found");
        assert_eq!(
            feature.properties.get("id"),
            Some(&Value::Integer(id.as_u64() as i64))
        );
        assert_eq!(
            feature.properties.get("label"),
            Some(&Value::String(String::new()))
        );
        assert_eq!(feature.properties.get("rating"), Some(&Value::Float(0.0)));
    }

    #[test]
    fn features_at_respects_tolerance() {
        let mut layer = FeatureLayer::new("poi", GeometryKind::Point, vec![]);
        let id = layer.create_feature(Geom::Point(Point2d::new(0.0, 0.0)));

        assert_eq!(layer.features_at(Point2d::new(3.0, 4.0), 5.0), vec![id]);
        assert!(layer.features_at(Point2d::new(3.0, 4.0), 4.0).is_empty());
    }

    #[test]
    fn features_at_returns_drawing_order() {
        let mut layer = FeatureLayer::new("poi", GeometryKind::Point, vec![]);
        let bottom = layer.create_feature(Geom::Point(Point2d::new(0.0, 0.0)));
        let top = layer.create_feature(Geom::Point(Point2d::new(0.1, 0.0)));

        assert_eq!(
            layer.features_at(Point2d::new(0.0, 0.0), 1.0),
            vec![bottom, top]
        );
    }
}
