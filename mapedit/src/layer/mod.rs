//! Layers of a map.
//!
//! A map is a stack of layers drawn bottom to top. Two sorts of layers exist: raster tile
//! basemaps and editable vector feature layers. The closed [`Layer`] enum lets the editing
//! tools reach the typed feature api of vector layers without downcasting.

use std::fmt::Display;

pub mod feature_layer;
pub mod raster_tile_layer;

pub use feature_layer::FeatureLayer;
pub use raster_tile_layer::RasterTileLayer;

use feature_layer::GeometryKind;

/// Kind of a layer as exposed to the application (e.g. in a layer list panel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Vector layer of point features.
    Point,
    /// Vector layer of polyline features.
    Line,
    /// Vector layer of polygon features.
    Polygon,
    /// Raster tile layer.
    Raster,
}

impl Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerKind::Point => write!(f, "point"),
            LayerKind::Line => write!(f, "line"),
            LayerKind::Polygon => write!(f, "polygon"),
            LayerKind::Raster => write!(f, "raster"),
        }
    }
}

impl LayerKind {
    /// Parses a layer kind from its wire name. Accepts the aliases servers commonly use for
    /// line and polygon layers.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "point" => Some(LayerKind::Point),
            "line" | "polyline" => Some(LayerKind::Line),
            "polygon" | "area" => Some(LayerKind::Polygon),
            "raster" => Some(LayerKind::Raster),
            _ => None,
        }
    }

    /// Geometry kind of vector layers of this kind. `None` for raster layers.
    pub fn geometry_kind(&self) -> Option<GeometryKind> {
        match self {
            LayerKind::Point => Some(GeometryKind::Point),
            LayerKind::Line => Some(GeometryKind::Line),
            LayerKind::Polygon => Some(GeometryKind::Polygon),
            LayerKind::Raster => None,
        }
    }
}

/// A layer of the map.
pub enum Layer {
    /// Editable vector layer.
    Features(FeatureLayer),
    /// Raster tile basemap.
    RasterTiles(RasterTileLayer),
}

impl Layer {
    /// Name of the layer.
    pub fn name(&self) -> &str {
        match self {
            Layer::Features(layer) => layer.name(),
            Layer::RasterTiles(layer) => layer.name(),
        }
    }

    /// Kind of the layer.
    pub fn kind(&self) -> LayerKind {
        match self {
            Layer::Features(layer) => match layer.geometry_kind() {
                GeometryKind::Point => LayerKind::Point,
                GeometryKind::Line => LayerKind::Line,
                GeometryKind::Polygon => LayerKind::Polygon,
            },
            Layer::RasterTiles(_) => LayerKind::Raster,
        }
    }

    /// Returns the layer as a feature layer, if it is one.
    pub fn as_features(&self) -> Option<&FeatureLayer> {
        match self {
            Layer::Features(layer) => Some(layer),
            _ => None,
        }
    }

    /// Returns the layer as a mutable feature layer, if it is one.
    pub fn as_features_mut(&mut self) -> Option<&mut FeatureLayer> {
        match self {
            Layer::Features(layer) => Some(layer),
            _ => None,
        }
    }

    /// Returns the layer as a raster tile layer, if it is one.
    pub fn as_raster(&self) -> Option<&RasterTileLayer> {
        match self {
            Layer::RasterTiles(layer) => Some(layer),
            _ => None,
        }
    }
}

impl From<FeatureLayer> for Layer {
    fn from(layer: FeatureLayer) -> Self {
        Layer::Features(layer)
    }
}

impl From<RasterTileLayer> for Layer {
    fn from(layer: RasterTileLayer) -> Self {
        Layer::RasterTiles(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_and_aliases() {
        assert_eq!(LayerKind::from_name("point"), Some(LayerKind::Point));
        assert_eq!(LayerKind::from_name("polyline"), Some(LayerKind::Line));
        assert_eq!(LayerKind::from_name("area"), Some(LayerKind::Polygon));
        assert_eq!(LayerKind::from_name("wms"), None);
    }

    #[test]
    fn layer_kind_matches_geometry() {
        let layer: Layer = FeatureLayer::new("zones", GeometryKind::Polygon, vec![]).into();
        assert_eq!(layer.kind(), LayerKind::Polygon);
        assert!(layer.as_features().is_some());
        assert!(layer.as_raster().is_none());

        let basemap: Layer = RasterTileLayer::osm().into();
        assert_eq!(basemap.kind(), LayerKind::Raster);
        assert!(basemap.as_features().is_none());
    }
}
