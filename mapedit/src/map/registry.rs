use crate::layer::Layer;

/// Unique identifier of a layer within a [`LayerRegistry`].
///
/// Ids are never reused, so a stale id held after its layer was removed is harmless: every
/// lookup with it simply returns `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(u64);

struct LayerEntry {
    id: LayerId,
    layer: Layer,
    is_hidden: bool,
}

/// Ordered set of the map's layers.
///
/// Layers are kept in drawing order: the layer registered last is drawn on top. Each layer
/// gets a stable id at registration, and all further operations address layers by id, so
/// reordering or removing other layers never invalidates a handle.
#[derive(Default)]
pub struct LayerRegistry {
    layers: Vec<LayerEntry>,
    next_id: u64,
}

impl LayerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer on top of the existing ones and returns its id.
    pub fn register(&mut self, layer: impl Into<Layer>) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;

        self.layers.push(LayerEntry {
            id,
            layer: layer.into(),
            is_hidden: false,
        });

        id
    }

    /// Returns a reference to the layer with the given id.
    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.entry(id).map(|entry| &entry.layer)
    }

    /// Returns a mutable reference to the layer with the given id.
    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut entry.layer)
    }

    /// Removes the layer with the given id, returning it. Removing an unknown id does
    /// nothing.
    pub fn remove(&mut self, id: LayerId) -> Option<Layer> {
        let index = self.layers.iter().position(|entry| entry.id == id)?;
        Some(self.layers.remove(index).layer)
    }

    /// Shows or hides the layer with the given id. A hidden layer keeps its position and
    /// contents, it is only skipped when drawing.
    pub fn set_visible(&mut self, id: LayerId, visible: bool) {
        if let Some(entry) = self.layers.iter_mut().find(|entry| entry.id == id) {
            entry.is_hidden = !visible;
        }
    }

    /// Returns whether the layer with the given id is visible, or `None` if the id is
    /// unknown.
    pub fn is_visible(&self, id: LayerId) -> Option<bool> {
        self.entry(id).map(|entry| !entry.is_hidden)
    }

    /// Iterates over all layers in drawing order, hidden ones included.
    pub fn iter(&self) -> impl Iterator<Item = (LayerId, &Layer)> {
        self.layers.iter().map(|entry| (entry.id, &entry.layer))
    }

    /// Iterates over visible layers in drawing order.
    pub fn iter_visible(&self) -> impl Iterator<Item = (LayerId, &Layer)> {
        self.layers
            .iter()
            .filter(|entry| !entry.is_hidden)
            .map(|entry| (entry.id, &entry.layer))
    }

    /// Number of layers in the registry, hidden ones included.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if the registry contains no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn entry(&self, id: LayerId) -> Option<&LayerEntry> {
        self.layers.iter().find(|entry| entry.id == id)
    }
}

#[cfg(test)]
mod tests {
    use crate::layer::feature_layer::GeometryKind;
    use crate::layer::{FeatureLayer, RasterTileLayer};

    use super::*;

    fn vector(name: &str) -> FeatureLayer {
        FeatureLayer::new(name, GeometryKind::Point, vec![])
    }

    #[test]
    fn registration_order_is_drawing_order() {
        let mut registry = LayerRegistry::new();
        let basemap = registry.register(RasterTileLayer::osm());
        let overlay = registry.register(vector("poi"));

        let order: Vec<_> = registry.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![basemap, overlay]);
    }

    #[test]
    fn hidden_layers_are_skipped_but_kept() {
        let mut registry = LayerRegistry::new();
        let id = registry.register(vector("poi"));

        registry.set_visible(id, false);
        assert_eq!(registry.is_visible(id), Some(false));
        assert_eq!(registry.iter_visible().count(), 0);
        assert_eq!(registry.len(), 1);

        registry.set_visible(id, true);
        assert_eq!(registry.iter_visible().count(), 1);
    }

    #[test]
    fn ids_survive_removal_of_other_layers() {
        let mut registry = LayerRegistry::new();
        let first = registry.register(vector("a"));
        let second = registry.register(vector("b"));

        registry.remove(first);
        assert_eq!(
            registry.get(second).map(|layer| layer.name()),
            Some("b")
        );
        assert!(registry.get(first).is_none());
    }

    #[test]
    fn stale_id_operations_are_noops() {
        let mut registry = LayerRegistry::new();
        let id = registry.register(vector("a"));
        registry.remove(id);

        assert!(registry.remove(id).is_none());
        registry.set_visible(id, false);
        assert_eq!(registry.is_visible(id), None);
    }
}
