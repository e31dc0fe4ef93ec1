use super::feature::{Feature, FeatureId};

/// Change of a single feature since updates were last drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureUpdate {
    /// The feature was inserted or modified.
    Updated {
        /// Id of the feature.
        id: FeatureId,
    },
    /// The feature was removed from the store.
    Removed {
        /// Id of the feature.
        id: FeatureId,
    },
}

struct FeatureEntry {
    id: FeatureId,
    feature: Feature,
}

/// Container of a layer's features.
///
/// The store keeps features in insertion order, which is also their drawing order: the
/// feature inserted last is drawn on top. Every mutable access is recorded so that a
/// renderer can redraw only the features that changed.
#[derive(Default)]
pub struct FeatureStore {
    features: Vec<FeatureEntry>,
    pending_updates: Vec<FeatureUpdate>,
}

impl FeatureStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a feature to the store on top of the existing ones.
    pub fn insert(&mut self, id: FeatureId, feature: Feature) {
        self.features.push(FeatureEntry { id, feature });
        self.pending_updates.push(FeatureUpdate::Updated { id });
    }

    /// Returns a reference to the feature with the given id.
    pub fn get(&self, id: FeatureId) -> Option<&Feature> {
        self.features
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.feature)
    }

    /// Returns a mutable reference to the feature with the given id.
    ///
    /// The feature is marked as updated even if the caller does not end up changing it.
    pub fn get_mut(&mut self, id: FeatureId) -> Option<&mut Feature> {
        let entry = self.features.iter_mut().find(|entry| entry.id == id)?;
        self.pending_updates.push(FeatureUpdate::Updated { id });
        Some(&mut entry.feature)
    }

    /// Removes the feature with the given id, returning it if it was present.
    pub fn remove(&mut self, id: FeatureId) -> Option<Feature> {
        let index = self.features.iter().position(|entry| entry.id == id)?;
        let entry = self.features.remove(index);
        self.pending_updates.push(FeatureUpdate::Removed { id });
        Some(entry.feature)
    }

    /// Iterates over all features in drawing order.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, &Feature)> {
        self.features.iter().map(|entry| (entry.id, &entry.feature))
    }

    /// Iterates over all features in drawing order, allowing modification.
    ///
    /// All iterated features are marked as updated.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (FeatureId, &mut Feature)> {
        let updates = &mut self.pending_updates;
        self.features.iter_mut().map(move |entry| {
            updates.push(FeatureUpdate::Updated { id: entry.id });
            (entry.id, &mut entry.feature)
        })
    }

    /// Number of features in the store.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if the store contains no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Returns all changes recorded since the last call, clearing the log.
    pub fn drain_updates(&mut self) -> Vec<FeatureUpdate> {
        std::mem::take(&mut self.pending_updates)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use mapedit_types::{Geom, Point2d};

    use crate::layer::feature_layer::FeatureStyle;

    use super::*;

    fn feature(x: f64, y: f64) -> Feature {
        Feature::new(Geom::Point(Point2d::new(x, y)), FeatureStyle::default())
    }

    #[test]
    fn feature_editing() {
        let mut store = FeatureStore::new();
        let id = FeatureId::next();
        store.insert(id, feature(1.0, 2.0));

        let updates = store.drain_updates();
        assert_matches!(updates.as_slice(), [FeatureUpdate::Updated { id: updated }] if *updated == id);

        store.get_mut(id).expect("feature not found").geometry = Geom::Point(Point2d::new(3.0, 4.0));
        let updates = store.drain_updates();
        assert_matches!(updates.as_slice(), [FeatureUpdate::Updated { .. }]);

        // read-only access is not an update
        let _ = store.get(id);
        assert!(store.drain_updates().is_empty());

        store.remove(id);
        let updates = store.drain_updates();
        assert_matches!(updates.as_slice(), [FeatureUpdate::Removed { id: removed }] if *removed == id);
        assert!(store.is_empty());
    }

    #[test]
    fn insertion_order_is_drawing_order() {
        let mut store = FeatureStore::new();
        let bottom = FeatureId::next();
        let top = FeatureId::next();
        store.insert(bottom, feature(0.0, 0.0));
        store.insert(top, feature(0.0, 0.0));

        let order: Vec<_> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![bottom, top]);
    }

    #[test]
    fn remove_missing_is_none() {
        let mut store = FeatureStore::new();
        assert!(store.remove(FeatureId::next()).is_none());
        assert!(store.drain_updates().is_empty());
    }
}
