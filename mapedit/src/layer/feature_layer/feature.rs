use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use mapedit_types::Geom;
use serde::{Deserialize, Serialize};
use web_time::{SystemTime, UNIX_EPOCH};

use super::attributes::Value;
use super::style::FeatureStyle;

/// Unique identifier of a feature.
///
/// Ids are unique within a process and monotonically increasing. They are seeded from the
/// wall clock so that features created in different sessions are unlikely to collide when
/// their layers are merged later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FeatureId(u64);

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

impl FeatureId {
    /// Returns the next unused feature id.
    pub fn next() -> Self {
        let now_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_millis() as u64)
            .unwrap_or(0);

        // fetch_update returns the value before the update
        let id = NEXT_ID
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
                Some((prev + 1).max(now_millis))
            })
            .map(|prev| (prev + 1).max(now_millis))
            .unwrap_or(now_millis);

        Self(id)
    }

    /// Raw value of the id.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// A single vector feature: geometry, attribute values and rendering style.
#[derive(Debug, Clone)]
pub struct Feature {
    /// Geometry of the feature.
    pub geometry: Geom,
    /// Attribute values, keyed by field name.
    pub properties: BTreeMap<String, Value>,
    /// Rendering style of the feature.
    pub style: FeatureStyle,
}

impl Feature {
    /// Creates a feature with an empty property bag.
    pub fn new(geometry: Geom, style: FeatureStyle) -> Self {
        Self {
            geometry,
            properties: BTreeMap::new(),
            style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let first = FeatureId::next();
        let second = FeatureId::next();
        assert!(second.as_u64() > first.as_u64());
    }

    #[test]
    fn ids_are_time_seeded() {
        let before = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_millis() as u64)
            .unwrap_or(0);

        // holds for the very first id of the process too
        let id = FeatureId::next();
        assert!(id.as_u64() >= before);
    }
}
