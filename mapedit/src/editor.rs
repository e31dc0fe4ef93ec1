//! The editor facade tying the map, the controls and the server client together.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::api::ApiClient;
use crate::control::{EditController, EventProcessor, MapController, RawUserEvent, ToolMode};
use crate::layer::feature_layer::FieldDef;
use crate::layer::{FeatureLayer, Layer, LayerKind, RasterTileLayer};
use crate::map::{LayerId, Map};
use crate::notification::{NotificationLevel, Notifications};
use crate::view::MapView;

/// A complete map editor: a map with a basemap, the interaction pipeline and a client of
/// the map server.
///
/// The embedding application feeds windowing events into [`MapEditor::handle_raw_event`]
/// and renders the map state; everything else goes through the methods of this type.
pub struct MapEditor {
    map: Map,
    event_processor: EventProcessor,
    controller: Arc<RwLock<EditController>>,
    client: ApiClient,
    notifications: Arc<dyn Notifications>,
}

impl MapEditor {
    /// Creates an editor with an OpenStreetMap basemap.
    pub fn new(
        view: MapView,
        server_url: impl Into<String>,
        notifications: Arc<dyn Notifications>,
    ) -> Self {
        let mut map = Map::new(view, Default::default(), None);
        map.layers_mut().register(RasterTileLayer::osm());
        // the satellite basemap starts hidden; the application toggles between the two
        let satellite = map.layers_mut().register(RasterTileLayer::esri_world_imagery());
        map.layers_mut().set_visible(satellite, false);

        let controller = Arc::new(RwLock::new(EditController::new(notifications.clone())));

        let mut event_processor = EventProcessor::new();
        event_processor.add_handler(controller.clone());
        event_processor.add_handler(MapController::default());

        Self {
            map,
            event_processor,
            controller,
            client: ApiClient::new(server_url),
            notifications,
        }
    }

    /// The map being edited.
    pub fn map(&self) -> &Map {
        &self.map
    }

    /// The map being edited, mutable.
    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    /// The editing state controller.
    pub fn controller(&self) -> Arc<RwLock<EditController>> {
        self.controller.clone()
    }

    /// Feeds a windowing event into the interaction pipeline.
    pub fn handle_raw_event(&mut self, event: RawUserEvent) {
        self.event_processor.handle(event, &mut self.map);
    }

    /// Creates an empty vector layer, makes it active and returns its id.
    ///
    /// Returns `None` if the name is empty or the kind is not a vector kind.
    pub fn create_layer(
        &mut self,
        name: &str,
        kind: LayerKind,
        fields: Vec<FieldDef>,
    ) -> Option<LayerId> {
        let name = name.trim();
        if name.is_empty() {
            self.notifications
                .toast(NotificationLevel::Warning, "Layer name cannot be empty");
            return None;
        }

        let Some(geometry_kind) = kind.geometry_kind() else {
            self.notifications
                .toast(NotificationLevel::Warning, "Cannot create a raster layer");
            return None;
        };

        let id = self
            .map
            .layers_mut()
            .register(FeatureLayer::new(name, geometry_kind, fields));
        self.controller
            .write()
            .set_active_layer(Some(id), &mut self.map);

        self.notifications
            .toast(NotificationLevel::Success, &format!("Layer '{name}' created"));
        self.map.redraw();

        Some(id)
    }

    /// Removes a layer after user confirmation. Removing an unknown id does nothing.
    pub fn remove_layer(&mut self, id: LayerId) {
        let Some(name) = self.map.layers().get(id).map(|l| l.name().to_string()) else {
            return;
        };

        if !self
            .notifications
            .confirm(&format!("Remove layer '{name}' and all its features?"))
        {
            return;
        }

        {
            let mut controller = self.controller.write();
            if controller.active_layer() == Some(id) {
                controller.set_active_layer(None, &mut self.map);
                controller.set_tool(ToolMode::None, &mut self.map);
            } else if controller.selection().is_some_and(|s| s.layer == id) {
                controller.deselect(&mut self.map);
            }
        }

        self.map.layers_mut().remove(id);
        self.notifications
            .toast(NotificationLevel::Success, &format!("Layer '{name}' removed"));
        self.map.redraw();
    }

    /// Sets the layer new geometry is drawn into.
    pub fn set_active_layer(&mut self, id: Option<LayerId>) {
        self.controller.write().set_active_layer(id, &mut self.map);
    }

    /// Shows or hides a layer.
    pub fn set_layer_visible(&mut self, id: LayerId, visible: bool) {
        self.map.layers_mut().set_visible(id, visible);
        self.map.redraw();
    }

    /// Activates an editing tool.
    pub fn set_tool(&mut self, tool: ToolMode) {
        self.controller.write().set_tool(tool, &mut self.map);
    }

    /// Fetches the layer list from the server and registers every layer not present yet as
    /// an empty vector layer.
    pub async fn refresh_layers(&mut self) {
        self.notifications.set_busy(true);
        let result = self.client.get_layers().await;
        self.notifications.set_busy(false);

        let layers = match result {
            Ok(layers) => layers,
            Err(error) => {
                log::error!("Failed to fetch layers: {error}");
                self.notifications
                    .toast(NotificationLevel::Error, "Failed to fetch layers");
                return;
            }
        };

        let mut added = 0;
        for summary in layers {
            let exists = self
                .map
                .layers()
                .iter()
                .any(|(_, layer)| layer.name() == summary.name);
            if exists {
                continue;
            }

            let Some(geometry_kind) = LayerKind::from_name(&summary.kind)
                .and_then(|kind| kind.geometry_kind())
            else {
                log::warn!(
                    "Skipping layer '{}' of unknown type '{}'",
                    summary.name,
                    summary.kind
                );
                continue;
            };

            self.map
                .layers_mut()
                .register(FeatureLayer::new(&summary.name, geometry_kind, vec![]));
            added += 1;
        }

        if added > 0 {
            self.notifications.toast(
                NotificationLevel::Success,
                &format!("Added {added} layers from the server"),
            );
            self.map.redraw();
        }
    }

    /// Uploads a geodata file to the server.
    pub async fn upload_file(&mut self, filename: &str, contents: Vec<u8>) {
        self.notifications.set_busy(true);
        let result = self.client.upload(filename, contents).await;
        self.notifications.set_busy(false);

        match result {
            Ok(response) if response.success => {
                let stored = response.filename.unwrap_or_else(|| filename.to_string());
                self.notifications.toast(
                    NotificationLevel::Success,
                    &format!("Uploaded '{stored}'"),
                );
                // the server may have created new layers from the file
                self.refresh_layers().await;
            }
            Ok(response) => {
                let reason = response.error.unwrap_or_else(|| "upload rejected".to_string());
                self.notifications
                    .toast(NotificationLevel::Error, &reason);
            }
            Err(error) => {
                log::error!("Upload failed: {error}");
                self.notifications
                    .toast(NotificationLevel::Error, "Upload failed");
            }
        }
    }

    /// Registers a WMTS service on the server and adds it as a basemap layer.
    pub async fn add_wmts_layer(&mut self, url: &str, layer: &str) {
        self.notifications.set_busy(true);
        let result = self.client.add_wmts(url, layer).await;
        self.notifications.set_busy(false);

        match result {
            Ok(response) if response.success => {
                self.map.layers_mut().register(Layer::RasterTiles(
                    RasterTileLayer::new(layer, url).with_layer_name(layer),
                ));
                self.notifications.toast(
                    NotificationLevel::Success,
                    &format!("WMTS layer '{layer}' added"),
                );
                self.map.redraw();
            }
            Ok(response) => {
                let reason = response
                    .error
                    .unwrap_or_else(|| "service rejected".to_string());
                self.notifications
                    .toast(NotificationLevel::Error, &reason);
            }
            Err(error) => {
                log::error!("WMTS registration failed: {error}");
                self.notifications
                    .toast(NotificationLevel::Error, "Failed to add WMTS layer");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mapedit_types::{Point2d, Size};

    use crate::notification::DummyNotifications;

    use super::*;

    fn editor() -> MapEditor {
        let view = MapView::new(Point2d::new(0.0, 0.0), 1.0).with_size(Size::new(100.0, 100.0));
        MapEditor::new(view, "http://localhost:5000", Arc::new(DummyNotifications::default()))
    }

    #[test]
    fn new_editor_has_basemaps() {
        let editor = editor();
        assert_eq!(editor.map().layers().len(), 2);
        assert!(editor
            .map()
            .layers()
            .iter()
            .all(|(_, layer)| layer.as_raster().is_some()));

        // only the street basemap is visible at startup
        let visible: Vec<_> = editor
            .map()
            .layers()
            .iter_visible()
            .map(|(_, layer)| layer.name().to_string())
            .collect();
        assert_eq!(visible, vec!["OpenStreetMap".to_string()]);
    }

    #[test]
    fn create_layer_makes_it_active() {
        let mut editor = editor();
        let id = editor
            .create_layer("Parcels", LayerKind::Polygon, vec![])
            .expect("layer not created");

        assert_eq!(editor.controller.read().active_layer(), Some(id));
        assert_eq!(editor.map().layers().len(), 3);
    }

    #[test]
    fn empty_layer_name_is_rejected() {
        let mut editor = editor();
        assert!(editor.create_layer("   ", LayerKind::Point, vec![]).is_none());
        assert!(editor.create_layer("x", LayerKind::Raster, vec![]).is_none());
        assert_eq!(editor.map().layers().len(), 2);
    }

    #[test]
    fn removing_the_active_layer_resets_editing_state() {
        let mut editor = editor();
        let id = editor
            .create_layer("Parcels", LayerKind::Polygon, vec![])
            .expect("layer not created");
        editor.set_tool(ToolMode::Draw);

        editor.remove_layer(id);

        assert!(editor.map().layers().get(id).is_none());
        assert_eq!(editor.controller.read().active_layer(), None);
        assert_eq!(editor.controller.read().tool(), ToolMode::None);
    }

    #[test]
    fn removing_unknown_layer_is_a_noop() {
        let mut editor = editor();
        let id = editor
            .create_layer("Parcels", LayerKind::Polygon, vec![])
            .expect("layer not created");
        editor.remove_layer(id);

        // second removal of the same id
        editor.remove_layer(id);
        assert_eq!(editor.map().layers().len(), 2);
    }

    #[test]
    fn layer_visibility_toggles() {
        let mut editor = editor();
        let id = editor
            .create_layer("Parcels", LayerKind::Polygon, vec![])
            .expect("layer not created");

        editor.set_layer_visible(id, false);
        assert_eq!(editor.map().layers().is_visible(id), Some(false));
        editor.set_layer_visible(id, true);
        assert_eq!(editor.map().layers().is_visible(id), Some(true));
    }
}
