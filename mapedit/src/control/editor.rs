use std::sync::Arc;

use mapedit_types::{Geom, Point2d};
use parking_lot::RwLock;

use crate::control::{
    DrawSession, EventPropagation, MouseButton, ToolMode, UserEvent, UserEventHandler,
};
use crate::layer::feature_layer::{
    coerce_input, default_value, FeatureId, FeatureStyle, FieldType, GeometryKind, Value,
};
use crate::map::{LayerId, Map};
use crate::notification::{NotificationLevel, Notifications};

const DEFAULT_HIT_TOLERANCE_PX: f64 = 10.0;

/// The currently selected feature.
///
/// The selected feature is shown with the highlight style in place of its own; the original
/// style is kept here and restored on deselection.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Layer the feature belongs to.
    pub layer: LayerId,
    /// Id of the feature.
    pub feature: FeatureId,
    original_style: FeatureStyle,
}

/// Event handler implementing the editing tools.
///
/// The controller owns all editing state: the active tool, the active layer, the selection
/// and the in-progress drawing. At most one feature is selected and at most one drawing is
/// in progress at any time.
pub struct EditController {
    tool: ToolMode,
    active_layer: Option<LayerId>,
    selection: Option<Selection>,
    session: DrawSession,
    hit_tolerance_px: f64,
    notifications: Arc<dyn Notifications>,
}

impl EditController {
    /// Creates a new controller with no tool active.
    pub fn new(notifications: Arc<dyn Notifications>) -> Self {
        Self {
            tool: ToolMode::None,
            active_layer: None,
            selection: None,
            session: DrawSession::Empty,
            hit_tolerance_px: DEFAULT_HIT_TOLERANCE_PX,
            notifications,
        }
    }

    /// Currently active tool.
    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    /// Layer new geometry is drawn into.
    pub fn active_layer(&self) -> Option<LayerId> {
        self.active_layer
    }

    /// Currently selected feature.
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Hit test radius around the pointer in screen pixels.
    pub fn hit_tolerance_px(&self) -> f64 {
        self.hit_tolerance_px
    }

    /// Sets the hit test radius around the pointer in screen pixels.
    pub fn set_hit_tolerance_px(&mut self, tolerance: f64) {
        self.hit_tolerance_px = tolerance;
    }

    /// Activates a tool, deactivating the previous one.
    ///
    /// Activating the already active tool is a no-op apart from the deactivation side
    /// effects running again (an unfinished drawing is discarded in any case). If the tool
    /// cannot be activated (drawing without an active layer, editing without a selection),
    /// the previous tool stays active.
    pub fn set_tool(&mut self, tool: ToolMode, map: &mut Map) {
        // deactivation is unconditional so a half-done drawing never survives a tool change
        self.session = DrawSession::Empty;
        map.redraw();

        match tool {
            ToolMode::Draw if self.active_layer.is_none() => {
                self.notifications
                    .toast(NotificationLevel::Warning, "Select a layer to draw on first");
            }
            ToolMode::Edit => {
                if self.selection.is_none() {
                    self.notifications
                        .toast(NotificationLevel::Warning, "Select a feature to edit first");
                } else {
                    self.notifications.toast(
                        NotificationLevel::Info,
                        "Geometry editing is not available yet",
                    );
                    self.tool = ToolMode::Select;
                }
            }
            other => self.tool = other,
        }
    }

    /// Sets the layer new geometry is drawn into. Clears the selection, since the selected
    /// feature may belong to another layer.
    pub fn set_active_layer(&mut self, layer: Option<LayerId>, map: &mut Map) {
        self.deselect(map);
        self.active_layer = layer;
    }

    /// Selects the feature, replacing any previous selection.
    ///
    /// The feature's layer becomes the active layer, so the selection always belongs to
    /// the active layer.
    pub fn select_feature(&mut self, layer: LayerId, feature: FeatureId, map: &mut Map) {
        self.deselect(map);

        let Some(stored) = map
            .layers_mut()
            .get_mut(layer)
            .and_then(|l| l.as_features_mut())
            .and_then(|l| l.features_mut().get_mut(feature))
        else {
            return;
        };

        let original_style = stored.style.clone();
        stored.style = FeatureStyle::highlight();

        self.selection = Some(Selection {
            layer,
            feature,
            original_style,
        });
        self.active_layer = Some(layer);
        map.redraw();
    }

    /// Clears the selection, restoring the feature's original style.
    pub fn deselect(&mut self, map: &mut Map) {
        let Some(selection) = self.selection.take() else {
            return;
        };

        if let Some(feature) = map
            .layers_mut()
            .get_mut(selection.layer)
            .and_then(|l| l.as_features_mut())
            .and_then(|l| l.features_mut().get_mut(selection.feature))
        {
            feature.style = selection.original_style;
        }

        map.redraw();
    }

    /// Writes attribute values submitted through a form into the selected feature.
    ///
    /// Each submitted string is coerced into a typed value. Does nothing if no feature is
    /// selected.
    pub fn save_attributes(&mut self, values: &[(String, String)], map: &mut Map) {
        let Some(selection) = &self.selection else {
            self.notifications
                .toast(NotificationLevel::Warning, "No feature selected");
            return;
        };

        let Some(feature) = map
            .layers_mut()
            .get_mut(selection.layer)
            .and_then(|l| l.as_features_mut())
            .and_then(|l| l.features_mut().get_mut(selection.feature))
        else {
            return;
        };

        for (name, input) in values {
            feature
                .properties
                .insert(name.clone(), coerce_input(input));
        }

        self.notifications
            .toast(NotificationLevel::Success, "Attributes saved");
        map.redraw();
    }

    /// Adds a field to the selected feature with the default value of the given type.
    ///
    /// Only the selected feature gets the field; the layer schema and the other features
    /// are not touched. An unknown type name produces a null value.
    pub fn add_field(&mut self, name: &str, type_name: &str, map: &mut Map) {
        let name = name.trim();
        if name.is_empty() {
            self.notifications
                .toast(NotificationLevel::Warning, "Field name cannot be empty");
            return;
        }

        let Some(selection) = &self.selection else {
            self.notifications
                .toast(NotificationLevel::Warning, "No feature selected");
            return;
        };

        let Some(feature) = map
            .layers_mut()
            .get_mut(selection.layer)
            .and_then(|l| l.as_features_mut())
            .and_then(|l| l.features_mut().get_mut(selection.feature))
        else {
            return;
        };

        let value = match FieldType::from_name(type_name) {
            Some(field_type) => default_value(field_type),
            None => Value::Null,
        };
        feature.properties.insert(name.to_string(), value);

        self.notifications
            .toast(NotificationLevel::Success, &format!("Field '{name}' added"));
    }

    /// Geometry and style of the in-progress drawing, for rendering.
    pub fn preview(&self, map: &Map) -> Option<(Geom, FeatureStyle)> {
        let kind = self.active_geometry_kind(map)?;
        let geometry = self.session.preview(kind)?;
        Some((geometry, FeatureStyle::preview(kind)))
    }

    fn active_geometry_kind(&self, map: &Map) -> Option<GeometryKind> {
        map.layers()
            .get(self.active_layer?)
            .and_then(|l| l.as_features())
            .map(|l| l.geometry_kind())
    }

    fn hit_tolerance(&self, map: &Map) -> f64 {
        map.view().resolution() * self.hit_tolerance_px
    }

    /// Topmost feature of the topmost visible vector layer at the given map position.
    fn feature_at(&self, map: &Map, position: Point2d) -> Option<(LayerId, FeatureId)> {
        let tolerance = self.hit_tolerance(map);

        let hits: Vec<_> = map
            .layers()
            .iter_visible()
            .filter_map(|(id, layer)| Some((id, layer.as_features()?)))
            .flat_map(|(id, layer)| {
                layer
                    .features_at(position, tolerance)
                    .into_iter()
                    .map(move |feature| (id, feature))
            })
            .collect();

        hits.last().copied()
    }

    fn handle_select_click(&mut self, map: &mut Map, position: Point2d) -> EventPropagation {
        match self.feature_at(map, position) {
            Some((layer, feature)) => {
                self.select_feature(layer, feature, map);
                EventPropagation::Stop
            }
            None => {
                self.deselect(map);
                EventPropagation::Propagate
            }
        }
    }

    fn handle_draw_click(&mut self, map: &mut Map, position: Point2d) -> EventPropagation {
        let Some(kind) = self.active_geometry_kind(map) else {
            return EventPropagation::Propagate;
        };

        self.session = std::mem::take(&mut self.session).with_vertex(position);

        if kind == GeometryKind::Point {
            self.session = std::mem::take(&mut self.session).finish(kind);
            self.commit_drawing(map);
        }

        map.redraw();
        EventPropagation::Stop
    }

    fn handle_draw_double_click(&mut self, map: &mut Map) -> EventPropagation {
        let Some(kind) = self.active_geometry_kind(map) else {
            return EventPropagation::Propagate;
        };

        self.session = std::mem::take(&mut self.session).finish(kind);
        self.commit_drawing(map);
        map.redraw();
        EventPropagation::Stop
    }

    /// Moves the committed geometry into the active layer, selects the new feature and
    /// switches back to the select tool.
    fn commit_drawing(&mut self, map: &mut Map) {
        let Some(geometry) = self.session.take_geometry() else {
            return;
        };
        let Some(layer_id) = self.active_layer else {
            return;
        };

        let Some(layer) = map
            .layers_mut()
            .get_mut(layer_id)
            .and_then(|l| l.as_features_mut())
        else {
            return;
        };

        let feature = layer.create_feature(geometry);
        self.tool = ToolMode::Select;
        self.select_feature(layer_id, feature, map);
    }

    fn handle_delete_click(&mut self, map: &mut Map, position: Point2d) -> EventPropagation {
        let Some((layer, feature)) = self.feature_at(map, position) else {
            return EventPropagation::Propagate;
        };

        if !self.notifications.confirm("Delete this feature?") {
            return EventPropagation::Stop;
        }

        if self
            .selection
            .as_ref()
            .is_some_and(|s| s.layer == layer && s.feature == feature)
        {
            // don't restore the style of a feature that is about to be removed
            self.selection = None;
        }

        if let Some(features) = map
            .layers_mut()
            .get_mut(layer)
            .and_then(|l| l.as_features_mut())
        {
            features.features_mut().remove(feature);
        }

        self.tool = ToolMode::Select;
        self.notifications
            .toast(NotificationLevel::Success, "Feature deleted");
        map.redraw();

        EventPropagation::Stop
    }
}

impl UserEventHandler for EditController {
    fn handle(&mut self, event: &UserEvent, map: &mut Map) -> EventPropagation {
        match event {
            UserEvent::Click(MouseButton::Left, mouse_event) => {
                let Some(position) = map
                    .view()
                    .screen_to_map(mouse_event.screen_pointer_position)
                else {
                    return EventPropagation::Propagate;
                };

                match self.tool {
                    ToolMode::Select => self.handle_select_click(map, position),
                    ToolMode::Draw => self.handle_draw_click(map, position),
                    ToolMode::Delete => self.handle_delete_click(map, position),
                    ToolMode::None | ToolMode::Edit => EventPropagation::Propagate,
                }
            }
            UserEvent::DoubleClick(MouseButton::Left, _) if self.tool == ToolMode::Draw => {
                self.handle_draw_double_click(map)
            }
            _ => EventPropagation::Propagate,
        }
    }
}

impl UserEventHandler for Arc<RwLock<EditController>> {
    fn handle(&mut self, event: &UserEvent, map: &mut Map) -> EventPropagation {
        self.write().handle(event, map)
    }
}
