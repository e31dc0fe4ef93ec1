//! Map, the central type of the editor.

use mapedit_types::Size;

use crate::messenger::Messenger;
use crate::view::MapView;

mod registry;

pub use registry::{LayerId, LayerRegistry};

/// The map itself: a view over a stack of layers.
///
/// The map does not render anything. It owns the current [`MapView`], the layer registry
/// and a [`Messenger`] handle through which it asks the embedding application to redraw.
pub struct Map {
    view: MapView,
    layers: LayerRegistry,
    messenger: Option<Box<dyn Messenger>>,
}

impl Map {
    /// Creates a new map.
    pub fn new(view: MapView, layers: LayerRegistry, messenger: Option<Box<dyn Messenger>>) -> Self {
        Self {
            view,
            layers,
            messenger,
        }
    }

    /// Current view of the map.
    pub fn view(&self) -> &MapView {
        &self.view
    }

    /// Replaces the current view and requests a redraw.
    pub fn set_view(&mut self, view: MapView) {
        self.view = view;
        self.redraw();
    }

    /// Updates the view for a new widget size.
    pub fn set_size(&mut self, size: Size) {
        self.view = self.view.with_size(size);
        self.redraw();
    }

    /// Layers of the map.
    pub fn layers(&self) -> &LayerRegistry {
        &self.layers
    }

    /// Layers of the map, mutable.
    pub fn layers_mut(&mut self) -> &mut LayerRegistry {
        &mut self.layers
    }

    /// Sets the messenger the map notifies about needed redraws.
    pub fn set_messenger(&mut self, messenger: Option<Box<dyn Messenger>>) {
        self.messenger = messenger;
    }

    /// Requests a redraw of the map.
    pub fn redraw(&self) {
        if let Some(messenger) = &self.messenger {
            messenger.request_redraw();
        }
    }
}

impl Default for Map {
    fn default() -> Self {
        Self::new(MapView::default(), LayerRegistry::new(), None)
    }
}
