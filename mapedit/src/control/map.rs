use crate::control::{EventPropagation, MouseButton, UserEvent, UserEventHandler};
use crate::map::Map;
use crate::view::MapView;

/// Configuration of a [`MapController`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct MapControllerConfiguration {
    zoom_speed: f64,
    min_resolution: f64,
    max_resolution: f64,
}

impl Default for MapControllerConfiguration {
    fn default() -> Self {
        Self {
            zoom_speed: 0.2,
            max_resolution: 156543.03392800014 / 8.0,
            min_resolution: 156543.03392800014 / 8.0 / 2.0f64.powi(16),
        }
    }
}

impl MapControllerConfiguration {
    /// Magnitude of the zoom on every mouse wheel turn.
    ///
    /// For example, the value of `0.2` means, that every time the mouse wheel is turned,
    /// the map will be zoomed by 0.2 times.
    pub fn zoom_speed(&self) -> f64 {
        self.zoom_speed
    }

    /// Sets magnitude of the zoom on every mouse wheel turn.
    pub fn with_zoom_speed(mut self, speed: f64) -> Self {
        self.zoom_speed = speed;
        self
    }

    /// Maximum allowed resolution.
    pub fn max_resolution(&self) -> f64 {
        self.max_resolution
    }

    /// Sets maximum allowed resolution.
    pub fn with_max_resolution(mut self, resolution: f64) -> Self {
        self.max_resolution = resolution;
        self
    }

    /// Minimum allowed resolution.
    pub fn min_resolution(&self) -> f64 {
        self.min_resolution
    }

    /// Sets minimum allowed resolution.
    pub fn with_min_resolution(mut self, resolution: f64) -> Self {
        self.min_resolution = resolution;
        self
    }
}

/// Event handler of a map, providing panning and zooming.
#[derive(Default, Copy, Clone, PartialEq, Debug)]
pub struct MapController {
    config: MapControllerConfiguration,
}

impl MapController {
    /// Creates a new instance of `MapController` with the given configuration.
    pub fn new(config: MapControllerConfiguration) -> Self {
        Self { config }
    }

    /// Returns the current configuration of the controller.
    pub fn config(&self) -> MapControllerConfiguration {
        self.config
    }

    /// Update the configuration of the controller.
    pub fn set_config(&mut self, config: MapControllerConfiguration) {
        self.config = config;
    }
}

impl UserEventHandler for MapController {
    fn handle(&mut self, event: &UserEvent, map: &mut Map) -> EventPropagation {
        match event {
            UserEvent::DragStarted(MouseButton::Left, _) => EventPropagation::Consume,
            UserEvent::Drag(MouseButton::Left, delta, _) => {
                let view = map.view();
                let center = view.center();
                let resolution = view.resolution();

                // screen y points down, map y points up
                let target = view.with_center(mapedit_types::Point2d::new(
                    center.x - delta.x * resolution,
                    center.y + delta.y * resolution,
                ));

                map.set_view(self.adjust_target_view(target));
                EventPropagation::Stop
            }
            UserEvent::Scroll(delta, mouse_event) => {
                let zoom = self.get_zoom(*delta);
                let view = *map.view();

                let target = match view.screen_to_map(mouse_event.screen_pointer_position) {
                    Some(anchor) => {
                        // keep the point under the cursor in place
                        let center = view.center();
                        let new_center = mapedit_types::Point2d::new(
                            anchor.x + (center.x - anchor.x) * zoom,
                            anchor.y + (center.y - anchor.y) * zoom,
                        );
                        view.with_center(new_center)
                            .with_resolution(view.resolution() * zoom)
                    }
                    None => view.with_resolution(view.resolution() * zoom),
                };

                map.set_view(self.adjust_target_view(target));
                EventPropagation::Stop
            }
            _ => EventPropagation::Propagate,
        }
    }
}

impl MapController {
    fn get_zoom(&self, delta: f64) -> f64 {
        (self.config.zoom_speed + 1.0).powf(-delta)
    }

    /// Adjusts target view according to the controller configuration.
    fn adjust_target_view(&self, mut target: MapView) -> MapView {
        if target.resolution() < self.config.min_resolution {
            target = target.with_resolution(self.config.min_resolution);
        }

        if target.resolution() > self.config.max_resolution {
            target = target.with_resolution(self.config.max_resolution);
        }

        target
    }
}
