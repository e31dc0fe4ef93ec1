use mapedit_types::{CartesianPoint, Point2d};
use web_time::SystemTime;

use crate::control::{
    EventPropagation, MouseButtonsState, MouseEvent, RawUserEvent, UserEvent, UserEventHandler,
};
use crate::map::Map;

const DRAG_THRESHOLD: f64 = 3.0;
const CLICK_TIMEOUT: std::time::Duration = std::time::Duration::from_millis(200);
const DBL_CLICK_TIMEOUT: std::time::Duration = std::time::Duration::from_millis(500);

/// Converts [`RawUserEvent`]s into [`UserEvent`]s and runs them through the registered
/// handlers.
///
/// The processor tracks pointer position and button state between events, and synthesizes
/// clicks, double clicks and drags from the raw press/release/move stream.
pub struct EventProcessor {
    handlers: Vec<Box<dyn UserEventHandler>>,
    pointer_position: Point2d,
    pointer_pressed_position: Point2d,

    buttons_state: MouseButtonsState,

    last_pressed_time: SystemTime,
    last_click_time: SystemTime,

    drag_target: Option<usize>,
}

impl Default for EventProcessor {
    fn default() -> Self {
        Self {
            handlers: vec![],
            pointer_position: Point2d::new(0.0, 0.0),
            pointer_pressed_position: Point2d::new(0.0, 0.0),
            buttons_state: Default::default(),
            last_pressed_time: SystemTime::UNIX_EPOCH,
            last_click_time: SystemTime::UNIX_EPOCH,
            drag_target: None,
        }
    }
}

impl EventProcessor {
    /// Creates a new processor without any handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handler to the end of the handler list.
    pub fn add_handler(&mut self, handler: impl UserEventHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Handles a raw event: converts it into user events and gives each of those to the
    /// handlers in registration order until one stops the propagation.
    pub fn handle(&mut self, event: RawUserEvent, map: &mut Map) {
        let Some(user_events) = self.process(event) else {
            return;
        };

        for user_event in user_events {
            let mut drag_start_target = None;

            for (index, handler) in self.handlers.iter_mut().enumerate() {
                if matches!(user_event, UserEvent::Drag(..) | UserEvent::DragEnded(..)) {
                    match self.drag_target {
                        Some(target) if target == index => {}
                        _ => continue,
                    }
                }

                match handler.handle(&user_event, map) {
                    EventPropagation::Propagate => {}
                    EventPropagation::Stop => break,
                    EventPropagation::Consume => {
                        if matches!(user_event, UserEvent::DragStarted(..)) {
                            drag_start_target = Some(index);
                        }

                        break;
                    }
                }
            }

            if drag_start_target.is_some() {
                self.drag_target = drag_start_target;
            }
        }
    }

    fn process(&mut self, event: RawUserEvent) -> Option<Vec<UserEvent>> {
        let now = SystemTime::now();
        match event {
            RawUserEvent::ButtonPressed(button) => {
                self.buttons_state.set_pressed(button);
                self.last_pressed_time = now;
                self.pointer_pressed_position = self.pointer_position;

                Some(vec![UserEvent::ButtonPressed(button, self.mouse_event())])
            }
            RawUserEvent::ButtonReleased(button) => {
                self.buttons_state.set_released(button);
                let mut events = vec![UserEvent::ButtonReleased(button, self.mouse_event())];

                if now
                    .duration_since(self.last_pressed_time)
                    .unwrap_or_default()
                    < CLICK_TIMEOUT
                {
                    events.push(UserEvent::Click(button, self.mouse_event()));

                    if now.duration_since(self.last_click_time).unwrap_or_default()
                        < DBL_CLICK_TIMEOUT
                    {
                        events.push(UserEvent::DoubleClick(button, self.mouse_event()));
                    }

                    self.last_click_time = now;
                }

                if self.drag_target.take().is_some() {
                    events.push(UserEvent::DragEnded(button, self.mouse_event()));
                }

                Some(events)
            }
            RawUserEvent::PointerMoved(position) => {
                let prev_position = self.pointer_position;
                self.pointer_position = position;

                let mut events = vec![UserEvent::PointerMoved(self.mouse_event())];
                if let Some(button) = self.buttons_state.single_pressed() {
                    if self.drag_target.is_none()
                        && position.taxicab_distance(&self.pointer_pressed_position)
                            > DRAG_THRESHOLD
                    {
                        events.push(UserEvent::DragStarted(
                            button,
                            self.mouse_event_at(self.pointer_pressed_position),
                        ));
                    }

                    if self.drag_target.is_some() {
                        events.push(UserEvent::Drag(
                            button,
                            position - prev_position,
                            self.mouse_event(),
                        ));
                    }
                }

                Some(events)
            }
            RawUserEvent::Scroll(delta) => {
                Some(vec![UserEvent::Scroll(delta, self.mouse_event())])
            }
        }
    }

    fn mouse_event(&self) -> MouseEvent {
        self.mouse_event_at(self.pointer_position)
    }

    fn mouse_event_at(&self, screen_pointer_position: Point2d) -> MouseEvent {
        MouseEvent {
            screen_pointer_position,
            buttons: self.buttons_state,
        }
    }
}
