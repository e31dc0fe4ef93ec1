//! User interaction handling for the editor.
//!
//! Interaction is handled in several steps:
//! 1. The embedding application converts its windowing events into the common
//!    [`RawUserEvent`] enum.
//! 2. `RawUserEvent` is given to the [`EventProcessor`], which keeps track of input state
//!    (pointer position, pressed buttons) and converts it into higher level [`UserEvent`]s
//!    such as clicks, double clicks and drags.
//! 3. The `EventProcessor` runs its list of [`UserEventHandler`]s, which change the state
//!    of the map based on the events.
//!
//! The editor registers two handlers: [`MapController`] for navigation and
//! [`EditController`] for the editing tools.

use mapedit_types::Point2d;
use nalgebra::Vector2;

use crate::map::Map;

mod draw;
mod editor;
mod event_processor;
mod map;

pub use draw::DrawSession;
pub use editor::{EditController, Selection};
pub use event_processor::EventProcessor;
pub use map::MapController;

/// User input handler.
pub trait UserEventHandler {
    /// Handle the event.
    fn handle(&mut self, event: &UserEvent, map: &mut Map) -> EventPropagation;
}

/// Raw user interaction event, as reported by the windowing system.
///
/// It carries no input state; the [`EventProcessor`] combines it with the state it tracks
/// to produce [`UserEvent`]s.
pub enum RawUserEvent {
    /// A mouse button was pressed.
    ButtonPressed(MouseButton),
    /// A mouse button was released.
    ButtonReleased(MouseButton),
    /// Mouse pointer was moved to the given screen pixel position.
    PointerMoved(Point2d),
    /// Scroll was requested for the given number of text lines.
    Scroll(f64),
}

/// User interaction event. This is the main type that handlers receive.
#[derive(Debug, Clone)]
pub enum UserEvent {
    /// A mouse button was pressed.
    ButtonPressed(MouseButton, MouseEvent),
    /// A mouse button was released.
    ButtonReleased(MouseButton, MouseEvent),
    /// A mouse button was clicked. Fired right after [`UserEvent::ButtonReleased`] if the
    /// release came shortly after the press.
    Click(MouseButton, MouseEvent),
    /// A double click. Fired right after the second [`UserEvent::Click`] if it came shortly
    /// after the first one.
    DoubleClick(MouseButton, MouseEvent),
    /// Mouse pointer moved.
    PointerMoved(MouseEvent),
    /// Drag started (a button is held down and the pointer moved beyond the drag
    /// threshold). The event's position is where the button was pressed.
    DragStarted(MouseButton, MouseEvent),
    /// Pointer moved while dragging. The vector is the pointer movement in screen pixels
    /// since the last drag event.
    Drag(MouseButton, Vector2<f64>, MouseEvent),
    /// Mouse button was released while dragging.
    DragEnded(MouseButton, MouseEvent),
    /// Scroll was requested for the given number of text lines.
    Scroll(f64, MouseEvent),
}

/// Value returned by a [`UserEventHandler`] to indicate the status of the event.
pub enum EventPropagation {
    /// Event should be propagated to the next handler.
    Propagate,
    /// Event should not be propagated to the next handler.
    Stop,
    /// Event should not be propagated to the next handler, and the current handler becomes
    /// the owner of the event. A handler consuming [`UserEvent::DragStarted`] receives all
    /// the following drag events of that gesture exclusively.
    Consume,
}

/// Mouse button enum.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Middle mouse button.
    Middle,
    /// Right mouse button.
    Right,
    /// Any other mouse button.
    Other,
}

/// State of the mouse at the moment of the event.
#[derive(Debug, Clone)]
pub struct MouseEvent {
    /// Pointer position on the screen in pixels from the top-left corner.
    pub screen_pointer_position: Point2d,
    /// State of the mouse buttons.
    pub buttons: MouseButtonsState,
}

/// State of a mouse button.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MouseButtonState {
    /// Button is pressed.
    Pressed,
    /// Button is not pressed.
    Released,
}

/// State of all mouse buttons.
#[derive(Debug, Copy, Clone)]
pub struct MouseButtonsState {
    /// State of the left mouse button.
    pub left: MouseButtonState,
    /// State of the middle mouse button.
    pub middle: MouseButtonState,
    /// State of the right mouse button.
    pub right: MouseButtonState,
}

impl MouseButtonsState {
    pub(crate) fn set_pressed(&mut self, button: MouseButton) {
        self.set_state(button, MouseButtonState::Pressed);
    }

    pub(crate) fn set_released(&mut self, button: MouseButton) {
        self.set_state(button, MouseButtonState::Released);
    }

    fn set_state(&mut self, button: MouseButton, state: MouseButtonState) {
        match button {
            MouseButton::Left => self.left = state,
            MouseButton::Middle => self.middle = state,
            MouseButton::Right => self.right = state,
            MouseButton::Other => {}
        }
    }

    fn single_pressed(&self) -> Option<MouseButton> {
        let mut button = None;
        if self.left == MouseButtonState::Pressed && button.replace(MouseButton::Left).is_some() {
            return None;
        }
        if self.middle == MouseButtonState::Pressed && button.replace(MouseButton::Middle).is_some()
        {
            return None;
        }
        if self.right == MouseButtonState::Pressed && button.replace(MouseButton::Right).is_some() {
            return None;
        }

        button
    }
}

impl Default for MouseButtonsState {
    fn default() -> Self {
        Self {
            left: MouseButtonState::Released,
            middle: MouseButtonState::Released,
            right: MouseButtonState::Released,
        }
    }
}

/// Editing tool currently active on the map.
///
/// Exactly one tool is active at a time. Activating a tool deactivates the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    /// No tool. Map interaction is navigation only.
    #[default]
    None,
    /// Clicking a feature selects it.
    Select,
    /// Clicks add geometry to the active layer.
    Draw,
    /// Geometry of the selected feature can be modified.
    Edit,
    /// Clicking a feature deletes it after confirmation.
    Delete,
}
