/// Notifies the application when a map or a layer wants to be redrawn on the screen.
pub trait Messenger: Send + Sync {
    /// Request a redraw of the map.
    fn request_redraw(&self);
}

/// Messenger that ignores all requests. Useful for tests and headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyMessenger {}

impl Messenger for DummyMessenger {
    fn request_redraw(&self) {
        // do nothing
    }
}
