//! Ambient UI feedback seam.
//!
//! The editor itself does not draw toasts, confirmation dialogs or spinners. Instead all
//! user feedback goes through the [`Notifications`] trait, and the embedding application
//! decides how to present it.

use std::fmt::Display;

/// Severity of a toast message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Neutral information.
    Info,
    /// An operation completed successfully.
    Success,
    /// Invalid input or an ignored operation.
    Warning,
    /// An operation failed.
    Error,
}

impl Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationLevel::Info => write!(f, "info"),
            NotificationLevel::Success => write!(f, "success"),
            NotificationLevel::Warning => write!(f, "warning"),
            NotificationLevel::Error => write!(f, "error"),
        }
    }
}

/// User feedback sink for the editor.
pub trait Notifications: Send + Sync {
    /// Shows a transient message to the user.
    fn toast(&self, level: NotificationLevel, message: &str);

    /// Asks the user to confirm a destructive operation. Returning `false` leaves the state
    /// unchanged.
    fn confirm(&self, message: &str) -> bool;

    /// Shows or hides the blocking loading indicator. Called around network requests.
    fn set_busy(&self, busy: bool);
}

/// Notification sink that shows nothing and confirms everything. Useful for tests and
/// headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyNotifications {}

impl Notifications for DummyNotifications {
    fn toast(&self, level: NotificationLevel, message: &str) {
        log::debug!("[{level}] {message}");
    }

    fn confirm(&self, _message: &str) -> bool {
        true
    }

    fn set_busy(&self, _busy: bool) {}
}
