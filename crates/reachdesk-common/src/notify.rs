//! Operator-facing notifications (toasts).

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::error::ReachdeskError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Error, message: message.into() }
    }

    /// Map an error to the toast the operator sees.
    ///
    /// Cancellation is silent. Unexpected failures are logged here because
    /// the toast only carries the generic message.
    pub fn for_error(err: &ReachdeskError) -> Option<Self> {
        match err {
            ReachdeskError::Cancelled => None,
            ReachdeskError::Api(_) | ReachdeskError::Validation(_) => {
                Some(Notification::error(err.user_message()))
            }
            other => {
                tracing::error!(error = %other, "Unexpected failure");
                Some(Notification::error(other.user_message()))
            }
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn notify_error(&self, err: &ReachdeskError) {
        if let Some(n) = Notification::for_error(err) {
            self.notify(n);
        }
    }
}

/// Forwards notifications to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.level {
            NotificationLevel::Error => tracing::error!(message = %n.message, "notification"),
            NotificationLevel::Warning => tracing::warn!(message = %n.message, "notification"),
            _ => tracing::info!(level = ?n.level, message = %n.message, "notification"),
        }
    }
}

/// Keeps every notification in memory, newest last.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, n: Notification) {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).push(n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::GENERIC_FAILURE;

    #[test]
    fn test_error_taxonomy() {
        let rec = RecordingNotifier::new();
        rec.notify_error(&ReachdeskError::Api("Budget exceeds brand limit".into()));
        rec.notify_error(&ReachdeskError::Validation("Title is required".into()));
        rec.notify_error(&ReachdeskError::Config("bad".into()));
        rec.notify_error(&ReachdeskError::Cancelled);

        let seen = rec.notifications();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].message, "Budget exceeds brand limit");
        assert_eq!(seen[1].message, "Title is required");
        assert_eq!(seen[2].message, GENERIC_FAILURE);
        assert!(seen.iter().all(|n| n.level == NotificationLevel::Error));
    }
}
