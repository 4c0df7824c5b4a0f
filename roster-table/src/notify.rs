//! Notification surface
//!
//! Fire-and-forget toasts emitted by the mutation engine. The table never
//! observes what happens to a notification after `notify` returns.

use serde::Serialize;
use tokio::sync::broadcast;

/// Broadcast channel capacity, enough to buffer a burst of toasts
const BROADCAST_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Sink for user-visible notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str);
}

/// Writes notifications to the log under the `notify` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Success => tracing::info!(target: "notify", "{message}"),
            NotificationKind::Failure => tracing::error!(target: "notify", "{message}"),
        }
    }
}

/// Fans notifications out to any number of presentation subscribers
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<Notification>,
}

impl BroadcastNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        // no subscribers is fine
        let _ = self.tx.send(Notification {
            kind,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_reaches_every_subscriber() {
        let notifier = BroadcastNotifier::new();
        let mut a = notifier.subscribe();
        let mut b = notifier.subscribe();

        notifier.notify(NotificationKind::Success, "Updated successfully");

        let expected = Notification {
            kind: NotificationKind::Success,
            message: "Updated successfully".into(),
        };
        assert_eq!(a.try_recv().unwrap(), expected);
        assert_eq!(b.try_recv().unwrap(), expected);
    }

    #[test]
    fn test_broadcast_without_subscribers_does_not_fail() {
        BroadcastNotifier::new().notify(NotificationKind::Failure, "Error updating status");
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&NotificationKind::Failure).unwrap();
        assert_eq!(json, "\"failure\"");
    }
}
