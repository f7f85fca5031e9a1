//! In-process event bus for UI components.

use tokio::sync::broadcast;
use tracing::trace;

use super::UiEvent;

/// Broadcast channel shared by the components of one session.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<UiEvent>,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` undelivered events per
    /// subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event. Having no subscribers is not an error.
    pub fn publish(&self, event: UiEvent) {
        trace!(?event, "Publishing UI event");
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
