//! Defines an abstraction over the event sending mechanism.

use super::events::UserEvent;
use tokio::sync::mpsc::UnboundedSender;

/// A trait that abstracts the sending of user events.
/// This is "fire-and-forget" and doesn't return a result, simplifying its use.
pub trait EventProxy: Send + Sync + Clone + 'static {
    fn send_event(&self, event: UserEvent);
}

/// The channel half a front end listens on.
impl EventProxy for UnboundedSender<UserEvent> {
    fn send_event(&self, event: UserEvent) {
        // The receiver side being gone just means no front end is
        // attached anymore. We log the error if it occurs.
        if let Err(e) = self.send(event) {
            tracing::warn!("Failed to send event to front end: {}", e);
        }
    }
}
