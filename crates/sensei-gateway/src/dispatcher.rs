use std::sync::Arc;

use tokio::sync::broadcast;

use sensei_types::events::ChangeEvent;

/// Buffered events per receiver before a slow client starts lagging.
const CHANNEL_CAPACITY: usize = 1024;

/// Fans change events out to every connected feed client.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<DispatcherInner>,
}

struct DispatcherInner {
    broadcast_tx: broadcast::Sender<ChangeEvent>,
}

impl Dispatcher {
    pub fn new() -> Self {
        let (broadcast_tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(DispatcherInner { broadcast_tx }),
        }
    }

    /// Subscribe to change events. Returns a broadcast receiver.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.inner.broadcast_tx.subscribe()
    }

    /// Publish an event. Having nobody listening is fine.
    pub fn broadcast(&self, event: ChangeEvent) {
        let _ = self.inner.broadcast_tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.broadcast_tx.receiver_count()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn subscribers_receive_broadcasts() {
        let dispatcher = Dispatcher::new();
        let mut rx = dispatcher.subscribe();
        assert_eq!(dispatcher.subscriber_count(), 1);

        let id = Uuid::new_v4();
        dispatcher.broadcast(ChangeEvent::MessageCreate { id });
        assert_eq!(rx.recv().await.unwrap(), ChangeEvent::MessageCreate { id });
    }

    #[test]
    fn broadcast_without_subscribers_is_silent() {
        let dispatcher = Dispatcher::new();
        dispatcher.broadcast(ChangeEvent::UserCreate { id: Uuid::new_v4() });
        assert_eq!(dispatcher.subscriber_count(), 0);
    }
}
