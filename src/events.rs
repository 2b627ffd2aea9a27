//! Event push channel
//!
//! The plugin never owns the transport its events travel over. The host hands
//! an [`EventSink`] to [`ModelDownloader::new`](crate::ModelDownloader::new)
//! and decides how events reach clients. [`EventBus`] is a ready-made sink
//! backed by a broadcast channel, used by the standalone server's SSE stream.

use crate::types::Event;
use tokio::sync::broadcast;

/// Buffered events per subscriber before it starts lagging
const EVENT_BUFFER: usize = 1000;

/// Receiver of download events, owned by the host
pub trait EventSink: Send + Sync {
    /// Push `event` to every connected subscriber
    ///
    /// Must not block; delivery failures are the sink's concern.
    fn send(&self, event: Event);
}

/// Broadcast-backed [`EventSink`] with any number of subscribers
///
/// Cloning is cheap; all clones feed the same channel.
#[derive(Clone, Debug)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a bus with the default buffer size
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER);
        Self { tx }
    }

    /// Subscribe to events
    ///
    /// Each subscriber receives all events sent after subscribing. A
    /// subscriber that falls more than 1000 events behind gets
    /// `RecvError::Lagged`.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for EventBus {
    fn send(&self, event: Event) {
        // Err only means nobody is listening right now
        self.tx.send(event).ok();
    }
}
