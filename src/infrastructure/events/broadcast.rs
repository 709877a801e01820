use crate::application::ports::QueueEventEmitter;
use serde::Serialize;
use tokio::sync::broadcast;

/// The single aggregate queue event: remaining pending count after a
/// processing pass. UI collaborators wanting per-action feedback use the
/// completion handle from `enqueue` or poll `get_queue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueProcessed {
    pub remaining: usize,
}

/// Broadcast-channel emitter: every subscriber gets every pass event.
/// Emitting with no subscribers is not an error.
pub struct BroadcastEventEmitter {
    tx: broadcast::Sender<QueueProcessed>,
}

impl BroadcastEventEmitter {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<QueueProcessed> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastEventEmitter {
    fn default() -> Self {
        Self::new(16)
    }
}

impl QueueEventEmitter for BroadcastEventEmitter {
    fn queue_processed(&self, remaining: usize) -> Result<(), String> {
        // A send error only means nobody is listening right now.
        let _ = self.tx.send(QueueProcessed { remaining });
        Ok(())
    }
}
