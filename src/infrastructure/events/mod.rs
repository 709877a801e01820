mod broadcast;

pub use broadcast::{BroadcastEventEmitter, QueueProcessed};
