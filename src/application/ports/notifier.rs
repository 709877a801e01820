/// Sink for the single aggregate queue event. Fired once per completed
/// processing pass with the remaining pending count; there is no per-action
/// channel here (per-action feedback is the completion handle).
pub trait QueueEventEmitter: Send + Sync {
    fn queue_processed(&self, remaining: usize) -> Result<(), String>;
}
