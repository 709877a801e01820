pub mod queue_service;
pub mod retry;

pub use queue_service::{EnqueuedAction, QueueService};
pub use retry::{HttpStatusPolicy, RetryAllPolicy, RetryPolicy};
