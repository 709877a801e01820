//! Offline-first action queue for the Mandi marketplace client.
//!
//! Write operations performed while the network is unavailable are captured
//! as durable action records, persisted, and replayed sequentially against
//! the backend once connectivity returns, with bounded retries and FIFO
//! ordering.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use application::ports::{
    ActionStore, ConnectivitySignal, ExecutionClient, ExecutionError, ExecutionRequest,
    QueueEventEmitter, TokenProvider,
};
pub use application::services::{
    EnqueuedAction, HttpStatusPolicy, QueueService, RetryAllPolicy, RetryPolicy,
};
pub use domain::entities::{ActionDraft, ActionOutcome, ActionRecord};
pub use domain::value_objects::{
    ActionId, ActionPayload, ActionStatus, ActionType, Endpoint, HttpMethod,
};
pub use infrastructure::auth::TokenCell;
pub use infrastructure::events::{BroadcastEventEmitter, QueueProcessed};
pub use infrastructure::network::{ConnectivityMonitor, HttpExecutionClient};
pub use infrastructure::storage::SqliteActionStore;
pub use shared::config::{AppConfig, NetworkConfig, StorageConfig, SyncConfig};
pub use shared::error::AppError;

/// Log setup for host binaries and examples.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mandi_sync=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
