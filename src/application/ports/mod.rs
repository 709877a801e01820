pub mod action_store;
pub mod auth;
pub mod connectivity;
pub mod execution;
pub mod notifier;

pub use action_store::ActionStore;
pub use auth::TokenProvider;
pub use connectivity::ConnectivitySignal;
pub use execution::{ExecutionClient, ExecutionError, ExecutionRequest};
pub use notifier::QueueEventEmitter;
