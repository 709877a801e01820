use async_trait::async_trait;

/// Supplies the current bearer token at execution time. A token obtained
/// while queuing may have expired by replay time, so the queue never caches
/// credentials on records.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn bearer_token(&self) -> Option<String>;
}
