use crate::application::ports::TokenProvider;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Holds the bearer token the host's auth layer last issued. The queue
/// reads it at execution time, so a login/refresh between enqueue and
/// replay is picked up automatically.
#[derive(Clone, Default)]
pub struct TokenCell {
    token: Arc<RwLock<Option<String>>>,
}

impl TokenCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }

    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    /// Used on logout, alongside `clear_queue`.
    pub async fn clear(&self) {
        *self.token.write().await = None;
    }
}

#[async_trait]
impl TokenProvider for TokenCell {
    async fn bearer_token(&self) -> Option<String> {
        self.token.read().await.clone()
    }
}
