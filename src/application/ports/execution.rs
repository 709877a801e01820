use crate::domain::value_objects::{ActionPayload, Endpoint, HttpMethod};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// One network call to replay, as handed to the execution adapter. The auth
/// token is fetched fresh at execution time, never at enqueue time.
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub method: HttpMethod,
    pub endpoint: Endpoint,
    pub payload: ActionPayload,
    pub auth_token: Option<String>,
}

/// Structured failure from the execution adapter. `status` is present only
/// when the backend answered; transport-level failures carry none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionError {
    pub status: Option<u16>,
    pub message: String,
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "execution failed ({status}): {}", self.message),
            None => write!(f, "execution failed: {}", self.message),
        }
    }
}

impl std::error::Error for ExecutionError {}

impl ExecutionError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

/// Thin adapter that issues the actual network call described by an action
/// record against the external backend.
#[async_trait]
pub trait ExecutionClient: Send + Sync {
    async fn execute(&self, request: ExecutionRequest) -> Result<Value, ExecutionError>;
}
