#![allow(dead_code)]

use async_trait::async_trait;
use mandi_sync::{
    ActionRecord, ActionStore, AppError, ExecutionClient, ExecutionError, ExecutionRequest,
};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Execution client that records every request in arrival order and
/// replays scripted outcomes. With an empty script every call succeeds.
#[derive(Clone, Default)]
pub struct RecordingExecutionClient {
    calls: Arc<RwLock<Vec<ExecutionRequest>>>,
    script: Arc<RwLock<VecDeque<Result<Value, ExecutionError>>>>,
    always_fail: Arc<RwLock<Option<ExecutionError>>>,
    delay: Arc<RwLock<Option<Duration>>>,
}

impl RecordingExecutionClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `count` scripted failures ahead of the default success.
    pub async fn push_failures(&self, count: usize, error: ExecutionError) {
        let mut script = self.script.write().await;
        for _ in 0..count {
            script.push_back(Err(error.clone()));
        }
    }

    pub async fn push_success(&self, value: Value) {
        self.script.write().await.push_back(Ok(value));
    }

    /// Every call fails with `error` until cleared, regardless of script.
    pub async fn set_always_fail(&self, error: Option<ExecutionError>) {
        *self.always_fail.write().await = error;
    }

    /// Hold each call for `delay` before answering.
    pub async fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.write().await = delay;
    }

    pub async fn calls(&self) -> Vec<ExecutionRequest> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    pub async fn called_endpoints(&self) -> Vec<String> {
        self.calls
            .read()
            .await
            .iter()
            .map(|request| request.endpoint.as_str().to_string())
            .collect()
    }
}

#[async_trait]
impl ExecutionClient for RecordingExecutionClient {
    async fn execute(&self, request: ExecutionRequest) -> Result<Value, ExecutionError> {
        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.calls.write().await.push(request);

        if let Some(error) = self.always_fail.read().await.clone() {
            return Err(error);
        }
        if let Some(result) = self.script.write().await.pop_front() {
            return result;
        }
        Ok(json!({"ok": true}))
    }
}

/// In-memory store with a snapshot history, so tests can assert what was
/// persisted at each mutation. Saves can be made to fail to exercise the
/// in-memory-authoritative contract.
#[derive(Clone, Default)]
pub struct MemoryActionStore {
    records: Arc<RwLock<Vec<ActionRecord>>>,
    history: Arc<RwLock<Vec<Vec<ActionRecord>>>>,
    fail_saves: Arc<RwLock<bool>>,
}

impl MemoryActionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_saves(&self, fail: bool) {
        *self.fail_saves.write().await = fail;
    }

    pub async fn history(&self) -> Vec<Vec<ActionRecord>> {
        self.history.read().await.clone()
    }

    pub async fn persisted(&self) -> Vec<ActionRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl ActionStore for MemoryActionStore {
    async fn load(&self) -> Vec<ActionRecord> {
        self.records.read().await.clone()
    }

    async fn save(&self, records: &[ActionRecord]) -> Result<(), AppError> {
        if *self.fail_saves.read().await {
            return Err(AppError::Storage("simulated storage failure".to_string()));
        }
        *self.records.write().await = records.to_vec();
        self.history.write().await.push(records.to_vec());
        Ok(())
    }
}
