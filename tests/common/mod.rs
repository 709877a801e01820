#![allow(dead_code)]

pub mod mocks;

use mandi_sync::{
    ActionDraft, ActionPayload, ActionType, BroadcastEventEmitter, ConnectivityMonitor, Endpoint,
    HttpMethod, QueueProcessed, QueueService, RetryAllPolicy, RetryPolicy, SyncConfig, TokenCell,
};
use mocks::{MemoryActionStore, RecordingExecutionClient};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

pub struct TestQueue {
    pub service: Arc<QueueService>,
    pub client: Arc<RecordingExecutionClient>,
    pub store: Arc<MemoryActionStore>,
    pub monitor: ConnectivityMonitor,
    pub emitter: Arc<BroadcastEventEmitter>,
    pub tokens: TokenCell,
}

pub fn test_config() -> SyncConfig {
    SyncConfig {
        auto_sync: false,
        sync_interval: 300,
        max_retries: 3,
    }
}

pub async fn setup_queue(online: bool) -> TestQueue {
    setup_queue_with(online, Arc::new(MemoryActionStore::new()), Arc::new(RetryAllPolicy)).await
}

pub async fn setup_queue_with(
    online: bool,
    store: Arc<MemoryActionStore>,
    policy: Arc<dyn RetryPolicy>,
) -> TestQueue {
    let client = Arc::new(RecordingExecutionClient::new());
    let monitor = ConnectivityMonitor::new(online);
    let emitter = Arc::new(BroadcastEventEmitter::default());
    let tokens = TokenCell::new();

    let service = QueueService::init(
        store.clone(),
        client.clone(),
        Arc::new(tokens.clone()),
        emitter.clone(),
        Arc::new(monitor.clone()),
        policy,
        test_config(),
    )
    .await
    .expect("queue service init");

    TestQueue {
        service,
        client,
        store,
        monitor,
        emitter,
        tokens,
    }
}

pub fn message_draft(text: &str) -> ActionDraft {
    ActionDraft::new(
        ActionType::new("send-message".into()).expect("action type"),
        Endpoint::new("/messages".into()).expect("endpoint"),
        HttpMethod::Post,
        ActionPayload::new(json!({"text": text})).expect("payload"),
        format!("Send message: {text}"),
    )
}

pub fn draft_for_index(index: usize) -> ActionDraft {
    ActionDraft::new(
        ActionType::new("create-listing".into()).expect("action type"),
        Endpoint::new(format!("/listings/{index}")).expect("endpoint"),
        HttpMethod::Post,
        ActionPayload::new(json!({"title": format!("Listing {index}")})).expect("payload"),
        format!("Create listing {index}"),
    )
}

/// Await the next pass event, bounded so a broken drain fails the test
/// instead of hanging it.
pub async fn wait_for_pass(rx: &mut broadcast::Receiver<QueueProcessed>) -> QueueProcessed {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for a processing pass")
        .expect("event channel closed")
}
