mod common;

use common::mocks::{MemoryActionStore, RecordingExecutionClient};
use common::{draft_for_index, setup_queue, setup_queue_with, test_config, wait_for_pass};
use mandi_sync::{
    BroadcastEventEmitter, ConnectivityMonitor, QueueService, RetryAllPolicy, SqliteActionStore,
    TokenCell,
};
use std::sync::Arc;

#[tokio::test]
async fn queue_survives_a_service_restart() {
    let store = Arc::new(MemoryActionStore::new());
    let queue = setup_queue_with(false, store.clone(), Arc::new(RetryAllPolicy)).await;

    for index in 0..3 {
        queue.service.enqueue(draft_for_index(index)).await;
    }
    let before = queue.service.get_queue().await;
    assert_eq!(before.len(), 3);
    queue.service.shutdown();

    // A fresh service over the same store sees the identical records.
    let restarted = setup_queue_with(false, store, Arc::new(RetryAllPolicy)).await;
    let after = restarted.service.get_queue().await;

    assert_eq!(after, before);
}

#[tokio::test]
async fn restored_records_replay_in_original_order() {
    let store = Arc::new(MemoryActionStore::new());
    let queue = setup_queue_with(false, store.clone(), Arc::new(RetryAllPolicy)).await;
    for index in 0..3 {
        queue.service.enqueue(draft_for_index(index)).await;
    }
    queue.service.shutdown();

    let restarted = setup_queue_with(false, store, Arc::new(RetryAllPolicy)).await;
    let mut events = restarted.emitter.subscribe();
    restarted.monitor.set_online(true);
    let event = wait_for_pass(&mut events).await;

    assert_eq!(event.remaining, 0);
    assert_eq!(
        restarted.client.called_endpoints().await,
        vec!["/listings/0", "/listings/1", "/listings/2"]
    );
}

#[tokio::test]
async fn save_failures_leave_the_in_memory_queue_authoritative() {
    let queue = setup_queue(false).await;
    queue.store.set_fail_saves(true).await;

    queue.service.enqueue(draft_for_index(1)).await;

    // The session still sees the record even though nothing was persisted.
    assert_eq!(queue.service.pending_count().await, 1);
    assert!(queue.store.persisted().await.is_empty());

    // Once storage recovers, the next mutation persists the full
    // collection again.
    queue.store.set_fail_saves(false).await;
    queue.service.enqueue(draft_for_index(2)).await;
    assert_eq!(queue.store.persisted().await.len(), 2);
}

#[tokio::test]
async fn sqlite_backed_queue_survives_process_restart() {
    let dir = tempfile::tempdir().expect("temp dir");
    let database_url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("mandi.db").display()
    );

    let before = {
        let store = Arc::new(
            SqliteActionStore::connect(&database_url, 1, "offline_action_queue".into())
                .await
                .expect("sqlite store"),
        );
        let service = QueueService::init(
            store,
            Arc::new(RecordingExecutionClient::new()),
            Arc::new(TokenCell::new()),
            Arc::new(BroadcastEventEmitter::default()),
            Arc::new(ConnectivityMonitor::new(false)),
            Arc::new(RetryAllPolicy),
            test_config(),
        )
        .await
        .expect("queue service init");

        service.enqueue(draft_for_index(1)).await;
        service.enqueue(draft_for_index(2)).await;
        let snapshot = service.get_queue().await;
        service.shutdown();
        snapshot
    };

    // Reopen the same database file as a new process would.
    let store = Arc::new(
        SqliteActionStore::connect(&database_url, 1, "offline_action_queue".into())
            .await
            .expect("sqlite store"),
    );
    let service = QueueService::init(
        store,
        Arc::new(RecordingExecutionClient::new()),
        Arc::new(TokenCell::new()),
        Arc::new(BroadcastEventEmitter::default()),
        Arc::new(ConnectivityMonitor::new(false)),
        Arc::new(RetryAllPolicy),
        test_config(),
    )
    .await
    .expect("queue service init");

    assert_eq!(service.get_queue().await, before);
}
