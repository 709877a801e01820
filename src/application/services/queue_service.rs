use crate::application::ports::{
    ActionStore, ConnectivitySignal, ExecutionClient, ExecutionError, ExecutionRequest,
    QueueEventEmitter, TokenProvider,
};
use crate::application::services::retry::RetryPolicy;
use crate::domain::entities::{ActionDraft, ActionOutcome, ActionRecord};
use crate::domain::value_objects::ActionId;
use crate::shared::config::SyncConfig;
use crate::shared::error::{AppError, Result};
use crate::shared::metrics;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Handle returned from `enqueue`: the record id plus a completion future
/// resolved on that record's terminal transition. Dropping the receiver is
/// fine — enqueue stays fire-and-forget.
pub struct EnqueuedAction {
    pub id: ActionId,
    pub completion: oneshot::Receiver<ActionOutcome>,
}

/// The queue engine: owns the in-memory action collection, mediates every
/// mutation, and drains pending records sequentially once connectivity
/// allows. Constructed once at application start via `init` and shared by
/// reference; there is no module-level instance.
pub struct QueueService {
    store: Arc<dyn ActionStore>,
    client: Arc<dyn ExecutionClient>,
    tokens: Arc<dyn TokenProvider>,
    emitter: Arc<dyn QueueEventEmitter>,
    connectivity: Arc<dyn ConnectivitySignal>,
    policy: Arc<dyn RetryPolicy>,
    config: SyncConfig,
    records: Mutex<Vec<ActionRecord>>,
    /// Single-flight guard: at most one drain pass runs at a time; extra
    /// triggers are dropped as redundant.
    drain_gate: Mutex<()>,
    /// Id of the record whose execution call is currently in flight.
    in_flight: StdMutex<Option<ActionId>>,
    completions: StdMutex<HashMap<ActionId, oneshot::Sender<ActionOutcome>>>,
    tasks: StdMutex<Vec<JoinHandle<()>>>,
}

impl QueueService {
    /// Build the engine, restore the persisted collection, and start the
    /// background triggers (connectivity listener, optional periodic drain).
    #[allow(clippy::too_many_arguments)]
    pub async fn init(
        store: Arc<dyn ActionStore>,
        client: Arc<dyn ExecutionClient>,
        tokens: Arc<dyn TokenProvider>,
        emitter: Arc<dyn QueueEventEmitter>,
        connectivity: Arc<dyn ConnectivitySignal>,
        policy: Arc<dyn RetryPolicy>,
        config: SyncConfig,
    ) -> Result<Arc<Self>> {
        if config.max_retries == 0 {
            return Err(AppError::Configuration(
                "Sync max_retries must be greater than 0".to_string(),
            ));
        }

        let mut records = store.load().await;
        records.sort_by_key(ActionRecord::sort_key);
        info!(
            target: "sync::queue",
            restored = records.len(),
            "action queue initialized"
        );

        let service = Arc::new(Self {
            store,
            client,
            tokens,
            emitter,
            connectivity,
            policy,
            config,
            records: Mutex::new(records),
            drain_gate: Mutex::new(()),
            in_flight: StdMutex::new(None),
            completions: StdMutex::new(HashMap::new()),
            tasks: StdMutex::new(Vec::new()),
        });
        service.spawn_background_tasks();
        Ok(service)
    }

    /// Capture one deferred write. The record is persisted before this
    /// returns; if currently online, one non-blocking processing pass is
    /// triggered. Execution failures are never surfaced here.
    pub async fn enqueue(self: &Arc<Self>, draft: ActionDraft) -> EnqueuedAction {
        let record = ActionRecord::from_draft(draft, Utc::now());
        let id = record.id;
        let (tx, rx) = oneshot::channel();
        self.completions
            .lock()
            .expect("completions lock poisoned")
            .insert(id, tx);

        {
            let mut records = self.records.lock().await;
            records.push(record);
            self.persist_snapshot(&records).await;
        }
        debug!(target: "sync::queue", action_id = %id, "action enqueued");

        if self.connectivity.is_online() {
            self.trigger_drain();
        }

        EnqueuedAction { id, completion: rx }
    }

    /// Spawn one non-blocking processing pass.
    pub fn trigger_drain(self: &Arc<Self>) {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            service.process_queue().await;
        });
    }

    /// Caller-initiated cancellation of a record that has not started
    /// executing. Returns false for unknown ids and for the in-flight
    /// record.
    pub async fn remove_action(&self, id: ActionId) -> bool {
        let mut records = self.records.lock().await;
        if *self.in_flight.lock().expect("in_flight lock poisoned") == Some(id) {
            debug!(target: "sync::queue", action_id = %id, "remove skipped, action already executing");
            return false;
        }
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return false;
        }
        self.persist_snapshot(&records).await;
        drop(records);

        self.resolve_completion(id, ActionOutcome::Removed);
        debug!(target: "sync::queue", action_id = %id, "action removed");
        true
    }

    /// Read-only snapshot of the active collection.
    pub async fn get_queue(&self) -> Vec<ActionRecord> {
        self.records.lock().await.clone()
    }

    /// Count of records still awaiting replay (pending or retry-eligible
    /// failed). Used purely for UI badges.
    pub async fn pending_count(&self) -> usize {
        self.records
            .lock()
            .await
            .iter()
            .filter(|record| record.awaits_replay())
            .count()
    }

    /// Administrative wipe for logout/account switch: discards every record
    /// without executing it.
    pub async fn clear_queue(&self) {
        let drained: Vec<ActionRecord> = {
            let mut records = self.records.lock().await;
            let drained = std::mem::take(&mut *records);
            self.persist_snapshot(&records).await;
            drained
        };
        for record in &drained {
            self.resolve_completion(record.id, ActionOutcome::Cleared);
        }
        info!(target: "sync::queue", discarded = drained.len(), "queue cleared");
    }

    /// One processing pass: drain eligible records strictly in ascending
    /// `(created_at, id)` order, awaiting each outcome before moving on.
    /// No-op when offline, when the queue is empty, or when a pass is
    /// already running (the running pass picks up newly enqueued records).
    pub async fn process_queue(&self) {
        let Ok(_guard) = self.drain_gate.try_lock() else {
            debug!(target: "sync::queue", "drain already in progress, trigger dropped");
            return;
        };
        if !self.connectivity.is_online() {
            debug!(target: "sync::queue", "offline, skipping processing pass");
            return;
        }
        if self.records.lock().await.is_empty() {
            return;
        }

        let mut attempted: HashSet<ActionId> = HashSet::new();
        let mut completed = 0u32;
        let mut failed = 0u32;
        let mut abandoned = 0u32;

        loop {
            if !self.connectivity.is_online() {
                debug!(target: "sync::queue", "connectivity lost mid-pass, stopping drain");
                break;
            }

            let next = {
                let records = self.records.lock().await;
                let next = records
                    .iter()
                    .filter(|record| record.awaits_replay() && !attempted.contains(&record.id))
                    .min_by_key(|record| record.sort_key())
                    .cloned();
                if let Some(record) = &next {
                    *self.in_flight.lock().expect("in_flight lock poisoned") = Some(record.id);
                }
                next
            };
            let Some(record) = next else {
                break;
            };
            attempted.insert(record.id);

            // Credentials are fetched at execution time, not enqueue time.
            let auth_token = self.tokens.bearer_token().await;
            let request = ExecutionRequest {
                method: record.method,
                endpoint: record.endpoint.clone(),
                payload: record.payload.clone(),
                auth_token,
            };
            let result = self.client.execute(request).await;
            *self.in_flight.lock().expect("in_flight lock poisoned") = None;

            match result {
                Ok(_) => {
                    self.apply_success(record.id).await;
                    completed += 1;
                }
                Err(err) => {
                    if self.apply_failure(record.id, &err).await {
                        abandoned += 1;
                    } else {
                        failed += 1;
                    }
                }
            }
        }

        let remaining = self.prune_and_persist().await;
        metrics::record_pass(completed, failed, abandoned, remaining);
        info!(
            target: "sync::queue",
            completed,
            failed,
            abandoned,
            remaining,
            "processing pass finished"
        );
        if let Err(err) = self.emitter.queue_processed(remaining) {
            warn!(
                target: "sync::queue",
                error = %err,
                "failed to emit queue processed event"
            );
        }
    }

    /// Stop the background triggers. In-flight passes finish on their own;
    /// the persisted collection survives for the next `init`.
    pub fn shutdown(&self) {
        let mut tasks = self.tasks.lock().expect("tasks lock poisoned");
        for handle in tasks.drain(..) {
            handle.abort();
        }
        debug!(target: "sync::queue", "queue service shut down");
    }

    async fn apply_success(&self, id: ActionId) {
        {
            let mut records = self.records.lock().await;
            // The record may have been wiped by clear_queue mid-flight.
            if let Some(record) = records.iter_mut().find(|record| record.id == id) {
                record.mark_completed(Utc::now());
                debug!(target: "sync::queue", action_id = %id, "action completed");
            }
            self.persist_snapshot(&records).await;
        }
        self.resolve_completion(id, ActionOutcome::Completed);
    }

    /// Returns true when the failure abandoned the record.
    async fn apply_failure(&self, id: ActionId, error: &ExecutionError) -> bool {
        let (was_abandoned, last_error) = {
            let mut records = self.records.lock().await;
            let Some(record) = records.iter_mut().find(|record| record.id == id) else {
                return false;
            };
            record.mark_failed(error.to_string());
            let exhausted = record.retry_count >= self.config.max_retries;
            let retryable = self.policy.is_retryable(error);
            if exhausted || !retryable {
                record.mark_abandoned();
                warn!(
                    target: "sync::queue",
                    action_id = %id,
                    retry_count = record.retry_count,
                    retryable,
                    error = %error,
                    "action abandoned"
                );
            } else {
                debug!(
                    target: "sync::queue",
                    action_id = %id,
                    retry_count = record.retry_count,
                    error = %error,
                    "action failed, will retry"
                );
            }
            let result = (record.is_terminal(), record.last_error.clone());
            self.persist_snapshot(&records).await;
            result
        };

        if was_abandoned {
            self.resolve_completion(id, ActionOutcome::Abandoned(last_error));
        }
        was_abandoned
    }

    /// Drop terminal records from the active collection, persist the pruned
    /// collection, and report how many records still await replay.
    async fn prune_and_persist(&self) -> usize {
        let mut records = self.records.lock().await;
        records.retain(|record| !record.is_terminal());
        self.persist_snapshot(&records).await;
        records.iter().filter(|record| record.awaits_replay()).count()
    }

    async fn persist_snapshot(&self, records: &[ActionRecord]) {
        if let Err(err) = self.store.save(records).await {
            // In-memory state stays authoritative for the session.
            warn!(
                target: "sync::queue",
                error = %err,
                "failed to persist action queue"
            );
        }
    }

    fn resolve_completion(&self, id: ActionId, outcome: ActionOutcome) {
        let sender = self
            .completions
            .lock()
            .expect("completions lock poisoned")
            .remove(&id);
        if let Some(sender) = sender {
            // The caller may have dropped the receiver; that is fine.
            let _ = sender.send(outcome);
        }
    }

    fn spawn_background_tasks(self: &Arc<Self>) {
        let mut handles = vec![self.spawn_connectivity_listener()];
        if self.config.auto_sync {
            handles.push(self.spawn_periodic_drain());
        }
        *self.tasks.lock().expect("tasks lock poisoned") = handles;
    }

    /// Going online is the primary drain trigger; going offline only
    /// updates state.
    fn spawn_connectivity_listener(self: &Arc<Self>) -> JoinHandle<()> {
        let weak = Arc::downgrade(self);
        let mut rx = self.connectivity.subscribe();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let online = *rx.borrow();
                let Some(service) = weak.upgrade() else {
                    break;
                };
                if online {
                    debug!(target: "sync::queue", "connectivity restored, draining queue");
                    service.process_queue().await;
                }
            }
        })
    }

    fn spawn_periodic_drain(self: &Arc<Self>) -> JoinHandle<()> {
        let weak = Arc::downgrade(self);
        let period = Duration::from_secs(self.config.sync_interval.max(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick fires immediately; skip it so the interval
            // counts from startup.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(service) = weak.upgrade() else {
                    break;
                };
                service.process_queue().await;
            }
        })
    }
}
