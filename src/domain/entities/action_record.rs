use crate::domain::value_objects::{
    ActionId, ActionPayload, ActionStatus, ActionType, Endpoint, HttpMethod,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input to `enqueue`: the fully-formed description of one deferred write.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDraft {
    pub action_type: ActionType,
    pub endpoint: Endpoint,
    pub method: HttpMethod,
    pub payload: ActionPayload,
    pub description: String,
}

impl ActionDraft {
    pub fn new(
        action_type: ActionType,
        endpoint: Endpoint,
        method: HttpMethod,
        payload: ActionPayload,
        description: String,
    ) -> Self {
        Self {
            action_type,
            endpoint,
            method,
            payload,
            description,
        }
    }
}

/// The durable unit of work: one deferred write captured while offline,
/// persisted until it is replayed or abandoned.
///
/// Serialized field names match the persisted collection layout
/// (camelCase, no schema versioning).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    pub id: ActionId,
    pub action_type: ActionType,
    pub endpoint: Endpoint,
    pub method: HttpMethod,
    pub payload: ActionPayload,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub status: ActionStatus,
    pub retry_count: u32,
    pub last_error: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ActionRecord {
    pub fn from_draft(draft: ActionDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: ActionId::generate(),
            action_type: draft.action_type,
            endpoint: draft.endpoint,
            method: draft.method,
            payload: draft.payload,
            description: draft.description,
            created_at,
            status: ActionStatus::Pending,
            retry_count: 0,
            last_error: None,
            completed_at: None,
        }
    }

    /// FIFO position: ascending `created_at`, id as the tiebreaker.
    pub fn sort_key(&self) -> (DateTime<Utc>, ActionId) {
        (self.created_at, self.id)
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn awaits_replay(&self) -> bool {
        self.status.awaits_replay()
    }

    pub fn mark_completed(&mut self, completed_at: DateTime<Utc>) {
        self.status = ActionStatus::Completed;
        self.completed_at = Some(completed_at);
    }

    /// One failed execution attempt: records the error and bumps the retry
    /// counter. The caller decides whether the record is then abandoned.
    pub fn mark_failed(&mut self, error: String) {
        self.status = ActionStatus::Failed;
        self.last_error = Some(error);
        self.retry_count += 1;
    }

    pub fn mark_abandoned(&mut self) {
        self.status = ActionStatus::Abandoned;
    }
}

/// Terminal result of one queued action, delivered through the completion
/// handle returned by `enqueue`.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Replayed against the backend successfully.
    Completed,
    /// Dropped after exhausting the retry budget (or a non-retryable
    /// failure); carries the last execution error.
    Abandoned(Option<String>),
    /// Cancelled by the caller before execution started.
    Removed,
    /// Discarded by an administrative queue wipe.
    Cleared,
}
