use serde::{Deserialize, Serialize};

/// Lifecycle state of a queued action.
///
/// `Pending → Completed` and `Failed → Abandoned` are terminal; a `Failed`
/// record below the retry budget is simply re-attempted on the next pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Pending,
    Completed,
    Failed,
    Abandoned,
}

impl ActionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ActionStatus::Pending => "pending",
            ActionStatus::Completed => "completed",
            ActionStatus::Failed => "failed",
            ActionStatus::Abandoned => "abandoned",
        }
    }

    /// Terminal states are pruned from the active collection after the
    /// processing pass that produced them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ActionStatus::Completed | ActionStatus::Abandoned)
    }

    /// Records still awaiting replay: pending, or failed but retry-eligible.
    pub fn awaits_replay(&self) -> bool {
        matches!(self, ActionStatus::Pending | ActionStatus::Failed)
    }
}
