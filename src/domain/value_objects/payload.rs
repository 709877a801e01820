use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON body of the call an action replays. The queue never inspects its
/// contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionPayload(Value);

impl ActionPayload {
    pub fn new(value: Value) -> Result<Self, String> {
        if value.is_null() {
            return Err("Action payload cannot be null".to_string());
        }
        Ok(Self(value))
    }

    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| format!("Invalid JSON payload: {e}"))?;
        Self::new(value)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<ActionPayload> for Value {
    fn from(payload: ActionPayload) -> Self {
        payload.0
    }
}
