use serde::{Deserialize, Serialize};
use std::fmt;

/// Path of the backend call an action replays, relative to the configured
/// API base URL (e.g. "/messages").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint(String);

impl Endpoint {
    pub fn new(value: String) -> Result<Self, String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err("Endpoint must not be empty".to_string());
        }
        if !trimmed.starts_with('/') {
            return Err("Endpoint must start with '/'".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
