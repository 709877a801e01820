use crate::application::ports::ExecutionError;

/// Pluggable failure classifier consulted by the drain after every failed
/// execution attempt. A non-retryable verdict abandons the record
/// immediately instead of consuming the remaining retry budget.
pub trait RetryPolicy: Send + Sync {
    fn is_retryable(&self, error: &ExecutionError) -> bool;
}

/// Default policy: every failure is retryable until the budget runs out.
/// Matches the original client, which never told a validation rejection
/// apart from a network timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryAllPolicy;

impl RetryPolicy for RetryAllPolicy {
    fn is_retryable(&self, _error: &ExecutionError) -> bool {
        true
    }
}

/// Opt-in policy that abandons on 4xx semantic rejections. 408 (request
/// timeout) and 429 (rate limit) stay retryable; failures without a status
/// code are transport-level and retryable.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpStatusPolicy;

impl RetryPolicy for HttpStatusPolicy {
    fn is_retryable(&self, error: &ExecutionError) -> bool {
        match error.status {
            Some(408) | Some(429) => true,
            Some(status) if (400..500).contains(&status) => false,
            _ => true,
        }
    }
}
