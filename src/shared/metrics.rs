use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{LazyLock, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DrainMetricsSnapshot {
    pub total_completed: u64,
    pub total_failed: u64,
    pub total_abandoned: u64,
    pub total_passes: u64,
    pub last_pass_completed: Option<u32>,
    pub last_pass_failed: Option<u32>,
    pub last_pass_abandoned: Option<u32>,
    pub last_pass_remaining: Option<usize>,
    pub last_pass_at_ms: Option<u64>,
}

#[derive(Default, Clone)]
struct LastPass {
    completed: Option<u32>,
    failed: Option<u32>,
    abandoned: Option<u32>,
    remaining: Option<usize>,
    at_ms: Option<u64>,
}

struct DrainMetrics {
    completed: AtomicU64,
    failed: AtomicU64,
    abandoned: AtomicU64,
    passes: AtomicU64,
    last_pass: Mutex<LastPass>,
}

static DRAIN_METRICS: LazyLock<DrainMetrics> = LazyLock::new(|| DrainMetrics {
    completed: AtomicU64::new(0),
    failed: AtomicU64::new(0),
    abandoned: AtomicU64::new(0),
    passes: AtomicU64::new(0),
    last_pass: Mutex::new(LastPass::default()),
});

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Record the outcome of one completed drain pass.
pub fn record_pass(completed: u32, failed: u32, abandoned: u32, remaining: usize) {
    let metrics = &*DRAIN_METRICS;
    metrics
        .completed
        .fetch_add(u64::from(completed), Ordering::Relaxed);
    metrics
        .failed
        .fetch_add(u64::from(failed), Ordering::Relaxed);
    metrics
        .abandoned
        .fetch_add(u64::from(abandoned), Ordering::Relaxed);
    metrics.passes.fetch_add(1, Ordering::Relaxed);

    if let Ok(mut last) = metrics.last_pass.lock() {
        *last = LastPass {
            completed: Some(completed),
            failed: Some(failed),
            abandoned: Some(abandoned),
            remaining: Some(remaining),
            at_ms: Some(now_ms()),
        };
    }
}

pub fn snapshot() -> DrainMetricsSnapshot {
    let metrics = &*DRAIN_METRICS;
    let last = metrics
        .last_pass
        .lock()
        .map(|guard| guard.clone())
        .unwrap_or_default();

    DrainMetricsSnapshot {
        total_completed: metrics.completed.load(Ordering::Relaxed),
        total_failed: metrics.failed.load(Ordering::Relaxed),
        total_abandoned: metrics.abandoned.load(Ordering::Relaxed),
        total_passes: metrics.passes.load(Ordering::Relaxed),
        last_pass_completed: last.completed,
        last_pass_failed: last.failed,
        last_pass_abandoned: last.abandoned,
        last_pass_remaining: last.remaining,
        last_pass_at_ms: last.at_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_pass_accumulates_totals() {
        let before = snapshot();
        record_pass(2, 1, 0, 3);
        let after = snapshot();

        assert_eq!(after.total_completed, before.total_completed + 2);
        assert_eq!(after.total_failed, before.total_failed + 1);
        assert_eq!(after.total_passes, before.total_passes + 1);
        assert_eq!(after.last_pass_completed, Some(2));
        assert_eq!(after.last_pass_remaining, Some(3));
        assert!(after.last_pass_at_ms.is_some());
    }
}
