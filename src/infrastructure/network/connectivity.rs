use crate::application::ports::ConnectivitySignal;
use tokio::sync::watch;
use tracing::debug;

/// Holds the boolean connectivity state observed from the platform signal.
/// Transitions are edge-triggered: subscribers are notified once per
/// change, never on repeated reports of the same state.
#[derive(Clone)]
pub struct ConnectivityMonitor {
    state: watch::Sender<bool>,
}

impl ConnectivityMonitor {
    /// `initial` comes from the platform's current connectivity signal at
    /// construction time.
    pub fn new(initial: bool) -> Self {
        let (state, _) = watch::channel(initial);
        Self { state }
    }

    /// Feed a connectivity report from the platform. Repeated reports of
    /// the unchanged state are absorbed here.
    pub fn set_online(&self, online: bool) {
        let changed = self.state.send_if_modified(|current| {
            if *current == online {
                false
            } else {
                *current = online;
                true
            }
        });
        if changed {
            debug!(
                target: "sync::connectivity",
                online,
                "connectivity state changed"
            );
        }
    }
}

impl ConnectivitySignal for ConnectivityMonitor {
    fn is_online(&self) -> bool {
        *self.state.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }
}
