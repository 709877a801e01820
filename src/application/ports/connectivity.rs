use tokio::sync::watch;

/// Read side of the platform connectivity signal. `subscribe` yields a
/// watch receiver that is notified once per transition (edge-triggered),
/// never on repeated reads of the same state.
pub trait ConnectivitySignal: Send + Sync {
    fn is_online(&self) -> bool;
    fn subscribe(&self) -> watch::Receiver<bool>;
}
