use std::sync::Arc;

use airmon_common::{PublishedState, SensorSnapshot};
use chrono::Utc;
use tokio::sync::Mutex;

/// Shared published state. One lock guards the whole value, so a poll-cycle
/// publish and a fan confirmation can never interleave mid-write; readers
/// always see a complete state.
///
/// Write discipline: the poll loop calls [`publish`](Self::publish) and
/// [`mark_disconnected`](Self::mark_disconnected);
/// [`confirm_fan`](Self::confirm_fan) is the actuator path's single entry
/// point and the only writer of `fan_on` outside a poll cycle.
#[derive(Clone, Default)]
pub struct StateHandle {
    inner: Arc<Mutex<PublishedState>>,
}

impl StateHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn view(&self) -> PublishedState {
        self.inner.lock().await.clone()
    }

    /// A successful poll cycle: replace the snapshot whole, mark the device
    /// reachable, stamp the last known-good time.
    pub async fn publish(&self, snapshot: SensorSnapshot) {
        let mut state = self.inner.lock().await;
        state.snapshot = snapshot;
        state.is_connected = true;
        state.last_updated = Some(Utc::now());
    }

    /// A failed poll cycle: only the connectivity flag drops. The stale
    /// snapshot and its timestamp stay visible as last known good.
    pub async fn mark_disconnected(&self) {
        self.inner.lock().await.is_connected = false;
    }

    /// Device-confirmed fan state.
    pub async fn confirm_fan(&self, on: bool) {
        self.inner.lock().await.snapshot.fan_on = on;
    }
}
