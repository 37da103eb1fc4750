use std::{sync::Arc, time::Duration};

use airmon_common::{normalize, parse_status, SensorSnapshot};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::MissedTickBehavior,
};
use tracing::{debug, warn};

use crate::{
    error::PollError,
    state::StateHandle,
    transport::DeviceTransport,
};

/// One acquisition cycle: fetch, repair+parse, normalize.
pub async fn poll_once<T: DeviceTransport>(device: &T) -> Result<SensorSnapshot, PollError> {
    let raw = device.fetch_status().await?;
    let doc = parse_status(&raw)?;
    Ok(normalize(&doc))
}

/// Periodic poll task. The first fetch goes out immediately on spawn; the
/// fetch is awaited inside the tick arm, so a slow response delays the next
/// cycle instead of overlapping it and publishes land in issuance order.
pub struct Poller {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Poller {
    pub fn spawn<T: DeviceTransport>(
        device: Arc<T>,
        state: StateHandle,
        interval: Duration,
    ) -> Self {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => run_cycle(device.as_ref(), &state).await,
                }
            }
            debug!("poll loop stopped");
        });

        Self { shutdown, task }
    }

    /// Stop scheduling and wait for the task to wind down. An in-flight
    /// request is left to resolve; its cycle completes before the task sees
    /// the signal, after which nothing further is scheduled.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

async fn run_cycle<T: DeviceTransport>(device: &T, state: &StateHandle) {
    match poll_once(device).await {
        Ok(snapshot) => state.publish(snapshot).await,
        Err(err) => {
            // Recovered locally: stale data stays visible with the
            // connectivity flag down, and the next cycle retries.
            match &err {
                PollError::Payload(payload) => {
                    warn!(raw = payload.raw(), "poll cycle failed: {err}");
                }
                _ => warn!("poll cycle failed: {err}"),
            }
            state.mark_disconnected().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::ScriptedDevice;

    const GOOD_BODY: &str =
        r#"{"temperature":22.1,"gas":410,"dust":30,"fan":true,"airQualityIndex":77}"#;

    #[tokio::test]
    async fn poll_once_repairs_and_normalizes() {
        let device = ScriptedDevice::with_statuses([Ok(
            r#"{"temperature":21.5,"gas":nan,"dust":42,"fan":true"airQualityIndex":64}"#
                .to_string(),
        )]);

        let snapshot = poll_once(&device).await.unwrap();

        assert_eq!(snapshot.temperature, 21.5);
        assert_eq!(snapshot.gas, 0);
        assert_eq!(snapshot.dust, 42);
        assert_eq!(snapshot.air_quality_index, 64);
        assert!(snapshot.fan_on);
    }

    #[tokio::test]
    async fn poll_once_surfaces_unrepairable_bodies() {
        let device = ScriptedDevice::with_statuses([Ok("<html>502</html>".to_string())]);

        match poll_once(&device).await {
            Err(PollError::Payload(payload)) => assert_eq!(payload.raw(), "<html>502</html>"),
            other => panic!("expected payload error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn successful_cycle_publishes_and_stamps() {
        let device = ScriptedDevice::with_statuses([Ok(GOOD_BODY.to_string())]);
        let state = StateHandle::new();

        run_cycle(&device, &state).await;
        let published = state.view().await;

        assert!(published.is_connected);
        assert!(published.last_updated.is_some());
        assert_eq!(published.snapshot.temperature, 22.1);
    }

    #[tokio::test]
    async fn failed_cycle_leaves_snapshot_and_timestamp_alone() {
        let device = ScriptedDevice::with_statuses([
            Ok(GOOD_BODY.to_string()),
            Err(PollError::Status(reqwest::StatusCode::BAD_GATEWAY)),
        ]);
        let state = StateHandle::new();

        run_cycle(&device, &state).await;
        let good = state.view().await;

        run_cycle(&device, &state).await;
        let after_failure = state.view().await;

        assert!(!after_failure.is_connected);
        assert_eq!(after_failure.snapshot, good.snapshot);
        assert_eq!(after_failure.last_updated, good.last_updated);
    }

    #[tokio::test]
    async fn consecutive_failures_never_panic_and_keep_retrying() {
        let device = ScriptedDevice::default();
        let state = StateHandle::new();

        for _ in 0..5 {
            run_cycle(&device, &state).await;
        }

        assert_eq!(device.fetches(), 5);
        assert!(!state.view().await.is_connected);
    }

    #[tokio::test(start_paused = true)]
    async fn first_fetch_goes_out_without_delay() {
        let device = Arc::new(ScriptedDevice::with_statuses([Ok(GOOD_BODY.to_string())]));
        let state = StateHandle::new();

        let poller = Poller::spawn(device.clone(), state.clone(), Duration::from_secs(2));
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(device.fetches(), 1);
        assert!(state.view().await.is_connected);

        poller.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stop_leaves_no_dangling_scheduled_work() {
        let device = Arc::new(ScriptedDevice::default());
        let state = StateHandle::new();

        let poller = Poller::spawn(device.clone(), state.clone(), Duration::from_secs(2));
        tokio::time::sleep(Duration::from_secs(5)).await;
        poller.stop().await;

        let fetched = device.fetches();
        assert!(fetched >= 2, "expected periodic fetches, saw {fetched}");

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(device.fetches(), fetched);
    }
}
