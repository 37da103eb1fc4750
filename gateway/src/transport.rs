use std::{future::Future, time::Duration};

use airmon_common::GatewayConfig;

use crate::error::{CommandError, PollError};

/// Seam between the acquisition core and the device wire protocol. The poll
/// loop and actuator path only ever talk to this trait, so tests script a
/// device in memory and the binary plugs in [`HttpDevice`].
pub trait DeviceTransport: Send + Sync + 'static {
    fn fetch_status(&self) -> impl Future<Output = Result<String, PollError>> + Send;
    fn set_fan(&self, on: bool) -> impl Future<Output = Result<(), CommandError>> + Send;
}

/// The real device: `GET {base}/status`, `POST {base}/fan/on|off`.
pub struct HttpDevice {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDevice {
    pub fn new(config: &GatewayConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self {
            client,
            base_url: config.device_base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl DeviceTransport for HttpDevice {
    fn fetch_status(&self) -> impl Future<Output = Result<String, PollError>> + Send {
        async move {
            let response = self
                .client
                .get(format!("{}/status", self.base_url))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(PollError::Status(status));
            }

            Ok(response.text().await?)
        }
    }

    fn set_fan(&self, on: bool) -> impl Future<Output = Result<(), CommandError>> + Send {
        async move {
            let endpoint = if on { "on" } else { "off" };
            let response = self
                .client
                .post(format!("{}/fan/{endpoint}", self.base_url))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(CommandError::Rejected(status));
            }

            Ok(())
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{
        collections::VecDeque,
        sync::Mutex,
    };

    use super::*;

    /// In-memory device with scripted responses. Unscripted fetches answer
    /// 503; unscripted fan commands acknowledge.
    #[derive(Default)]
    pub struct ScriptedDevice {
        pub statuses: Mutex<VecDeque<Result<String, PollError>>>,
        pub fan_results: Mutex<VecDeque<Result<(), CommandError>>>,
        pub fan_calls: Mutex<Vec<bool>>,
        pub fetch_count: Mutex<usize>,
    }

    impl ScriptedDevice {
        pub fn with_statuses(
            statuses: impl IntoIterator<Item = Result<String, PollError>>,
        ) -> Self {
            Self {
                statuses: Mutex::new(statuses.into_iter().collect()),
                ..Self::default()
            }
        }

        pub fn with_fan_results(
            results: impl IntoIterator<Item = Result<(), CommandError>>,
        ) -> Self {
            Self {
                fan_results: Mutex::new(results.into_iter().collect()),
                ..Self::default()
            }
        }

        pub fn fetches(&self) -> usize {
            *self.fetch_count.lock().unwrap()
        }
    }

    impl DeviceTransport for ScriptedDevice {
        fn fetch_status(&self) -> impl Future<Output = Result<String, PollError>> + Send {
            async move {
                *self.fetch_count.lock().unwrap() += 1;
                self.statuses
                    .lock()
                    .unwrap()
                    .pop_front()
                    .unwrap_or(Err(PollError::Status(
                        reqwest::StatusCode::SERVICE_UNAVAILABLE,
                    )))
            }
        }

        fn set_fan(&self, on: bool) -> impl Future<Output = Result<(), CommandError>> + Send {
            async move {
                self.fan_calls.lock().unwrap().push(on);
                self.fan_results.lock().unwrap().pop_front().unwrap_or(Ok(()))
            }
        }
    }
}
