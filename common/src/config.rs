use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the device, e.g. `http://192.168.1.42`. The gateway polls
    /// `{base}/status` and commands `{base}/fan/on` / `{base}/fan/off`.
    pub device_base_url: String,
    pub poll_interval_ms: u64,
    /// Transport deadline for a single device request. This is the only
    /// timeout the acquisition core imposes.
    pub request_timeout_ms: u64,
    /// Port the published-state HTTP surface listens on.
    pub http_port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            device_base_url: "http://127.0.0.1:9090".to_string(),
            poll_interval_ms: 2_000,
            request_timeout_ms: 5_000,
            http_port: 8080,
        }
    }
}
