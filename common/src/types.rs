use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest normalized set of sensor readings, valid until superseded by the
/// next successful poll. Every field is defined from session start; before
/// the first successful poll the snapshot holds zeros and `fan_on: false`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub temperature: f64,
    pub gas: u32,
    pub dust: u32,
    #[serde(rename = "airQualityIndex")]
    pub air_quality_index: u8,
    #[serde(rename = "fanOn")]
    pub fan_on: bool,
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            gas: 0,
            dust: 0,
            air_quality_index: 0,
            fan_on: false,
        }
    }
}

/// Everything the display layer may depend on. `last_updated` records the
/// last known-good poll, not the last attempt: a failed cycle flips
/// `is_connected` and leaves the rest alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishedState {
    pub snapshot: SensorSnapshot,
    #[serde(rename = "isConnected")]
    pub is_connected: bool,
    #[serde(rename = "lastUpdated")]
    pub last_updated: Option<DateTime<Utc>>,
}
