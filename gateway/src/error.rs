use airmon_common::PayloadError;
use thiserror::Error;

/// A poll cycle that did not produce a snapshot. All variants are recovered
/// locally: the connectivity flag drops and the next scheduled cycle retries.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("status request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("device answered status {0}")]
    Status(reqwest::StatusCode),
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// A fan command the device did not accept. Published state stays at the
/// last confirmed value.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("fan command could not reach the device: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("device rejected fan command with status {0}")]
    Rejected(reqwest::StatusCode),
}
