use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    /// The body could not be parsed even after the known firmware defects
    /// were repaired. The original raw text is kept for diagnostic logging.
    #[error("unrepairable device payload: {source}")]
    Malformed {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

impl PayloadError {
    /// Raw body as received from the device, before any repair.
    pub fn raw(&self) -> &str {
        match self {
            Self::Malformed { raw, .. } => raw,
        }
    }
}
