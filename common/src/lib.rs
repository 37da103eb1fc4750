pub mod aqi;
pub mod config;
pub mod error;
pub mod normalize;
pub mod repair;
pub mod types;

pub use aqi::compute_index;
pub use config::GatewayConfig;
pub use error::PayloadError;
pub use normalize::normalize;
pub use repair::{parse_status, repair_payload};
pub use types::{PublishedState, SensorSnapshot};
