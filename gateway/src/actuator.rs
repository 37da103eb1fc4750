use tracing::{info, warn};

use crate::{error::CommandError, state::StateHandle, transport::DeviceTransport};

/// Fan command path. Optimistic-after-confirmation: the published `fan_on`
/// changes only once the device acknowledges, so the caller-visible toggle
/// never shows a state the device has not accepted.
pub async fn set_fan<T: DeviceTransport>(
    device: &T,
    state: &StateHandle,
    on: bool,
) -> Result<(), CommandError> {
    let label = if on { "on" } else { "off" };

    if let Err(err) = device.set_fan(on).await {
        warn!("fan {label} command failed, keeping last confirmed state: {err}");
        return Err(err);
    }

    state.confirm_fan(on).await;
    info!("fan confirmed {label}");
    Ok(())
}
