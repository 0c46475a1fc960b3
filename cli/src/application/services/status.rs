//! Application service — status gathering use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use serde::Serialize;

use crate::application::ports::ContainerRuntime;
use crate::application::services::container::lifecycle;
use crate::domain::container::ContainerState;
use crate::domain::volume::VolumeSize;

/// Snapshot of every external resource the controller manages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub runtime: String,
    pub runtime_available: bool,
    pub image: String,
    pub image_present: bool,
    pub container: String,
    pub container_state: ContainerState,
    pub volume: String,
    pub volume_size: VolumeSize,
    pub gpu_available: bool,
}

impl StatusReport {
    #[must_use]
    pub fn volume_present(&self) -> bool {
        self.volume_size != VolumeSize::NotCreated
    }
}

/// Gather all status information.
///
/// This function is infallible: an unreachable runtime is reflected in
/// `runtime_available` and the remaining fields fall back to "absent".
pub async fn gather_status(rt: &impl ContainerRuntime) -> StatusReport {
    let res = rt.resources().clone();
    let runtime_available = lifecycle::ensure_runtime(rt).await.is_ok();
    let gpu_available = lifecycle::gpu_available(rt).await;

    if !runtime_available {
        return StatusReport {
            runtime: res.runtime,
            runtime_available,
            image: res.image,
            image_present: false,
            container: res.container,
            container_state: ContainerState::Absent,
            volume: res.volume,
            volume_size: VolumeSize::Unknown,
            gpu_available,
        };
    }

    StatusReport {
        runtime: res.runtime,
        runtime_available,
        image: res.image,
        image_present: lifecycle::image_exists(rt).await,
        container: res.container,
        container_state: lifecycle::state(rt).await,
        volume: res.volume,
        volume_size: lifecycle::volume_size(rt).await,
        gpu_available,
    }
}
