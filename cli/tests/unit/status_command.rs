//! Status gathering and rendering.

#![allow(clippy::expect_used)]

use agentbox_cli::application::services::status::gather_status;
use agentbox_cli::domain::{ContainerState, VolumeSize};
use agentbox_cli::output::{OutputContext, human};

use crate::helpers::{FakeDocker, World};

#[tokio::test]
async fn test_status_offline_runtime_reports_unavailable() {
    let rt = FakeDocker::offline();
    let report = gather_status(&rt).await;
    assert!(!report.runtime_available);
    assert_eq!(report.runtime, "docker");
    assert_eq!(report.container_state, ContainerState::Absent);
    assert!(!rt.called("inspect_status"));
}

#[tokio::test]
async fn test_status_fresh_environment() {
    let report = gather_status(&FakeDocker::fresh()).await;
    assert!(report.runtime_available);
    assert!(!report.image_present);
    assert_eq!(report.container_state, ContainerState::Absent);
    assert_eq!(report.volume_size, VolumeSize::NotCreated);
    assert!(!report.volume_present());
    assert!(!report.gpu_available);
}

#[tokio::test]
async fn test_status_running_with_gpu() {
    let rt = FakeDocker::new(World {
        image: true,
        container: ContainerState::Running,
        volume: Some("12.5GB".into()),
        gpu: true,
        ..World::default()
    });
    let report = gather_status(&rt).await;
    assert!(report.image_present);
    assert_eq!(report.container_state, ContainerState::Running);
    assert_eq!(report.volume_size, VolumeSize::Known("12.5GB".into()));
    assert!(report.gpu_available);
}

#[tokio::test]
async fn test_status_json_shape() {
    let report = gather_status(&FakeDocker::stopped()).await;
    let value = serde_json::to_value(&report).expect("serialize");
    assert_eq!(value["container"], "agentbox");
    assert_eq!(value["container_state"], "stopped");
    assert_eq!(value["volume"], "agentbox-models");
    assert_eq!(value["volume_size"], "4.2GB");
    assert_eq!(value["image_present"], true);
}

#[tokio::test]
async fn test_render_status_does_not_panic_in_any_state() {
    let ctx = OutputContext::new(true, false);
    for rt in [
        FakeDocker::offline(),
        FakeDocker::fresh(),
        FakeDocker::stopped(),
        FakeDocker::running(),
    ] {
        human::render_status(&ctx, &gather_status(&rt).await);
    }
}
