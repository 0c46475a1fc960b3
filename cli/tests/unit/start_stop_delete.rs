//! Start, stop and delete use-cases against the in-memory runtime.

#![allow(clippy::expect_used)]

use agentbox_cli::application::services::workspace_start::{StartOutcome, start_workspace};
use agentbox_cli::application::services::workspace_stop::{
    DeleteOutcome, StopOutcome, delete_container, stop_workspace,
};
use agentbox_cli::domain::{ContainerState, ControllerError};

use crate::helpers::{FakeDocker, RecordingReporter, ScriptedPrompter, World};

fn controller_error(e: &anyhow::Error) -> Option<&ControllerError> {
    e.downcast_ref::<ControllerError>()
}

// ── start ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_start_fresh_environment_builds_image_then_runs_container() {
    let dir = tempfile::tempdir().expect("tempdir");
    let rt = FakeDocker::fresh();
    let outcome = start_workspace(&rt, &ScriptedPrompter::new(), &RecordingReporter::default(), dir.path())
        .await
        .expect("start");

    assert_eq!(outcome, StartOutcome::Created { built: true });
    let calls = rt.calls();
    let build = calls.iter().position(|c| c == "build").expect("build issued");
    let run = calls.iter().position(|c| c == "run").expect("run issued");
    assert!(build < run);

    let runs = rt.runs.lock().expect("lock").clone();
    assert_eq!(runs.len(), 1);
    let spec = &runs[0];
    assert_eq!(spec.name, "agentbox");
    assert_eq!(spec.volume, "agentbox-models");
    let args = spec.to_args();
    let bind = format!("{}:/workspace", spec.host_workspace);
    assert!(args.iter().any(|a| *a == bind), "workspace bound: {args:?}");
    assert!(args.iter().any(|a| a == "agentbox-models:/ollama-models"));

    let world = rt.snapshot();
    assert_eq!(world.container, ContainerState::Running);
    assert!(world.volume.is_some());
}

#[tokio::test]
async fn test_start_with_existing_image_skips_build() {
    let dir = tempfile::tempdir().expect("tempdir");
    let rt = FakeDocker::new(World {
        image: true,
        ..World::default()
    });
    let outcome = start_workspace(&rt, &ScriptedPrompter::new(), &RecordingReporter::default(), dir.path())
        .await
        .expect("start");
    assert_eq!(outcome, StartOutcome::Created { built: false });
    assert!(!rt.called("build"));
}

#[tokio::test]
async fn test_start_without_gpu_warns_and_omits_gpu_flags() {
    let dir = tempfile::tempdir().expect("tempdir");
    let rt = FakeDocker::fresh();
    let reporter = RecordingReporter::default();
    start_workspace(&rt, &ScriptedPrompter::new(), &reporter, dir.path())
        .await
        .expect("start");

    assert!(reporter.lines().iter().any(|l| l.starts_with("warn:") && l.contains("GPU")));
    let spec = rt.runs.lock().expect("lock")[0].clone();
    assert!(!spec.gpu);
    assert!(!spec.to_args().iter().any(|a| a == "--gpus"));
}

#[tokio::test]
async fn test_start_with_gpu_requests_all_gpus() {
    let dir = tempfile::tempdir().expect("tempdir");
    let rt = FakeDocker::new(World {
        image: true,
        gpu: true,
        ..World::default()
    });
    start_workspace(&rt, &ScriptedPrompter::new(), &RecordingReporter::default(), dir.path())
        .await
        .expect("start");
    let spec = rt.runs.lock().expect("lock")[0].clone();
    assert!(spec.gpu);
    assert!(spec.to_args().windows(2).any(|w| w[0] == "--gpus" && w[1] == "all"));
}

#[tokio::test]
async fn test_start_missing_path_fails_before_any_transition() {
    let rt = FakeDocker::fresh();
    let err = start_workspace(
        &rt,
        &ScriptedPrompter::new(),
        &RecordingReporter::default(),
        std::path::Path::new("/definitely/not/a/real/agentbox/path"),
    )
    .await
    .expect_err("missing path must fail");

    assert!(matches!(controller_error(&err), Some(ControllerError::PathNotFound(_))));
    assert!(!rt.called("build"));
    assert!(!rt.called("run"));
}

#[tokio::test]
async fn test_start_failed_build_does_not_run_container() {
    let dir = tempfile::tempdir().expect("tempdir");
    let rt = FakeDocker::new(World {
        build_fails: true,
        ..World::default()
    });
    let err = start_workspace(&rt, &ScriptedPrompter::new(), &RecordingReporter::default(), dir.path())
        .await
        .expect_err("build failure propagates");
    assert!(err.to_string().contains("image build failed"));
    assert!(!rt.called("run"));
    assert_eq!(rt.snapshot().container, ContainerState::Absent);
}

#[tokio::test]
async fn test_start_when_running_never_issues_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    for attach in [false, true] {
        let rt = FakeDocker::running();
        let prompter = ScriptedPrompter::new().confirm_with(&[attach]);
        let outcome = start_workspace(&rt, &prompter, &RecordingReporter::default(), dir.path())
            .await
            .expect("start");

        assert_eq!(outcome, StartOutcome::AlreadyRunning { attached: attach });
        assert!(!rt.called("run"));
        assert!(!rt.called("start"));
        assert_eq!(rt.called("attach"), attach);
    }
}

#[tokio::test]
async fn test_start_when_stopped_restart_reuses_container() {
    let dir = tempfile::tempdir().expect("tempdir");
    let rt = FakeDocker::stopped();
    let prompter = ScriptedPrompter::new().select_with(&[0]);
    let outcome = start_workspace(&rt, &prompter, &RecordingReporter::default(), dir.path())
        .await
        .expect("start");

    assert_eq!(outcome, StartOutcome::Restarted);
    assert!(rt.called("start"));
    assert!(!rt.called("run"));
    assert!(!rt.called("remove"));
    assert_eq!(rt.snapshot().container, ContainerState::Running);
}

#[tokio::test]
async fn test_start_when_stopped_recreate_removes_then_runs_and_keeps_volume() {
    let dir = tempfile::tempdir().expect("tempdir");
    let rt = FakeDocker::stopped();
    let prompter = ScriptedPrompter::new().select_with(&[1]);
    let outcome = start_workspace(&rt, &prompter, &RecordingReporter::default(), dir.path())
        .await
        .expect("start");

    assert_eq!(outcome, StartOutcome::Recreated);
    let calls = rt.calls();
    let remove = calls.iter().position(|c| c == "remove").expect("remove issued");
    let run = calls.iter().position(|c| c == "run").expect("run issued");
    assert!(remove < run);
    assert!(!rt.called("volume_remove"));
    assert_eq!(rt.snapshot().volume.as_deref(), Some("4.2GB"));
}

#[tokio::test]
async fn test_start_when_stopped_cancel_changes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let rt = FakeDocker::stopped();
    let prompter = ScriptedPrompter::new().select_with(&[2]);
    let outcome = start_workspace(&rt, &prompter, &RecordingReporter::default(), dir.path())
        .await
        .expect("start");
    assert_eq!(outcome, StartOutcome::Cancelled);
    assert_eq!(rt.snapshot().container, ContainerState::Stopped);
}

#[tokio::test]
async fn test_start_runtime_unavailable_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let rt = FakeDocker::offline();
    let err = start_workspace(&rt, &ScriptedPrompter::new(), &RecordingReporter::default(), dir.path())
        .await
        .expect_err("offline runtime");
    let ce = controller_error(&err).expect("controller error");
    assert!(ce.is_fatal());
    assert_eq!(ce.code(), "RUNTIME_UNAVAILABLE");
}

// ── stop ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_stop_then_decline_delete_keeps_container_and_volume() {
    let rt = FakeDocker::running();
    let prompter = ScriptedPrompter::new().confirm_with(&[false]);
    let outcome = stop_workspace(&rt, &prompter, &RecordingReporter::default())
        .await
        .expect("stop");

    assert_eq!(outcome, StopOutcome::Stopped { removed: false });
    let world = rt.snapshot();
    assert_eq!(world.container, ContainerState::Stopped);
    assert_eq!(world.volume.as_deref(), Some("4.2GB"));
}

#[tokio::test]
async fn test_stop_with_default_answer_does_not_delete() {
    let rt = FakeDocker::running();
    let outcome = stop_workspace(&rt, &ScriptedPrompter::new(), &RecordingReporter::default())
        .await
        .expect("stop");
    assert_eq!(outcome, StopOutcome::Stopped { removed: false });
    assert!(!rt.called("remove"));
}

#[tokio::test]
async fn test_stop_then_accept_delete_removes_container_only() {
    let rt = FakeDocker::running();
    let prompter = ScriptedPrompter::new().confirm_with(&[true]);
    let outcome = stop_workspace(&rt, &prompter, &RecordingReporter::default())
        .await
        .expect("stop");

    assert_eq!(outcome, StopOutcome::Stopped { removed: true });
    let world = rt.snapshot();
    assert_eq!(world.container, ContainerState::Absent);
    assert!(world.volume.is_some());
    assert!(!rt.called("volume_remove"));
}

#[tokio::test]
async fn test_stop_when_not_running_reports_state() {
    let rt = FakeDocker::stopped();
    let outcome = stop_workspace(&rt, &ScriptedPrompter::new(), &RecordingReporter::default())
        .await
        .expect("stop");
    assert_eq!(outcome, StopOutcome::AlreadyStopped);
    assert!(!rt.called("stop"));

    let rt = FakeDocker::fresh();
    let outcome = stop_workspace(&rt, &ScriptedPrompter::new(), &RecordingReporter::default())
        .await
        .expect("stop");
    assert_eq!(outcome, StopOutcome::NotFound);
}

// ── delete ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_never_removes_volume_from_any_state() {
    for rt in [FakeDocker::fresh(), FakeDocker::stopped(), FakeDocker::running()] {
        let before = rt.snapshot().volume;
        let _ = delete_container(&rt, &RecordingReporter::default()).await;
        assert!(!rt.called("volume_remove"));
        assert_eq!(rt.snapshot().volume, before);
    }
}

#[tokio::test]
async fn test_delete_running_container_is_refused() {
    let rt = FakeDocker::running();
    let err = delete_container(&rt, &RecordingReporter::default())
        .await
        .expect_err("running container");
    assert!(matches!(controller_error(&err), Some(ControllerError::ContainerRunning(_))));
    assert!(!rt.called("remove"));
    assert_eq!(rt.snapshot().container, ContainerState::Running);
}

#[tokio::test]
async fn test_delete_stopped_container_returns_to_absent() {
    let rt = FakeDocker::stopped();
    let outcome = delete_container(&rt, &RecordingReporter::default())
        .await
        .expect("delete");
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(rt.snapshot().container, ContainerState::Absent);
}

#[tokio::test]
async fn test_delete_absent_container_is_a_no_op() {
    let rt = FakeDocker::fresh();
    let outcome = delete_container(&rt, &RecordingReporter::default())
        .await
        .expect("delete");
    assert_eq!(outcome, DeleteOutcome::NotFound);
    assert!(!rt.called("remove"));
}

// ── sessions ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_attach_and_shell_require_running_container() {
    use agentbox_cli::application::services::container::lifecycle;

    let rt = FakeDocker::stopped();
    let err = lifecycle::attach(&rt).await.expect_err("stopped");
    assert!(matches!(controller_error(&err), Some(ControllerError::ContainerNotRunning(_))));
    let err = lifecycle::open_shell(&rt).await.expect_err("stopped");
    assert!(matches!(controller_error(&err), Some(ControllerError::ContainerNotRunning(_))));
    assert!(!rt.called("attach"));

    let rt = FakeDocker::running();
    lifecycle::open_shell(&rt).await.expect("shell");
    assert!(rt.called("exec bash"));
}

#[tokio::test]
async fn test_logs_require_existing_container() {
    use agentbox_cli::application::services::container::lifecycle;

    let rt = FakeDocker::fresh();
    let err = lifecycle::show_logs(&rt, 100, false).await.expect_err("absent");
    assert!(matches!(controller_error(&err), Some(ControllerError::ContainerNotFound(_))));

    let rt = FakeDocker::stopped();
    lifecycle::show_logs(&rt, 50, true).await.expect("logs");
    assert!(rt.called("logs 50 true"));
}

#[tokio::test]
async fn test_failed_sessions_are_reported_as_errors() {
    use agentbox_cli::application::services::container::lifecycle;

    let rt = FakeDocker::new(World {
        image: true,
        container: ContainerState::Running,
        session_exit: 2,
        ..World::default()
    });
    let err = lifecycle::open_shell(&rt).await.expect_err("shell exit 2");
    assert!(err.to_string().contains("shell in container ended"), "{err}");
    let err = lifecycle::attach(&rt).await.expect_err("attach exit 2");
    assert!(err.to_string().contains("attach ended"), "{err}");
    let err = lifecycle::show_logs(&rt, 10, false).await.expect_err("logs exit 2");
    assert!(err.to_string().contains("reading logs failed"), "{err}");
}

// ── paused ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_start_when_paused_unpauses_instead_of_starting() {
    let dir = tempfile::tempdir().expect("tempdir");
    let rt = FakeDocker::paused();
    let prompter = ScriptedPrompter::new();
    let outcome = start_workspace(&rt, &prompter, &RecordingReporter::default(), dir.path())
        .await
        .expect("start");

    assert_eq!(outcome, StartOutcome::Unpaused);
    assert!(rt.called("unpause"));
    assert!(!rt.called("start"));
    assert!(!rt.called("run"));
    assert!(prompter.asked().is_empty());
    assert_eq!(rt.snapshot().container, ContainerState::Running);
}

#[tokio::test]
async fn test_stop_when_paused_stops_the_container() {
    let rt = FakeDocker::paused();
    let outcome = stop_workspace(&rt, &ScriptedPrompter::new(), &RecordingReporter::default())
        .await
        .expect("stop");
    assert_eq!(outcome, StopOutcome::Stopped { removed: false });
    assert!(rt.called("stop"));
    assert_eq!(rt.snapshot().container, ContainerState::Stopped);
}

#[tokio::test]
async fn test_delete_paused_container_is_refused() {
    let rt = FakeDocker::paused();
    let err = delete_container(&rt, &RecordingReporter::default())
        .await
        .expect_err("paused");
    assert!(matches!(controller_error(&err), Some(ControllerError::ContainerRunning(_))));
    assert!(!rt.called("remove"));
    assert_eq!(rt.snapshot().container, ContainerState::Paused);
}

#[tokio::test]
async fn test_sessions_refuse_paused_container() {
    use agentbox_cli::application::services::container::lifecycle;

    let rt = FakeDocker::paused();
    let err = lifecycle::open_shell(&rt).await.expect_err("paused");
    assert!(matches!(controller_error(&err), Some(ControllerError::ContainerNotRunning(_))));
    assert!(!rt.called("exec bash"));
}

#[tokio::test]
async fn test_full_state_machine_cycle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let rt = FakeDocker::fresh();
    let reporter = RecordingReporter::default();

    start_workspace(&rt, &ScriptedPrompter::new(), &reporter, dir.path())
        .await
        .expect("create");
    assert_eq!(rt.snapshot().container, ContainerState::Running);

    stop_workspace(&rt, &ScriptedPrompter::new(), &reporter)
        .await
        .expect("stop");
    assert_eq!(rt.snapshot().container, ContainerState::Stopped);

    start_workspace(&rt, &ScriptedPrompter::new(), &reporter, dir.path())
        .await
        .expect("restart");
    assert_eq!(rt.snapshot().container, ContainerState::Running);

    stop_workspace(&rt, &ScriptedPrompter::new(), &reporter)
        .await
        .expect("stop");
    delete_container(&rt, &reporter).await.expect("delete");
    let world = rt.snapshot();
    assert_eq!(world.container, ContainerState::Absent);
    assert!(world.volume.is_some());
}
