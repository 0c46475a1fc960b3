//! Model server supervision: readiness polling and shell hand-off.

#![allow(clippy::expect_used)]

use std::process::{ExitStatus, Output};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use agentbox_cli::application::ports::{CommandRunner, ReadinessProbe};
use agentbox_cli::application::services::model_server::{ReadyPolicy, supervise, wait_ready};
use anyhow::Result;

use crate::helpers::{RecordingReporter, exit_status, ok_output};

/// Becomes ready after `after` failed polls.
struct CountingProbe {
    after: u32,
    polls: AtomicU32,
}

impl CountingProbe {
    fn new(after: u32) -> Self {
        Self {
            after,
            polls: AtomicU32::new(0),
        }
    }
}

impl ReadinessProbe for CountingProbe {
    async fn is_ready(&self) -> bool {
        self.polls.fetch_add(1, Ordering::SeqCst) >= self.after
    }
}

#[tokio::test]
async fn test_wait_ready_stops_polling_once_ready() {
    let probe = CountingProbe::new(2);
    assert!(wait_ready(&probe, 30, Duration::ZERO).await);
    assert_eq!(probe.polls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_wait_ready_gives_up_after_bounded_attempts() {
    let probe = CountingProbe::new(u32::MAX);
    assert!(!wait_ready(&probe, 5, Duration::ZERO).await);
    assert_eq!(probe.polls.load(Ordering::SeqCst), 5);
}

/// Spawns a real long-lived placeholder for the server and fakes the shell.
#[cfg(unix)]
#[derive(Default)]
struct ShellRunner {
    shell_exit: i32,
    spawned: Mutex<Vec<String>>,
    server_pid: Mutex<Option<u32>>,
    shells: Mutex<Vec<String>>,
}

#[cfg(unix)]
impl ShellRunner {
    fn exiting_with(shell_exit: i32) -> Self {
        Self {
            shell_exit,
            ..Self::default()
        }
    }

    fn server_pid(&self) -> u32 {
        self.server_pid
            .lock()
            .expect("lock")
            .expect("server was spawned")
    }
}

#[cfg(unix)]
impl CommandRunner for ShellRunner {
    async fn run(&self, _: &str, _: &[&str]) -> Result<Output> {
        Ok(ok_output(b""))
    }
    async fn run_with_timeout(&self, _: &str, _: &[&str], _: Duration) -> Result<Output> {
        Ok(ok_output(b""))
    }
    fn spawn(&self, program: &str, args: &[&str]) -> Result<tokio::process::Child> {
        self.spawned
            .lock()
            .expect("lock")
            .push(format!("{program} {}", args.join(" ")));
        let child = tokio::process::Command::new("sleep")
            .arg("30")
            .kill_on_drop(true)
            .spawn()?;
        *self.server_pid.lock().expect("lock") = child.id();
        Ok(child)
    }
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        self.shells
            .lock()
            .expect("lock")
            .push(format!("{program} {}", args.join(" ")));
        Ok(exit_status(self.shell_exit))
    }
}

/// Whether a process with `pid` still exists.
#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    std::process::Command::new("sh")
        .args(["-c", &format!("kill -0 {pid} 2>/dev/null")])
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(unix)]
fn fast_policy(attempts: u32) -> ReadyPolicy {
    ReadyPolicy {
        attempts,
        interval: Duration::ZERO,
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_supervise_starts_server_then_shell_and_propagates_exit_code() {
    let runner = ShellRunner::exiting_with(3);
    let reporter = RecordingReporter::default();
    let code = supervise(
        &runner,
        &CountingProbe::new(0),
        &reporter,
        &["bash", "-l"],
        fast_policy(3),
    )
    .await
    .expect("supervise");

    assert_eq!(code, 3);
    assert_eq!(*runner.spawned.lock().expect("lock"), vec!["ollama serve"]);
    assert_eq!(*runner.shells.lock().expect("lock"), vec!["bash -l"]);
    assert!(reporter.lines().iter().any(|l| l == "ok: model server ready"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_supervise_kills_server_when_shell_exits() {
    let runner = ShellRunner::exiting_with(0);
    supervise(
        &runner,
        &CountingProbe::new(0),
        &RecordingReporter::default(),
        &["bash"],
        fast_policy(3),
    )
    .await
    .expect("supervise");

    assert!(!process_alive(runner.server_pid()));
}

#[cfg(unix)]
#[tokio::test]
async fn test_supervise_readiness_timeout_warns_and_still_runs_shell() {
    let runner = ShellRunner::exiting_with(0);
    let probe = CountingProbe::new(u32::MAX);
    let reporter = RecordingReporter::default();
    let code = supervise(&runner, &probe, &reporter, &["bash"], fast_policy(4))
        .await
        .expect("supervise");

    assert_eq!(code, 0);
    assert_eq!(probe.polls.load(Ordering::SeqCst), 4);
    assert!(
        reporter
            .lines()
            .iter()
            .any(|l| l.starts_with("warn:") && l.contains("after 4 attempts"))
    );
    assert_eq!(*runner.shells.lock().expect("lock"), vec!["bash "]);
    assert!(!process_alive(runner.server_pid()));
}

#[cfg(unix)]
#[tokio::test]
async fn test_supervise_rejects_empty_shell() {
    let runner = ShellRunner::exiting_with(0);
    let result = supervise(
        &runner,
        &CountingProbe::new(0),
        &RecordingReporter::default(),
        &[],
        fast_policy(1),
    )
    .await;
    assert!(result.is_err());
    assert!(runner.spawned.lock().expect("lock").is_empty());
}
