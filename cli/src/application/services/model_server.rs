//! Application service — in-container model server supervision.
//!
//! Starts the model server in the background, waits a bounded time for it to
//! answer, then hands the terminal to a foreground shell. The server is
//! killed before returning on every path.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CommandRunner, ProgressReporter, ReadinessProbe};

/// Readiness poll attempts.
pub const READY_ATTEMPTS: u32 = 30;

/// Delay between readiness attempts.
pub const READY_INTERVAL: Duration = Duration::from_secs(1);

/// Exit code used when interrupted (128 + SIGINT).
pub const EXIT_INTERRUPTED: i32 = 130;

/// Exit code used when terminated (128 + SIGTERM).
pub const EXIT_TERMINATED: i32 = 143;

/// How long to wait for the model server before handing over to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadyPolicy {
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for ReadyPolicy {
    fn default() -> Self {
        Self {
            attempts: READY_ATTEMPTS,
            interval: READY_INTERVAL,
        }
    }
}

/// Poll `probe` up to `attempts` times, `interval` apart.
///
/// Returns `false` on timeout; callers treat that as a warning.
pub async fn wait_ready(probe: &impl ReadinessProbe, attempts: u32, interval: Duration) -> bool {
    for attempt in 1..=attempts {
        if probe.is_ready().await {
            tracing::debug!(attempt, "model server ready");
            return true;
        }
        if attempt < attempts {
            tokio::time::sleep(interval).await;
        }
    }
    false
}

/// Run the model server and a foreground shell until the shell exits or the
/// process is asked to terminate. Returns the exit code to propagate.
///
/// SIGINT cancels the readiness wait; once the shell is running it belongs
/// to the shell. SIGTERM/SIGHUP end the session at any point.
///
/// # Errors
///
/// Returns an error if the server or the shell cannot be spawned.
pub async fn supervise(
    runner: &impl CommandRunner,
    probe: &impl ReadinessProbe,
    reporter: &impl ProgressReporter,
    shell: &[&str],
    policy: ReadyPolicy,
) -> Result<i32> {
    let (program, args) = shell
        .split_first()
        .ok_or_else(|| anyhow::anyhow!("no shell command given"))?;

    let mut server = runner.spawn("ollama", &["serve"])?;
    reporter.step("waiting for the model server...");

    let ready = tokio::select! {
        ready = wait_ready(probe, policy.attempts, policy.interval) => ready,
        _ = tokio::signal::ctrl_c() => {
            let _ = server.kill().await;
            return Ok(EXIT_INTERRUPTED);
        }
        () = terminate_signal() => {
            let _ = server.kill().await;
            return Ok(EXIT_TERMINATED);
        }
    };
    if ready {
        reporter.success("model server ready");
    } else {
        reporter.warn(&format!(
            "model server did not answer after {} attempts, continuing anyway",
            policy.attempts
        ));
    }

    let session = runner.run_status(program, args);
    tokio::pin!(session);
    let code = loop {
        tokio::select! {
            status = &mut session => break status.map(|s| s.code().unwrap_or(1)),
            _ = tokio::signal::ctrl_c() => {}
            () = terminate_signal() => break Ok(EXIT_TERMINATED),
        }
    };

    tracing::debug!("stopping model server");
    let _ = server.kill().await;
    code
}

#[cfg(unix)]
async fn terminate_signal() {
    use tokio::signal::unix::{SignalKind, signal};
    let (Ok(mut term), Ok(mut hup)) = (
        signal(SignalKind::terminate()),
        signal(SignalKind::hangup()),
    ) else {
        return std::future::pending().await;
    };
    tokio::select! {
        _ = term.recv() => {}
        _ = hup.recv() => {}
    }
}

#[cfg(not(unix))]
async fn terminate_signal() {
    std::future::pending::<()>().await;
}
