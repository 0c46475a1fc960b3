//! Infrastructure implementation of the model server ports.

use std::process::{ExitStatus, Output};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ModelServer, ReadinessProbe};
use crate::domain::container::MODEL_SERVER_ADDR;
use crate::infra::command_runner::TokioCommandRunner;

/// `ollama` CLI adapter, used from inside the container.
pub struct OllamaCli<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> OllamaCli<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl OllamaCli<TokioCommandRunner> {
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::default())
    }
}

impl<R: CommandRunner> ModelServer for OllamaCli<R> {
    async fn list(&self) -> Result<Output> {
        self.runner.run("ollama", &["list"]).await.context("ollama list")
    }

    async fn pull(&self, model: &str) -> Result<ExitStatus> {
        self.runner
            .run_status("ollama", &["pull", model])
            .await
            .with_context(|| format!("ollama pull {model}"))
    }
}

/// HTTP readiness check against the model server's tag listing.
pub struct HttpReadiness {
    url: String,
    timeout: Duration,
}

impl HttpReadiness {
    /// Probe `http://<host>/api/tags`, where `host` is `OLLAMA_HOST` or the
    /// fixed local default.
    #[must_use]
    pub fn from_env() -> Self {
        let host = std::env::var("OLLAMA_HOST").unwrap_or_else(|_| MODEL_SERVER_ADDR.to_string());
        Self::new(&host)
    }

    #[must_use]
    pub fn new(host: &str) -> Self {
        let base = if host.starts_with("http://") || host.starts_with("https://") {
            host.trim_end_matches('/').to_string()
        } else {
            format!("http://{host}")
        };
        Self {
            url: format!("{base}/api/tags"),
            timeout: Duration::from_secs(1),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ReadinessProbe for HttpReadiness {
    async fn is_ready(&self) -> bool {
        let url = self.url.clone();
        let timeout = self.timeout;
        tokio::task::spawn_blocking(move || ureq::get(&url).timeout(timeout).call().is_ok())
            .await
            .unwrap_or(false)
    }
}
