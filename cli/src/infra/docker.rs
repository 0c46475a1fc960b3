//! Infrastructure implementation of the container runtime port traits.
//!
//! `DockerRuntime<R>` routes every runtime CLI call through a `CommandRunner`
//! and is bound to one set of resource names for its whole lifetime.

use std::io::IsTerminal as _;
use std::process::{ExitStatus, Output};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{
    CommandRunner, ContainerInspector, ContainerLifecycle, ContainerSession, GpuProbe,
    ImageStore, Resources, RuntimeProbe, VolumeStore,
};
use crate::domain::RunSpec;
use crate::infra::command_runner::TokioCommandRunner;

/// `docker run` may need to create the volume and set up GPU devices.
const RUN_TIMEOUT: Duration = Duration::from_secs(120);

/// `docker system df -v` walks every layer and volume.
const DISK_USAGE_TIMEOUT: Duration = Duration::from_secs(60);

/// `nvidia-smi` hangs on some broken driver installs.
const GPU_TIMEOUT: Duration = Duration::from_secs(10);

/// Infrastructure adapter for the `docker` CLI (or a compatible one such as `podman`).
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct DockerRuntime<R: CommandRunner> {
    runner: R,
    resources: Resources,
}

impl<R: CommandRunner> DockerRuntime<R> {
    pub fn new(runner: R, resources: Resources) -> Self {
        Self { runner, resources }
    }

    async fn cli(&self, args: &[&str]) -> Result<Output> {
        self.runner.run(&self.resources.runtime, args).await
    }

    async fn cli_interactive(&self, args: &[&str]) -> Result<ExitStatus> {
        self.runner.run_status(&self.resources.runtime, args).await
    }
}

impl DockerRuntime<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner(resources: Resources) -> Self {
        Self::new(TokioCommandRunner::default(), resources)
    }
}

impl<R: CommandRunner> RuntimeProbe for DockerRuntime<R> {
    fn resources(&self) -> &Resources {
        &self.resources
    }

    async fn ping(&self) -> Result<Output> {
        self.cli(&["info", "--format", "{{.ServerVersion}}"])
            .await
            .context("runtime info")
    }
}

impl<R: CommandRunner> ImageStore for DockerRuntime<R> {
    async fn image_inspect(&self) -> Result<Output> {
        self.cli(&["image", "inspect", "--format", "{{.Id}}", &self.resources.image])
            .await
            .context("image inspect")
    }

    async fn build(&self, no_cache: bool) -> Result<ExitStatus> {
        let mut args = vec!["build", "-t", self.resources.image.as_str()];
        if no_cache {
            args.push("--no-cache");
        }
        args.push(".");
        self.cli_interactive(&args).await.context("image build")
    }
}

impl<R: CommandRunner> ContainerLifecycle for DockerRuntime<R> {
    async fn run(&self, spec: &RunSpec) -> Result<Output> {
        let args = spec.to_args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner
            .run_with_timeout(&self.resources.runtime, &args, RUN_TIMEOUT)
            .await
            .context("container run")
    }

    async fn start(&self) -> Result<Output> {
        self.cli(&["start", &self.resources.container])
            .await
            .context("container start")
    }

    async fn stop(&self) -> Result<Output> {
        self.cli(&["stop", &self.resources.container])
            .await
            .context("container stop")
    }

    async fn unpause(&self) -> Result<Output> {
        self.cli(&["unpause", &self.resources.container])
            .await
            .context("container unpause")
    }

    async fn remove(&self) -> Result<Output> {
        // No `-v`: anonymous or named, volumes outlive the container.
        self.cli(&["rm", &self.resources.container])
            .await
            .context("container rm")
    }
}

impl<R: CommandRunner> ContainerInspector for DockerRuntime<R> {
    async fn inspect_status(&self) -> Result<Output> {
        self.cli(&[
            "container",
            "inspect",
            "--format",
            "{{.State.Status}}",
            &self.resources.container,
        ])
        .await
        .context("container inspect")
    }
}

impl<R: CommandRunner> ContainerSession for DockerRuntime<R> {
    async fn attach(&self) -> Result<ExitStatus> {
        self.cli_interactive(&["attach", &self.resources.container])
            .await
            .context("container attach")
    }

    async fn exec_interactive(&self, args: &[&str]) -> Result<ExitStatus> {
        let tty = if std::io::stdin().is_terminal() { "-it" } else { "-i" };
        let mut full = vec!["exec", tty, self.resources.container.as_str()];
        full.extend_from_slice(args);
        self.cli_interactive(&full).await.context("container exec")
    }

    async fn logs(&self, tail: u32, follow: bool) -> Result<ExitStatus> {
        let tail = tail.to_string();
        let mut args = vec!["logs", "--tail", tail.as_str()];
        if follow {
            args.push("--follow");
        }
        args.push(&self.resources.container);
        self.cli_interactive(&args).await.context("container logs")
    }
}

impl<R: CommandRunner> VolumeStore for DockerRuntime<R> {
    async fn volume_inspect(&self) -> Result<Output> {
        self.cli(&["volume", "inspect", &self.resources.volume])
            .await
            .context("volume inspect")
    }

    async fn disk_usage(&self) -> Result<Output> {
        self.runner
            .run_with_timeout(
                &self.resources.runtime,
                &["system", "df", "-v"],
                DISK_USAGE_TIMEOUT,
            )
            .await
            .context("system df")
    }

    async fn volume_remove(&self) -> Result<Output> {
        self.cli(&["volume", "rm", &self.resources.volume])
            .await
            .context("volume rm")
    }
}

impl<R: CommandRunner> GpuProbe for DockerRuntime<R> {
    async fn gpu_query(&self) -> Result<Output> {
        self.runner
            .run_with_timeout("nvidia-smi", &["-L"], GPU_TIMEOUT)
            .await
            .context("nvidia-smi")
    }
}
