//! Interactive menu — the default when no subcommand is given.

use std::io::IsTerminal as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::Prompter;
use crate::application::services::status::gather_status;
use crate::commands::{attach, build, delete, download, logs, start, status, stop, volume};
use crate::domain::{ControllerError, ModelSet};
use crate::output::{human, progress};

/// One selectable menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Build,
    Rebuild,
    Start,
    Stop,
    Attach,
    Shell,
    Logs,
    Download,
    Status,
    Delete,
    Volume,
    Quit,
}

impl MenuAction {
    /// Entries in display order. Entry `n` is selected by typing `n + 1`.
    pub const ENTRIES: [MenuAction; 12] = [
        MenuAction::Build,
        MenuAction::Rebuild,
        MenuAction::Start,
        MenuAction::Stop,
        MenuAction::Attach,
        MenuAction::Shell,
        MenuAction::Logs,
        MenuAction::Download,
        MenuAction::Status,
        MenuAction::Delete,
        MenuAction::Volume,
        MenuAction::Quit,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Build => "Build image",
            MenuAction::Rebuild => "Rebuild image (no cache)",
            MenuAction::Start => "Start container",
            MenuAction::Stop => "Stop container",
            MenuAction::Attach => "Attach to container",
            MenuAction::Shell => "Open a shell in the container",
            MenuAction::Logs => "Show logs",
            MenuAction::Download => "Download models",
            MenuAction::Status => "Status",
            MenuAction::Delete => "Delete container",
            MenuAction::Volume => "Manage model volume",
            MenuAction::Quit => "Quit",
        }
    }

    /// Labels of every entry, in display order.
    #[must_use]
    pub fn labels() -> Vec<&'static str> {
        Self::ENTRIES.iter().map(|a| a.label()).collect()
    }

    /// Parse a typed choice. Accepts the entry number or `q`.
    #[must_use]
    pub fn parse(choice: &str) -> Option<MenuAction> {
        let choice = choice.trim();
        if choice.eq_ignore_ascii_case("q") {
            return Some(MenuAction::Quit);
        }
        let n: usize = choice.parse().ok()?;
        Self::ENTRIES.get(n.checked_sub(1)?).copied()
    }
}

/// Run the interactive menu until the user quits.
///
/// # Errors
///
/// Returns an error when stdin is not interactive, or when the container
/// runtime is unavailable.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    if app.non_interactive || !std::io::stdin().is_terminal() {
        anyhow::bail!("the menu needs an interactive terminal; run `agentbox --help` for commands");
    }

    loop {
        print_header(app).await;
        human::render_menu(&app.output, &MenuAction::labels());

        let choice = app.prompter.input("Choose")?;
        let Some(action) = MenuAction::parse(&choice) else {
            app.output.warn(&format!("Unknown choice: {}", choice.trim()));
            continue;
        };
        if action == MenuAction::Quit {
            return Ok(ExitCode::SUCCESS);
        }

        if let Err(e) = dispatch(app, action).await {
            if e
                .downcast_ref::<ControllerError>()
                .is_some_and(ControllerError::is_fatal)
            {
                return Err(e);
            }
            app.output.error(&format!("{e:#}"));
        }
        println!();
    }
}

async fn print_header(app: &AppContext) {
    let report = progress::with_spinner(
        app.output.show_progress(),
        "Checking status...",
        gather_status(&app.runtime),
    )
    .await;
    app.output.title("agentbox");
    human::render_status(&app.output, &report);
    println!();
}

async fn dispatch(app: &AppContext, action: MenuAction) -> Result<ExitCode> {
    match action {
        MenuAction::Build => build::run(app, false).await,
        MenuAction::Rebuild => build::run(app, true).await,
        MenuAction::Start => {
            let typed = app
                .prompter
                .input("Workspace path (empty for the current directory)")?;
            let typed = typed.trim();
            let args = start::StartArgs {
                path: (!typed.is_empty()).then(|| PathBuf::from(typed)),
            };
            start::run(app, &args).await
        }
        MenuAction::Stop => stop::run(app).await,
        MenuAction::Attach => attach::attach(app).await,
        MenuAction::Shell => attach::shell(app).await,
        MenuAction::Logs => {
            let args = logs::LogsArgs {
                tail: 100,
                follow: false,
            };
            logs::run(app, &args).await
        }
        MenuAction::Download => {
            let labels: Vec<&str> = ModelSet::ALL.iter().map(|s| s.as_str()).collect();
            let default = ModelSet::ALL
                .iter()
                .position(|s| *s == ModelSet::default())
                .unwrap_or(0);
            let picked = app.prompter.select("Model set", &labels, default)?;
            let mode = ModelSet::ALL.get(picked).copied().unwrap_or_default();
            download::run(app, &download::DownloadArgs { mode }).await
        }
        MenuAction::Status => status::run(app).await,
        MenuAction::Delete => delete::run(app).await,
        MenuAction::Volume => volume::run(app).await,
        MenuAction::Quit => Ok(ExitCode::SUCCESS),
    }
}
