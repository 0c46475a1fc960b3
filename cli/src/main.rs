//! agentbox - manage a container of command-line AI agents and a local model server

use std::process::ExitCode;

use agentbox_cli::cli::Cli;
use agentbox_cli::domain::ControllerError;
use agentbox_cli::output::json;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;

    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            report_error(&e, json_mode);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr and stay at `warn` unless `-v` or `RUST_LOG` asks for more.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "agentbox_cli=debug,agentbox=debug",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report_error(e: &anyhow::Error, json_mode: bool) {
    if json_mode {
        let code = e
            .downcast_ref::<ControllerError>()
            .map_or("ERROR", ControllerError::code);
        if let Ok(text) = json::format_error(&format!("{e:#}"), code) {
            println!("{text}");
            return;
        }
    }
    eprintln!("Error: {e:#}");
}
