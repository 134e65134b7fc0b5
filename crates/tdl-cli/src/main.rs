//! # tdl-validate entry point
//!
//! Parses command-line arguments, installs logging, and runs the validate
//! command. Logs go to stderr so stdout carries only the report.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tdl_cli::validate::{run_validate, ValidateArgs};
use tdl_cli::EXIT_ENVIRONMENT;

/// Validate TDL (Tutor Description Language) files.
///
/// Checks instructional models, learning sequences, and engine
/// configurations against their JSON schemas.
#[derive(Parser, Debug)]
#[command(name = "tdl-validate", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    args: ValidateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("tdl-validate v{} starting", env!("CARGO_PKG_VERSION"));

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    match run_validate(&cli.args, &mut stdout.lock(), &mut stderr.lock()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ENVIRONMENT)
        }
    }
}
