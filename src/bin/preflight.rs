// file: src/bin/preflight.rs
// version: 1.0.0
// guid: 5e0d8b37-a4c1-4f92-86e3-b1f7c2a90d46

//! pve-preflight - read-only readiness checks

use clap::Parser;
use pve_template_kit::{
    cli::{preflight_command, PreflightCli},
    logging::logger,
    reporter,
};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = PreflightCli::parse();

    // Initialize logging
    if let Err(e) = logger::init_logger(cli.common.verbose, cli.common.quiet) {
        eprintln!("{}", reporter::format_error(&e));
    }

    match preflight_command(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", reporter::format_error(&e));
            ExitCode::FAILURE
        }
    }
}
