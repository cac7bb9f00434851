// file: src/bin/provision.rs
// version: 1.0.0
// guid: 0a9f4c62-7e3b-4d15-b8a0-e5c23d71f84b

//! pve-template - cache the newest Ubuntu LTS container template on the host

use clap::Parser;
use pve_template_kit::{
    cli::{provision_command, ProvisionCli},
    logging::logger,
    reporter,
};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = ProvisionCli::parse();

    // Initialize logging
    if let Err(e) = logger::init_logger(cli.common.verbose, cli.common.quiet) {
        eprintln!("{}", reporter::format_error(&e));
    }

    match provision_command(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", reporter::format_error(&e));
            ExitCode::FAILURE
        }
    }
}
