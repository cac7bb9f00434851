// file: src/cli/commands.rs
// version: 2.0.0
// guid: 93a0c6f2-5d17-4e8b-b2c4-0f6e1a8d3b79

//! Command implementations for the CLI

use super::args::{PreflightCli, ProvisionCli};
use crate::{
    config::ConfigLoader,
    network::SshClient,
    preflight::Preflight,
    provision::Provisioner,
    reporter,
    utils::SystemUtils,
    Result,
};
use tracing::info;

/// Run the read-only readiness checks and print the report
pub async fn preflight_command(cli: &PreflightCli) -> Result<()> {
    info!("Running preflight checks with {}", cli.common.env_file.display());

    let report = Preflight::new(&cli.common.env_file)
        .run(SshClient::new)
        .await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", reporter::format_preflight(&report));
    }

    match report.into_failure() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Make sure the newest supported template is cached on the host
pub async fn provision_command(cli: &ProvisionCli) -> Result<()> {
    let config = ConfigLoader::new().load_env_file(&cli.common.env_file)?;
    info!("Provisioning templates on {}", config.connection.destination());

    SystemUtils::check_prerequisites(&["ssh"])?;

    let mut client = SshClient::new(&config.connection);
    let summary = Provisioner::new(&config)?
        .with_progress(!cli.common.quiet)
        .run(&mut client)
        .await?;

    print!("{}", reporter::format_summary(&summary));
    Ok(())
}
