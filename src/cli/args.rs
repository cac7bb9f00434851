// file: src/cli/args.rs
// version: 2.0.0
// guid: 2b7e9d14-f0a6-4c38-8d51-e6a3c07b92f5

//! Command line argument definitions
//!
//! Workflow behavior comes from the configuration file only; the flags here
//! select that file and control output.

use crate::config::loader::DEFAULT_ENV_FILE;
use clap::{Args, Parser};
use std::path::PathBuf;

/// Options shared by both binaries
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Configuration file with HOST, USER and optional settings
    #[arg(long, env = "PVE_ENV_FILE", default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,

    #[arg(short, long)]
    pub verbose: bool,

    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Parser, Debug)]
#[command(name = "pve-preflight")]
#[command(about = "Check that this machine is ready to manage a Proxmox VE host over SSH")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct PreflightCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(name = "pve-template")]
#[command(about = "Download the newest Ubuntu LTS container template to a Proxmox VE host")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct ProvisionCli {
    #[command(flatten)]
    pub common: CommonArgs,
}
