// file: src/cli/mod.rs
// version: 2.0.0
// guid: c81f5a3e-0b92-4d67-a4e8-3d7b06c2f915

//! Command line interface for the preflight and provisioning binaries

pub mod args;
pub mod commands;

pub use args::{PreflightCli, ProvisionCli};
pub use commands::*;
