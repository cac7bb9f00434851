// file: src/lib.rs
// version: 3.0.0
// guid: 7d3c1e95-b6a4-4082-9f1d-c4e08a2b57f3

//! # PVE Template Kit
//!
//! Preflight checks and container template provisioning for a remote
//! Proxmox VE host reached over SSH.
//!
//! Two binaries share this library: `pve-preflight` runs read-only
//! readiness checks, and `pve-template` makes sure the newest supported
//! Ubuntu LTS template is cached on the host, optionally pruning older ones.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod network;
pub mod preflight;
pub mod provision;
pub mod reporter;
pub mod security;
pub mod template;
pub mod utils;

pub use error::{Result, TemplateError};

/// Version information for the toolkit
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
