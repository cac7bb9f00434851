// file: src/network/mod.rs
// version: 2.0.0
// guid: 93e5a1c8-0f47-4b2d-8e6a-d5c2b71f09e4

//! Remote command plumbing

pub mod command;
pub mod executor;
pub mod ssh;

pub use command::RemoteCommand;
pub use executor::{CommandOutput, RemoteExecutor};
pub use ssh::SshClient;
