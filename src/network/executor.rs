// file: src/network/executor.rs
// version: 2.0.0
// guid: 8f16b2d9-4c7a-4e30-91d5-b2a6e47c0f83

//! Command execution trait for the remote host

use super::RemoteCommand;
use crate::error::{Result, TemplateError};
use serde::Serialize;
use tracing::{debug, error};

/// Captured result of one remote command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Stderr if present, otherwise stdout
    pub fn diagnostic(&self) -> String {
        if self.stderr.trim().is_empty() {
            self.stdout.trim().to_string()
        } else {
            self.stderr.trim().to_string()
        }
    }
}

/// Runs typed commands on the remote host
#[async_trait::async_trait]
pub trait RemoteExecutor: Send {
    /// Execute a command and capture its output.
    ///
    /// Returns `Err` only for transport problems; a non-zero remote exit is
    /// reported through [`CommandOutput::exit_code`].
    async fn run(&mut self, command: &RemoteCommand) -> Result<CommandOutput>;

    /// Execute command and return stdout, failing on a non-zero exit
    async fn run_with_output(&mut self, command: &RemoteCommand) -> Result<String> {
        let output = self.run(command).await?;

        if !output.success() {
            error!("Command '{}' failed with exit code {:?}", command, output.exit_code);
            if !output.stderr.trim().is_empty() {
                error!("STDERR: {}", output.stderr.trim());
            }
            return Err(TemplateError::remote(
                command.render(),
                output.exit_code,
                output.diagnostic(),
            ));
        }

        debug!("Command '{}' returned {} bytes", command, output.stdout.len());
        Ok(output.stdout)
    }
}
