// file: src/error.rs
// version: 3.0.0
// guid: 5c1e8a42-9d3f-4b7e-a6c2-0f18d94e7b31

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Fatal error categories for preflight and provisioning runs
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Missing required commands: {}", .0.join(", "))]
    ToolingMissing(Vec<String>),

    #[error("Configuration error: {0}")]
    ConfigInvalid(String),

    #[error("Invalid SSH key {}: {reason}. {remediation}", .path.display())]
    CredentialInvalid {
        path: PathBuf,
        reason: String,
        remediation: String,
    },

    #[error("Cannot reach remote host: {0}")]
    ConnectivityFailure(String),

    #[error("No supported template found: {0}")]
    NoCandidateFound(String),

    #[error("Remote command '{command}' failed (exit code {exit_code:?}): {stderr}")]
    RemoteCommandFailure {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TemplateError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigInvalid(msg.into())
    }

    /// Create a new credential error for the given key path
    pub fn credential(
        path: impl AsRef<Path>,
        reason: impl Into<String>,
        remediation: impl Into<String>,
    ) -> Self {
        Self::CredentialInvalid {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
            remediation: remediation.into(),
        }
    }

    /// Create a new connectivity error
    pub fn connectivity(msg: impl Into<String>) -> Self {
        Self::ConnectivityFailure(msg.into())
    }

    /// Create a new "no candidate" error
    pub fn no_candidate(msg: impl Into<String>) -> Self {
        Self::NoCandidateFound(msg.into())
    }

    /// Create a new remote command error
    pub fn remote(command: impl Into<String>, exit_code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self::RemoteCommandFailure {
            command: command.into(),
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Short label printed in front of the diagnostic line
    pub fn category(&self) -> &'static str {
        match self {
            Self::ToolingMissing(_) => "TOOLING",
            Self::ConfigInvalid(_) => "CONFIG",
            Self::CredentialInvalid { .. } => "CREDENTIAL",
            Self::ConnectivityFailure(_) => "CONNECTIVITY",
            Self::NoCandidateFound(_) => "TEMPLATE",
            Self::RemoteCommandFailure { .. } => "REMOTE",
            Self::Io(_) => "IO",
            Self::Serialization(_) => "OUTPUT",
        }
    }
}
