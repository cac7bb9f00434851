// file: src/utils/system.rs
// version: 2.0.0
// guid: 1c5b9e3f-86a2-4d07-b4f8-e03a7d61c29b

//! Local system checks

use crate::error::{Result, TemplateError};
use tracing::debug;

/// Commands the toolkit drives locally
pub const REQUIRED_COMMANDS: [&str; 2] = ["ssh", "ssh-keygen"];

/// System utility functions
pub struct SystemUtils;

impl SystemUtils {
    /// Check if a command exists in PATH
    pub fn command_exists(command: &str) -> bool {
        which::which(command).is_ok()
    }

    /// Commands from `required` that are not on PATH
    pub fn missing_commands(required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|cmd| {
                let found = Self::command_exists(cmd);
                debug!("{}: {}", cmd, if found { "found" } else { "missing" });
                !found
            })
            .map(|cmd| cmd.to_string())
            .collect()
    }

    /// Fail with every missing command listed at once
    pub fn check_prerequisites(required: &[&str]) -> Result<()> {
        let missing = Self::missing_commands(required);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(TemplateError::ToolingMissing(missing))
        }
    }
}
