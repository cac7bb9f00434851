// file: src/config/mod.rs
// version: 2.0.0
// guid: 7b2f0c6e-31a4-4d8e-9f52-c8a1e03d6b94

//! Configuration module for the template toolkit
//!
//! Holds the immutable connection and provisioning settings loaded once per
//! run from a key-value environment file.

pub mod loader;

pub use loader::ConfigLoader;

use crate::error::{Result, TemplateError};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Default SSH port on the remote host
pub const DEFAULT_SSH_PORT: u16 = 22;

/// Hint printed whenever the configuration file is missing or incomplete
pub const CONFIG_HINT: &str = "Copy the example file and fill it in: cp .env.example .env";

/// Connection settings for the remote host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionConfig {
    pub host: String,
    pub user: String,
    pub key_path: Option<PathBuf>,
    pub port: u16,
}

impl ConnectionConfig {
    /// `user@host` destination used by the ssh client
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    /// Confirm that the required fields are set
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.host.trim().is_empty() {
            missing.push("HOST");
        }
        if self.user.trim().is_empty() {
            missing.push("USER");
        }

        if !missing.is_empty() {
            return Err(TemplateError::config(format!(
                "Missing required configuration: {}. {}",
                missing.join(", "),
                CONFIG_HINT
            )));
        }

        check_destination_part("HOST", &self.host)?;
        check_destination_part("USER", &self.user)?;
        Ok(())
    }
}

/// Reject values ssh would read as an option or that break `user@host`
fn check_destination_part(key: &str, value: &str) -> Result<()> {
    if value.starts_with('-') {
        return Err(TemplateError::config(format!(
            "{} must not start with '-', got '{}'",
            key, value
        )));
    }
    if value.chars().any(|c| c.is_whitespace() || c.is_control() || c == '@') {
        return Err(TemplateError::config(format!(
            "{} must not contain whitespace or '@', got '{}'",
            key, value
        )));
    }
    Ok(())
}

/// Full settings for a provisioning run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionConfig {
    pub connection: ConnectionConfig,
    pub force_download: bool,
    pub cleanup_old_templates: bool,
}

impl ProvisionConfig {
    /// Build the configuration from parsed `KEY=VALUE` entries
    pub fn from_map(values: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| {
            values
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let connection = ConnectionConfig {
            host: get("HOST").unwrap_or_default(),
            user: get("USER").unwrap_or_default(),
            key_path: get("SSH_KEY_PATH").map(|p| PathBuf::from(shellexpand::tilde(&p).into_owned())),
            port: match get("SSH_PORT") {
                Some(raw) => raw.parse::<u16>().map_err(|_| {
                    TemplateError::config(format!("SSH_PORT must be a port number, got '{}'", raw))
                })?,
                None => DEFAULT_SSH_PORT,
            },
        };
        connection.validate()?;

        Ok(Self {
            connection,
            force_download: parse_flag("FORCE_DOWNLOAD", get("FORCE_DOWNLOAD"))?,
            cleanup_old_templates: parse_flag("CLEANUP_OLD_TEMPLATES", get("CLEANUP_OLD_TEMPLATES"))?,
        })
    }
}

fn parse_flag(key: &str, value: Option<String>) -> Result<bool> {
    let Some(value) = value else {
        return Ok(false);
    };

    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(TemplateError::config(format!(
            "{} must be true or false, got '{}'",
            key, value
        ))),
    }
}
