// file: src/preflight/mod.rs
// version: 1.0.0
// guid: d09c7e52-3a6f-4b81-a5e4-2f8b16d0c937

//! Read-only readiness checks
//!
//! Confirms local tooling, configuration, key file and remote reachability
//! without changing anything on the host.

use crate::config::{ConfigLoader, ConnectionConfig, ProvisionConfig};
use crate::error::TemplateError;
use crate::network::RemoteExecutor;
use crate::security::{credential, ConnectionValidator};
use crate::utils::{SystemUtils, REQUIRED_COMMANDS};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Outcome of one check
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
}

/// Ordered results of a preflight run
#[derive(Debug, Default, Serialize)]
pub struct PreflightReport {
    pub passed: bool,
    pub checks: Vec<CheckResult>,
    #[serde(skip)]
    failure: Option<TemplateError>,
}

impl PreflightReport {
    fn pass(&mut self, name: &str, detail: impl Into<String>) {
        self.checks.push(CheckResult {
            name: name.to_string(),
            passed: true,
            detail: detail.into(),
            category: None,
        });
    }

    fn fail(&mut self, name: &str, error: TemplateError) {
        self.checks.push(CheckResult {
            name: name.to_string(),
            passed: false,
            detail: error.to_string(),
            category: Some(error.category()),
        });
        self.passed = false;
        self.failure = Some(error);
    }

    /// The error that stopped the run, if any
    pub fn failure(&self) -> Option<&TemplateError> {
        self.failure.as_ref()
    }

    pub fn into_failure(self) -> Option<TemplateError> {
        self.failure
    }
}

/// Preflight run configuration
pub struct Preflight {
    env_file: PathBuf,
    required_commands: Vec<String>,
    loader: ConfigLoader,
}

impl Preflight {
    pub fn new(env_file: impl Into<PathBuf>) -> Self {
        Self {
            env_file: env_file.into(),
            required_commands: REQUIRED_COMMANDS.iter().map(|c| c.to_string()).collect(),
            loader: ConfigLoader::new(),
        }
    }

    /// Replace the list of local commands that must be on PATH
    pub fn with_required_commands(mut self, commands: &[&str]) -> Self {
        self.required_commands = commands.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_loader(mut self, loader: ConfigLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Run every check in order, stopping at the first failure.
    ///
    /// `connect` builds the executor once the configuration is known.
    pub async fn run<F, E>(&self, connect: F) -> PreflightReport
    where
        F: FnOnce(&ConnectionConfig) -> E,
        E: RemoteExecutor,
    {
        let mut report = PreflightReport {
            passed: true,
            ..Default::default()
        };

        let required: Vec<&str> = self.required_commands.iter().map(String::as_str).collect();
        match SystemUtils::check_prerequisites(&required) {
            Ok(()) => report.pass("Local tooling", required.join(", ")),
            Err(e) => {
                report.fail("Local tooling", e);
                return report;
            }
        }

        let config: ProvisionConfig = match self.loader.load_env_file(&self.env_file) {
            Ok(config) => config,
            Err(e) => {
                report.fail("Configuration", e);
                return report;
            }
        };
        let connection = &config.connection;
        report.pass(
            "Configuration",
            format!("{} (port {})", connection.destination(), connection.port),
        );

        let validator = ConnectionValidator::new(connection);
        if let Err(e) = validator.check_credential() {
            report.fail("SSH key", e);
            return report;
        }
        match &connection.key_path {
            Some(path) => {
                let fingerprint = credential::key_fingerprint(path)
                    .await
                    .unwrap_or_else(|| "fingerprint unavailable".to_string());
                report.pass("SSH key", format!("{}: {}", path.display(), fingerprint));
            }
            None => report.pass("SSH key", "not configured, using ssh agent and defaults"),
        }

        let mut executor = connect(connection);
        match validator.check_connectivity(&mut executor).await {
            Ok(version) => report.pass("Remote host", version),
            Err(e) => {
                report.fail("Remote host", e);
                return report;
            }
        }

        info!("Preflight passed for {}", connection.destination());
        report
    }
}
