// file: src/security/validator.rs
// version: 2.0.0
// guid: e7b3c5a0-2f91-4d68-8a4c-53f1d6e9b027

//! Connection validation shared by preflight and provisioning

use super::credential;
use crate::config::ConnectionConfig;
use crate::error::{Result, TemplateError};
use crate::network::{RemoteCommand, RemoteExecutor};
use tracing::{debug, info};

/// Validates configuration, key file and reachability of the remote host
pub struct ConnectionValidator<'a> {
    connection: &'a ConnectionConfig,
}

impl<'a> ConnectionValidator<'a> {
    pub fn new(connection: &'a ConnectionConfig) -> Self {
        Self { connection }
    }

    /// Required fields are present
    pub fn check_config(&self) -> Result<()> {
        self.connection.validate()
    }

    /// Key file exists, is private and well formed; no-op without a key
    pub fn check_credential(&self) -> Result<()> {
        match &self.connection.key_path {
            Some(path) => credential::validate_key_file(path),
            None => {
                debug!("No SSH_KEY_PATH configured, relying on ssh defaults");
                Ok(())
            }
        }
    }

    /// One non-interactive probe; any failure is definitive
    pub async fn check_connectivity<E: RemoteExecutor + ?Sized>(&self, executor: &mut E) -> Result<String> {
        let destination = self.connection.destination();
        let output = executor
            .run(&RemoteCommand::version())
            .await
            .map_err(|e| match e {
                TemplateError::ToolingMissing(_) | TemplateError::ConnectivityFailure(_) => e,
                other => TemplateError::connectivity(format!("{}: {}", destination, other)),
            })?;

        if !output.success() {
            return Err(TemplateError::connectivity(format!(
                "{} answered the probe with exit code {:?}: {}",
                destination,
                output.exit_code,
                output.diagnostic()
            )));
        }

        let version = output.stdout.trim().to_string();
        info!("Connected to {} ({})", destination, version);
        Ok(version)
    }

    /// Run all checks in order, stopping at the first failure
    pub async fn validate<E: RemoteExecutor + ?Sized>(&self, executor: &mut E) -> Result<String> {
        self.check_config()?;
        self.check_credential()?;
        self.check_connectivity(executor).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::executor::mock::ScriptedExecutor;
    use std::path::PathBuf;

    fn connection() -> ConnectionConfig {
        ConnectionConfig {
            host: "h".to_string(),
            user: "u".to_string(),
            key_path: None,
            port: 22,
        }
    }

    #[tokio::test]
    async fn test_validate_without_key_probes_once() {
        let config = connection();
        let mut executor = ScriptedExecutor::new().on("pveversion", 0, "pve-manager/8.2.4 (running kernel: 6.8.12-1-pve)\n");

        let version = ConnectionValidator::new(&config).validate(&mut executor).await.unwrap();

        assert_eq!(version, "pve-manager/8.2.4 (running kernel: 6.8.12-1-pve)");
        assert_eq!(executor.calls, vec!["pveversion"]);
    }

    #[tokio::test]
    async fn test_probe_failure_is_connectivity_error() {
        let config = connection();
        let mut executor = ScriptedExecutor::new().on("pveversion", 1, "");

        let err = ConnectionValidator::new(&config).validate(&mut executor).await.unwrap_err();

        assert!(matches!(err, TemplateError::ConnectivityFailure(_)));
        assert_eq!(executor.calls.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_probe() {
        let mut config = connection();
        config.key_path = Some(PathBuf::from("/nonexistent/key"));
        let mut executor = ScriptedExecutor::new().on("pveversion", 0, "ok");

        let err = ConnectionValidator::new(&config).validate(&mut executor).await.unwrap_err();

        assert!(matches!(err, TemplateError::CredentialInvalid { .. }));
        assert!(executor.calls.is_empty());
    }

    #[tokio::test]
    async fn test_empty_host_fails_before_probe() {
        let mut config = connection();
        config.host = String::new();
        let mut executor = ScriptedExecutor::new();

        let err = ConnectionValidator::new(&config).validate(&mut executor).await.unwrap_err();

        assert!(matches!(err, TemplateError::ConfigInvalid(_)));
        assert!(executor.calls.is_empty());
    }
}
