// file: src/network/ssh.rs
// version: 2.0.0
// guid: c4a09e17-8b2d-4f6c-a3e5-19d7b0f42c6a

//! SSH client for remote template operations
//!
//! Drives the local `ssh` binary in batch mode. Authentication failures and
//! unreachable hosts fail fast instead of prompting.

use super::{CommandOutput, RemoteCommand, RemoteExecutor};
use crate::config::ConnectionConfig;
use crate::error::{Result, TemplateError};
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Seconds allowed for establishing the SSH connection
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Exit status the ssh client uses for its own errors
const SSH_ERROR_EXIT: i32 = 255;

/// SSH client bound to one host
pub struct SshClient {
    connection: ConnectionConfig,
    program: String,
}

impl SshClient {
    /// Create a new SSH client for the configured host
    pub fn new(connection: &ConnectionConfig) -> Self {
        Self {
            connection: connection.clone(),
            program: "ssh".to_string(),
        }
    }

    /// Use a different ssh executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Arguments passed to the ssh binary for one remote command
    pub fn ssh_args(&self, command: &RemoteCommand) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            "BatchMode=yes".to_string(),
            "-o".to_string(),
            format!("ConnectTimeout={}", CONNECT_TIMEOUT_SECS),
            "-o".to_string(),
            "StrictHostKeyChecking=accept-new".to_string(),
            "-p".to_string(),
            self.connection.port.to_string(),
        ];

        if let Some(key) = &self.connection.key_path {
            args.push("-i".to_string());
            args.push(key.display().to_string());
            args.push("-o".to_string());
            args.push("IdentitiesOnly=yes".to_string());
        }

        // option parsing ends before the destination
        args.push("--".to_string());
        args.push(self.connection.destination());
        args.push(command.render());
        args
    }
}

#[async_trait::async_trait]
impl RemoteExecutor for SshClient {
    async fn run(&mut self, command: &RemoteCommand) -> Result<CommandOutput> {
        debug!("[{}] {}", self.connection.destination(), command);

        let output = Command::new(&self.program)
            .args(self.ssh_args(command))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => TemplateError::ToolingMissing(vec![self.program.clone()]),
                _ => TemplateError::Io(e),
            })?;

        let result = CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if result.exit_code == Some(SSH_ERROR_EXIT) {
            return Err(TemplateError::connectivity(format!(
                "ssh to {} failed: {}",
                self.connection.destination(),
                result.diagnostic()
            )));
        }

        debug!("Exit code {:?}", result.exit_code);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn connection(key: Option<&str>) -> ConnectionConfig {
        ConnectionConfig {
            host: "pve.lan".to_string(),
            user: "root".to_string(),
            key_path: key.map(PathBuf::from),
            port: 22,
        }
    }

    #[test]
    fn test_args_are_batch_mode_with_timeout() {
        let client = SshClient::new(&connection(None));

        let args = client.ssh_args(&RemoteCommand::version());

        assert_eq!(
            args,
            vec![
                "-o",
                "BatchMode=yes",
                "-o",
                "ConnectTimeout=10",
                "-o",
                "StrictHostKeyChecking=accept-new",
                "-p",
                "22",
                "--",
                "root@pve.lan",
                "pveversion",
            ]
        );
    }

    #[test]
    fn test_args_include_identity_file() {
        let client = SshClient::new(&connection(Some("/keys/pve")));

        let args = client.ssh_args(&RemoteCommand::file_exists("/var/lib/vz/template/cache/a b"));

        let i = args.iter().position(|a| a == "-i").unwrap();
        assert_eq!(args[i + 1], "/keys/pve");
        assert!(args.contains(&"IdentitiesOnly=yes".to_string()));
        assert_eq!(args.last().unwrap(), "test -f '/var/lib/vz/template/cache/a b'");
    }

    #[test]
    fn test_destination_follows_option_terminator() {
        let mut conn = connection(Some("/keys/pve"));
        conn.port = 2222;
        let client = SshClient::new(&conn);

        let args = client.ssh_args(&RemoteCommand::version());

        let end = args.iter().position(|a| a == "--").unwrap();
        assert_eq!(args[end + 1], "root@pve.lan");
        assert_eq!(args.len(), end + 3);
        assert!(args[..end].iter().all(|a| !a.contains('@')));
    }

    /// Executable shell script standing in for the ssh binary
    #[cfg(unix)]
    fn fake_ssh(body: &str) -> tempfile::TempPath {
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        let mut file = tempfile::Builder::new().prefix("fake-ssh").tempfile().unwrap();
        writeln!(file, "#!/bin/sh\n{}", body).unwrap();
        let path = file.into_temp_path();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_ssh_error_exit_is_connectivity_failure() {
        let script = fake_ssh("echo 'ssh: connect to host pve.lan port 22: Connection timed out' >&2\nexit 255");
        let mut client = SshClient::new(&connection(None)).with_program(script.to_string_lossy());

        let err = client.run(&RemoteCommand::version()).await.unwrap_err();

        assert!(matches!(err, TemplateError::ConnectivityFailure(_)));
        let msg = err.to_string();
        assert!(msg.contains("root@pve.lan"), "{}", msg);
        assert!(msg.contains("Connection timed out"), "{}", msg);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_remote_exit_code_is_returned() {
        let script = fake_ssh("echo listing\necho 'no such file' >&2\nexit 2");
        let mut client = SshClient::new(&connection(None)).with_program(script.to_string_lossy());

        let output = client.run(&RemoteCommand::list_directory("/var/lib/vz/template/cache")).await.unwrap();

        assert_eq!(output.exit_code, Some(2));
        assert_eq!(output.stdout.trim(), "listing");
        assert!(output.stderr.contains("no such file"));
    }

    #[tokio::test]
    async fn test_missing_ssh_binary_is_tooling_error() {
        let mut client =
            SshClient::new(&connection(None)).with_program("definitely-not-an-ssh-binary-7f3a");

        let err = client.run(&RemoteCommand::version()).await.unwrap_err();

        assert!(matches!(err, TemplateError::ToolingMissing(ref tools) if tools[0] == "definitely-not-an-ssh-binary-7f3a"));
    }
}
