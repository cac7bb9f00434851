// file: src/security/credential.rs
// version: 1.0.0
// guid: 61d3f8b2-a70e-4c19-b54d-e2f09c8a7d36

//! SSH private key checks
//!
//! A configured key must exist, be readable by its owner only, and look like
//! a private key before it is ever handed to ssh.

use crate::error::{Result, TemplateError};
use base64::Engine;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Permission modes accepted for a private key file
pub const ACCEPTED_KEY_MODES: [u32; 2] = [0o600, 0o400];

const OPENSSH_MAGIC: &[u8] = b"openssh-key-v1\0";

/// Run every check on the key file at `path`
pub fn validate_key_file(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|_| {
        TemplateError::credential(
            path,
            "file does not exist",
            "Set SSH_KEY_PATH to an existing private key or remove it to use the ssh agent",
        )
    })?;

    if !metadata.is_file() {
        return Err(TemplateError::credential(
            path,
            "not a regular file",
            "Point SSH_KEY_PATH at the private key file itself",
        ));
    }

    check_permissions(path, &metadata)?;

    let content = std::fs::read_to_string(path).map_err(|e| {
        TemplateError::credential(path, format!("cannot be read: {}", e), "Check the file owner and permissions")
    })?;
    check_key_format(path, &content)?;

    debug!("Key file {} passed validation", path.display());
    Ok(())
}

/// Mode must be exactly owner read-write or owner read-only
#[cfg(unix)]
pub fn check_permissions(path: &Path, metadata: &std::fs::Metadata) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = metadata.permissions().mode() & 0o777;
    if ACCEPTED_KEY_MODES.contains(&mode) {
        return Ok(());
    }

    Err(TemplateError::credential(
        path,
        format!("permissions {:o} are not allowed (expected 600 or 400)", mode),
        format!("Run: chmod 600 {}", path.display()),
    ))
}

#[cfg(not(unix))]
pub fn check_permissions(_path: &Path, _metadata: &std::fs::Metadata) -> Result<()> {
    Ok(())
}

/// Structural check of a PEM or OpenSSH private key
pub fn check_key_format(path: &Path, content: &str) -> Result<()> {
    let invalid = |reason: &str| {
        TemplateError::credential(
            path,
            reason,
            format!(
                "Use a private key file, or create one with: ssh-keygen -t ed25519 -f {}",
                path.display()
            ),
        )
    };

    let trimmed = content.trim();
    if trimmed.starts_with("ssh-") || trimmed.starts_with("ecdsa-") {
        return Err(invalid("file is a public key"));
    }

    let mut lines = trimmed.lines().map(str::trim);
    let label = lines
        .next()
        .and_then(|l| l.strip_prefix("-----BEGIN "))
        .and_then(|l| l.strip_suffix("-----"))
        .ok_or_else(|| invalid("missing BEGIN line"))?;

    if !label.ends_with("PRIVATE KEY") {
        return Err(invalid(&format!("unexpected key type '{}'", label)));
    }

    let end_line = format!("-----END {}-----", label);
    let mut body = String::new();
    let mut terminated = false;

    for line in lines {
        if line == end_line {
            terminated = true;
            break;
        }
        // legacy encrypted PEM headers
        if line.is_empty() || line.contains(':') {
            continue;
        }
        body.push_str(line);
    }

    if !terminated {
        return Err(invalid("missing matching END line"));
    }

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(body.as_bytes())
        .map_err(|e| invalid(&format!("key body is not valid base64: {}", e)))?;

    if decoded.is_empty() {
        return Err(invalid("key body is empty"));
    }
    if label == "OPENSSH PRIVATE KEY" && !decoded.starts_with(OPENSSH_MAGIC) {
        return Err(invalid("OpenSSH key header is corrupt"));
    }

    Ok(())
}

/// Fingerprint as printed by `ssh-keygen -l`, if the tool is available
pub async fn key_fingerprint(path: &Path) -> Option<String> {
    let output = Command::new("ssh-keygen")
        .arg("-l")
        .arg("-f")
        .arg(path)
        .stdin(Stdio::null())
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let line = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!line.is_empty()).then_some(line)
}
